//! In-process test server and WebSocket helpers shared by the integration tests.

#![allow(dead_code)]

use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use podium_server::{
    config::ServerConfig,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    ui::Server,
    usecase::{
        GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase,
        PushStateUseCase, ReapIdleRoomsUseCase,
    },
};
use podium_shared::time::{Clock, SystemClock};
use serde_json::Value;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

pub type WsClient = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Server running on an ephemeral port inside the test runtime
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with_static_dir(None).await
    }

    pub async fn start_with_static_dir(static_dir: Option<PathBuf>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let config = ServerConfig {
            port: addr.port(),
            static_dir,
            ..ServerConfig::default()
        };

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let repository = Arc::new(InMemoryRoomRepository::new());
        let message_pusher = Arc::new(WebSocketMessagePusher::new());
        let server = Server::new(
            Arc::new(JoinRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            Arc::new(LeaveRoomUseCase::new(message_pusher.clone(), clock.clone())),
            Arc::new(PushStateUseCase::new(message_pusher, clock.clone())),
            Arc::new(GetRoomsUseCase::new(repository.clone())),
            Arc::new(GetRoomDetailUseCase::new(repository.clone())),
            Arc::new(ReapIdleRoomsUseCase::new(
                repository,
                clock.clone(),
                config.idle_timeout,
            )),
            clock,
        );

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            server
                .serve(listener, &config, shutdown)
                .await
                .expect("server failed");
        });

        Self {
            addr,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn connect(&self) -> WsClient {
        let (ws, _response) = connect_async(self.ws_url()).await.unwrap();
        ws
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

pub async fn send_json(ws: &mut WsClient, value: Value) {
    ws.send(Message::Text(value.to_string().into())).await.unwrap();
}

pub async fn send_text(ws: &mut WsClient, text: &str) {
    ws.send(Message::Text(text.to_string().into())).await.unwrap();
}

/// Wait for the next text frame and parse it as JSON
pub async fn recv_json(ws: &mut WsClient) -> Value {
    let wait = async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => {
                    return serde_json::from_str(text.as_str()).unwrap();
                }
                Some(Ok(_)) => continue,
                other => panic!("connection ended while waiting for a message: {:?}", other),
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(5), wait)
        .await
        .expect("timed out waiting for a message")
}

/// Assert that no text frame arrives within a short window
pub async fn assert_silent(ws: &mut WsClient) {
    let wait = async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => return Some(text.to_string()),
                Some(Ok(_)) => continue,
                _ => return None,
            }
        }
    };
    if let Ok(Some(text)) = tokio::time::timeout(Duration::from_millis(300), wait).await {
        panic!("unexpected message: {}", text);
    }
}

/// Join a room and return the `joined` reply
pub async fn join(ws: &mut WsClient, code: &str, id: &str, as_host: bool) -> Value {
    send_json(
        ws,
        serde_json::json!({"type": "join", "code": code, "id": id, "asHost": as_host}),
    )
    .await;
    recv_json(ws).await
}

/// Round-trip a ping so that every earlier frame of this connection has been handled
pub async fn sync(ws: &mut WsClient) {
    send_json(ws, serde_json::json!({"type": "ping"})).await;
    let pong = recv_json(ws).await;
    assert_eq!(pong["type"], "pong");
}
