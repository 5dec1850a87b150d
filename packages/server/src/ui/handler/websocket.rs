//! WebSocket connection handlers.
//!
//! 1 接続 = 1 タスク。受信したフレームを順番に処理し、送信は `pusher_loop` が
//! チャンネル経由で行います。不正なメッセージやホスト以外からの状態送信は
//! 接続を切らずに黙って破棄します。

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, PeerId, PusherChannel, RelayEvent, RoomCode, RoomState, Timestamp},
    infrastructure::dto::websocket::{ClientMessage, ServerMessage},
    ui::state::AppState,
    usecase::{JoinRequest, RoomSession},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: events for this peer (via rx channel)
/// are sent to this client's WebSocket connection in the order they were queued.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    tracing::debug!("Connection {} opened", connection_id);

    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();
    let mut send_task = pusher_loop(rx, sender);

    // join するまでは None
    let mut session: Option<RoomSession> = None;

    loop {
        tokio::select! {
            _ = &mut send_task => {
                tracing::debug!("Connection {} writer stopped", connection_id);
                break;
            }
            incoming = receiver.next() => {
                let msg = match incoming {
                    Some(Ok(msg)) => msg,
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket error on connection {}: {}", connection_id, e);
                        break;
                    }
                    None => break,
                };

                let text = match msg {
                    Message::Text(text) => text.to_string(),
                    Message::Binary(bytes) => match String::from_utf8(bytes.to_vec()) {
                        Ok(text) => text,
                        Err(_) => {
                            tracing::debug!(
                                "Dropping non UTF-8 binary frame on connection {}",
                                connection_id
                            );
                            continue;
                        }
                    },
                    Message::Close(_) => {
                        tracing::debug!("Connection {} requested close", connection_id);
                        break;
                    }
                    // Ping/pong frames are handled by the WebSocket protocol
                    _ => continue,
                };

                dispatch(&state, connection_id, &tx, &mut session, &text).await;
            }
        }
    }

    send_task.abort();

    if let Some(session) = session.take() {
        state.leave_room_usecase.execute(session).await;
    }
    tracing::debug!("Connection {} closed", connection_id);
}

/// 1 つのテキストフレームを処理する
async fn dispatch(
    state: &AppState,
    connection_id: ConnectionId,
    tx: &PusherChannel,
    session: &mut Option<RoomSession>,
    text: &str,
) {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!(
                "Dropping malformed message on connection {}: {}",
                connection_id,
                e
            );
            return;
        }
    };

    match message {
        ClientMessage::Join { code, id, as_host } => {
            // 1 接続につき同時に参加できるのは 1 つだけ
            if let Some(previous) = session.take() {
                state.leave_room_usecase.execute(previous).await;
            }
            let joined = state
                .join_room_usecase
                .execute(JoinRequest {
                    connection_id,
                    code: RoomCode::new(code),
                    peer_id: PeerId::new(id),
                    as_host: as_host.unwrap_or(false),
                    channel: tx.clone(),
                })
                .await;
            *session = Some(joined);
        }
        ClientMessage::State { state: value } => {
            let Some(current) = session.as_ref() else {
                tracing::debug!(
                    "Dropping state from connection {} before join",
                    connection_id
                );
                return;
            };
            if let Err(e) = state
                .push_state_usecase
                .execute(current, RoomState::new(value))
                .await
            {
                tracing::debug!("{}", e);
            }
        }
        ClientMessage::Ping => {
            let pong = ServerMessage::from(RelayEvent::Pong {
                at: Timestamp::new(state.clock.now_millis()),
            });
            match serde_json::to_string(&pong) {
                Ok(json) => {
                    if tx.send(json).is_err() {
                        tracing::debug!("Connection {} closed before pong", connection_id);
                    }
                }
                Err(e) => tracing::warn!("Failed to encode pong: {}", e),
            }
        }
    }
}
