//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use podium_server::infrastructure::dto::websocket::{ClientMessage, ServerMessage};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use crate::{ClientConfig, domain, error::ClientError};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

/// Run one WebSocket client session
///
/// Connects, joins the configured room and then relays between the socket and
/// `input` (lines typed by the user) until one side ends.
///
/// # Returns
///
/// * `Ok(())` - the input was closed (user exit)
/// * `Err(ClientError::ConnectionError)` - the connection failed or was lost
pub async fn run_client_session(
    config: &ClientConfig,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(config.url.as_str())
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to relay at {}", config.url);

    let (mut write, mut read) = ws_stream.split();

    let join = domain::join_message(&config.room, &config.peer_id, config.as_host);
    send(&mut write, &join).await?;

    println!(
        "\nYou are '{}' in room '{}'. Type a state (JSON or text) and press Enter to push it, /ping to ping. Press Ctrl+D to exit.\n",
        config.peer_id, config.room
    );

    // 現在のホスト（joined / host で更新）。asHost による乗っ取りは通知されないため古い場合がある
    let mut host_id: Option<String> = None;

    loop {
        tokio::select! {
            incoming = read.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        let formatted = match serde_json::from_str::<ServerMessage>(text.as_str()) {
                            Ok(message) => format_server_message(message, config, &mut host_id),
                            Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                        };
                        print!("{}", formatted);
                        redisplay_prompt(&config.peer_id);
                    }
                    Some(Ok(Message::Binary(data))) => {
                        print!("{}", MessageFormatter::format_binary_message(data.len()));
                        redisplay_prompt(&config.peer_id);
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("Server closed the connection");
                        return Err(ClientError::ConnectionError(
                            "Connection lost".to_string(),
                        ));
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket read error: {}", e);
                        return Err(ClientError::ConnectionError(e.to_string()));
                    }
                }
            }
            line = input.recv() => {
                let Some(line) = line else {
                    // 入力が閉じられた（Ctrl+D / Ctrl+C）
                    write.close().await.ok();
                    return Ok(());
                };

                let message = domain::parse_input(&line);
                send(&mut write, &message).await?;

                if matches!(message, ClientMessage::State { .. }) {
                    let is_host = host_id.as_deref() == Some(config.peer_id.as_str());
                    print!("{}", MessageFormatter::format_state_sent(is_host));
                    redisplay_prompt(&config.peer_id);
                }
            }
        }
    }
}

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

async fn send(write: &mut WsSink, message: &ClientMessage) -> Result<(), ClientError> {
    let json = serde_json::to_string(message)
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    write.send(Message::Text(json.into())).await.map_err(|e| {
        tracing::warn!("Failed to send message: {}", e);
        ClientError::ConnectionError(e.to_string())
    })
}

fn format_server_message(
    message: ServerMessage,
    config: &ClientConfig,
    host_id: &mut Option<String>,
) -> String {
    match message {
        ServerMessage::Joined {
            code,
            host_id: current_host,
            state,
        } => {
            *host_id = current_host;
            MessageFormatter::format_joined(&code, host_id.as_deref(), &state, &config.peer_id)
        }
        ServerMessage::Presence { id, joined } => MessageFormatter::format_presence(&id, joined),
        ServerMessage::State { state } => MessageFormatter::format_state(&state),
        ServerMessage::Host {
            host_id: new_host,
        } => {
            let formatted = MessageFormatter::format_host(&new_host, &config.peer_id);
            *host_id = Some(new_host);
            formatted
        }
        ServerMessage::Pong { t } => MessageFormatter::format_pong(t),
    }
}
