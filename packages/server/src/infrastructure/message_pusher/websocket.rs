//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - ピアごとの WebSocket 送信チャンネル（`UnboundedSender`）を管理
//! - ドメインイベントを JSON テキストフレームにエンコードして送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成と送信ループは UI 層（`ui/handler/websocket.rs`）が担当します。
//! この実装はチャンネルに書き込むだけなので、呼び出し側がルームのロックを
//! 保持したままでもソケットの I/O を待つことはありません。
//! 同じチャンネルへの書き込み順がそのまま受信側への配信順になります。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{
        ConnectionId, MessagePushError, MessagePusher, PeerAddress, PusherChannel, RelayEvent,
    },
    infrastructure::dto::websocket::ServerMessage,
};

/// 登録済みの送信チャンネル
struct RegisteredChannel {
    /// チャンネルを所有する接続
    connection_id: ConnectionId,
    sender: PusherChannel,
}

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_peer(address.clone(), connection_id, tx).await;
///
/// // ピアに送信
/// pusher.push_to(&address, &RelayEvent::Presence { id, joined: true }).await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// Key: PeerAddress（ルーム + ピア ID）
    clients: Mutex<HashMap<PeerAddress, RegisteredChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }

    fn encode(event: &RelayEvent) -> Result<String, MessagePushError> {
        serde_json::to_string(&ServerMessage::from(event.clone()))
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_peer(
        &self,
        address: PeerAddress,
        connection_id: ConnectionId,
        channel: PusherChannel,
    ) {
        let mut clients = self.clients.lock().await;
        tracing::debug!(
            "Peer '{}' registered to MessagePusher (connection {})",
            address,
            connection_id
        );
        let previous = clients.insert(
            address,
            RegisteredChannel {
                connection_id,
                sender: channel,
            },
        );
        if let Some(previous) = previous
            && previous.connection_id != connection_id
        {
            tracing::warn!(
                "Connection {} replaced connection {} for the same peer",
                connection_id,
                previous.connection_id
            );
        }
    }

    async fn unregister_peer(&self, address: &PeerAddress, connection_id: ConnectionId) -> bool {
        let mut clients = self.clients.lock().await;
        match clients.get(address) {
            Some(registered) if registered.connection_id == connection_id => {
                clients.remove(address);
                tracing::debug!("Peer '{}' unregistered from MessagePusher", address);
                true
            }
            _ => false,
        }
    }

    async fn push_to(
        &self,
        address: &PeerAddress,
        event: &RelayEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(event)?;
        let clients = self.clients.lock().await;

        let registered = clients
            .get(address)
            .ok_or_else(|| MessagePushError::PeerNotFound(address.to_string()))?;
        registered
            .sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to peer '{}'", address);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<PeerAddress>,
        event: &RelayEvent,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(event)?;
        let clients = self.clients.lock().await;

        for target in targets {
            match clients.get(&target) {
                Some(registered) => {
                    // ブロードキャストでは一部の送信失敗を許容
                    if let Err(e) = registered.sender.send(content.clone()) {
                        tracing::warn!("Failed to push message to peer '{}': {}", target, e);
                    } else {
                        tracing::debug!("Broadcasted message to peer '{}'", target);
                    }
                }
                None => {
                    tracing::warn!("Peer '{}' not found during broadcast, skipping", target);
                }
            }
        }

        Ok(())
    }
}
