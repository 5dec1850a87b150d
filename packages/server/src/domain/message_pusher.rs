//! MessagePusher trait 定義
//!
//! ピアへのメッセージ送信（通知）のインターフェースを定義します。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    error::MessagePushError,
    event::RelayEvent,
    value_object::{ConnectionId, PeerAddress},
};

/// 接続ごとの送信チャンネル（エンコード済みのテキストフレームを流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// 送信チャンネルは `PeerAddress`（ルーム + ピア ID）単位で登録されます。
/// 同じアドレスに新しい接続が登録された場合は上書きされ、古い接続の
/// `unregister_peer` は何もしません。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// ピアの送信チャンネルを登録
    async fn register_peer(
        &self,
        address: PeerAddress,
        connection_id: ConnectionId,
        channel: PusherChannel,
    );

    /// ピアの送信チャンネルを登録解除
    ///
    /// `connection_id` が現在の登録と一致した場合のみ削除し、`true` を返す
    async fn unregister_peer(&self, address: &PeerAddress, connection_id: ConnectionId) -> bool;

    /// 特定のピアにイベントを送信
    async fn push_to(
        &self,
        address: &PeerAddress,
        event: &RelayEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数のピアにイベントを送信（一部の失敗は許容）
    async fn broadcast(
        &self,
        targets: Vec<PeerAddress>,
        event: &RelayEvent,
    ) -> Result<(), MessagePushError>;
}
