//! UseCase 層のエラー型

use thiserror::Error;

/// 状態送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushStateError {
    /// ホスト以外からの送信
    #[error("Peer '{0}' is not the host; state push dropped")]
    NotHost(String),
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("Room not found")]
    RoomNotFound,
}
