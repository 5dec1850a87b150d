//! UseCase: ルーム詳細取得

use std::sync::Arc;

use crate::domain::{Room, RoomCode, RoomRepository};

use super::error::GetRoomDetailError;

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    /// Repository（ルームレジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 指定したルームのスナップショットを返す
    ///
    /// 存在しないルームを作成することはありません。
    pub async fn execute(&self, code: String) -> Result<Room, GetRoomDetailError> {
        self.repository
            .get_room(&RoomCode::new(code))
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)
    }
}
