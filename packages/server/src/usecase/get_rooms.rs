//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{Room, RoomRepository};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    /// Repository（ルームレジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 全ルームのスナップショットをルームコード順に返す
    pub async fn execute(&self) -> Vec<Room> {
        self.repository.get_rooms().await
    }
}
