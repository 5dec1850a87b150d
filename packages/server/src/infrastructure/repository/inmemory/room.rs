//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリのルームレジストリとして使用します。
//!
//! ルームはそれぞれ独自の Mutex を持ち、レジストリ全体の Mutex とは別にロックされます。
//! ロック順序は常に レジストリ → ルーム です。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{Room, RoomCode, RoomRepository, SharedRoom, Timestamp};

/// インメモリ Room Repository 実装
///
/// プロセス起動時に 1 つ作成され、UseCase に注入されます。
/// テストではテストケースごとに独立したインスタンスを作成できます。
#[derive(Default)]
pub struct InMemoryRoomRepository {
    /// ルームコード → ルーム
    rooms: Mutex<HashMap<RoomCode, SharedRoom>>,
}

impl InMemoryRoomRepository {
    /// 新しい空の InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// ルームのハンドルを複製して取得（レジストリのロックはすぐに解放する）
    async fn shared_room(&self, code: &RoomCode) -> Option<SharedRoom> {
        let rooms = self.rooms.lock().await;
        rooms.get(code).cloned()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn lock_or_create(
        &self,
        code: &RoomCode,
        now: Timestamp,
    ) -> (SharedRoom, OwnedMutexGuard<Room>) {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .entry(code.clone())
            .or_insert_with(|| {
                tracing::info!("Room '{}' created", code);
                Arc::new(Mutex::new(Room::new(code.clone(), now)))
            })
            .clone();

        // レジストリのロックを保持したままルームをロックする（回収との競合を防ぐ）
        let guard = room.clone().lock_owned().await;
        (room, guard)
    }

    async fn remove_idle_rooms(
        &self,
        now: Timestamp,
        idle_threshold_millis: i64,
    ) -> Vec<RoomCode> {
        let mut rooms = self.rooms.lock().await;
        let mut removed = Vec::new();

        rooms.retain(|code, room| match room.try_lock() {
            Ok(room) if room.is_idle(now, idle_threshold_millis) => {
                removed.push(code.clone());
                false
            }
            // ロック中 = 使用中
            _ => true,
        });

        removed
    }

    async fn get_room(&self, code: &RoomCode) -> Option<Room> {
        let room = self.shared_room(code).await?;
        let room = room.lock().await;
        Some(room.clone())
    }

    async fn get_rooms(&self) -> Vec<Room> {
        let handles: Vec<SharedRoom> = {
            let rooms = self.rooms.lock().await;
            rooms.values().cloned().collect()
        };

        let mut snapshots = Vec::with_capacity(handles.len());
        for handle in handles {
            snapshots.push(handle.lock().await.clone());
        }
        snapshots.sort_by(|a, b| a.code().cmp(b.code()));
        snapshots
    }

    async fn count_rooms(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }
}
