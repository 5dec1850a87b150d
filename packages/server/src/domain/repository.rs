//! Repository trait 定義
//!
//! ドメイン層が必要とするルームレジストリのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{
    entity::Room,
    value_object::{RoomCode, Timestamp},
};

/// ルームごとのロック付きハンドル
pub type SharedRoom = Arc<Mutex<Room>>;

/// Room Repository trait
///
/// ルームコードから Room への対応を管理するレジストリ。
///
/// ## ロック順序
///
/// レジストリ → ルーム の順でのみロックを取得します。
/// `lock_or_create` はレジストリのロックを保持したままルームのロックを取得するため、
/// 参加処理の途中でルームが回収されることはありません。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームを取得（存在しなければ作成）し、ロックした状態で返す
    async fn lock_or_create(
        &self,
        code: &RoomCode,
        now: Timestamp,
    ) -> (SharedRoom, OwnedMutexGuard<Room>);

    /// 参加者がおらず `idle_threshold_millis` を超えて活動のないルームを削除
    ///
    /// 削除したルームコードを返す。ロック中のルームは使用中とみなしてスキップする。
    async fn remove_idle_rooms(&self, now: Timestamp, idle_threshold_millis: i64)
    -> Vec<RoomCode>;

    /// ルームのスナップショットを取得
    async fn get_room(&self, code: &RoomCode) -> Option<Room>;

    /// 全ルームのスナップショットをルームコード順に取得
    async fn get_rooms(&self) -> Vec<Room>;

    /// ルーム数を取得
    async fn count_rooms(&self) -> usize;
}
