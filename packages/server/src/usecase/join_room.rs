//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ルームの遅延作成、ホストの決定、joined / presence の送信
//!
//! ### なぜこのテストが必要か
//! - 空のルームに最初に参加したピアは asHost に関係なくホストになる必要がある
//! - 参加したピアは現在の状態を受け取り、既存のピアは参加通知を受け取る必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：空のルームへの参加、既存ルームへの参加
//! - エッジケース：ホストがいるルームへの asHost=true での参加、状態設定済みのルームへの参加

use std::sync::Arc;

use podium_shared::time::Clock;

use crate::domain::{
    ConnectionId, MessagePusher, PeerAddress, PeerId, PusherChannel, RelayEvent, RoomCode,
    RoomRepository, Timestamp,
};

use super::session::RoomSession;

/// 参加リクエスト
pub struct JoinRequest {
    /// 参加する接続
    pub connection_id: ConnectionId,
    pub code: RoomCode,
    pub peer_id: PeerId,
    /// ホスト権限を要求するか
    pub as_host: bool,
    /// 接続への送信チャンネル
    pub channel: PusherChannel,
}

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（ルームレジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// ルーム参加を実行
    ///
    /// 1. ルームを取得（無ければ作成）してロック
    /// 2. ピアを追加（ホストの決定を含む）
    /// 3. 送信チャンネルを登録
    /// 4. 参加者に joined を送信
    /// 5. 既存のピアに presence を送信
    ///
    /// 2〜5 はルームのロックを保持したまま行うため、joined に含まれる状態より
    /// 古い状態が後から届くことはありません。参加は失敗しません。
    pub async fn execute(&self, request: JoinRequest) -> RoomSession {
        let now = Timestamp::new(self.clock.now_millis());
        let JoinRequest {
            connection_id,
            code,
            peer_id,
            as_host,
            channel,
        } = request;

        let (shared_room, mut room) = self.repository.lock_or_create(&code, now).await;

        room.add_peer(peer_id.clone(), as_host, now);

        let address = PeerAddress::new(code.clone(), peer_id.clone());
        self.message_pusher
            .register_peer(address.clone(), connection_id, channel)
            .await;

        let joined = RelayEvent::Joined {
            code: code.clone(),
            host_id: room.host_id().cloned(),
            state: room.state().cloned(),
        };
        if let Err(e) = self.message_pusher.push_to(&address, &joined).await {
            tracing::warn!("Failed to send joined to '{}': {}", address, e);
        }

        let targets: Vec<PeerAddress> = room
            .peer_ids_except(&peer_id)
            .into_iter()
            .map(|id| PeerAddress::new(code.clone(), id))
            .collect();
        let presence = RelayEvent::Presence {
            id: peer_id,
            joined: true,
        };
        if let Err(e) = self.message_pusher.broadcast(targets, &presence).await {
            tracing::warn!("Failed to broadcast presence for '{}': {}", address, e);
        }

        tracing::info!(
            "Peer '{}' joined (host: {}, peers: {})",
            address,
            room.host_id().map(|id| id.as_str()).unwrap_or("-"),
            room.peer_count()
        );
        drop(room);

        RoomSession::new(connection_id, address, shared_room)
    }
}
