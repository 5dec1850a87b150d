//! UseCase: ルーム退出処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - ピアの削除、ホストの引き継ぎ、host / presence の送信
//!
//! ### なぜこのテストが必要か
//! - ホストが抜けた場合、残ったピアのうち 1 人がホストになり全員に通知される必要がある
//! - 最後のピアが抜けてもルームはすぐには削除されない
//! - 同じ peer id で置き換えられた古い接続の切断が新しい接続を追い出してはならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：ホスト以外の退出、ホストの退出
//! - エッジケース：最後のピアの退出、置き換えられた接続の退出

use std::sync::Arc;

use podium_shared::time::Clock;

use crate::domain::{MessagePusher, PeerAddress, PeerId, RelayEvent, Timestamp};

use super::session::RoomSession;

/// 退出処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// ピアがルームから削除された
    Left {
        /// 昇格した新しいホスト（ホストが抜けて誰かが残った場合のみ）
        new_host: Option<PeerId>,
        remaining_peers: usize,
    },
    /// 同じアドレスが別の接続に置き換えられていたため、何もしなかった
    Superseded,
}

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            message_pusher,
            clock,
        }
    }

    /// ルーム退出を実行
    ///
    /// 1. 送信チャンネルを登録解除（置き換え済みなら終了）
    /// 2. ピアを削除（ホストの引き継ぎを含む）
    /// 3. ホストが変わった場合、残りのピアに host を送信
    /// 4. 残りのピアに presence を送信
    pub async fn execute(&self, session: RoomSession) -> LeaveOutcome {
        let now = Timestamp::new(self.clock.now_millis());
        let address = session.address();

        let mut room = session.room().lock().await;

        if !self
            .message_pusher
            .unregister_peer(address, session.connection_id())
            .await
        {
            tracing::debug!(
                "Peer '{}' was taken over by another connection; skipping leave",
                address
            );
            return LeaveOutcome::Superseded;
        }

        let new_host = room.remove_peer(&address.peer, now);

        let targets: Vec<PeerAddress> = room
            .peer_ids()
            .into_iter()
            .map(|id| PeerAddress::new(address.room.clone(), id))
            .collect();

        if let Some(host_id) = &new_host {
            tracing::info!("Host of room '{}' moved to '{}'", address.room, host_id);
            let event = RelayEvent::HostChanged {
                host_id: host_id.clone(),
            };
            if let Err(e) = self
                .message_pusher
                .broadcast(targets.clone(), &event)
                .await
            {
                tracing::warn!("Failed to broadcast host change: {}", e);
            }
        }

        let presence = RelayEvent::Presence {
            id: address.peer.clone(),
            joined: false,
        };
        if let Err(e) = self.message_pusher.broadcast(targets, &presence).await {
            tracing::warn!("Failed to broadcast presence for '{}': {}", address, e);
        }

        tracing::info!(
            "Peer '{}' left ({} peers remaining)",
            address,
            room.peer_count()
        );

        LeaveOutcome::Left {
            new_host,
            remaining_peers: room.peer_count(),
        }
    }
}
