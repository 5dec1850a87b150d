//! UseCase: ルーム状態の送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PushStateUseCase::execute() メソッド
//! - ホストによる状態の上書きとブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - ホスト以外からの送信は状態を変えず、ブロードキャストもしてはならない
//! - ホストからの送信は送信者以外の全員に届き、送信者にはエコーされない
//!
//! ### どのような状況を想定しているか
//! - 正常系：ホストからの送信
//! - 異常系：ホスト以外からの送信（黙って破棄）
//! - エッジケース：ホストしかいないルームでの送信

use std::sync::Arc;

use podium_shared::time::Clock;

use crate::domain::{MessagePusher, PeerAddress, RelayEvent, RoomState, Timestamp};

use super::{error::PushStateError, session::RoomSession};

/// 状態送信のユースケース
pub struct PushStateUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl PushStateUseCase {
    /// 新しい PushStateUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>, clock: Arc<dyn Clock>) -> Self {
        Self {
            message_pusher,
            clock,
        }
    }

    /// 状態送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - ブロードキャスト対象のピア数
    /// * `Err(PushStateError::NotHost)` - 送信者がホストではない（状態は変更されない）
    pub async fn execute(
        &self,
        session: &RoomSession,
        state: RoomState,
    ) -> Result<usize, PushStateError> {
        let now = Timestamp::new(self.clock.now_millis());
        let sender = session.address();

        let mut room = session.room().lock().await;
        room.set_state(&sender.peer, state.clone(), now)
            .map_err(|_| PushStateError::NotHost(sender.peer.as_str().to_string()))?;

        let targets: Vec<PeerAddress> = room
            .peer_ids_except(&sender.peer)
            .into_iter()
            .map(|id| PeerAddress::new(sender.room.clone(), id))
            .collect();
        let target_count = targets.len();

        // ロックを保持したまま送信し、状態の更新順と配信順を一致させる
        if let Err(e) = self
            .message_pusher
            .broadcast(targets, &RelayEvent::StateChanged { state })
            .await
        {
            tracing::warn!("Failed to broadcast state from '{}': {}", sender, e);
        }

        Ok(target_count)
    }
}
