//! UseCase: 放置されたルームの回収
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ReapIdleRoomsUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 参加者がおらず一定時間活動のないルームはメモリから削除される必要がある
//! - 最後のピアが抜けた直後のルームは削除されてはならない（再参加で状態を引き継ぐため）
//!
//! ### どのような状況を想定しているか
//! - 正常系：しきい値を超えた空のルームの削除
//! - エッジケース：しきい値ちょうど、参加者がいる古いルーム

use std::{sync::Arc, time::Duration};

use podium_shared::time::Clock;

use crate::domain::{RoomCode, RoomRepository, Timestamp};

/// 回収タスクの最短実行間隔
pub const MIN_REAP_INTERVAL: Duration = Duration::from_secs(1);

/// ルーム回収のユースケース
pub struct ReapIdleRoomsUseCase {
    /// Repository（ルームレジストリの抽象化）
    repository: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
    /// 空のルームを残しておく時間
    idle_timeout: Duration,
}

impl ReapIdleRoomsUseCase {
    /// 新しい ReapIdleRoomsUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        clock: Arc<dyn Clock>,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            clock,
            idle_timeout,
        }
    }

    /// 空で放置されたルームを削除し、削除したルームコードを返す
    pub async fn execute(&self) -> Vec<RoomCode> {
        let now = Timestamp::new(self.clock.now_millis());
        let threshold = i64::try_from(self.idle_timeout.as_millis()).unwrap_or(i64::MAX);

        let reaped = self.repository.remove_idle_rooms(now, threshold).await;
        if !reaped.is_empty() {
            let codes: Vec<&str> = reaped.iter().map(RoomCode::as_str).collect();
            tracing::info!("Reaped {} idle room(s): {}", reaped.len(), codes.join(", "));
        }
        reaped
    }

    /// `period` ごとに execute() を呼び続ける
    ///
    /// 最初の回収は起動直後ではなく `period` 経過後に行われます。
    /// `period` が [`MIN_REAP_INTERVAL`] より短い場合は [`MIN_REAP_INTERVAL`] で実行します。
    /// このタスクは終了しないため、呼び出し側で abort してください。
    pub async fn run_periodically(&self, period: Duration) {
        if period < MIN_REAP_INTERVAL {
            tracing::warn!(
                "Reap interval {:?} is too short; using {:?}",
                period,
                MIN_REAP_INTERVAL
            );
        }
        let period = period.max(MIN_REAP_INTERVAL);
        let mut interval =
            tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            self.execute().await;
        }
    }
}
