//! Server configuration.

use std::{path::PathBuf, time::Duration};

/// Default idle time after which an empty room is reaped (30 minutes).
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Default period of the reaper task (5 minutes).
pub const DEFAULT_REAP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Runtime configuration of the relay server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 静的ファイルの配信ディレクトリ（未指定なら配信しない）
    pub static_dir: Option<PathBuf>,
    /// 空のルームを残しておく時間
    pub idle_timeout: Duration,
    /// 回収タスクの実行間隔
    pub reap_interval: Duration,
}

impl ServerConfig {
    /// `host:port` 形式のバインドアドレス
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: None,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            reap_interval: DEFAULT_REAP_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // テスト項目: デフォルト設定は 127.0.0.1:3000、30 分で回収、5 分間隔
        // given (前提条件):
        let config = ServerConfig::default();

        // when (操作):
        let bind_addr = config.bind_addr();

        // then (期待する結果):
        assert_eq!(bind_addr, "127.0.0.1:3000");
        assert_eq!(config.idle_timeout, Duration::from_secs(1800));
        assert_eq!(config.reap_interval, Duration::from_secs(300));
        assert_eq!(config.static_dir, None);
    }
}
