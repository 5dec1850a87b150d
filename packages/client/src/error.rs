//! Error types for the Podium client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The relay URL is not a WebSocket URL
    #[error("Invalid relay URL '{0}': expected ws:// or wss://")]
    InvalidUrl(String),
}
