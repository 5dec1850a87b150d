//! Domain errors.

use thiserror::Error;

/// Errors raised by room operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// Only the host may change the room state
    #[error("Peer '{0}' is not the host of this room")]
    NotHost(String),
}

/// Errors raised while pushing messages to peers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// No outbound channel is registered for the peer
    #[error("Peer '{0}' not found")]
    PeerNotFound(String),

    /// The outbound channel exists but the message could not be delivered
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
