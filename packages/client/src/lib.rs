//! Terminal client for Podium rooms.
//!
//! Joins a room as presenter or viewer, prints every relay event and pushes each
//! line typed on stdin as the new room state.

pub mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
pub use session::run_client_session;

/// What the client connects to and who it is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// WebSocket endpoint of the relay (e.g. `ws://127.0.0.1:3000/ws`)
    pub url: String,
    pub room: String,
    pub peer_id: String,
    /// Claim host authority at join
    pub as_host: bool,
}
