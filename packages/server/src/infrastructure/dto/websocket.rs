//! WebSocket message DTOs.
//!
//! Every frame is a JSON object discriminated by its `type` field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Messages sent from a client to the relay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    /// Bind the connection to a room as the given peer
    Join {
        code: String,
        id: String,
        /// Absent or `null` means `false`
        #[serde(rename = "asHost", default)]
        as_host: Option<bool>,
    },
    /// Publish a new room state (host only)
    State {
        #[serde(default)]
        state: Value,
    },
    /// Keepalive request
    Ping,
}

/// Messages sent from the relay to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    /// Reply to `join`
    Joined {
        code: String,
        #[serde(rename = "hostId")]
        host_id: Option<String>,
        state: Value,
    },
    /// A peer joined or left
    Presence { id: String, joined: bool },
    /// New room state from the host
    State { state: Value },
    /// Host authority moved
    Host {
        #[serde(rename = "hostId")]
        host_id: String,
    },
    /// Reply to `ping`, server time in Unix milliseconds
    Pong { t: i64 },
}
