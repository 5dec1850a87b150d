//! Message formatting utilities for client display.

use podium_shared::time::timestamp_to_rfc3339;
use serde_json::Value;

const RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the reply to our join
    ///
    /// # Arguments
    ///
    /// * `code` - Room code
    /// * `host_id` - Current host of the room, if any
    /// * `state` - Current room state (`null` if never set)
    /// * `current_peer_id` - This client's peer ID (to mark as "me")
    pub fn format_joined(
        code: &str,
        host_id: Option<&str>,
        state: &Value,
        current_peer_id: &str,
    ) -> String {
        let host = match host_id {
            Some(id) if id == current_peer_id => format!("{} (me)", id),
            Some(id) => id.to_string(),
            None => "(none)".to_string(),
        };

        let mut output = String::new();
        output.push_str(&format!("\n\n{}\n", RULE));
        output.push_str(&format!("Room: {}\n", code));
        output.push_str(&format!("Host: {}\n", host));
        output.push_str(&format!("State: {}\n", Self::render_state(state)));
        output.push_str(&format!("{}\n", RULE));
        output
    }

    /// Format a presence notification
    pub fn format_presence(peer_id: &str, joined: bool) -> String {
        if joined {
            format!("\n+ {} joined\n", peer_id)
        } else {
            format!("\n- {} left\n", peer_id)
        }
    }

    /// Format a state pushed by the host
    pub fn format_state(state: &Value) -> String {
        format!("\n* state: {}\n", Self::render_state(state))
    }

    /// Format a host change
    pub fn format_host(host_id: &str, current_peer_id: &str) -> String {
        if host_id == current_peer_id {
            "\n! You are now the host\n".to_string()
        } else {
            format!("\n! {} is now the host\n", host_id)
        }
    }

    /// Format a pong with the server time
    pub fn format_pong(server_time: i64) -> String {
        format!("\npong (server time {})\n", timestamp_to_rfc3339(server_time))
    }

    /// Format a confirmation after pushing a state
    ///
    /// Non-host pushes are dropped by the relay without a reply, so the user is told here.
    ///
    /// `is_host` is only what this client last saw in `joined` / `host`. A later peer
    /// joining with `asHost` takes over without any `host` broadcast, so a push
    /// labelled as a host push may still be dropped.
    pub fn format_state_sent(is_host: bool) -> String {
        if is_host {
            "state pushed (dropped silently if another peer has since claimed host)\n".to_string()
        } else {
            "state sent, but you are not the host; the relay will ignore it\n".to_string()
        }
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }

    fn render_state(state: &Value) -> String {
        match state {
            Value::Null => "(empty)".to_string(),
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}
