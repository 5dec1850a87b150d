//! UI utilities for the client.

use std::io::Write;

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt(peer_id: &str) {
    print!("{}> ", peer_id);
    std::io::stdout().flush().ok();
}
