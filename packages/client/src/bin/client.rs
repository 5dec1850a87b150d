//! Terminal client for Podium rooms with reconnection support.
//!
//! Joins a room on the relay and prints every event it receives. Each line typed
//! at the prompt is pushed as the new room state (JSON when it parses, otherwise
//! a string); `/ping` sends a ping. Only the host's states are relayed.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin podium-client -- --room X1 --peer-id alice --host
//! cargo run --bin podium-client -- -r X1 -c bob
//! ```

use clap::Parser;

use podium_client::{ClientConfig, run_client};
use podium_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "podium-client")]
#[command(about = "Terminal client for Podium room relay", long_about = None)]
struct Args {
    /// Room code to join
    #[arg(short = 'r', long)]
    room: String,

    /// Peer ID used in the room
    #[arg(short = 'c', long)]
    peer_id: String,

    /// Claim host authority when joining
    #[arg(long)]
    host: bool,

    /// WebSocket relay URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3000/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let config = ClientConfig {
        url: args.url,
        room: args.room,
        peer_id: args.peer_id,
        as_host: args.host,
    };

    // Run the client
    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
