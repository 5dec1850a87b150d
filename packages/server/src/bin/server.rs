//! Room relay server.
//!
//! Peers join rooms by code; the host of each room publishes a JSON state that is
//! relayed to every other peer in the room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin podium-server
//! cargo run --bin podium-server -- --host 0.0.0.0 --port 3000 --static-dir ./public
//! ```

use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use podium_server::{
    config::ServerConfig,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    ui::Server,
    usecase::{
        GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase,
        PushStateUseCase, ReapIdleRoomsUseCase,
    },
};
use podium_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

#[derive(Parser, Debug)]
#[command(name = "podium-server")]
#[command(about = "Room relay server that mirrors host state to every peer", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Directory of static files served for paths other than /ws and /api
    #[arg(long, env = "PODIUM_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Seconds an empty room is kept before it is reaped
    #[arg(long, default_value = "1800")]
    idle_timeout_secs: u64,

    /// Seconds between reaper runs (at least 1)
    #[arg(long, default_value = "300", value_parser = clap::value_parser!(u64).range(1..))]
    reap_interval_secs: u64,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            static_dir: args.static_dir,
            idle_timeout: Duration::from_secs(args.idle_timeout_secs),
            reap_interval: Duration::from_secs(args.reap_interval_secs),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::from(Args::parse());

    // Initialize dependencies in order:
    // 1. Clock
    // 2. Repository
    // 3. MessagePusher
    // 4. UseCases
    // 5. Server

    // 1. Create Clock
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 2. Create Repository (in-memory room registry)
    let repository = Arc::new(InMemoryRoomRepository::new());

    // 3. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 4. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(
        message_pusher.clone(),
        clock.clone(),
    ));
    let push_state_usecase = Arc::new(PushStateUseCase::new(message_pusher, clock.clone()));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(repository.clone()));
    let reap_idle_rooms_usecase = Arc::new(ReapIdleRoomsUseCase::new(
        repository,
        clock.clone(),
        config.idle_timeout,
    ));

    // 5. Create and run the server
    let server = Server::new(
        join_room_usecase,
        leave_room_usecase,
        push_state_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
        reap_idle_rooms_usecase,
        clock,
    );
    if let Err(e) = server.run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
