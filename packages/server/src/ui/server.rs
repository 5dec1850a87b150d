//! Server execution logic.

use std::{future::Future, path::Path, sync::Arc};

use axum::{Router, routing::get};
use podium_shared::time::Clock;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    config::ServerConfig,
    usecase::{
        GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase,
        PushStateUseCase, ReapIdleRoomsUseCase,
    },
};

use super::{
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

pub type ServerError = Box<dyn std::error::Error + Send + Sync>;

/// Room relay server
///
/// This struct encapsulates the wiring of the use cases into an axum router and
/// owns the background reaper task while the server is running.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     join_room_usecase,
///     leave_room_usecase,
///     push_state_usecase,
///     get_rooms_usecase,
///     get_room_detail_usecase,
///     reap_idle_rooms_usecase,
///     clock,
/// );
/// server.run(ServerConfig::default()).await?;
/// ```
pub struct Server {
    app_state: Arc<AppState>,
    /// ReapIdleRoomsUseCase（放置ルーム回収のユースケース）
    reap_idle_rooms_usecase: Arc<ReapIdleRoomsUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        join_room_usecase: Arc<JoinRoomUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        push_state_usecase: Arc<PushStateUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
        reap_idle_rooms_usecase: Arc<ReapIdleRoomsUseCase>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let app_state = Arc::new(AppState {
            join_room_usecase,
            leave_room_usecase,
            push_state_usecase,
            get_rooms_usecase,
            get_room_detail_usecase,
            clock,
        });
        Self {
            app_state,
            reap_idle_rooms_usecase,
        }
    }

    /// Build the axum router
    ///
    /// `/ws` and `/api/*` take precedence over files served from `static_dir`.
    pub fn router(&self, static_dir: Option<&Path>) -> Router {
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{code}", get(get_room_detail))
            .with_state(self.app_state.clone());

        let app = match static_dir {
            Some(dir) => {
                tracing::info!("Serving static files from {}", dir.display());
                app.fallback_service(ServeDir::new(dir))
            }
            None => app,
        };

        app.layer(TraceLayer::new_for_http())
    }

    /// Run the relay server until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self, config: ServerConfig) -> Result<(), ServerError> {
        let listener = TcpListener::bind(config.bind_addr()).await?;
        self.serve(listener, &config, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(
        self,
        listener: TcpListener,
        config: &ServerConfig,
        shutdown: F,
    ) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router(config.static_dir.as_deref());

        let local_addr = listener.local_addr()?;
        tracing::info!("Room relay server listening on {}", local_addr);
        tracing::info!("Connect to: ws://{}/ws", local_addr);

        // 放置ルームの回収タスク
        let reaper = {
            let usecase = self.reap_idle_rooms_usecase.clone();
            let period = config.reap_interval;
            tokio::spawn(async move { usecase.run_periodically(period).await })
        };
        tracing::info!(
            "Idle rooms are reaped every {:?} after {:?} without activity",
            config.reap_interval,
            config.idle_timeout
        );

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        reaper.abort();
        result?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
