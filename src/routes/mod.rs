// HTTP + WebSocket routes over the monitor's query surface

mod http;
mod ws;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::monitor::SystemMonitor;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) monitor: Arc<SystemMonitor>,
    pub(crate) config: AppConfig,
}

pub fn app(monitor: Arc<SystemMonitor>, config: AppConfig) -> Router {
    let state = AppState { monitor, config };
    Router::new()
        .route("/", get(|| async { "superpanel: host telemetry sampler" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/cpu", get(http::cpu_handler)) // GET /api/cpu
        .route("/api/memory", get(http::memory_handler)) // GET /api/memory
        .route("/api/processes", get(http::processes_handler)) // GET /api/processes?limit=
        .route("/api/processes/count", get(http::process_count_handler)) // GET /api/processes/count
        .route("/api/disk", get(http::disk_handler)) // GET /api/disk?path=
        .route("/api/dir", get(http::dir_handler)) // GET /api/dir?path=&limit=
        .route("/api/port", get(http::port_handler)) // GET /api/port?host=&port=
        .route("/api/network", get(http::network_handler)) // GET /api/network
        .route("/ws/cpu", get(ws::ws_cpu)) // WS /ws/cpu
        .route("/ws/network", get(ws::ws_network)) // WS /ws/network
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

/// Run a blocking monitor call off the async runtime.
pub(crate) async fn with_monitor<T, F>(monitor: &Arc<SystemMonitor>, f: F) -> anyhow::Result<T>
where
    F: FnOnce(&SystemMonitor) -> T + Send + 'static,
    T: Send + 'static,
{
    let monitor = monitor.clone();
    tokio::task::spawn_blocking(move || f(&monitor))
        .await
        .map_err(|e| anyhow::anyhow!("monitor task join: {}", e))
}
