// GET handlers: version and one-shot queries

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::time::Duration;

use super::{AppState, with_monitor};
use crate::models::{PortProbeResult, UtilizationSample};
use crate::version::{NAME, VERSION};

#[derive(Debug, Deserialize)]
pub(super) struct LimitParams {
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PathParams {
    path: String,
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PortParams {
    host: String,
    port: u16,
    timeout_ms: Option<u64>,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

fn internal_error(e: anyhow::Error) -> Response {
    tracing::warn!(error = %e, "request failed");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

/// GET /version — service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/cpu — busy percentage since the previous CPU sample (0 on the first).
pub(super) async fn cpu_handler(State(state): State<AppState>) -> Response {
    match with_monitor(&state.monitor, |m| m.cpu_usage()).await {
        Ok(percent_busy) => Json(UtilizationSample { percent_busy }).into_response(),
        Err(e) => internal_error(e),
    }
}

pub(super) async fn memory_handler(State(state): State<AppState>) -> Response {
    match with_monitor(&state.monitor, |m| m.memory_status()).await {
        Ok(mem) => Json(mem).into_response(),
        Err(e) => internal_error(e),
    }
}

/// GET /api/processes?limit=N — limit defaults to inventory.default_max_processes.
pub(super) async fn processes_handler(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Response {
    let limit = params
        .limit
        .unwrap_or(state.config.inventory.default_max_processes);
    match with_monitor(&state.monitor, move |m| m.list_top_processes(limit)).await {
        Ok(records) => Json(records).into_response(),
        Err(e) => internal_error(e),
    }
}

pub(super) async fn process_count_handler(State(state): State<AppState>) -> Response {
    match with_monitor(&state.monitor, |m| m.process_count()).await {
        Ok(count) => Json(serde_json::json!({ "count": count })).into_response(),
        Err(e) => internal_error(e),
    }
}

/// GET /api/disk?path=P — 404 when P is not on a mounted filesystem.
pub(super) async fn disk_handler(
    State(state): State<AppState>,
    Query(params): Query<PathParams>,
) -> Response {
    let path = params.path.clone();
    match with_monitor(&state.monitor, move |m| m.disk_usage(&path)).await {
        Ok(Some(disk)) => Json(disk).into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            format!("disk usage unavailable for {}", params.path),
        ),
        Err(e) => internal_error(e),
    }
}

/// GET /api/dir?path=P&limit=N — limit defaults to inventory.default_max_files;
/// 404 when P cannot be opened.
pub(super) async fn dir_handler(
    State(state): State<AppState>,
    Query(params): Query<PathParams>,
) -> Response {
    let path = params.path.clone();
    let limit = params
        .limit
        .unwrap_or(state.config.inventory.default_max_files);
    match with_monitor(&state.monitor, move |m| m.list_directory(&path, limit)).await {
        Ok(Some(names)) => Json(names).into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            format!("directory unavailable: {}", params.path),
        ),
        Err(e) => internal_error(e),
    }
}

/// GET /api/port?host=H&port=P&timeout_ms=T — one resolve + connect bounded by T,
/// or probe.connect_timeout_ms when T is absent.
pub(super) async fn port_handler(
    State(state): State<AppState>,
    Query(params): Query<PortParams>,
) -> Response {
    let PortParams {
        host,
        port,
        timeout_ms,
    } = params;
    let timeout =
        Duration::from_millis(timeout_ms.unwrap_or(state.config.probe.connect_timeout_ms));
    match with_monitor(&state.monitor, move |m| {
        m.check_port_status_within(&host, port, timeout)
    })
    .await
    {
        Ok(reachable) => Json(PortProbeResult { reachable }).into_response(),
        Err(e) => internal_error(e),
    }
}

/// GET /api/network — non-loopback traffic since the previous sample; 503 when counters are unreadable.
pub(super) async fn network_handler(State(state): State<AppState>) -> Response {
    match with_monitor(&state.monitor, |m| m.network_stats()).await {
        Ok(Some(delta)) => Json(delta).into_response(),
        Ok(None) => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "network counters unavailable",
        ),
        Err(e) => internal_error(e),
    }
}
