// WebSocket poll loops: sample on a fixed tick and push JSON to the client

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use bytes::Bytes;
use serde::Serialize;
use std::sync::Arc;
use tokio::time::{Duration, timeout};

use super::{AppState, with_monitor};
use crate::models::{NetworkDelta, UtilizationSample};
use crate::monitor::SystemMonitor;

pub(super) const WS_PING_INTERVAL: Duration = Duration::from_secs(30);
pub(super) const WS_SEND_TIMEOUT: Duration = Duration::from_secs(10);

pub(super) async fn ws_cpu(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let monitor = state.monitor.clone();
    let interval_ms = state.config.publishing.cpu_stats_frequency_ms;
    ws.on_upgrade(move |socket| async move {
        tracing::info!("Client connected to CPU stream");
        let sample = |m: &SystemMonitor| {
            Some(UtilizationSample {
                percent_busy: m.cpu_usage(),
            })
        };
        if let Err(e) = stream_samples(socket, monitor, interval_ms, sample).await {
            tracing::info!("CPU stream error: {}", e);
        }
    })
}

pub(super) async fn ws_network(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let monitor = state.monitor.clone();
    let interval_ms = state.config.publishing.network_stats_frequency_ms;
    ws.on_upgrade(move |socket| async move {
        tracing::info!("Client connected to network stream");
        let sample = |m: &SystemMonitor| -> Option<NetworkDelta> { m.network_stats() };
        if let Err(e) = stream_samples(socket, monitor, interval_ms, sample).await {
            tracing::info!("Network stream error: {}", e);
        }
    })
}

/// Samples every `interval_ms` until the client goes away or a send times out.
/// Ticks where `sample` yields `None` are skipped.
async fn stream_samples<T, F>(
    mut socket: WebSocket,
    monitor: Arc<SystemMonitor>,
    interval_ms: u64,
    sample: F,
) -> anyhow::Result<()>
where
    T: Serialize + Send + 'static,
    F: Fn(&SystemMonitor) -> Option<T> + Copy + Send + 'static,
{
    let mut tick = tokio::time::interval(Duration::from_millis(interval_ms));
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut ping_interval = tokio::time::interval(WS_PING_INTERVAL);
    ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = tick.tick() => {
                let Some(value) = with_monitor(&monitor, sample).await? else {
                    continue;
                };
                let json = serde_json::to_string(&value)?;
                let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Text(json.into()))).await;
                if r.is_err() || r.unwrap_or(Ok(())).is_err() {
                    break;
                }
            }
            _ = ping_interval.tick() => {
                let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Ping(Bytes::new()))).await;
                if r.is_err() || r.unwrap_or(Ok(())).is_err() {
                    break;
                }
            }
        }
    }
    Ok(())
}
