// Public query surface. Every failure degrades to zero / empty / None / false.

use crate::config::AppConfig;
use crate::error::Result;
use crate::inventory::ProcessInventory;
use crate::models::{DiskStatus, MemoryStatus, NetworkDelta, ProcessRecord};
use crate::platform::{CounterSource, HostCounterSource};
use crate::probe::PortProbe;
use crate::query;
use crate::sampler::DeltaSampler;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

/// One per process; share it by `Arc`. Calls block on platform reads.
pub struct SystemMonitor {
    source: Arc<dyn CounterSource>,
    sampler: DeltaSampler,
    inventory: ProcessInventory,
    probe: PortProbe,
}

impl SystemMonitor {
    pub fn new(
        source: Arc<dyn CounterSource>,
        inventory: ProcessInventory,
        probe: PortProbe,
    ) -> Self {
        Self {
            source,
            sampler: DeltaSampler::new(),
            inventory,
            probe,
        }
    }

    /// Host-backed monitor using the probe timeout and process ordering from config.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(HostCounterSource::new()),
            ProcessInventory::new(config.inventory.order),
            PortProbe::new(Duration::from_millis(config.probe.connect_timeout_ms)),
        )
    }

    /// Busy percentage since the previous call; 0 on the first call.
    #[instrument(skip(self), fields(operation = "cpu_usage"))]
    pub fn cpu_usage(&self) -> f64 {
        degrade(
            "sample_cpu_utilization",
            self.sampler
                .sample_cpu_utilization(self.source.as_ref())
                .map(|s| s.percent_busy),
        )
        .unwrap_or(0.0)
    }

    /// Zeroed when the platform read fails.
    #[instrument(skip(self), fields(operation = "memory_status"))]
    pub fn memory_status(&self) -> MemoryStatus {
        degrade("memory_status", query::memory_status(self.source.as_ref())).unwrap_or_default()
    }

    pub fn available_memory(&self) -> u64 {
        self.memory_status().available_bytes
    }

    pub fn total_memory(&self) -> u64 {
        self.memory_status().total_bytes
    }

    #[instrument(skip(self), fields(operation = "process_count"))]
    pub fn process_count(&self) -> i32 {
        degrade("process_count", query::process_count(self.source.as_ref()))
            .map(|n| i32::try_from(n).unwrap_or(i32::MAX))
            .unwrap_or(0)
    }

    #[instrument(skip(self), fields(operation = "list_top_processes"))]
    pub fn list_top_processes(&self, max_count: usize) -> Vec<ProcessRecord> {
        degrade(
            "list_top_processes",
            self.inventory.list_top_processes(self.source.as_ref(), max_count),
        )
        .unwrap_or_default()
    }

    /// `None` when the path is not on a mounted filesystem.
    #[instrument(skip(self, path), fields(operation = "disk_usage", path = %path.as_ref().display()))]
    pub fn disk_usage(&self, path: impl AsRef<Path>) -> Option<DiskStatus> {
        degrade(
            "disk_status",
            query::disk_status(self.source.as_ref(), path.as_ref()),
        )
    }

    #[instrument(skip(self, path), fields(operation = "list_directory", path = %path.as_ref().display()))]
    pub fn list_directory(&self, path: impl AsRef<Path>, max_files: usize) -> Option<Vec<String>> {
        degrade(
            "list_directory",
            query::list_directory(path.as_ref(), max_files),
        )
    }

    #[instrument(skip(self), fields(operation = "check_port_status"))]
    pub fn check_port_status(&self, host: &str, port: u16) -> bool {
        self.probe.check_port(host, port).reachable
    }

    /// Like `check_port_status`, with a caller-chosen bound on resolve + connect.
    #[instrument(skip(self), fields(operation = "check_port_status"))]
    pub fn check_port_status_within(&self, host: &str, port: u16, timeout: Duration) -> bool {
        self.probe.check_port_within(host, port, timeout).reachable
    }

    /// Non-loopback traffic since the previous call; zeros on the first call.
    #[instrument(skip(self), fields(operation = "network_stats"))]
    pub fn network_stats(&self) -> Option<NetworkDelta> {
        degrade(
            "sample_network_rates",
            self.sampler.sample_network_rates(self.source.as_ref()),
        )
    }
}

fn degrade<T>(operation: &'static str, result: Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(error = %e, operation, "query unavailable");
            None
        }
    }
}
