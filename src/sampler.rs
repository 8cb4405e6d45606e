// Stateful delta sampling over cumulative CPU and network counters.

use crate::error::{MonitorError, Result};
use crate::models::{CpuTicks, NetworkDelta, NetworkTotals, UtilizationSample};
use crate::platform::CounterSource;
use std::sync::Mutex;
use std::time::Instant;

#[derive(Debug, Default)]
struct Baselines {
    cpu: Option<CpuTicks>,
    network: Option<(NetworkTotals, Instant)>,
}

/// Holds the last cumulative reading of each counter stream.
///
/// Both baselines sit behind one mutex, and the raw read happens while it is
/// held, so concurrent samplers serialize instead of interleaving their
/// read-modify-write. The first sample of each stream only records a baseline
/// and reports zero.
#[derive(Debug, Default)]
pub struct DeltaSampler {
    baselines: Mutex<Baselines>,
}

impl DeltaSampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample_cpu_utilization(&self, source: &dyn CounterSource) -> Result<UtilizationSample> {
        let mut guard = self
            .baselines
            .lock()
            .map_err(|_| MonitorError::LockPoisoned("cpu baseline"))?;
        let current = source.cpu_ticks()?;
        let sample = match guard.cpu.replace(current) {
            Some(prev) => UtilizationSample::between(&prev, &current),
            None => {
                tracing::debug!(operation = "sample_cpu_utilization", "CPU baseline recorded");
                UtilizationSample::default()
            }
        };
        Ok(sample)
    }

    pub fn sample_network_rates(&self, source: &dyn CounterSource) -> Result<NetworkDelta> {
        let mut guard = self
            .baselines
            .lock()
            .map_err(|_| MonitorError::LockPoisoned("network baseline"))?;
        let interfaces = source.interface_counters()?;
        let current = NetworkTotals::aggregate(&interfaces);
        let now = Instant::now();
        let delta = match guard.network.replace((current, now)) {
            Some((prev, prev_ts)) => {
                NetworkDelta::between(&prev, &current, now.duration_since(prev_ts).as_secs_f64())
            }
            None => {
                tracing::debug!(
                    operation = "sample_network_rates",
                    interfaces = interfaces.len(),
                    "network baseline recorded"
                );
                NetworkDelta::default()
            }
        };
        Ok(delta)
    }
}
