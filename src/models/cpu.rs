// CPU tick counters and derived utilization

use serde::{Deserialize, Serialize};

/// Cumulative CPU ticks since boot, aggregated over all cores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuTicks {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtilizationSample {
    pub percent_busy: f64,
}

impl UtilizationSample {
    /// Busy share of the ticks elapsed between `prev` and `cur`, in [0, 100].
    ///
    /// Counters that went backwards (reset, wrap) contribute 0 instead of a
    /// negative delta. No elapsed ticks means 0.
    pub fn between(prev: &CpuTicks, cur: &CpuTicks) -> Self {
        let busy = cur.user.saturating_sub(prev.user)
            + cur.nice.saturating_sub(prev.nice)
            + cur.system.saturating_sub(prev.system);
        let total = busy + cur.idle.saturating_sub(prev.idle);
        let percent_busy = if total > 0 {
            (busy as f64 * 100.0 / total as f64).clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self { percent_busy }
    }
}
