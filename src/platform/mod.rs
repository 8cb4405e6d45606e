// Raw counter reads behind one interface; sampling logic is written against `CounterSource`.

mod host;
pub mod linux;

pub use host::HostCounterSource;

use crate::error::Result;
use crate::models::{CpuTicks, DiskStatus, InterfaceCounters, MemoryStatus};
use std::path::Path;

/// One process as the platform reports it, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProcess {
    pub pid: u32,
    /// `None` when the name could not be read (access denied, exited).
    pub name: Option<String>,
    pub working_set_bytes: u64,
}

/// Platform-specific raw reads. Implementations hold no delta state.
pub trait CounterSource: Send + Sync {
    /// Cumulative aggregate CPU ticks since boot.
    ///
    /// `HostCounterSource` reads these from /proc/stat and returns
    /// `MonitorError::Unsupported` on other targets, where CPU utilization
    /// therefore always degrades to 0.
    fn cpu_ticks(&self) -> Result<CpuTicks>;

    /// Cumulative byte counters for every interface, loopback included.
    fn interface_counters(&self) -> Result<Vec<InterfaceCounters>>;

    fn memory(&self) -> Result<MemoryStatus>;

    /// Capacity of the mounted filesystem containing `path`.
    fn disk(&self, path: &Path) -> Result<DiskStatus>;

    /// Every visible process, in no particular order.
    fn processes(&self) -> Result<Vec<RawProcess>>;

    fn process_count(&self) -> Result<usize> {
        self.processes().map(|p| p.len())
    }
}
