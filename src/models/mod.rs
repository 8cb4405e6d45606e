// Metric value types (camelCase JSON on the wire)

mod cpu;
mod memory;
mod network;
mod process;

pub use cpu::{CpuTicks, UtilizationSample};
pub use memory::{DiskStatus, MemoryStatus};
pub use network::{InterfaceCounters, LOOPBACK_INTERFACE, NetworkDelta, NetworkTotals};
pub use process::{PortProbeResult, ProcessRecord, UNKNOWN_PROCESS_NAME};
