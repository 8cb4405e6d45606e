// Process inventory and port probe records

use serde::{Deserialize, Serialize};

/// Placeholder for processes whose name cannot be read.
pub const UNKNOWN_PROCESS_NAME: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRecord {
    pub pid: i32,
    pub name: String,
    pub working_set_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortProbeResult {
    pub reachable: bool,
}
