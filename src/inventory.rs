// Process enumeration, ranking and truncation.

use crate::error::Result;
use crate::models::{ProcessRecord, UNKNOWN_PROCESS_NAME};
use crate::platform::{CounterSource, RawProcess};
use serde::Deserialize;

/// How `list_top_processes` orders records before truncating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessOrder {
    /// Ascending PID; the first N processes found.
    Enumeration,
    /// Largest working set first, ties by PID.
    #[default]
    Memory,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessInventory {
    order: ProcessOrder,
}

impl ProcessInventory {
    pub fn new(order: ProcessOrder) -> Self {
        Self { order }
    }

    pub fn order(&self) -> ProcessOrder {
        self.order
    }

    /// At most `max_count` records. Processes the platform could not name are
    /// reported as "Unknown"; PIDs outside the i32 range are skipped.
    pub fn list_top_processes(
        &self,
        source: &dyn CounterSource,
        max_count: usize,
    ) -> Result<Vec<ProcessRecord>> {
        if max_count == 0 {
            return Ok(Vec::new());
        }
        let mut records: Vec<ProcessRecord> = source
            .processes()?
            .into_iter()
            .filter_map(to_record)
            .collect();
        match self.order {
            ProcessOrder::Enumeration => records.sort_unstable_by_key(|r| r.pid),
            ProcessOrder::Memory => records.sort_unstable_by(|a, b| {
                b.working_set_bytes
                    .cmp(&a.working_set_bytes)
                    .then(a.pid.cmp(&b.pid))
            }),
        }
        records.truncate(max_count);
        Ok(records)
    }
}

fn to_record(raw: RawProcess) -> Option<ProcessRecord> {
    let pid = match i32::try_from(raw.pid) {
        Ok(pid) => pid,
        Err(_) => {
            tracing::debug!(pid = raw.pid, "skipping process with out-of-range pid");
            return None;
        }
    };
    Some(ProcessRecord {
        pid,
        name: raw.name.unwrap_or_else(|| UNKNOWN_PROCESS_NAME.into()),
        working_set_bytes: raw.working_set_bytes,
    })
}
