// Shared test helpers: a scripted counter source

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;
use superpanel::error::{MonitorError, Result};
use superpanel::models::*;
use superpanel::platform::{CounterSource, RawProcess};

/// Returns queued CPU/network readings in order (the last one repeats) and
/// fixed memory, disk and process tables.
#[derive(Default)]
pub struct ScriptedSource {
    pub cpu: Mutex<VecDeque<CpuTicks>>,
    pub net: Mutex<VecDeque<Vec<InterfaceCounters>>>,
    pub memory: Option<MemoryStatus>,
    pub disk: Option<DiskStatus>,
    pub processes: Vec<RawProcess>,
}

impl ScriptedSource {
    pub fn with_cpu(mut self, readings: &[(u64, u64, u64, u64)]) -> Self {
        self.cpu = Mutex::new(
            readings
                .iter()
                .map(|&(user, nice, system, idle)| CpuTicks {
                    user,
                    nice,
                    system,
                    idle,
                })
                .collect(),
        );
        self
    }

    pub fn with_net(mut self, readings: Vec<Vec<InterfaceCounters>>) -> Self {
        self.net = Mutex::new(readings.into());
        self
    }

    pub fn with_processes(mut self, processes: &[(u32, Option<&str>, u64)]) -> Self {
        self.processes = processes
            .iter()
            .map(|&(pid, name, working_set_bytes)| RawProcess {
                pid,
                name: name.map(str::to_string),
                working_set_bytes,
            })
            .collect();
        self
    }
}

fn next_or_last<T: Clone>(queue: &Mutex<VecDeque<T>>) -> Option<T> {
    let mut q = queue.lock().unwrap();
    if q.len() > 1 { q.pop_front() } else { q.front().cloned() }
}

impl CounterSource for ScriptedSource {
    fn cpu_ticks(&self) -> Result<CpuTicks> {
        next_or_last(&self.cpu).ok_or(MonitorError::Unsupported("cpu tick counters"))
    }

    fn interface_counters(&self) -> Result<Vec<InterfaceCounters>> {
        next_or_last(&self.net).ok_or(MonitorError::Unsupported("interface counters"))
    }

    fn memory(&self) -> Result<MemoryStatus> {
        self.memory.ok_or(MonitorError::Unsupported("memory status"))
    }

    fn disk(&self, path: &Path) -> Result<DiskStatus> {
        self.disk.ok_or_else(|| {
            MonitorError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "not mounted"),
            )
        })
    }

    fn processes(&self) -> Result<Vec<RawProcess>> {
        Ok(self.processes.clone())
    }
}
