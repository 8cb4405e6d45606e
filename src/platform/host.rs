// Production counter source: sysinfo for memory, processes and NICs; statvfs for disks; /proc/stat for CPU ticks.

use super::{CounterSource, RawProcess, linux};
use crate::error::{MonitorError, Result};
use crate::models::{CpuTicks, DiskStatus, InterfaceCounters, MemoryStatus};
use std::path::Path;
use std::sync::Mutex;
use sysinfo::{Networks, Process, ProcessesToUpdate, System};

pub struct HostCounterSource {
    sys: Mutex<System>,
    networks: Mutex<Networks>,
}

impl Default for HostCounterSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HostCounterSource {
    pub fn new() -> Self {
        Self {
            sys: Mutex::new(System::new()),
            networks: Mutex::new(Networks::new_with_refreshed_list()),
        }
    }

    fn lock_sys(&self) -> Result<std::sync::MutexGuard<'_, System>> {
        self.sys
            .lock()
            .map_err(|_| MonitorError::LockPoisoned("sysinfo system"))
    }
}

/// sysinfo reports Linux threads as processes sharing their parent's memory.
fn is_process(p: &Process) -> bool {
    p.thread_kind().is_none()
}

impl CounterSource for HostCounterSource {
    fn cpu_ticks(&self) -> Result<CpuTicks> {
        linux::read_cpu_ticks()
    }

    fn interface_counters(&self) -> Result<Vec<InterfaceCounters>> {
        let mut networks = self
            .networks
            .lock()
            .map_err(|_| MonitorError::LockPoisoned("sysinfo networks"))?;
        networks.refresh(true);
        Ok(networks
            .list()
            .iter()
            .map(|(name, data)| {
                InterfaceCounters::new(
                    name.clone(),
                    data.total_received(),
                    data.total_transmitted(),
                )
            })
            .collect())
    }

    fn memory(&self) -> Result<MemoryStatus> {
        let mut sys = self.lock_sys()?;
        sys.refresh_memory();
        Ok(MemoryStatus::new(sys.total_memory(), sys.available_memory()))
    }

    fn disk(&self, path: &Path) -> Result<DiskStatus> {
        filesystem_capacity(path)
    }

    fn processes(&self) -> Result<Vec<RawProcess>> {
        let mut sys = self.lock_sys()?;
        sys.refresh_processes(ProcessesToUpdate::All, true);
        Ok(sys
            .processes()
            .iter()
            .filter(|(_, p)| is_process(p))
            .map(|(pid, p)| RawProcess {
                pid: pid.as_u32(),
                name: Some(p.name().to_string_lossy().into_owned()).filter(|n| !n.is_empty()),
                working_set_bytes: p.memory(),
            })
            .collect())
    }

    fn process_count(&self) -> Result<usize> {
        let mut sys = self.lock_sys()?;
        sys.refresh_processes(ProcessesToUpdate::All, true);
        Ok(sys.processes().values().filter(|p| is_process(p)).count())
    }
}

/// statvfs on the path itself, so tmpfs, procfs and network mounts report their own capacity.
#[cfg(unix)]
fn filesystem_capacity(path: &Path) -> Result<DiskStatus> {
    let stat = nix::sys::statvfs::statvfs(path)
        .map_err(|e| MonitorError::io(path, std::io::Error::from(e)))?;
    let fragment = stat.fragment_size() as u64;
    Ok(DiskStatus::new(
        (stat.blocks() as u64).saturating_mul(fragment),
        (stat.blocks_available() as u64).saturating_mul(fragment),
    ))
}

/// Longest sysinfo mount point containing the canonical path.
#[cfg(not(unix))]
fn filesystem_capacity(path: &Path) -> Result<DiskStatus> {
    use std::path::PathBuf;

    let canonical = std::fs::canonicalize(path).map_err(|e| MonitorError::io(path, e))?;
    // Windows canonical paths carry a `\\?\` prefix that mount points lack.
    let canonical = match canonical.to_str().and_then(|s| s.strip_prefix(r"\\?\")) {
        Some(rest) => PathBuf::from(rest),
        None => canonical,
    };
    let disks = sysinfo::Disks::new_with_refreshed_list();
    disks
        .list()
        .iter()
        .filter(|d| canonical.starts_with(d.mount_point()))
        .max_by_key(|d| d.mount_point().components().count())
        .map(|d| DiskStatus::new(d.total_space(), d.available_space()))
        .ok_or_else(|| {
            MonitorError::io(
                path,
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no mounted filesystem contains this path",
                ),
            )
        })
}
