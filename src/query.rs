// Single-shot metrics: one raw read, no retained state.

use crate::error::{MonitorError, Result};
use crate::models::{DiskStatus, MemoryStatus};
use crate::platform::CounterSource;
use std::path::Path;

pub fn memory_status(source: &dyn CounterSource) -> Result<MemoryStatus> {
    let raw = source.memory()?;
    Ok(MemoryStatus::new(raw.total_bytes, raw.available_bytes))
}

/// Fails with `MonitorError::Io` when `path` is not on a mounted filesystem.
pub fn disk_status(source: &dyn CounterSource, path: &Path) -> Result<DiskStatus> {
    let raw = source.disk(path)?;
    Ok(DiskStatus::new(raw.total_bytes, raw.free_bytes))
}

/// Best-effort: processes exiting mid-enumeration may be missed.
pub fn process_count(source: &dyn CounterSource) -> Result<usize> {
    source.process_count()
}

/// Entry names of `path` in enumeration order, at most `max_files`.
/// Entries that fail to read mid-iteration are skipped.
pub fn list_directory(path: &Path, max_files: usize) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(path).map_err(|e| MonitorError::io(path, e))?;
    let names = entries
        .filter_map(|entry| match entry {
            Ok(e) => Some(e.file_name().to_string_lossy().into_owned()),
            Err(e) => {
                tracing::debug!(error = %e, path = %path.display(), "skipping unreadable entry");
                None
            }
        })
        .take(max_files)
        .collect();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_directory_truncates_and_skips_dot_entries() {
        let dir = tempfile::TempDir::new().unwrap();
        for name in ["a.txt", "b.txt", "c.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        let all = list_directory(dir.path(), 10).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|n| n != "." && n != ".."));
        assert_eq!(list_directory(dir.path(), 2).unwrap().len(), 2);
        assert!(list_directory(dir.path(), 0).unwrap().is_empty());
    }

    #[test]
    fn list_directory_missing_path_is_io_error() {
        let err = list_directory(Path::new("/nonexistent/path"), 5).unwrap_err();
        assert!(matches!(err, MonitorError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/path"));
    }
}
