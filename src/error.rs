// Error taxonomy for raw counter reads and queries

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, MonitorError>;

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// Path, directory or pseudo-file could not be opened or resolved.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {what}: {detail}")]
    Parse { what: &'static str, detail: String },

    /// Counter has no implementation on this platform.
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),

    #[error("{0} lock poisoned")]
    LockPoisoned(&'static str),
}

impl MonitorError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MonitorError::Io {
            path: path.into(),
            source,
        }
    }
}
