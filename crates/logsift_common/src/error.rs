//! Error types for the log engine.
//!
//! Unparsable lines are not errors; only I/O, serialization and configuration
//! failures surface here.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LogsiftError>;

#[derive(Error, Debug)]
pub enum LogsiftError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read failed in {} after {line} lines: {source}", path.display())]
    Read {
        path: PathBuf,
        line: u64,
        #[source]
        source: io::Error,
    },

    #[error("cannot write report to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl LogsiftError {
    /// True for failures of the underlying file or stream.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            LogsiftError::Open { .. } | LogsiftError::Read { .. } | LogsiftError::Write { .. }
        )
    }

    /// The OS error behind an I/O failure, if any.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            LogsiftError::Open { source, .. }
            | LogsiftError::Read { source, .. }
            | LogsiftError::Write { source, .. }
            | LogsiftError::ConfigRead { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_mentions_path() {
        let err = LogsiftError::Open {
            path: PathBuf::from("/var/log/missing.log"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };

        let msg = err.to_string();
        assert!(msg.contains("/var/log/missing.log"));
        assert!(msg.contains("No such file"));
        assert!(err.is_io());
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
    }

    #[test]
    fn test_json_error_is_not_io() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = LogsiftError::from(json_err);
        assert!(!err.is_io());
        assert_eq!(err.io_kind(), None);
    }
}
