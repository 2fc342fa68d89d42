use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of a [`SessionStoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The store was asked to do something with invalid input.
    Configuration,
    /// The filesystem or the on-disk data failed.
    Storage,
}

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session path cannot be empty")]
    EmptyPath,

    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode record {record} at byte {offset} in {path}: {source}")]
    Decode {
        path: PathBuf,
        record: usize,
        offset: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize record {record} for {path}: {source}")]
    Serialize {
        path: PathBuf,
        record: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl SessionStoreError {
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn decode(
        path: impl Into<PathBuf>,
        record: usize,
        offset: usize,
        source: serde_json::Error,
    ) -> Self {
        Self::Decode {
            path: path.into(),
            record,
            offset,
            source,
        }
    }

    #[must_use]
    pub fn serialize(path: impl Into<PathBuf>, record: usize, source: serde_json::Error) -> Self {
        Self::Serialize {
            path: path.into(),
            record,
            source,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyPath => ErrorKind::Configuration,
            Self::Io { .. } | Self::Decode { .. } | Self::Serialize { .. } => ErrorKind::Storage,
        }
    }
}
