//! Error types for gws-fs

use std::path::PathBuf;

/// Result type for gws-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gws-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to {op} {path}: {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Failed to serialize {format} config for {path}: {message}")]
    ConfigSerialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    /// Build an I/O error naming the operation that failed.
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}
