//! Error types for gws-git

use std::path::PathBuf;

/// Result type for gws-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gws-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] gws_fs::Error),

    #[error("Not in a git repository: {path}")]
    NotARepository { path: PathBuf },

    #[error("Repository at {path} has no working tree")]
    Bare { path: PathBuf },

    #[error("Destination {path} already exists")]
    DestinationExists { path: PathBuf },

    #[error("git is not installed or not on PATH: {0}")]
    GitMissing(#[source] std::io::Error),

    #[error("`git {command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },
}
