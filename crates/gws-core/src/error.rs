//! Error types for gws-core

use std::path::PathBuf;

/// Result type for gws-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gws-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No home directory could be determined and none was given
    #[error("Could not determine the home directory; pass --home or set GWS_HOME")]
    HomeNotFound,

    #[error("Invalid workspace name: {0}")]
    InvalidName(String),

    #[error("Workspace '{name}' already exists (use --force to overwrite)")]
    WorkspaceExists { name: String },

    #[error("Workspace '{name}' not found. Run 'gitws init {name}' first")]
    WorkspaceNotFound { name: String },

    #[error("Unknown provider '{provider}' (supported: {supported})")]
    UnknownProvider { provider: String, supported: String },

    #[error("Either --host or --host-name must be given")]
    HostUnspecified,

    #[error("--gpg-key is required when signing with gpg")]
    MissingGpgKey,

    #[error("Unknown signing method '{0}' (expected none, ssh or gpg)")]
    InvalidSigning(String),

    /// Two workspaces would claim the same `gitdir:` prefix
    #[error("Root {root} is already used by workspace '{other}'")]
    RootConflict { root: String, other: String },

    #[error("Unable to parse repository URL: {0}")]
    UnparsableUrl(String),

    #[error("SSH key generation failed for {path}: {message}")]
    KeyGeneration { path: PathBuf, message: String },

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Filesystem error from gws-fs
    #[error(transparent)]
    Fs(#[from] gws_fs::Error),
}
