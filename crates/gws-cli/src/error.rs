//! Error types for gws-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] gws_core::Error),

    #[error(transparent)]
    Git(#[from] gws_git::Error),

    #[error(transparent)]
    Fs(#[from] gws_fs::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
