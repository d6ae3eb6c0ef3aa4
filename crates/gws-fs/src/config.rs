//! Format-agnostic configuration loading and saving

use crate::{Error, NormalizedPath, Result, io};
use serde::{Serialize, de::DeserializeOwned};

/// Format-agnostic configuration store.
///
/// Detects the format from the file extension and always saves through
/// [`io::write_atomic`], so a crash never leaves a truncated config behind.
#[derive(Debug, Clone, Copy)]
pub struct ConfigStore {
    mode: u32,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self {
            mode: io::MODE_PUBLIC,
        }
    }
}

impl ConfigStore {
    /// Create a new ConfigStore writing files with mode 0644.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file.
    ///
    /// Format is detected from file extension:
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let content = io::read_text(path)?;
        Self::parse(path, &content)
    }

    /// Load configuration, returning `T::default()` when the file is missing
    /// or blank.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, path: &NormalizedPath) -> Result<T> {
        let content = io::read_text_or_empty(path)?;
        if content.trim().is_empty() {
            return Ok(T::default());
        }
        Self::parse(path, &content)
    }

    fn parse<T: DeserializeOwned>(path: &NormalizedPath, content: &str) -> Result<T> {
        let extension = path.extension().unwrap_or("");

        match extension.to_lowercase().as_str() {
            "json" => serde_json::from_str(content).map_err(|e| Error::ConfigParse {
                path: path.to_native(),
                format: "JSON".into(),
                message: e.to_string(),
            }),
            "yaml" | "yml" => serde_yaml::from_str(content).map_err(|e| Error::ConfigParse {
                path: path.to_native(),
                format: "YAML".into(),
                message: e.to_string(),
            }),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    /// Save configuration to a file.
    ///
    /// Format is determined from file extension. The parent directory is
    /// created if needed.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let extension = path.extension().unwrap_or("");

        let content = match extension.to_lowercase().as_str() {
            "json" => serde_json::to_string_pretty(value).map_err(|e| Error::ConfigSerialize {
                path: path.to_native(),
                format: "JSON".into(),
                message: e.to_string(),
            })?,
            "yaml" | "yml" => serde_yaml::to_string(value).map_err(|e| Error::ConfigSerialize {
                path: path.to_native(),
                format: "YAML".into(),
                message: e.to_string(),
            })?,
            _ => {
                return Err(Error::UnsupportedFormat {
                    extension: extension.to_string(),
                });
            }
        };

        if let Some(parent) = path.parent() {
            io::ensure_dir(&parent, 0o755)?;
        }
        io::write_atomic(path, content.as_bytes(), self.mode)
    }
}
