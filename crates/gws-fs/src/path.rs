//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A path normalized to use forward slashes internally.
///
/// Git config values (`gitdir:` conditions, `path =` includes) expect forward
/// slashes on every platform, so paths are kept in that form and converted to
/// platform-native format only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage. Windows
    /// verbatim prefixes (`\\?\C:\...`) are simplified away first.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let simplified = dunce::simplified(path.as_ref());
        let normalized = simplified.to_string_lossy().replace('\\', "/");
        Self { inner: normalized }
    }

    /// Expand a user-supplied path against `home`.
    ///
    /// `~` and `~/rest` resolve under `home`; anything else is taken as is.
    pub fn expand_home(input: &str, home: &NormalizedPath) -> Self {
        let input = input.trim();
        if input == "~" {
            return home.clone();
        }
        match input.strip_prefix("~/").or_else(|| input.strip_prefix("~\\")) {
            Some(rest) => home.join(rest),
            None => Self::new(input),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Append `suffix` to the final component (`config` -> `config.bak.1`).
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self {
            inner: format!("{}{}", self.inner.trim_end_matches('/'), suffix),
        }
    }

    /// Replace the final component with `name`.
    pub fn with_file_name(&self, name: &str) -> Self {
        match self.parent() {
            Some(parent) => parent.join(name),
            None => Self::new(name),
        }
    }

    /// The path as a directory prefix, always ending in exactly one `/`.
    ///
    /// Git's `gitdir:` condition is a prefix match, so `~/code/work` must be
    /// written as `~/code/work/` to avoid also matching `~/code/workshop`.
    pub fn as_dir_prefix(&self) -> String {
        format!("{}/", self.inner.trim_end_matches('/'))
    }

    /// Whether `self` equals `other` or lies underneath it.
    pub fn starts_with_dir(&self, other: &NormalizedPath) -> bool {
        self.inner == other.inner.trim_end_matches('/')
            || self.as_dir_prefix().starts_with(&other.as_dir_prefix())
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<NormalizedPath> for String {
    fn from(p: NormalizedPath) -> Self {
        p.inner
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

/// Validate a name that will be embedded in file names and marker lines.
///
/// Accepts `[A-Za-z0-9._-]+` not starting with `.` or `-`. Returns a
/// human-readable message on failure; `label` names the thing validated.
pub fn validate_identifier(name: &str, label: &str) -> std::result::Result<(), String> {
    if name.is_empty() {
        return Err(format!("{label} must not be empty"));
    }
    if name.starts_with('.') || name.starts_with('-') {
        return Err(format!("{label} '{name}' must not start with '.' or '-'"));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')))
    {
        return Err(format!(
            "{label} '{name}' contains invalid character {bad:?} (allowed: letters, digits, '.', '_', '-')"
        ));
    }
    Ok(())
}
