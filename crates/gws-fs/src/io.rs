//! Atomic I/O operations
//!
//! A write moves through `Created(temp) -> Written -> PermissionsSet ->
//! Closed -> Renamed`. Any failure before the rename drops the temporary file,
//! which deletes it, so the target is either fully replaced or untouched.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::{Error, NormalizedPath, Result};

/// Owner read/write only. Used for `~/.ssh/config` and private material.
pub const MODE_PRIVATE: u32 = 0o600;
/// Owner read/write, world readable.
pub const MODE_PUBLIC: u32 = 0o644;
/// Executable scripts such as git hooks.
pub const MODE_EXECUTABLE: u32 = 0o755;

/// Write content atomically to a file with the given permission bits.
///
/// The temporary file is created in the target's own directory so the final
/// rename never crosses a filesystem boundary. The parent directory must
/// already exist.
pub fn write_atomic(path: &NormalizedPath, content: &[u8], mode: u32) -> Result<()> {
    let native_path = path.to_native();
    let dir = match native_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = native_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut temp = tempfile::Builder::new()
        .prefix(&format!(".{file_name}."))
        .suffix(".tmp")
        .tempfile_in(&dir)
        .map_err(|e| Error::io("create temp file for", &native_path, e))?;

    temp.write_all(content)
        .map_err(|e| Error::io("write temp file for", &native_path, e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| Error::io("flush temp file for", &native_path, e))?;

    set_mode(temp.as_file(), mode)
        .map_err(|e| Error::io("set permissions on temp file for", &native_path, e))?;

    // On failure the temp file comes back inside the error and is removed on drop
    temp.persist(&native_path)
        .map_err(|e| Error::io("rename temp file onto", &native_path, e.error))?;

    debug!(path = %path, bytes = content.len(), mode = %format!("{mode:o}"), "wrote file atomically");
    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io("read", &native_path, e))
}

/// Read text content, treating a missing file as empty.
pub fn read_text_or_empty(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    match fs::read_to_string(&native_path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(Error::io("read", &native_path, e)),
    }
}

/// Create a directory (and parents) if missing, applying `mode` to a newly
/// created leaf directory.
pub fn ensure_dir(path: &NormalizedPath, mode: u32) -> Result<()> {
    let native_path = path.to_native();
    if native_path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(&native_path).map_err(|e| Error::io("create directory", &native_path, e))?;
    set_dir_mode(&native_path, mode).map_err(|e| Error::io("set permissions on", &native_path, e))
}

#[cfg(unix)]
fn set_mode(file: &File, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_file: &File, _mode: u32) -> std::io::Result<()> {
    Ok(())
}

#[cfg(unix)]
fn set_dir_mode(path: &std::path::Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_dir_mode(_path: &std::path::Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_text_or_empty_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path().join("absent"));
        assert_eq!(read_text_or_empty(&path).unwrap(), "");
    }

    #[test]
    fn ensure_dir_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path().join("a/b"));
        ensure_dir(&path, 0o700).unwrap();
        ensure_dir(&path, 0o700).unwrap();
        assert!(path.to_native().is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn ensure_dir_applies_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path().join(".ssh"));
        ensure_dir(&path, 0o700).unwrap();

        let mode = fs::metadata(path.to_native()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }
}
