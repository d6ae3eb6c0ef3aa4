//! Advisory file locking
//!
//! Serializes read-modify-write cycles between cooperating gitws processes.
//! Other programs editing the same file are not excluded.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::{Error, NormalizedPath, Result};

/// An exclusive lock on `.<name>.lock` next to the guarded file.
///
/// The lock is released when the guard is dropped. The lock file itself is
/// left in place; deleting it would let a waiting process lock an unlinked
/// inode.
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Block until the lock for `target` is held.
    pub fn acquire(target: &NormalizedPath) -> Result<Self> {
        let path = Self::lock_path(target);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| Error::io("open lock file", &path, e))?;

        FileExt::lock_exclusive(&file).map_err(|_| Error::LockFailed {
            path: target.to_native(),
        })?;

        debug!(lock = %path.display(), "acquired lock");
        Ok(Self { file, path })
    }

    /// Path of the lock file guarding `target`.
    pub fn lock_path(target: &NormalizedPath) -> PathBuf {
        let name = target.file_name().unwrap_or("file");
        target.with_file_name(&format!(".{name}.lock")).to_native()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
        debug!(lock = %self.path.display(), "released lock");
    }
}
