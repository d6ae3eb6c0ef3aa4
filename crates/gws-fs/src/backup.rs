//! Timestamped backup snapshots
//!
//! A snapshot is a byte-for-byte copy of a file taken before it is edited,
//! stored next to it as `<name>.bak.<YYYYMMDDHHMMSS>`. Snapshots are never
//! pruned and never read back by gitws; they exist for manual recovery.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};

use chrono::{DateTime, Local};
use tracing::debug;

use crate::{Error, NormalizedPath, Result};

/// Fixed-width timestamp format, so lexical and chronological order agree.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Format a timestamp the way backup and rotation suffixes expect.
pub fn timestamp(now: DateTime<Local>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Snapshot `path` using the current local time.
///
/// Returns `Ok(None)` when `path` does not exist.
pub fn create_backup(path: &NormalizedPath) -> Result<Option<NormalizedPath>> {
    create_backup_at(path, Local::now())
}

/// Snapshot `path`, stamping the backup with `now`.
///
/// If a snapshot with the same stamp already exists (two edits within one
/// second), a numeric suffix is appended instead of overwriting it.
pub fn create_backup_at(
    path: &NormalizedPath,
    now: DateTime<Local>,
) -> Result<Option<NormalizedPath>> {
    let source = path.to_native();
    let metadata = match fs::metadata(&source) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io("inspect file for backup", &source, e)),
    };

    let content = fs::read(&source).map_err(|e| Error::io("read file for backup", &source, e))?;
    let base = path.with_suffix(&format!(".bak.{}", timestamp(now)));

    let mut attempt = 0u32;
    loop {
        let candidate = if attempt == 0 {
            base.clone()
        } else {
            base.with_suffix(&format!(".{attempt}"))
        };
        let target = candidate.to_native();

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&target) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                attempt += 1;
                continue;
            }
            Err(e) => return Err(Error::io("create backup", &target, e)),
        };

        let written = file
            .write_all(&content)
            .and_then(|()| file.sync_all())
            .and_then(|()| fs::set_permissions(&target, metadata.permissions()));
        if let Err(e) = written {
            drop(file);
            let _ = fs::remove_file(&target);
            return Err(Error::io("write backup", &target, e));
        }

        debug!(source = %path, backup = %candidate, "created backup snapshot");
        return Ok(Some(candidate));
    }
}
