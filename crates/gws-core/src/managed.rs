//! Read-modify-write cycle for files shared with the user.
//!
//! Each cycle holds the advisory lock for the target, computes the new content
//! from the current content, and only if it differs takes a backup snapshot
//! and atomically replaces the file. A failed backup aborts before the write.

use gws_blocks::{MarkerPair, UpsertAction, remove, upsert};
use gws_fs::{FileLock, NormalizedPath, create_backup, io, write_atomic};
use tracing::{debug, warn};

use crate::Result;

/// What to do with a managed block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockEdit {
    /// Install or replace the block with this fully wrapped text.
    Upsert(String),
    Remove,
}

/// Result of one managed-file cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: NormalizedPath,
    pub changed: bool,
    /// Snapshot of the previous content, if one was taken.
    pub backup: Option<NormalizedPath>,
}

impl FileChange {
    fn unchanged(path: &NormalizedPath) -> Self {
        Self {
            path: path.clone(),
            changed: false,
            backup: None,
        }
    }
}

/// Apply `edit` to the block delimited by `markers` inside `path`.
///
/// A missing file reads as empty. Removing from a missing file leaves it
/// missing.
pub fn edit_block(
    path: &NormalizedPath,
    markers: &MarkerPair,
    edit: &BlockEdit,
    mode: u32,
) -> Result<FileChange> {
    if *edit == BlockEdit::Remove && !path.exists() {
        return Ok(FileChange::unchanged(path));
    }
    let _lock = FileLock::acquire(path)?;
    let current = io::read_text_or_empty(path)?;

    let updated = match edit {
        BlockEdit::Upsert(block) => {
            let result = upsert(&current, markers, block);
            match result.action {
                UpsertAction::AppendedAfterUnterminated => warn!(
                    path = %path,
                    marker = markers.start(),
                    "start marker without end marker; appended a new block, remove the stale one by hand"
                ),
                UpsertAction::Replaced {
                    skipped_orphan: true,
                } => warn!(
                    path = %path,
                    marker = markers.start(),
                    "left an unterminated start marker in place"
                ),
                _ => {}
            }
            result.content
        }
        BlockEdit::Remove => remove(&current, markers),
    };

    if updated == current {
        debug!(path = %path, "managed block already up to date");
        return Ok(FileChange::unchanged(path));
    }

    let backup = create_backup(path)?;
    write_atomic(path, updated.as_bytes(), mode)?;
    Ok(FileChange {
        path: path.clone(),
        changed: true,
        backup,
    })
}

/// Replace a file gitws owns entirely, skipping the write if nothing changed.
pub fn write_owned(path: &NormalizedPath, content: &str, mode: u32) -> Result<FileChange> {
    if let Some(parent) = path.parent() {
        io::ensure_dir(&parent, 0o755)?;
    }
    let _lock = FileLock::acquire(path)?;
    if path.exists() && io::read_text(path)? == content {
        return Ok(FileChange::unchanged(path));
    }
    write_atomic(path, content.as_bytes(), mode)?;
    Ok(FileChange {
        path: path.clone(),
        changed: true,
        backup: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gws_blocks::{Namespace, marker_pair};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn unchanged_content_skips_backup_and_write() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path().join("config"));
        let markers = marker_pair(Namespace::SshHost("work"));
        let block = markers.wrap("Host a");

        let first = edit_block(&path, &markers, &BlockEdit::Upsert(block.clone()), 0o600).unwrap();
        assert!(first.changed);
        assert_eq!(first.backup, None);

        let second = edit_block(&path, &markers, &BlockEdit::Upsert(block), 0o600).unwrap();
        assert!(!second.changed);

        let backups: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".bak."))
            .collect();
        assert!(backups.is_empty());
    }

    #[test]
    fn change_snapshots_previous_content() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path().join("config"));
        fs::write(path.to_native(), "Host mine\n").unwrap();
        let markers = marker_pair(Namespace::SshHost("work"));

        let change =
            edit_block(&path, &markers, &BlockEdit::Upsert(markers.wrap("Host a")), 0o600).unwrap();

        let backup = change.backup.expect("backup taken");
        assert_eq!(fs::read_to_string(backup.to_native()).unwrap(), "Host mine\n");
    }

    #[test]
    fn removing_from_missing_file_creates_nothing() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path().join("config"));
        let markers = marker_pair(Namespace::SshHost("work"));

        let change = edit_block(&path, &markers, &BlockEdit::Remove, 0o600).unwrap();

        assert!(!change.changed);
        assert!(!path.exists());
    }
}
