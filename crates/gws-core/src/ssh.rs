//! SSH keys and the per-workspace `Host` block

use std::fs;
use std::process::{Command, Stdio};

use chrono::{DateTime, Local};
use gws_blocks::{Namespace, marker_pair};
use gws_fs::backup::timestamp;
use gws_fs::{MODE_PRIVATE, NormalizedPath, io};
use tracing::{debug, info};

use crate::managed::{BlockEdit, FileChange, edit_block};
use crate::{Error, GwsPaths, Result};

/// Creates an SSH key pair at a given path.
pub trait KeyGenerator {
    /// Write a private key to `path` and its public half to `path.pub`.
    fn generate(&self, path: &NormalizedPath, comment: &str) -> Result<()>;
}

/// Key generation through the system `ssh-keygen`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SshKeygen;

impl KeyGenerator for SshKeygen {
    fn generate(&self, path: &NormalizedPath, comment: &str) -> Result<()> {
        let output = Command::new("ssh-keygen")
            .args(["-q", "-t", "ed25519", "-C", comment, "-N", "", "-f"])
            .arg(path.to_native())
            .stdin(Stdio::null())
            .output()
            .map_err(|source| Error::Spawn {
                program: "ssh-keygen",
                source,
            })?;

        if !output.status.success() {
            return Err(Error::KeyGeneration {
                path: path.to_native(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Key comment identifying the workspace, `<email> gws-<workspace>`.
pub fn key_comment(email: &str, workspace: &str) -> String {
    format!("{email} gws-{workspace}")
}

/// Make sure the workspace key exists, generating it if needed.
///
/// Returns the private key path and whether a new key was created.
pub fn ensure_key(
    keygen: &dyn KeyGenerator,
    paths: &GwsPaths,
    workspace: &str,
    email: &str,
) -> Result<(NormalizedPath, bool)> {
    let key = paths.key_path(workspace);
    if key.exists() {
        debug!(key = %key, "reusing existing key");
        return Ok((key, false));
    }

    io::ensure_dir(&paths.ssh_dir(), 0o700)?;
    keygen.generate(&key, &key_comment(email, workspace))?;
    set_private(&key)?;
    info!(key = %key, "generated SSH key");
    Ok((key, true))
}

/// Move a key pair aside to `<key>.old-<timestamp>` so a new one can take its
/// place. Missing files are skipped; the moved paths are returned.
pub fn retire_key(key: &NormalizedPath, now: DateTime<Local>) -> Result<Vec<NormalizedPath>> {
    let suffix = format!(".old-{}", timestamp(now));
    let mut moved = Vec::new();
    for path in [key.clone(), key.with_suffix(".pub")] {
        if !path.exists() {
            continue;
        }
        let target = path.with_suffix(&suffix);
        fs::rename(path.to_native(), target.to_native())
            .map_err(|e| gws_fs::Error::io("move aside", path.to_native(), e))?;
        debug!(from = %path, to = %target, "retired key file");
        moved.push(target);
    }
    Ok(moved)
}

/// Contents of the public key for `key`, trimmed.
pub fn public_key(key: &NormalizedPath) -> Result<String> {
    Ok(io::read_text(&key.with_suffix(".pub"))?.trim().to_string())
}

/// The managed `Host` block for a workspace, markers included.
pub fn render_host_block(workspace: &str, alias: &str, host_name: &str, key: &NormalizedPath) -> String {
    let body = format!(
        "Host {alias}\n  HostName {host_name}\n  User git\n  IdentityFile {key}\n  IdentitiesOnly yes"
    );
    marker_pair(Namespace::SshHost(workspace)).wrap(&body)
}

/// Install or refresh the workspace `Host` block in `~/.ssh/config`.
pub fn upsert_host_block(
    paths: &GwsPaths,
    workspace: &str,
    alias: &str,
    host_name: &str,
    key: &NormalizedPath,
) -> Result<FileChange> {
    io::ensure_dir(&paths.ssh_dir(), 0o700)?;
    let block = render_host_block(workspace, alias, host_name, key);
    edit_block(
        &paths.ssh_config(),
        &marker_pair(Namespace::SshHost(workspace)),
        &BlockEdit::Upsert(block),
        MODE_PRIVATE,
    )
}

pub fn remove_host_block(paths: &GwsPaths, workspace: &str) -> Result<FileChange> {
    edit_block(
        &paths.ssh_config(),
        &marker_pair(Namespace::SshHost(workspace)),
        &BlockEdit::Remove,
        MODE_PRIVATE,
    )
}

/// Try an SSH handshake against `alias`.
///
/// Git hosts refuse shells and exit with 1 after authenticating; only 255
/// means the connection itself failed.
pub fn check_connection(alias: &str) -> Result<bool> {
    let status = Command::new("ssh")
        .args(["-T", "-o", "ConnectTimeout=10", "-o", "BatchMode=yes", alias])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|source| Error::Spawn {
            program: "ssh",
            source,
        })?;
    Ok(status.code() != Some(255))
}

#[cfg(unix)]
fn set_private(path: &NormalizedPath) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path.to_native(), fs::Permissions::from_mode(MODE_PRIVATE))
        .map_err(|e| gws_fs::Error::io("set permissions on", path.to_native(), e))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_private(_path: &NormalizedPath) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn host_block_layout() {
        let key = NormalizedPath::new("/home/me/.ssh/id_ed25519_gws_work");
        let block = render_host_block("work", "github-com-work", "github.com", &key);
        assert_eq!(
            block,
            "# >>> gws work >>> DO NOT EDIT\n\
             Host github-com-work\n  HostName github.com\n  User git\n  \
             IdentityFile /home/me/.ssh/id_ed25519_gws_work\n  IdentitiesOnly yes\n\
             # <<< gws work <<<"
        );
    }

    #[test]
    fn comment_names_workspace() {
        assert_eq!(key_comment("me@work.com", "work"), "me@work.com gws-work");
    }
}
