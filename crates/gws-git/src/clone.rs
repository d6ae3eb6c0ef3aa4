//! Operations that shell out to the `git` binary

use std::path::Path;
use std::process::Command;

use gws_fs::NormalizedPath;
use gws_fs::io::ensure_dir;
use tracing::{debug, info};

use crate::{Error, Result};

/// Output of `git --version`, trimmed.
pub fn git_version() -> Result<String> {
    let output = Command::new("git")
        .arg("--version")
        .output()
        .map_err(Error::GitMissing)?;
    if !output.status.success() {
        return Err(Error::CommandFailed {
            command: "--version".to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Clone `url` into `dest`, creating missing parent directories.
///
/// The destination must not exist yet.
pub fn clone(url: &str, dest: &Path, branch: Option<&str>) -> Result<()> {
    if dest.exists() {
        return Err(Error::DestinationExists {
            path: dest.to_path_buf(),
        });
    }
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(&NormalizedPath::new(parent), 0o755)?;
    }

    let mut args = vec!["clone".to_string()];
    if let Some(branch) = branch {
        args.push("--branch".to_string());
        args.push(branch.to_string());
    }
    args.push(url.to_string());
    args.push(dest.to_string_lossy().into_owned());
    debug!(?args, "running git");

    let output = Command::new("git")
        .args(&args)
        .output()
        .map_err(Error::GitMissing)?;
    if !output.status.success() {
        return Err(Error::CommandFailed {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    info!(url, dest = %dest.display(), "cloned repository");
    Ok(())
}
