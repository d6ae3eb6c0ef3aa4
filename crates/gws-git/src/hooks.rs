//! Guard hooks that flag commits and pushes made with the wrong identity
//!
//! Each hook embeds the workspace's SSH alias and email, so it needs no
//! access to the registry at commit time.

use gws_fs::io::{ensure_dir, read_text_or_empty};
use gws_fs::{MODE_EXECUTABLE, NormalizedPath, create_backup, write_atomic};
use tracing::{debug, warn};

use crate::{GitRepo, Result};

/// First line after the shebang in every hook gitws writes.
pub const GUARD_MARKER: &str = "# gitws guard";

pub const GUARD_HOOKS: [&str; 2] = ["pre-commit", "pre-push"];

/// What sits at a hook path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookState {
    Missing,
    Guard,
    /// A hook not written by gitws.
    Foreign,
}

pub fn hooks_dir(repo: &GitRepo) -> NormalizedPath {
    repo.git_dir().join("hooks")
}

pub fn render_guard_hook(hook: &str, alias: &str, email: &str) -> String {
    format!(
        r#"#!/bin/sh
{GUARD_MARKER} ({hook})
# Reinstall with `gitws fix --enable-guards`.
expected_alias={alias}
expected_email={email}

remote_url=$(git remote get-url origin 2>/dev/null)
host=$(printf '%s\n' "$remote_url" | sed -n 's/^[^@]*@\([^:]*\):.*/\1/p')
email=$(git config user.email)

if [ -n "$remote_url" ] && [ "$host" != "$expected_alias" ]; then
    echo "gitws: origin $remote_url does not use workspace alias $expected_alias" >&2
fi
if [ "$email" != "$expected_email" ]; then
    echo "gitws: user.email is '$email', expected '$expected_email'" >&2
fi
exit 0
"#,
        alias = sh_quote(alias),
        email = sh_quote(email),
    )
}

/// Write both guard hooks. A foreign hook is backed up before it is replaced.
pub fn install_guard_hooks(repo: &GitRepo, alias: &str, email: &str) -> Result<Vec<NormalizedPath>> {
    let dir = hooks_dir(repo);
    ensure_dir(&dir, 0o755)?;

    let mut written = Vec::new();
    for hook in GUARD_HOOKS {
        let path = dir.join(hook);
        let content = render_guard_hook(hook, alias, email);
        let existing = read_text_or_empty(&path)?;
        if existing == content {
            debug!(path = %path, "guard hook up to date");
            continue;
        }
        if !existing.is_empty() && !existing.contains(GUARD_MARKER) {
            let backup = create_backup(&path)?;
            warn!(path = %path, backup = ?backup.as_ref().map(|b| b.as_str()), "replacing existing hook");
        }
        write_atomic(&path, content.as_bytes(), MODE_EXECUTABLE)?;
        debug!(path = %path, "installed guard hook");
        written.push(path);
    }
    Ok(written)
}

pub fn hook_state(repo: &GitRepo, hook: &str) -> Result<HookState> {
    let path = hooks_dir(repo).join(hook);
    if !path.is_file() {
        return Ok(HookState::Missing);
    }
    Ok(if read_text_or_empty(&path)?.contains(GUARD_MARKER) {
        HookState::Guard
    } else {
        HookState::Foreign
    })
}

/// True when every guard hook is present.
pub fn guard_hooks_installed(repo: &GitRepo) -> Result<bool> {
    for hook in GUARD_HOOKS {
        if hook_state(repo, hook)? != HookState::Guard {
            return Ok(false);
        }
    }
    Ok(true)
}

fn sh_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
