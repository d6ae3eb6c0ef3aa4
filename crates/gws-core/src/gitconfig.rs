//! Global `includeIf` routing and per-workspace git configs

use std::fmt::Write as _;

use gws_blocks::{Namespace, marker_pair};
use gws_fs::MODE_PUBLIC;

use crate::managed::{BlockEdit, FileChange, edit_block, write_owned};
use crate::{GwsPaths, Registry, Result, Signing, Workspace};

/// The shared `includeIf` block covering every registered workspace.
///
/// Always rendered from the whole registry so the block never holds stale or
/// duplicate stanzas. `None` when no workspace is registered.
pub fn render_include_block(paths: &GwsPaths, registry: &Registry) -> Option<String> {
    if registry.is_empty() {
        return None;
    }

    let mut body = String::new();
    for (name, workspace) in registry.iter() {
        let _ = writeln!(
            body,
            "[includeIf \"gitdir:{}\"]\n  path = {}",
            workspace.root.as_dir_prefix(),
            paths.workspace_gitconfig(name)
        );
    }
    Some(marker_pair(Namespace::GitIncludeIf).wrap(&body))
}

/// Rewrite the `includeIf` block in `~/.gitconfig` to match `registry`,
/// removing it once the registry is empty.
pub fn sync_include_block(paths: &GwsPaths, registry: &Registry) -> Result<FileChange> {
    let edit = match render_include_block(paths, registry) {
        Some(block) => BlockEdit::Upsert(block),
        None => BlockEdit::Remove,
    };
    edit_block(
        &paths.global_gitconfig(),
        &marker_pair(Namespace::GitIncludeIf),
        &edit,
        MODE_PUBLIC,
    )
}

/// Contents of `~/.gws/gitconfig/<name>`.
pub fn render_workspace_gitconfig(workspace: &Workspace) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[user]");
    let _ = writeln!(out, "  name = {}", workspace.name);
    let _ = writeln!(out, "  email = {}", workspace.email);
    if let Some(key) = workspace.signing_key() {
        let _ = writeln!(out, "  signingkey = {key}");
    }
    if workspace.signing == Signing::Ssh {
        let _ = writeln!(out, "\n[gpg]\n  format = ssh");
    }
    let _ = writeln!(out, "\n[commit]");
    let _ = writeln!(out, "  gpgsign = {}", workspace.signing_key().is_some());
    out
}

pub fn write_workspace_gitconfig(
    paths: &GwsPaths,
    name: &str,
    workspace: &Workspace,
) -> Result<FileChange> {
    write_owned(
        &paths.workspace_gitconfig(name),
        &render_workspace_gitconfig(workspace),
        MODE_PUBLIC,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gws_fs::NormalizedPath;
    use pretty_assertions::assert_eq;

    fn workspace(signing: Signing, root: &str) -> Workspace {
        Workspace {
            email: "me@work.com".into(),
            provider: Some("github".into()),
            host_name: "github.com".into(),
            ssh_alias: "github-com-work".into(),
            ssh_key: NormalizedPath::new("/h/.ssh/id_ed25519_gws_work"),
            root: NormalizedPath::new(root),
            signing,
            name: "Me".into(),
            gpg_key: Some("ABCD1234".into()),
        }
    }

    #[test]
    fn include_block_lists_every_workspace_with_trailing_slash() {
        let paths = GwsPaths::new("/h");
        let mut registry = Registry::default();
        registry.insert("work", workspace(Signing::None, "/h/code/work"));
        registry.insert("oss", workspace(Signing::None, "/h/code/oss/"));

        let block = render_include_block(&paths, &registry).unwrap();

        assert_eq!(
            block,
            "# >>> gws includeIf >>> DO NOT EDIT\n\
             [includeIf \"gitdir:/h/code/oss/\"]\n  path = /h/.gws/gitconfig/oss\n\
             [includeIf \"gitdir:/h/code/work/\"]\n  path = /h/.gws/gitconfig/work\n\
             # <<< gws includeIf <<<"
        );
    }

    #[test]
    fn empty_registry_renders_nothing() {
        assert_eq!(render_include_block(&GwsPaths::new("/h"), &Registry::default()), None);
    }

    #[test]
    fn unsigned_gitconfig() {
        assert_eq!(
            render_workspace_gitconfig(&workspace(Signing::None, "/r")),
            "[user]\n  name = Me\n  email = me@work.com\n\n[commit]\n  gpgsign = false\n"
        );
    }

    #[test]
    fn ssh_signed_gitconfig_uses_public_key() {
        let rendered = render_workspace_gitconfig(&workspace(Signing::Ssh, "/r"));
        assert!(rendered.contains("  signingkey = /h/.ssh/id_ed25519_gws_work.pub\n"));
        assert!(rendered.contains("[gpg]\n  format = ssh\n"));
        assert!(rendered.contains("  gpgsign = true\n"));
    }

    #[test]
    fn gpg_signed_gitconfig_uses_key_id() {
        let rendered = render_workspace_gitconfig(&workspace(Signing::Gpg, "/r"));
        assert!(rendered.contains("  signingkey = ABCD1234\n"));
        assert!(!rendered.contains("[gpg]"));
        assert!(rendered.contains("  gpgsign = true\n"));
    }
}
