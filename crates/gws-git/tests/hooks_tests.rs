//! Guard hook installation.

use gws_git::hooks::{GUARD_HOOKS, hooks_dir};
use gws_git::{GitRepo, HookState, guard_hooks_installed, hook_state, install_guard_hooks};
use gws_test_utils::git::real_git_repo;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn repo() -> (TempDir, GitRepo) {
    let temp = TempDir::new().unwrap();
    real_git_repo(temp.path());
    let repo = GitRepo::discover(temp.path()).unwrap();
    (temp, repo)
}

#[test]
fn test_install_writes_both_hooks() {
    let (_temp, repo) = repo();
    assert!(!guard_hooks_installed(&repo).unwrap());

    let written = install_guard_hooks(&repo, "github-com-work", "me@work.com").unwrap();

    assert_eq!(written.len(), GUARD_HOOKS.len());
    assert!(guard_hooks_installed(&repo).unwrap());
    let script = std::fs::read_to_string(hooks_dir(&repo).join("pre-commit").to_native()).unwrap();
    assert!(script.contains("expected_alias='github-com-work'"));
    assert!(script.contains("expected_email='me@work.com'"));
}

#[cfg(unix)]
#[test]
fn test_hooks_are_executable() {
    use std::os::unix::fs::PermissionsExt;

    let (_temp, repo) = repo();
    install_guard_hooks(&repo, "github-com-work", "me@work.com").unwrap();

    for hook in GUARD_HOOKS {
        let mode = std::fs::metadata(hooks_dir(&repo).join(hook).to_native())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755, "{hook}");
    }
}

#[test]
fn test_reinstall_is_a_no_op() {
    let (_temp, repo) = repo();
    install_guard_hooks(&repo, "github-com-work", "me@work.com").unwrap();

    let written = install_guard_hooks(&repo, "github-com-work", "me@work.com").unwrap();

    assert!(written.is_empty());
}

#[test]
fn test_foreign_hook_is_backed_up() {
    let (_temp, repo) = repo();
    let dir = hooks_dir(&repo);
    std::fs::create_dir_all(dir.to_native()).unwrap();
    std::fs::write(dir.join("pre-push").to_native(), "#!/bin/sh\nmake lint\n").unwrap();
    assert_eq!(hook_state(&repo, "pre-push").unwrap(), HookState::Foreign);

    install_guard_hooks(&repo, "github-com-work", "me@work.com").unwrap();

    assert_eq!(hook_state(&repo, "pre-push").unwrap(), HookState::Guard);
    let backups: Vec<_> = std::fs::read_dir(dir.to_native())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with("pre-push.bak."))
        .collect();
    assert_eq!(backups.len(), 1);
    assert_eq!(
        std::fs::read_to_string(backups[0].path()).unwrap(),
        "#!/bin/sh\nmake lint\n"
    );
}
