//! Git repository fixtures.
//!
//! Prefer the `git2` fixtures; the CLI-backed one needs a `git` binary on
//! `PATH` and is only for tests that exercise a subprocess anyway.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Initialise an empty repository with `git2` (no commits, no remotes).
///
/// # Panics
/// Panics if `git2::Repository::init` fails.
pub fn real_git_repo(path: &Path) -> git2::Repository {
    git2::Repository::init(path).unwrap_or_else(|e| {
        panic!(
            "real_git_repo: failed to init repository at {}: {e}",
            path.display()
        )
    })
}

/// Initialise a repository whose `origin` points at `url`.
///
/// # Panics
/// Panics if the repository or remote cannot be created.
pub fn git_repo_with_origin(path: &Path, url: &str) -> git2::Repository {
    let repo = real_git_repo(path);
    repo.remote("origin", url)
        .unwrap_or_else(|e| panic!("git_repo_with_origin: failed to add origin {url}: {e}"));
    repo
}

/// Create a repository with one commit on `main` using the `git` CLI,
/// suitable as a clone source.
///
/// # Panics
/// Panics if any git command fails.
pub fn git_repo_with_commit(path: &Path) {
    let run = |args: &[&str]| {
        let output = Command::new("git")
            .args(args)
            .current_dir(path)
            .output()
            .unwrap_or_else(|e| panic!("git_repo_with_commit: failed to run `git {args:?}`: {e}"));
        if !output.status.success() {
            panic!(
                "git_repo_with_commit: `git {args:?}` failed:\n{}",
                String::from_utf8_lossy(&output.stderr)
            );
        }
    };

    fs::create_dir_all(path).unwrap();
    run(&["init"]);
    run(&["config", "user.email", "test@test.com"]);
    run(&["config", "user.name", "Test User"]);
    run(&["config", "commit.gpgsign", "false"]);
    fs::write(path.join("README.md"), "# Test").unwrap();
    run(&["add", "."]);
    run(&["commit", "-m", "Initial commit"]);
    run(&["branch", "-M", "main"]);
}
