//! Git access for gitws
//!
//! Repository inspection and configuration go through `git2`; cloning
//! shells out to `git` so the user's SSH setup (and our aliases) apply.

pub mod clone;
pub mod error;
pub mod hooks;
pub mod repo;

pub use clone::{clone, git_version};
pub use error::{Error, Result};
pub use hooks::{HookState, guard_hooks_installed, hook_state, install_guard_hooks};
pub use repo::{GitRepo, SigningStatus};
