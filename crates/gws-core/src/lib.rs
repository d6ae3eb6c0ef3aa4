//! Core of gitws
//!
//! Models workspaces (isolated Git identities) and keeps the files that route
//! Git traffic through them in sync:
//!
//! - **SSH**: one key pair per workspace and a managed `Host` block in
//!   `~/.ssh/config` binding an alias to that key
//! - **Git**: a shared `includeIf` block in `~/.gitconfig` that loads
//!   `~/.gws/gitconfig/<name>` for repositories under the workspace root
//! - **Registry**: `~/.gws/config.yaml`, the source every block is rendered from
//!
//! Shared files are only ever edited inside marker-delimited blocks (see
//! `gws-blocks`), behind a lock, with a backup of the previous content and an
//! atomic replace (see `gws-fs`).

pub mod error;
pub mod gitconfig;
pub mod lifecycle;
pub mod managed;
pub mod paths;
pub mod registry;
pub mod rewrite;
pub mod ssh;
pub mod workspace;

pub use error::{Error, Result};
pub use lifecycle::{HostSpec, InitOptions, InitReport, RemoveReport, RotateReport, init, remove, rotate};
pub use managed::{BlockEdit, FileChange};
pub use paths::GwsPaths;
pub use registry::Registry;
pub use rewrite::{RepoRef, parse_remote, rewrite_url, ssh_host};
pub use ssh::{KeyGenerator, SshKeygen};
pub use workspace::{Signing, Workspace, build_ssh_alias};
