//! Repository context detection
//!
//! Finds the repository a command runs against and the workspace it belongs
//! to, so `status`, `fix` and `doctor` work from anywhere inside a repo.

use std::path::Path;

use gws_core::{Registry, Workspace, ssh_host};
use gws_git::GitRepo;
use serde::Serialize;

use crate::error::Result;

/// How a repository was tied to a workspace, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedBy {
    /// Origin already goes through the workspace SSH alias.
    Alias,
    /// The repository lives under the workspace root.
    Path,
    /// Origin points at the workspace's Git host directly.
    HostName,
}

#[derive(Debug, Clone, Copy)]
pub struct WorkspaceMatch<'a> {
    pub name: &'a str,
    pub workspace: &'a Workspace,
    pub by: MatchedBy,
}

pub struct RepoContext {
    pub repo: GitRepo,
    pub origin: Option<String>,
}

impl RepoContext {
    /// Open the repository containing `path`, or the current directory.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let repo = match path {
            Some(path) => GitRepo::discover(path)?,
            None => GitRepo::discover(&std::env::current_dir()?)?,
        };
        let origin = repo.origin_url()?;
        Ok(Self { repo, origin })
    }

    /// Host part of the origin URL, for SSH and HTTPS remotes alike.
    pub fn origin_host(&self) -> Option<&str> {
        self.origin.as_deref().and_then(remote_host)
    }

    pub fn uses_ssh(&self) -> bool {
        self.origin.as_deref().and_then(ssh_host).is_some()
    }

    pub fn workspace<'r>(&self, registry: &'r Registry) -> Option<WorkspaceMatch<'r>> {
        let host = self.origin_host();
        if let Some((name, workspace)) = host.and_then(|h| registry.find_by_alias(h)) {
            return Some(WorkspaceMatch { name, workspace, by: MatchedBy::Alias });
        }
        if let Some((name, workspace)) = registry.find_by_path(self.repo.root()) {
            return Some(WorkspaceMatch { name, workspace, by: MatchedBy::Path });
        }
        host.and_then(|h| registry.find_by_host_name(h))
            .map(|(name, workspace)| WorkspaceMatch { name, workspace, by: MatchedBy::HostName })
    }
}

fn remote_host(url: &str) -> Option<&str> {
    if let Some(host) = ssh_host(url) {
        return Some(host);
    }
    let rest = url.split_once("://")?.1;
    let authority = rest.split('/').next()?;
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    let host = host.split(':').next()?;
    (!host.is_empty()).then_some(host)
}
