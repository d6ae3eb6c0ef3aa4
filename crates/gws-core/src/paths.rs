//! Locations of every file gitws reads or writes.
//!
//! All paths hang off a single home directory so tests can point the whole
//! tool at a temporary directory.

use std::path::PathBuf;

use gws_fs::NormalizedPath;

use crate::{Error, Result};

/// Resolved file locations under one home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GwsPaths {
    home: NormalizedPath,
}

impl GwsPaths {
    pub fn new(home: impl Into<NormalizedPath>) -> Self {
        Self { home: home.into() }
    }

    /// Use `home_override` if given, otherwise the current user's home.
    pub fn resolve(home_override: Option<PathBuf>) -> Result<Self> {
        let home = match home_override {
            Some(home) => home,
            None => dirs::home_dir().ok_or(Error::HomeNotFound)?,
        };
        Ok(Self::new(home))
    }

    pub fn home(&self) -> &NormalizedPath {
        &self.home
    }

    pub fn ssh_dir(&self) -> NormalizedPath {
        self.home.join(".ssh")
    }

    pub fn ssh_config(&self) -> NormalizedPath {
        self.ssh_dir().join("config")
    }

    pub fn global_gitconfig(&self) -> NormalizedPath {
        self.home.join(".gitconfig")
    }

    /// `~/.gws`, holding the registry and per-workspace git configs.
    pub fn state_dir(&self) -> NormalizedPath {
        self.home.join(".gws")
    }

    pub fn registry(&self) -> NormalizedPath {
        self.state_dir().join("config.yaml")
    }

    pub fn gitconfig_dir(&self) -> NormalizedPath {
        self.state_dir().join("gitconfig")
    }

    pub fn workspace_gitconfig(&self, workspace: &str) -> NormalizedPath {
        self.gitconfig_dir().join(workspace)
    }

    /// Private key path; the public key is the same path plus `.pub`.
    pub fn key_path(&self, workspace: &str) -> NormalizedPath {
        self.ssh_dir().join(&format!("id_ed25519_gws_{workspace}"))
    }

    pub fn default_root(&self, workspace: &str) -> NormalizedPath {
        self.home.join("code").join(workspace)
    }

    /// Expand a user-supplied path, resolving `~` against this home.
    pub fn expand(&self, input: &str) -> NormalizedPath {
        NormalizedPath::expand_home(input, &self.home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_under_home() {
        let paths = GwsPaths::new("/home/me");
        assert_eq!(paths.ssh_config().as_str(), "/home/me/.ssh/config");
        assert_eq!(paths.global_gitconfig().as_str(), "/home/me/.gitconfig");
        assert_eq!(paths.registry().as_str(), "/home/me/.gws/config.yaml");
        assert_eq!(
            paths.workspace_gitconfig("work").as_str(),
            "/home/me/.gws/gitconfig/work"
        );
        assert_eq!(
            paths.key_path("work").as_str(),
            "/home/me/.ssh/id_ed25519_gws_work"
        );
        assert_eq!(paths.default_root("work").as_str(), "/home/me/code/work");
    }

    #[test]
    fn override_wins() {
        let paths = GwsPaths::resolve(Some(PathBuf::from("/tmp/fake-home"))).unwrap();
        assert_eq!(paths.home().as_str(), "/tmp/fake-home");
    }
}
