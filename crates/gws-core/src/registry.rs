//! The workspace registry at `~/.gws/config.yaml`

use std::collections::BTreeMap;

use gws_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::{Error, GwsPaths, Result, Workspace};

/// All registered workspaces, keyed by workspace name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub workspaces: BTreeMap<String, Workspace>,
}

impl Registry {
    /// Load the registry, treating a missing file as empty.
    pub fn load(paths: &GwsPaths) -> Result<Self> {
        Ok(ConfigStore::new().load_or_default(&paths.registry())?)
    }

    pub fn save(&self, paths: &GwsPaths) -> Result<()> {
        ConfigStore::new().save(&paths.registry(), self)?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Workspace> {
        self.workspaces.get(name)
    }

    /// Look up a workspace that must exist.
    pub fn require(&self, name: &str) -> Result<&Workspace> {
        self.get(name).ok_or_else(|| Error::WorkspaceNotFound {
            name: name.to_string(),
        })
    }

    pub fn insert(&mut self, name: impl Into<String>, workspace: Workspace) {
        self.workspaces.insert(name.into(), workspace);
    }

    pub fn remove(&mut self, name: &str) -> Option<Workspace> {
        self.workspaces.remove(name)
    }

    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Workspace)> {
        self.workspaces.iter().map(|(name, ws)| (name.as_str(), ws))
    }

    /// The workspace whose SSH alias is `alias`.
    pub fn find_by_alias(&self, alias: &str) -> Option<(&str, &Workspace)> {
        self.iter().find(|(_, ws)| ws.ssh_alias == alias)
    }

    /// The workspace connecting to `host_name` directly, e.g. `github.com`.
    pub fn find_by_host_name(&self, host_name: &str) -> Option<(&str, &Workspace)> {
        self.iter().find(|(_, ws)| ws.host_name == host_name)
    }

    /// The workspace whose root contains `path`.
    ///
    /// Nested roots resolve to the deepest match, mirroring git, where the
    /// last matching `includeIf` wins for overlapping prefixes.
    pub fn find_by_path(&self, path: &NormalizedPath) -> Option<(&str, &Workspace)> {
        self.iter()
            .filter(|(_, ws)| path.starts_with_dir(&ws.root))
            .max_by_key(|(_, ws)| ws.root.as_str().len())
    }

    /// Name of another workspace already using `root`.
    pub fn root_owner(&self, root: &NormalizedPath, except: &str) -> Option<&str> {
        let prefix = root.as_dir_prefix();
        self.iter()
            .find(|(name, ws)| *name != except && ws.root.as_dir_prefix() == prefix)
            .map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Signing;

    fn ws(alias: &str, root: &str) -> Workspace {
        Workspace {
            email: "me@example.com".into(),
            provider: Some("github".into()),
            host_name: "github.com".into(),
            ssh_alias: alias.into(),
            ssh_key: NormalizedPath::new("/home/me/.ssh/id_ed25519_gws_x"),
            root: NormalizedPath::new(root),
            signing: Signing::None,
            name: "Me".into(),
            gpg_key: None,
        }
    }

    #[test]
    fn deepest_root_wins() {
        let mut registry = Registry::default();
        registry.insert("code", ws("a", "/home/me/code"));
        registry.insert("work", ws("b", "/home/me/code/work"));

        let path = NormalizedPath::new("/home/me/code/work/org/repo");
        assert_eq!(registry.find_by_path(&path).map(|(n, _)| n), Some("work"));

        let path = NormalizedPath::new("/home/me/code/workshop/repo");
        assert_eq!(registry.find_by_path(&path).map(|(n, _)| n), Some("code"));
    }

    #[test]
    fn root_owner_ignores_trailing_slash_and_self() {
        let mut registry = Registry::default();
        registry.insert("work", ws("a", "/home/me/code/work"));

        let root = NormalizedPath::new("/home/me/code/work/");
        assert_eq!(registry.root_owner(&root, "other"), Some("work"));
        assert_eq!(registry.root_owner(&root, "work"), None);
    }
}
