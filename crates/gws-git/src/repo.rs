//! Repository inspection and local configuration through `git2`

use std::path::{Path, PathBuf};

use git2::{Config, ConfigLevel, ErrorCode, Repository};
use gws_fs::NormalizedPath;
use tracing::debug;

use crate::{Error, Result};

const ORIGIN: &str = "origin";

/// Commit signing as git will apply it, after every config level is merged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SigningStatus {
    pub enabled: bool,
    /// `gpg.format`; git's default is `openpgp`.
    pub format: String,
    pub key: Option<String>,
}

/// A repository with a working tree.
pub struct GitRepo {
    repo: Repository,
    root: NormalizedPath,
}

impl std::fmt::Debug for GitRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepo").field("root", &self.root).finish()
    }
}

impl GitRepo {
    /// Find the repository containing `path`, searching upwards.
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|e| match e.code() {
            ErrorCode::NotFound => Error::NotARepository {
                path: path.to_path_buf(),
            },
            _ => Error::Git(e),
        })?;
        let root = repo
            .workdir()
            // Drops the trailing separator git2 reports.
            .map(|dir| NormalizedPath::new(dir.components().collect::<PathBuf>()))
            .ok_or_else(|| Error::Bare {
                path: repo.path().to_path_buf(),
            })?;
        debug!(root = %root, "discovered repository");
        Ok(Self { repo, root })
    }

    /// Working tree root.
    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// The `.git` directory.
    pub fn git_dir(&self) -> NormalizedPath {
        NormalizedPath::new(self.repo.path())
    }

    pub fn name(&self) -> &str {
        self.root.file_name().unwrap_or("")
    }

    pub fn origin_url(&self) -> Result<Option<String>> {
        match self.repo.find_remote(ORIGIN) {
            Ok(remote) => Ok(remote.url().map(str::to_string)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set_origin_url(&self, url: &str) -> Result<()> {
        self.repo.remote_set_url(ORIGIN, url)?;
        debug!(url, "updated origin");
        Ok(())
    }

    /// A value from `.git/config` only.
    pub fn local_config(&self, key: &str) -> Result<Option<String>> {
        let mut local = self.local_level()?;
        read_string(&local.snapshot()?, key)
    }

    pub fn set_local_config(&self, key: &str, value: &str) -> Result<()> {
        self.local_level()?.set_str(key, value)?;
        debug!(key, value, "set local config");
        Ok(())
    }

    /// Remove a key from `.git/config`; a missing key is not an error.
    pub fn unset_local_config(&self, key: &str) -> Result<()> {
        match self.local_level()?.remove(key) {
            Ok(()) => {
                debug!(key, "unset local config");
                Ok(())
            }
            Err(e) if e.code() == ErrorCode::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Set each `Some` value and unset each `None` in `.git/config`.
    pub fn apply_settings<K: AsRef<str>>(&self, settings: &[(K, Option<String>)]) -> Result<()> {
        for (key, value) in settings {
            match value {
                Some(value) => self.set_local_config(key.as_ref(), value)?,
                None => self.unset_local_config(key.as_ref())?,
            }
        }
        Ok(())
    }

    pub fn signing_status(&self) -> Result<SigningStatus> {
        let snapshot = self.repo.config()?.snapshot()?;
        let enabled = match snapshot.get_bool("commit.gpgsign") {
            Ok(enabled) => enabled,
            Err(e) if e.code() == ErrorCode::NotFound => false,
            Err(e) => return Err(e.into()),
        };
        Ok(SigningStatus {
            enabled,
            format: read_string(&snapshot, "gpg.format")?.unwrap_or_else(|| "openpgp".to_string()),
            key: read_string(&snapshot, "user.signingkey")?,
        })
    }

    fn local_level(&self) -> Result<Config> {
        Ok(self.repo.config()?.open_level(ConfigLevel::Local)?)
    }
}

fn read_string(config: &Config, key: &str) -> Result<Option<String>> {
    match config.get_string(key) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
