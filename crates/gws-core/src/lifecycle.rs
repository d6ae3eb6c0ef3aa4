//! Workspace lifecycle: init, key rotation and removal.
//!
//! Each operation touches several files. Every file write is atomic and backed
//! up on its own, but the operation as a whole is not transactional: if a
//! later step fails, earlier files keep their new content.

use chrono::{DateTime, Local};
use gws_fs::NormalizedPath;
use tracing::{info, warn};

use crate::gitconfig::{sync_include_block, write_workspace_gitconfig};
use crate::managed::FileChange;
use crate::ssh::{self, KeyGenerator};
use crate::workspace::{build_ssh_alias, provider_host, supported_providers, validate_workspace_name};
use crate::{Error, GwsPaths, Registry, Result, Signing, Workspace};

/// Where a workspace's Git host comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostSpec {
    /// A known provider name such as `github`.
    Provider(String),
    /// An explicit host name such as `gitlab.example.com`.
    HostName(String),
}

impl HostSpec {
    /// Pick from the mutually exclusive `--host` / `--host-name` inputs.
    pub fn from_args(provider: Option<String>, host_name: Option<String>) -> Result<Self> {
        match (provider, host_name) {
            (Some(provider), None) => Ok(Self::Provider(provider)),
            (None, Some(host)) => Ok(Self::HostName(host)),
            _ => Err(Error::HostUnspecified),
        }
    }
}

/// Inputs to [`init`].
#[derive(Debug, Clone)]
pub struct InitOptions {
    pub workspace: String,
    pub email: String,
    pub host: HostSpec,
    /// Workspace root; `~` is expanded. Defaults to `~/code/<workspace>`.
    pub root: Option<String>,
    pub signing: Signing,
    /// Display name; defaults to the workspace name.
    pub display_name: Option<String>,
    pub gpg_key: Option<String>,
    /// Overwrite an existing registration.
    pub force: bool,
    /// Replace an existing key instead of reusing it.
    pub rotate_key: bool,
}

/// What [`init`] did.
#[derive(Debug, Clone)]
pub struct InitReport {
    pub workspace: Workspace,
    pub key_created: bool,
    pub retired_keys: Vec<NormalizedPath>,
    pub public_key: String,
    pub changes: Vec<FileChange>,
}

/// Register a workspace and wire up its key, SSH alias and git identity.
pub fn init(paths: &GwsPaths, keygen: &dyn KeyGenerator, opts: InitOptions) -> Result<InitReport> {
    validate_workspace_name(&opts.workspace)?;
    if opts.signing == Signing::Gpg && opts.gpg_key.as_deref().is_none_or(str::is_empty) {
        return Err(Error::MissingGpgKey);
    }

    let (provider, host_name, alias) = match &opts.host {
        HostSpec::Provider(provider) => {
            let host = provider_host(provider).ok_or_else(|| Error::UnknownProvider {
                provider: provider.clone(),
                supported: supported_providers(),
            })?;
            (
                Some(provider.clone()),
                host.to_string(),
                build_ssh_alias(provider, &opts.workspace),
            )
        }
        HostSpec::HostName(host) => (None, host.clone(), build_ssh_alias(host, &opts.workspace)),
    };

    let root = match &opts.root {
        Some(root) => paths.expand(root),
        None => paths.default_root(&opts.workspace),
    };

    let mut registry = Registry::load(paths)?;
    if registry.get(&opts.workspace).is_some() && !opts.force {
        return Err(Error::WorkspaceExists {
            name: opts.workspace.clone(),
        });
    }
    if let Some(other) = registry.root_owner(&root, &opts.workspace) {
        return Err(Error::RootConflict {
            root: root.to_string(),
            other: other.to_string(),
        });
    }

    let retired_keys = if opts.rotate_key {
        ssh::retire_key(&paths.key_path(&opts.workspace), Local::now())?
    } else {
        Vec::new()
    };
    let (key, key_created) = ssh::ensure_key(keygen, paths, &opts.workspace, &opts.email)?;

    let workspace = Workspace {
        email: opts.email,
        provider,
        host_name,
        ssh_alias: alias,
        ssh_key: key,
        root,
        signing: opts.signing,
        name: opts.display_name.unwrap_or_else(|| opts.workspace.clone()),
        gpg_key: opts.gpg_key.filter(|_| opts.signing == Signing::Gpg),
    };

    let mut changes = Vec::new();
    changes.push(ssh::upsert_host_block(
        paths,
        &opts.workspace,
        &workspace.ssh_alias,
        &workspace.host_name,
        &workspace.ssh_key,
    )?);

    registry.insert(opts.workspace.clone(), workspace.clone());
    changes.push(write_workspace_gitconfig(paths, &opts.workspace, &workspace)?);
    changes.push(sync_include_block(paths, &registry)?);
    registry.save(paths)?;

    info!(workspace = %opts.workspace, alias = %workspace.ssh_alias, "workspace initialized");
    Ok(InitReport {
        public_key: ssh::public_key(&workspace.ssh_key)?,
        workspace,
        key_created,
        retired_keys,
        changes,
    })
}

/// What [`rotate`] did.
#[derive(Debug, Clone)]
pub struct RotateReport {
    pub workspace: Workspace,
    pub retired_keys: Vec<NormalizedPath>,
    pub public_key: String,
    pub ssh_config: FileChange,
}

/// Replace a workspace's key pair, keeping the old one as `<key>.old-<ts>`.
pub fn rotate(
    paths: &GwsPaths,
    keygen: &dyn KeyGenerator,
    name: &str,
    now: DateTime<Local>,
) -> Result<RotateReport> {
    let mut registry = Registry::load(paths)?;
    let mut workspace = registry.require(name)?.clone();

    let retired_keys = ssh::retire_key(&workspace.ssh_key, now)?;
    let (key, _) = ssh::ensure_key(keygen, paths, name, &workspace.email)?;
    workspace.ssh_key = key;

    let ssh_config = ssh::upsert_host_block(
        paths,
        name,
        &workspace.ssh_alias,
        &workspace.host_name,
        &workspace.ssh_key,
    )?;

    registry.insert(name, workspace.clone());
    registry.save(paths)?;

    info!(workspace = %name, "rotated SSH key");
    Ok(RotateReport {
        public_key: ssh::public_key(&workspace.ssh_key)?,
        workspace,
        retired_keys,
        ssh_config,
    })
}

/// What [`remove`] did.
#[derive(Debug, Clone)]
pub struct RemoveReport {
    pub workspace: Workspace,
    pub changes: Vec<FileChange>,
    pub retired_keys: Vec<NormalizedPath>,
}

/// Unregister a workspace and remove its managed blocks.
///
/// The key pair is moved aside rather than deleted when `retire_keys` is set,
/// and left untouched otherwise.
pub fn remove(
    paths: &GwsPaths,
    name: &str,
    retire_keys: bool,
    now: DateTime<Local>,
) -> Result<RemoveReport> {
    let mut registry = Registry::load(paths)?;
    let workspace = registry.require(name)?.clone();

    let mut changes = vec![ssh::remove_host_block(paths, name)?];
    registry.remove(name);
    changes.push(sync_include_block(paths, &registry)?);

    let gitconfig = paths.workspace_gitconfig(name);
    if gitconfig.exists() {
        std::fs::remove_file(gitconfig.to_native())
            .map_err(|e| gws_fs::Error::io("remove", gitconfig.to_native(), e))?;
    }

    let retired_keys = if retire_keys {
        ssh::retire_key(&workspace.ssh_key, now)?
    } else {
        Vec::new()
    };
    if retired_keys.is_empty() && retire_keys {
        warn!(key = %workspace.ssh_key, "no key files found to retire");
    }

    registry.save(paths)?;
    info!(workspace = %name, "workspace removed");
    Ok(RemoveReport {
        workspace,
        changes,
        retired_keys,
    })
}
