//! Workspace identity model

use std::fmt;
use std::str::FromStr;

use gws_fs::{NormalizedPath, validate_identifier};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Known providers and their SSH host names.
pub const PROVIDER_HOSTS: &[(&str, &str)] = &[
    ("github", "github.com"),
    ("gitlab", "gitlab.com"),
    ("bitbucket", "bitbucket.org"),
];

/// Longest alias accepted as an SSH `Host` pattern.
const MAX_ALIAS_LEN: usize = 63;

/// Host name for a known provider.
pub fn provider_host(provider: &str) -> Option<&'static str> {
    PROVIDER_HOSTS
        .iter()
        .find(|(name, _)| *name == provider)
        .map(|(_, host)| *host)
}

pub fn supported_providers() -> String {
    PROVIDER_HOSTS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the SSH alias `<host>-<workspace>`.
///
/// A known provider name is replaced by its host first. The result is
/// lowercased, anything outside `[a-z0-9-]` becomes `-`, dash runs collapse,
/// and the alias is capped at 63 characters with no leading or trailing dash.
pub fn build_ssh_alias(provider_or_host: &str, workspace: &str) -> String {
    let host = provider_host(provider_or_host).unwrap_or(provider_or_host);
    let raw = format!("{host}-{workspace}").to_lowercase();

    let mut alias = String::with_capacity(raw.len());
    for c in raw.chars() {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() {
            c
        } else {
            '-'
        };
        if c == '-' && alias.ends_with('-') {
            continue;
        }
        alias.push(c);
    }

    let mut alias = alias.trim_matches('-').to_string();
    if alias.len() > MAX_ALIAS_LEN {
        alias.truncate(MAX_ALIAS_LEN);
        alias.truncate(alias.trim_end_matches('-').len());
    }
    alias
}

/// Reject names that cannot be used in file names and marker lines.
pub fn validate_workspace_name(name: &str) -> Result<()> {
    validate_identifier(name, "Workspace name").map_err(Error::InvalidName)
}

/// How commits in a workspace are signed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signing {
    #[default]
    None,
    Ssh,
    Gpg,
}

impl fmt::Display for Signing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Ssh => write!(f, "ssh"),
            Self::Gpg => write!(f, "gpg"),
        }
    }
}

impl FromStr for Signing {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Self::None),
            "ssh" => Ok(Self::Ssh),
            "gpg" => Ok(Self::Gpg),
            other => Err(Error::InvalidSigning(other.to_string())),
        }
    }
}

/// One registered identity, as stored in `~/.gws/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub email: String,
    /// Provider name when the host came from `--host`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    pub host_name: String,
    pub ssh_alias: String,
    pub ssh_key: NormalizedPath,
    pub root: NormalizedPath,
    #[serde(default)]
    pub signing: Signing,
    /// Display name written to `user.name`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpg_key: Option<String>,
}

impl Workspace {
    pub fn public_key_path(&self) -> NormalizedPath {
        self.ssh_key.with_suffix(".pub")
    }

    /// The signing key git should use, if signing is enabled.
    pub fn signing_key(&self) -> Option<String> {
        match self.signing {
            Signing::None => None,
            Signing::Ssh => Some(self.public_key_path().to_string()),
            Signing::Gpg => self.gpg_key.clone(),
        }
    }

    /// Repository-local git settings that pin this identity.
    ///
    /// Entries with `None` should be unset so a stale value cannot override
    /// the identity.
    pub fn local_settings(&self) -> Vec<(&'static str, Option<String>)> {
        let signing = self.signing != Signing::None;
        vec![
            ("user.name", Some(self.name.clone())),
            ("user.email", Some(self.email.clone())),
            (
                "gpg.format",
                (self.signing == Signing::Ssh).then(|| "ssh".to_string()),
            ),
            ("user.signingkey", self.signing_key()),
            ("commit.gpgsign", Some(signing.to_string())),
        ]
    }
}
