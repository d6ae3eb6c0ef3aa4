//! Remote URL parsing and rewriting onto workspace SSH aliases

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

static SHORTHAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9._-]+)/([A-Za-z0-9._-]+)$").expect("Invalid shorthand regex")
});

static HTTPS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://(?:[^@/]+@)?[^/]+/([^/]+)/([^/?#]+?)(?:\.git)?/?(?:[?#].*)?$")
        .expect("Invalid https regex")
});

static SCP_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^git@([^:]+):([^/]+)/([^/]+?)(?:\.git)?$").expect("Invalid ssh regex")
});

/// An `org/repo` pair extracted from a remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub org: String,
    pub repo: String,
}

impl RepoRef {
    /// `git@<alias>:<org>/<repo>.git`
    pub fn ssh_url(&self, alias: &str) -> String {
        format!("git@{alias}:{}/{}.git", self.org, self.repo)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.org, self.repo)
    }
}

/// Parse `ORG/REPO`, `https://host/org/repo[.git]` or `git@host:org/repo[.git]`.
pub fn parse_remote(input: &str) -> Result<RepoRef> {
    let input = input.trim();
    let captures = SHORTHAND
        .captures(input)
        .map(|c| (c.get(1), c.get(2)))
        .or_else(|| HTTPS.captures(input).map(|c| (c.get(1), c.get(2))))
        .or_else(|| SCP_LIKE.captures(input).map(|c| (c.get(2), c.get(3))));

    match captures {
        Some((Some(org), Some(repo))) => Ok(RepoRef {
            org: org.as_str().to_string(),
            repo: repo.as_str().trim_end_matches(".git").to_string(),
        }),
        _ => Err(Error::UnparsableUrl(input.to_string())),
    }
}

/// Parse `input` and point it at `alias`.
pub fn rewrite_url(input: &str, alias: &str) -> Result<(RepoRef, String)> {
    let repo = parse_remote(input)?;
    let url = repo.ssh_url(alias);
    Ok((repo, url))
}

/// Host part of a `git@host:path` URL.
pub fn ssh_host(url: &str) -> Option<&str> {
    let rest = url.trim().strip_prefix("git@")?;
    let (host, _) = rest.split_once(':')?;
    (!host.is_empty()).then_some(host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("microsoft/vscode", "microsoft", "vscode")]
    #[case("my-org/my.repo", "my-org", "my.repo")]
    #[case("https://github.com/microsoft/vscode", "microsoft", "vscode")]
    #[case("https://github.com/microsoft/vscode.git", "microsoft", "vscode")]
    #[case("https://github.com/microsoft/vscode/", "microsoft", "vscode")]
    #[case("https://user@gitlab.com/group/project.git", "group", "project")]
    #[case("git@github.com:microsoft/vscode.git", "microsoft", "vscode")]
    #[case("git@github.com:microsoft/vscode", "microsoft", "vscode")]
    #[case("git@github-com-work:org/repo.git", "org", "repo")]
    fn parses_supported_forms(#[case] input: &str, #[case] org: &str, #[case] repo: &str) {
        let parsed = parse_remote(input).unwrap();
        assert_eq!(parsed.org, org);
        assert_eq!(parsed.repo, repo);
    }

    #[rstest]
    #[case("")]
    #[case("justarepo")]
    #[case("http://github.com/org/repo")]
    #[case("ssh://git@github.com/org/repo.git")]
    #[case("org/repo/extra")]
    fn rejects_unsupported_forms(#[case] input: &str) {
        assert!(matches!(parse_remote(input), Err(Error::UnparsableUrl(_))));
    }

    #[test]
    fn rewrite_targets_alias() {
        let (repo, url) = rewrite_url("https://github.com/org/repo.git", "github-com-work").unwrap();
        assert_eq!(repo.to_string(), "org/repo");
        assert_eq!(url, "git@github-com-work:org/repo.git");
    }

    #[rstest]
    #[case("git@github-com-work:org/repo.git", Some("github-com-work"))]
    #[case("git@github.com:org/repo.git", Some("github.com"))]
    #[case("https://github.com/org/repo.git", None)]
    #[case("git@:org/repo", None)]
    fn extracts_ssh_host(#[case] url: &str, #[case] expected: Option<&str>) {
        assert_eq!(ssh_host(url), expected);
    }
}
