//! Marker pair naming.

/// Tag embedded in every marker line.
pub const MARKER_TAG: &str = "gws";

/// What a managed block is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace<'a> {
    /// One `Host` stanza per workspace in the SSH client config.
    SshHost(&'a str),
    /// The single `includeIf` region shared by all workspaces in the global
    /// git config.
    GitIncludeIf,
}

/// The literal start and end lines delimiting one managed block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarkerPair {
    start: String,
    end: String,
}

impl MarkerPair {
    /// Build a pair from arbitrary literals.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// Surround `body` with the marker lines.
    ///
    /// `body` is written as is; a trailing newline on it is dropped so the end
    /// marker always sits on its own line directly after the body.
    pub fn wrap(&self, body: &str) -> String {
        let body = body.strip_suffix('\n').unwrap_or(body);
        if body.is_empty() {
            format!("{}\n{}", self.start, self.end)
        } else {
            format!("{}\n{}\n{}", self.start, body, self.end)
        }
    }
}

/// Derive the marker pair for a namespace.
///
/// The result depends only on the input, so re-running an operation finds the
/// block written by the previous run. Workspace names are expected to be
/// validated identifiers; a name cannot contain `>` and so cannot collide with
/// the fixed suffix.
pub fn marker_pair(namespace: Namespace<'_>) -> MarkerPair {
    let label = match namespace {
        Namespace::SshHost(workspace) => workspace,
        Namespace::GitIncludeIf => "includeIf",
    };
    MarkerPair {
        start: format!("# >>> {MARKER_TAG} {label} >>> DO NOT EDIT"),
        end: format!("# <<< {MARKER_TAG} {label} <<<"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ssh_host_markers() {
        let pair = marker_pair(Namespace::SshHost("work"));
        assert_eq!(pair.start(), "# >>> gws work >>> DO NOT EDIT");
        assert_eq!(pair.end(), "# <<< gws work <<<");
    }

    #[test]
    fn include_if_markers() {
        let pair = marker_pair(Namespace::GitIncludeIf);
        assert_eq!(pair.start(), "# >>> gws includeIf >>> DO NOT EDIT");
        assert_eq!(pair.end(), "# <<< gws includeIf <<<");
    }

    #[test]
    fn prefix_names_do_not_collide() {
        let work = marker_pair(Namespace::SshHost("work"));
        let work2 = marker_pair(Namespace::SshHost("work2"));
        assert!(!work2.start().contains(work.start()));
        assert!(!work2.end().contains(work.end()));
    }

    #[test]
    fn wrap_places_markers_on_own_lines() {
        let pair = MarkerPair::new("BEGIN", "END");
        assert_eq!(pair.wrap("body"), "BEGIN\nbody\nEND");
        assert_eq!(pair.wrap("body\n"), "BEGIN\nbody\nEND");
        assert_eq!(pair.wrap(""), "BEGIN\nEND");
    }
}
