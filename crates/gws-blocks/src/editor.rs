//! Pure text transforms over managed blocks.
//!
//! None of these functions fail. A document with a start marker but no end
//! marker is not rewritten in place; the new block is appended instead and the
//! outcome says so, leaving the caller to warn about it.

use crate::markers::MarkerPair;

/// Byte offsets of a managed block within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    /// First byte of the start marker.
    pub start: usize,
    /// One past the last byte of the start marker.
    pub inner_start: usize,
    /// First byte of the end marker.
    pub inner_end: usize,
    /// One past the last byte of the end marker.
    pub end: usize,
    /// An earlier start marker with no end marker of its own was passed over.
    pub skipped_orphan: bool,
}

/// Result of searching a document for a marker pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Both markers present and well ordered.
    Found(BlockSpan),
    /// The start marker does not occur.
    Missing,
    /// The start marker occurs at this offset but no end marker follows it.
    Unterminated { start: usize },
}

/// What [`upsert`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    /// No block existed; the new one was appended.
    Inserted,
    /// The existing block was rewritten in place.
    Replaced { skipped_orphan: bool },
    /// The existing block already matched.
    Unchanged,
    /// A start marker without an end marker was found; the new block was
    /// appended and the orphan left untouched.
    AppendedAfterUnterminated,
}

/// New document content plus what happened to produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upsert {
    pub content: String,
    pub action: UpsertAction,
}

impl Upsert {
    pub fn changed(&self) -> bool {
        self.action != UpsertAction::Unchanged
    }
}

/// Find the managed block for `markers`.
///
/// The leftmost start marker wins, and the end marker is searched for only
/// after it, so an end-marker literal earlier in the file is never matched.
/// When another start marker sits between that start and the end marker, the
/// leftmost one is an orphan and the block is anchored at the start marker
/// nearest the end instead.
pub fn locate(content: &str, markers: &MarkerPair) -> Lookup {
    let Some(first_start) = content.find(markers.start()) else {
        return Lookup::Missing;
    };

    let search_from = first_start + markers.start().len();
    let Some(relative_end) = content[search_from..].find(markers.end()) else {
        return Lookup::Unterminated { start: first_start };
    };
    let inner_end = search_from + relative_end;

    let start = content[..inner_end]
        .rfind(markers.start())
        .unwrap_or(first_start);

    Lookup::Found(BlockSpan {
        start,
        inner_start: start + markers.start().len(),
        inner_end,
        end: inner_end + markers.end().len(),
        skipped_orphan: start != first_start,
    })
}

/// Insert `block` or replace the existing managed block with it.
///
/// `block` is the complete rendered block, marker lines included (see
/// [`MarkerPair::wrap`]).
///
/// - No block: `block` alone for an empty document, otherwise
///   `content + "\n" + block`.
/// - Block present: the span from the start marker through the end marker is
///   replaced. The line ending right after the end marker belongs to the
///   block and is kept as it was; if other text followed on the same line, a
///   `\n` is inserted before it. Nothing is added when the block ends the
///   document. Re-running with the same block is therefore a no-op.
pub fn upsert(content: &str, markers: &MarkerPair, block: &str) -> Upsert {
    match locate(content, markers) {
        Lookup::Missing => Upsert {
            content: append(content, block),
            action: UpsertAction::Inserted,
        },
        Lookup::Unterminated { .. } => Upsert {
            content: append(content, block),
            action: UpsertAction::AppendedAfterUnterminated,
        },
        Lookup::Found(span) => {
            let before = &content[..span.start];
            let after = &content[span.end..];

            let mut result = String::with_capacity(before.len() + block.len() + after.len() + 1);
            result.push_str(before);
            result.push_str(block);
            if !after.is_empty() {
                let (line_ending, rest) = split_line_ending(after);
                result.push_str(if line_ending.is_empty() { "\n" } else { line_ending });
                result.push_str(rest);
            }

            let action = if result == content {
                UpsertAction::Unchanged
            } else {
                UpsertAction::Replaced {
                    skipped_orphan: span.skipped_orphan,
                }
            };
            Upsert {
                content: result,
                action,
            }
        }
    }
}

/// The trimmed text strictly between the markers, if the block exists.
pub fn extract<'a>(content: &'a str, markers: &MarkerPair) -> Option<&'a str> {
    match locate(content, markers) {
        Lookup::Found(span) => Some(content[span.inner_start..span.inner_end].trim()),
        Lookup::Missing | Lookup::Unterminated { .. } => None,
    }
}

/// Delete the managed block, markers included.
///
/// The text before and after is joined directly, except that the end
/// marker's own line ending goes with the block, as it does in [`upsert`].
/// A block that ends the document also takes the `\n` separator [`upsert`]
/// appended before it, when that separator leaves a blank line behind. So an
/// install followed by a remove gives back a newline-terminated document
/// unchanged. A missing or unterminated block leaves the content unchanged.
pub fn remove(content: &str, markers: &MarkerPair) -> String {
    match locate(content, markers) {
        Lookup::Found(span) => {
            let (_, rest) = split_line_ending(&content[span.end..]);
            let mut before = &content[..span.start];
            if rest.is_empty() {
                before = strip_append_separator(before);
            }
            let mut result = String::with_capacity(content.len());
            result.push_str(before);
            result.push_str(rest);
            result
        }
        Lookup::Missing | Lookup::Unterminated { .. } => content.to_string(),
    }
}

fn append(content: &str, block: &str) -> String {
    if content.is_empty() {
        block.to_string()
    } else {
        format!("{content}\n{block}")
    }
}

/// Drop the trailing `\n` of `before` if it closes a blank line.
fn strip_append_separator(before: &str) -> &str {
    match before.strip_suffix('\n') {
        Some(trimmed) if trimmed.ends_with('\n') => trimmed,
        _ => before,
    }
}

/// Split a leading `\r\n` or `\n` off `text`.
fn split_line_ending(text: &str) -> (&str, &str) {
    if let Some(rest) = text.strip_prefix("\r\n") {
        ("\r\n", rest)
    } else if let Some(rest) = text.strip_prefix('\n') {
        ("\n", rest)
    } else {
        ("", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pair() -> MarkerPair {
        MarkerPair::new("# >>> test >>>", "# <<< test <<<")
    }

    #[test]
    fn locate_missing() {
        assert_eq!(locate("Host a\n", &pair()), Lookup::Missing);
    }

    #[test]
    fn locate_unterminated() {
        let content = "x\n# >>> test >>>\nHost a\n";
        assert_eq!(locate(content, &pair()), Lookup::Unterminated { start: 2 });
    }

    #[test]
    fn locate_ignores_end_marker_before_start() {
        let content = "# <<< test <<<\n# >>> test >>>\nbody\n# <<< test <<<";
        let Lookup::Found(span) = locate(content, &pair()) else {
            panic!("expected a block");
        };
        assert_eq!(span.start, 15);
        assert_eq!(&content[span.inner_start..span.inner_end], "\nbody\n");
        assert_eq!(span.end, content.len());
        assert!(!span.skipped_orphan);
    }

    #[test]
    fn locate_skips_orphan_start() {
        let content = "# >>> test >>>\nuser line\n# >>> test >>>\nbody\n# <<< test <<<";
        let Lookup::Found(span) = locate(content, &pair()) else {
            panic!("expected a block");
        };
        assert!(span.skipped_orphan);
        assert_eq!(&content[..span.start], "# >>> test >>>\nuser line\n");
    }

    #[test]
    fn locate_anchors_at_start_marker_quoted_inside_body() {
        let content = "# >>> test >>>\nsee # >>> test >>> here\n# <<< test <<<\n";
        let Lookup::Found(span) = locate(content, &pair()) else {
            panic!("expected a block");
        };
        assert!(span.skipped_orphan);
        assert_eq!(span.start, 19);
        assert_eq!(extract(content, &pair()), Some("here"));
        assert_eq!(remove(content, &pair()), "# >>> test >>>\nsee ");
    }

    #[test]
    fn strip_append_separator_only_drops_blank_line() {
        assert_eq!(strip_append_separator("Host a\n\n"), "Host a\n");
        assert_eq!(strip_append_separator("Host a\r\n\n"), "Host a\r\n");
        assert_eq!(strip_append_separator("Host a\n"), "Host a\n");
        assert_eq!(strip_append_separator(""), "");
    }

    #[test]
    fn split_line_ending_variants() {
        assert_eq!(split_line_ending("\r\nrest"), ("\r\n", "rest"));
        assert_eq!(split_line_ending("\nrest"), ("\n", "rest"));
        assert_eq!(split_line_ending("rest"), ("", "rest"));
        assert_eq!(split_line_ending(""), ("", ""));
    }

    #[test]
    fn upsert_preserves_crlf_after_block() {
        let old = pair().wrap("old");
        let new = pair().wrap("new");
        let content = format!("{old}\r\nHost b\r\n");

        let result = upsert(&content, &pair(), &new);

        assert_eq!(result.content, format!("{new}\r\nHost b\r\n"));
    }
}
