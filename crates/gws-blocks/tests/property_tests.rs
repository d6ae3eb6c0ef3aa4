use gws_blocks::{MarkerPair, Namespace, extract, marker_pair, remove, upsert};
use proptest::prelude::*;

// No '<' or '>', so generated text can never contain a marker literal.
const TEXT: &str = "[a-zA-Z0-9 \t\n#=._-]{0,60}";
const TEXT_NO_LEADING_NEWLINE: &str = "[a-zA-Z0-9#=._-][a-zA-Z0-9 \t\n#=._-]{0,40}";

fn markers() -> MarkerPair {
    marker_pair(Namespace::SshHost("work"))
}

proptest! {
    #[test]
    fn upsert_is_idempotent(content in TEXT, body in TEXT) {
        let block = markers().wrap(&body);
        let once = upsert(&content, &markers(), &block);
        let twice = upsert(&once.content, &markers(), &block);

        prop_assert_eq!(&twice.content, &once.content);
        prop_assert!(!twice.changed());
    }

    #[test]
    fn upsert_is_idempotent_over_existing_block(
        before in TEXT,
        old in TEXT,
        after in TEXT,
        new in TEXT,
    ) {
        let content = format!("{before}{}{after}", markers().wrap(&old));
        let block = markers().wrap(&new);
        let once = upsert(&content, &markers(), &block);
        let twice = upsert(&once.content, &markers(), &block);

        prop_assert_eq!(twice.content, once.content);
    }

    #[test]
    fn first_install_is_non_destructive(content in TEXT, body in TEXT) {
        let block = markers().wrap(&body);
        let result = upsert(&content, &markers(), &block);

        let expected = if content.is_empty() {
            block.clone()
        } else {
            format!("{content}\n{block}")
        };
        prop_assert_eq!(result.content, expected);
    }

    #[test]
    fn replacement_only_touches_the_block(
        before in TEXT,
        old in TEXT,
        after in TEXT_NO_LEADING_NEWLINE,
        new in TEXT,
    ) {
        let content = format!("{before}{}{after}", markers().wrap(&old));
        let block = markers().wrap(&new);

        let result = upsert(&content, &markers(), &block);

        prop_assert_eq!(result.content, format!("{before}{block}\n{after}"));
    }

    #[test]
    fn install_then_remove_restores_terminated_content(content in TEXT, body in TEXT) {
        let content = if content.is_empty() { content } else { format!("{content}\n") };
        let installed = upsert(&content, &markers(), &markers().wrap(&body)).content;

        prop_assert_eq!(remove(&installed, &markers()), content);
    }

    #[test]
    fn remove_without_block_is_noop(content in TEXT) {
        prop_assert_eq!(remove(&content, &markers()), content);
    }

    #[test]
    fn extract_returns_trimmed_inner_text(
        before in TEXT,
        inner in TEXT,
        after in TEXT,
    ) {
        let pair = markers();
        let content = format!("{before}{}  {inner}  {}{after}", pair.start(), pair.end());

        prop_assert_eq!(extract(&content, &pair), Some(inner.trim()));
    }
}
