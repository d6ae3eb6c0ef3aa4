//! Integration tests for the managed block editor.

use gws_blocks::{Lookup, Namespace, UpsertAction, extract, locate, marker_pair, remove, upsert};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn work_block(alias: &str, key: &str) -> String {
    marker_pair(Namespace::SshHost("work")).wrap(&format!(
        "Host {alias}\n  HostName github.com\n  User git\n  IdentityFile {key}\n  IdentitiesOnly yes"
    ))
}

#[test]
fn test_empty_to_rotated_key_scenario() {
    let markers = marker_pair(Namespace::SshHost("work"));
    let b1 = work_block("github.com-work", "/home/me/.ssh/id_ed25519_gws_work");
    let b2 = work_block("github.com-work", "/home/me/.ssh/id_ed25519_gws_work_v2");

    let first = upsert("", &markers, &b1);
    assert_eq!(first.content, b1);
    assert!(first.changed());
    assert_eq!(first.action, UpsertAction::Inserted);

    let second = upsert(&first.content, &markers, &b1);
    assert_eq!(second.content, b1);
    assert!(!second.changed());

    let third = upsert(&second.content, &markers, &b2);
    assert_eq!(third.content, b2);
    assert!(third.changed());
    assert!(!third.content.contains("id_ed25519_gws_work\n"));
}

#[test]
fn test_first_install_appends_after_user_content() {
    let markers = marker_pair(Namespace::SshHost("work"));
    let block = work_block("github.com-work", "/k");
    let user = "Host personal\n  HostName github.com\n";

    let result = upsert(user, &markers, &block);

    assert_eq!(result.content, format!("{user}\n{block}"));
    assert_eq!(result.action, UpsertAction::Inserted);
}

#[test]
fn test_replacement_keeps_surrounding_content_byte_identical() {
    let markers = marker_pair(Namespace::SshHost("work"));
    let old = work_block("old-alias", "/old");
    let new = work_block("new-alias", "/new");
    let before = "Host a\n  HostName a.example\n\n";
    let after = "Host b\n  HostName b.example\n";

    let result = upsert(&format!("{before}{old}{after}"), &markers, &new);

    assert_eq!(result.content, format!("{before}{new}\n{after}"));
    assert_eq!(result.action, UpsertAction::Replaced { skipped_orphan: false });
}

#[test]
fn test_replacement_does_not_accumulate_blank_lines() {
    let markers = marker_pair(Namespace::SshHost("work"));
    let mut content = format!("Host a\n\n{}\n\nHost b\n", work_block("x", "/k"));
    let original_lines = content.lines().count();

    for i in 0..5 {
        content = upsert(&content, &markers, &work_block(&format!("alias-{i}"), "/k")).content;
    }

    assert_eq!(content.lines().count(), original_lines);
    assert!(content.ends_with("\n\nHost b\n"));
}

#[test]
fn test_other_workspace_blocks_untouched() {
    let work = marker_pair(Namespace::SshHost("work"));
    let personal = marker_pair(Namespace::SshHost("personal"));
    let personal_block = personal.wrap("Host github.com-personal\n  HostName github.com");

    let content = upsert("", &personal, &personal_block).content;
    let content = upsert(&content, &work, &work_block("github.com-work", "/k")).content;
    let content = upsert(&content, &work, &work_block("github.com-work", "/k2")).content;

    assert!(content.starts_with(&personal_block));
    assert_eq!(extract(&content, &personal), Some("Host github.com-personal\n  HostName github.com"));
}

#[rstest]
#[case::start_absent("Host a\n", false)]
#[case::start_without_end("Host a\n# >>> gws work >>> DO NOT EDIT\nHost stale\n", true)]
#[case::end_before_start("# <<< gws work <<<\nHost a\n", false)]
fn test_append_policy(#[case] content: &str, #[case] orphan: bool) {
    let markers = marker_pair(Namespace::SshHost("work"));
    let block = work_block("github.com-work", "/k");

    let result = upsert(content, &markers, &block);

    assert_eq!(result.content, format!("{content}\n{block}"));
    let expected = if orphan {
        UpsertAction::AppendedAfterUnterminated
    } else {
        UpsertAction::Inserted
    };
    assert_eq!(result.action, expected);
}

#[test]
fn test_orphan_start_is_left_in_place_on_next_upsert() {
    let markers = marker_pair(Namespace::SshHost("work"));
    let broken = "# >>> gws work >>> DO NOT EDIT\nHost stale\n";
    let appended = upsert(broken, &markers, &work_block("a", "/k")).content;

    let result = upsert(&appended, &markers, &work_block("b", "/k"));

    assert_eq!(result.action, UpsertAction::Replaced { skipped_orphan: true });
    assert!(result.content.starts_with(broken));
    assert!(result.content.contains("Host b\n"));
    assert!(!result.content.contains("Host a\n"));
}

#[test]
fn test_end_marker_literal_before_start_is_ignored() {
    let markers = marker_pair(Namespace::SshHost("work"));
    let content = format!("# <<< gws work <<<\n{}", work_block("old", "/k"));

    let result = upsert(&content, &markers, &work_block("new", "/k"));

    assert!(result.content.starts_with("# <<< gws work <<<\n"));
    assert!(result.content.contains("Host new"));
    assert!(!result.content.contains("Host old"));
}

#[rstest]
#[case::normal("x\n# >>> s >>>\n   inner text \n\n# <<< e <<<\ny", Some("inner text"))]
#[case::empty("# >>> s >>>\n# <<< e <<<", Some(""))]
#[case::missing_start("x\n# <<< e <<<", None)]
#[case::missing_end("# >>> s >>>\nbody", None)]
#[case::out_of_order("# <<< e <<<\n# >>> s >>>\n", None)]
fn test_extract(#[case] content: &str, #[case] expected: Option<&str>) {
    let markers = gws_blocks::MarkerPair::new("# >>> s >>>", "# <<< e <<<");
    assert_eq!(extract(content, &markers), expected);
}

#[test]
fn test_remove_joins_surrounding_content_directly() {
    let markers = marker_pair(Namespace::SshHost("work"));
    let before = "Host a\n";
    let after = "Host b\n";
    let content = format!("{before}{}\n{after}", work_block("x", "/k"));

    assert_eq!(remove(&content, &markers), format!("{before}{after}"));
}

#[test]
fn test_install_then_remove_keeps_user_content() {
    let markers = marker_pair(Namespace::SshHost("work"));
    let user = "Host a\n  HostName a.example\n";

    let installed = upsert(user, &markers, &work_block("x", "/k")).content;
    let removed = remove(&installed, &markers);

    assert_eq!(removed, user);
}

#[rstest]
#[case::terminated("Host a\n", "Host a\n")]
#[case::unterminated("Host a", "Host a\n")]
#[case::trailing_blank_line("Host a\n\n", "Host a\n\n")]
#[case::empty("", "")]
fn test_repeated_install_remove_cycles_are_stable(#[case] user: &str, #[case] expected: &str) {
    let markers = marker_pair(Namespace::SshHost("work"));
    let block = work_block("x", "/k");

    let mut content = user.to_string();
    for _ in 0..3 {
        content = upsert(&content, &markers, &block).content;
        content = remove(&content, &markers);
    }

    assert_eq!(content, expected);
}

#[rstest]
#[case::absent("Host a\n")]
#[case::unterminated("# >>> gws work >>> DO NOT EDIT\nHost a\n")]
fn test_remove_is_noop_without_complete_block(#[case] content: &str) {
    let markers = marker_pair(Namespace::SshHost("work"));
    assert_eq!(remove(content, &markers), content);
}

#[test]
fn test_locate_reports_inner_region() {
    let markers = marker_pair(Namespace::GitIncludeIf);
    let content = markers.wrap("[includeIf \"gitdir:/w/\"]\n  path = /p");

    let Lookup::Found(span) = locate(&content, &markers) else {
        panic!("block not found");
    };

    assert_eq!(span.start, 0);
    assert_eq!(span.end, content.len());
    assert_eq!(
        &content[span.inner_start..span.inner_end],
        "\n[includeIf \"gitdir:/w/\"]\n  path = /p\n"
    );
}
