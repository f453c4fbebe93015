use route_behavior_rs::pattern::{
    DEFAULT_PLACEHOLDER_PATTERN, Segment, count_captures, count_parens_up_to, deduce_placeholders,
    segments_from_path,
};

#[test]
fn deduce_when_path_has_named_placeholders_then_rewrites_in_order() {
    let rewritten = deduce_placeholders("^/:controller/:action$", DEFAULT_PLACEHOLDER_PATTERN);

    assert_eq!(rewritten.source, "^/([^/.,;?]+)/([^/.,;?]+)$");
    let names: Vec<_> = rewritten
        .placeholders
        .iter()
        .map(|p| (p.name.as_deref(), p.capture))
        .collect();
    assert_eq!(names, vec![(Some("controller"), 1), (Some("action"), 2)]);
}

#[test]
fn deduce_when_regex_group_precedes_placeholder_then_capture_index_accounts_for_it() {
    let rewritten = deduce_placeholders(r"^/(\d+)/:slug(\.:format)?$", DEFAULT_PLACEHOLDER_PATTERN);

    let captures: Vec<_> = rewritten
        .placeholders
        .iter()
        .map(|p| (p.name.as_deref(), p.capture))
        .collect();
    assert_eq!(captures, vec![(Some("slug"), 2), (Some("format"), 4)]);
    assert_eq!(count_captures(&rewritten.source), 4);
}

#[test]
fn deduce_when_colons_belong_to_regex_syntax_then_leaves_them() {
    let source = r"^/(?:a|b)/[[:alpha:]]+/\:literal$";
    let rewritten = deduce_placeholders(source, DEFAULT_PLACEHOLDER_PATTERN);

    assert_eq!(rewritten.source, source);
    assert!(rewritten.placeholders.is_empty());
}

#[test]
fn deduce_when_anonymous_placeholder_used_then_captures_without_name() {
    let rewritten = deduce_placeholders("^/files/::/:name$", DEFAULT_PLACEHOLDER_PATTERN);

    assert_eq!(rewritten.source, "^/files/([^/.,;?]+)/([^/.,;?]+)$");
    let captures: Vec<_> = rewritten
        .placeholders
        .iter()
        .map(|p| (p.name.as_deref(), p.capture))
        .collect();
    assert_eq!(captures, vec![(None, 1), (Some("name"), 2)]);
}

#[test]
fn count_parens_when_offset_given_then_counts_only_opened_groups() {
    let source = r"^/(a)/(?:b)/(?P<c>c)/(d)$";

    assert_eq!(count_parens_up_to(source, 0), 0);
    assert_eq!(count_parens_up_to(source, 3), 1);
    assert_eq!(count_parens_up_to(source, source.len()), 3);
    assert_eq!(count_captures(source), 3);
}

#[test]
fn segments_when_path_mixes_literals_and_placeholders_then_splits_them() {
    let segments = segments_from_path("^/posts/:post_id/comments/:id$");

    assert_eq!(
        segments,
        vec![
            Segment::literal("/posts/"),
            Segment::placeholder("post_id"),
            Segment::literal("/comments/"),
            Segment::placeholder("id"),
        ]
    );
}

#[test]
fn segments_when_anonymous_placeholder_present_then_marks_it() {
    let segments = segments_from_path("^/files/::$");

    assert_eq!(segments, vec![Segment::literal("/files/"), Segment::Anonymous]);
}
