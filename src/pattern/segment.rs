use super::lexer::ident_len;

/// One piece of a route path used for reverse generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(String),
    /// The `::` token; it matches but can not be filled in.
    Anonymous,
}

impl Segment {
    pub fn literal(value: impl Into<String>) -> Self {
        Segment::Literal(value.into())
    }

    pub fn placeholder(name: impl Into<String>) -> Self {
        Segment::Placeholder(name.into())
    }
}

/// Splits an unrewritten, merged path into literal and placeholder pieces.
///
/// The outer `^` and `$` anchors are dropped; inner ones were already
/// removed when the fragments were joined.
pub fn segments_from_path(path: &str) -> Vec<Segment> {
    let path = path.strip_prefix('^').unwrap_or(path);
    let path = path.strip_suffix('$').unwrap_or(path);
    let bytes = path.as_bytes();

    let mut segments = Vec::new();
    let mut literal_start = 0usize;
    let mut search_from = 0usize;

    while let Some(rel) = memchr::memchr(b':', &bytes[search_from..]) {
        let at = search_from + rel;
        let len = ident_len(bytes, at + 1);
        let (segment, end) = if len > 0 {
            (
                Segment::Placeholder(path[at + 1..at + 1 + len].to_string()),
                at + 1 + len,
            )
        } else if bytes.get(at + 1) == Some(&b':') {
            (Segment::Anonymous, at + 2)
        } else {
            search_from = at + 1;
            continue;
        };

        if at > literal_start {
            segments.push(Segment::Literal(path[literal_start..at].to_string()));
        }
        segments.push(segment);
        literal_start = end;
        search_from = end;
    }

    if literal_start < path.len() {
        segments.push(Segment::Literal(path[literal_start..].to_string()));
    }

    segments
}
