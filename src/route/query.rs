use percent_encoding::{AsciiSet, utf8_percent_encode};

use crate::types::RouteParams;

/// Characters escaped in query keys and values.
#[rustfmt::skip]
const QUERY_SET: &AsciiSet = &percent_encoding::CONTROLS
    .add(b' ').add(b'"').add(b'#').add(b'%').add(b'&').add(b'+').add(b'<')
    .add(b'=').add(b'>').add(b'?').add(b'[').add(b']').add(b'^').add(b'`')
    .add(b'{').add(b'|').add(b'}');

/// Characters escaped in generated path segment values.
#[rustfmt::skip]
const PATH_SEGMENT_SET: &AsciiSet = &percent_encoding::CONTROLS
    .add(b' ').add(b'"').add(b'#').add(b'%').add(b',').add(b'/').add(b';')
    .add(b'<').add(b'>').add(b'?').add(b'`').add(b'{').add(b'}');

pub(crate) fn encode_path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT_SET).to_string()
}

/// Encodes params as `k=v&k2=v2`, sorted by key so output is stable.
pub fn params_to_query_string<'p, I>(params: I) -> String
where
    I: IntoIterator<Item = (&'p String, &'p String)>,
{
    let mut pairs: Vec<(&String, &String)> = params.into_iter().collect();
    pairs.sort();
    pairs
        .into_iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY_SET),
                utf8_percent_encode(value, QUERY_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

pub(crate) fn append_query(url: &mut String, params: &RouteParams, skip: &[&str]) {
    let remaining = params
        .iter()
        .filter(|(key, _)| !skip.contains(&key.as_str()));
    let query = params_to_query_string(remaining);
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::route_params;

    #[test]
    fn query_when_reserved_characters_then_percent_encodes() {
        let params = route_params([("q", "a b&c"), ("page", "2")]);
        assert_eq!(params_to_query_string(&params), "page=2&q=a%20b%26c");
    }

    #[test]
    fn append_query_when_every_key_skipped_then_leaves_url() {
        let params = route_params([("id", "1")]);
        let mut url = "/posts/1".to_string();
        append_query(&mut url, &params, &["id"]);
        assert_eq!(url, "/posts/1");
    }
}
