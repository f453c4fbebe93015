use std::collections::HashMap;

pub type RouteIndex = usize;
pub type RouteParams = HashMap<String, String>;

/// Route index and resolved params of a successful match.
pub type RouteMatch = (RouteIndex, RouteParams);

/// Builds a [`RouteParams`] mapping from string pairs.
pub fn route_params<I, K, V>(pairs: I) -> RouteParams
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}
