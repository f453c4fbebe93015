use std::collections::BTreeMap;

/// Output params authored on a behavior.
///
/// Values are templates: `:name`, `:cond[N]` and `[N]` are resolved against
/// the captures of a match, everything else is literal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSpec {
    entries: BTreeMap<String, String>,
}

impl ParamSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn into_entries(self) -> BTreeMap<String, String> {
        self.entries
    }
}

impl From<()> for ParamSpec {
    fn from(_: ()) -> Self {
        ParamSpec::default()
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for ParamSpec
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs
            .into_iter()
            .fold(ParamSpec::new(), |spec, (key, value)| spec.set(key, value))
    }
}

impl<K, V> From<Vec<(K, V)>> for ParamSpec
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs
            .into_iter()
            .fold(ParamSpec::new(), |spec, (key, value)| spec.set(key, value))
    }
}
