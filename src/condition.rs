use std::collections::BTreeMap;
use std::fmt;

use crate::enums::{HttpMethod, MethodSet};

/// Request dimension a condition tests.
///
/// The derived ordering is the order conditions are tested in: path, method,
/// protocol, then custom attributes by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConditionKey {
    Path,
    Method,
    Protocol,
    Attribute(String),
}

impl ConditionKey {
    pub fn as_str(&self) -> &str {
        match self {
            ConditionKey::Path => "path",
            ConditionKey::Method => "method",
            ConditionKey::Protocol => "protocol",
            ConditionKey::Attribute(name) => name,
        }
    }
}

impl From<&str> for ConditionKey {
    fn from(value: &str) -> Self {
        match value {
            "path" => ConditionKey::Path,
            "method" => ConditionKey::Method,
            "protocol" => ConditionKey::Protocol,
            other => ConditionKey::Attribute(other.to_string()),
        }
    }
}

impl fmt::Display for ConditionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A condition value as authored in the DSL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Literal text, matched whole; may contain `:name` placeholders.
    Literal(String),
    /// Regex source, matched as written; may contain `:name` placeholders.
    Regex(String),
}

impl Condition {
    pub fn literal(value: impl Into<String>) -> Self {
        Condition::Literal(value.into())
    }

    pub fn regex(source: impl Into<String>) -> Self {
        Condition::Regex(source.into())
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, Condition::Regex(_))
    }

    /// Regex source used for matching: literals are escaped and anchored.
    pub(crate) fn to_source(&self) -> String {
        match self {
            Condition::Literal(value) => format!("^{}$", regex::escape(value)),
            Condition::Regex(source) => source.clone(),
        }
    }

    /// Unescaped form kept for reverse generation.
    pub(crate) fn to_original(&self) -> String {
        match self {
            Condition::Literal(value) => format!("^{value}$"),
            Condition::Regex(source) => source.clone(),
        }
    }

    /// `""` and `"^$"` paths add no constraint.
    pub(crate) fn is_empty_path(&self) -> bool {
        match self {
            Condition::Literal(value) => value.is_empty() || value == "^$",
            Condition::Regex(source) => source.is_empty() || source == "^$",
        }
    }
}

impl From<&str> for Condition {
    fn from(value: &str) -> Self {
        Condition::Literal(value.to_string())
    }
}

impl From<String> for Condition {
    fn from(value: String) -> Self {
        Condition::Literal(value)
    }
}

impl From<HttpMethod> for Condition {
    fn from(method: HttpMethod) -> Self {
        Condition::Literal(method.as_str().to_string())
    }
}

impl From<MethodSet> for Condition {
    fn from(methods: MethodSet) -> Self {
        Condition::Regex(methods.condition_source())
    }
}

/// Conditions attached to one behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conditions {
    entries: BTreeMap<ConditionKey, Condition>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(self, value: impl Into<Condition>) -> Self {
        self.with(ConditionKey::Path, value)
    }

    pub fn method(self, value: impl Into<Condition>) -> Self {
        self.with(ConditionKey::Method, value)
    }

    pub fn protocol(self, value: impl Into<Condition>) -> Self {
        self.with(ConditionKey::Protocol, value)
    }

    pub fn attribute(self, name: &str, value: impl Into<Condition>) -> Self {
        self.with(ConditionKey::from(name), value)
    }

    pub fn with(mut self, key: ConditionKey, value: impl Into<Condition>) -> Self {
        self.entries.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &ConditionKey) -> Option<&Condition> {
        self.entries.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn remove(&mut self, key: &ConditionKey) -> Option<Condition> {
        self.entries.remove(key)
    }

    pub(crate) fn into_entries(self) -> BTreeMap<ConditionKey, Condition> {
        self.entries
    }
}
