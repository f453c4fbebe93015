use std::borrow::Cow;

use hashbrown::HashMap as FastHashMap;

/// The request capability the router matches against.
///
/// The `path`, `method` and `protocol` condition keys read the dedicated
/// accessors; any other key is resolved through [`RouteRequest::attribute`]
/// and an absent attribute is matched as the empty string.
pub trait RouteRequest {
    fn path(&self) -> &str;
    fn method(&self) -> &str;
    fn protocol(&self) -> &str;
    fn attribute(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// Owned request value for dispatchers that do not wrap their own type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParts {
    method: String,
    path: String,
    protocol: String,
    attributes: FastHashMap<String, String>,
}

impl RequestParts {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            protocol: "http".to_string(),
            attributes: FastHashMap::new(),
        }
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

impl RouteRequest for RequestParts {
    fn path(&self) -> &str {
        &self.path
    }

    fn method(&self) -> &str {
        &self.method
    }

    fn protocol(&self) -> &str {
        &self.protocol
    }

    fn attribute(&self, name: &str) -> Option<Cow<'_, str>> {
        self.attributes
            .get(name)
            .map(|value| Cow::Borrowed(value.as_str()))
    }
}
