use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap as FastHashMap;
use regex::Regex;

use crate::condition::ConditionKey;
use crate::pattern::{ParamTemplate, PatternError, PatternResult, Segment, segments_from_path};
use crate::request::RouteRequest;
use crate::types::{RouteIndex, RouteParams};

/// Runtime match decision attached by `defer_to`.
///
/// Receives the request and the tentative params; `None` rejects the
/// route, `Some` replaces the params.
pub type DeferredBlock =
    Arc<dyn Fn(&dyn RouteRequest, &RouteParams) -> Option<RouteParams> + Send + Sync>;

#[derive(Debug, Clone)]
pub struct CompiledCondition {
    pub key: ConditionKey,
    pub source: String,
    pub regex: Arc<Regex>,
}

impl CompiledCondition {
    /// Number of capturing groups, excluding the implicit whole match.
    pub fn captures(&self) -> usize {
        self.regex.captures_len() - 1
    }
}

/// Everything a behavior chain contributes to a route, already merged.
pub(crate) struct RouteDraft {
    pub conditions: BTreeMap<ConditionKey, String>,
    pub original_conditions: BTreeMap<ConditionKey, String>,
    pub params: BTreeMap<String, String>,
    pub placeholders: FastHashMap<String, (ConditionKey, usize)>,
    pub regexp: bool,
    pub deferred: Option<DeferredBlock>,
    pub default_route: bool,
}

#[derive(Clone)]
pub struct Route {
    pub(crate) index: Option<RouteIndex>,
    pub(crate) name: Option<String>,
    pub(crate) fixation: bool,
    pub(crate) default_route: bool,
    pub(crate) regexp: bool,
    pub(crate) conditions: Vec<CompiledCondition>,
    pub(crate) params: Vec<(String, ParamTemplate)>,
    pub(crate) segments: Option<Vec<Segment>>,
    pub(crate) original_conditions: BTreeMap<ConditionKey, String>,
    pub(crate) deferred: Option<DeferredBlock>,
}

impl Route {
    pub(crate) fn from_draft(draft: RouteDraft) -> PatternResult<Self> {
        let mut conditions = Vec::with_capacity(draft.conditions.len());
        for (key, source) in draft.conditions {
            let regex = Regex::new(&source).map_err(|err| PatternError::InvalidRegex {
                condition: key.to_string(),
                source_text: source.clone(),
                message: err.to_string(),
            })?;
            conditions.push(CompiledCondition {
                key,
                source,
                regex: Arc::new(regex),
            });
        }

        let capture_counts: FastHashMap<ConditionKey, usize> = conditions
            .iter()
            .map(|condition| (condition.key.clone(), condition.captures()))
            .collect();

        let mut params = Vec::with_capacity(draft.params.len());
        for (key, value) in &draft.params {
            let template = ParamTemplate::parse(
                key,
                value,
                |name| draft.placeholders.get(name).cloned(),
                |condition| capture_counts.get(condition).copied(),
            )?;
            params.push((key.clone(), template));
        }

        let segments = draft
            .original_conditions
            .get(&ConditionKey::Path)
            .map(|path| segments_from_path(path));

        Ok(Route {
            index: None,
            name: None,
            fixation: false,
            default_route: draft.default_route,
            regexp: draft.regexp,
            conditions,
            params,
            segments,
            original_conditions: draft.original_conditions,
            deferred: draft.deferred,
        })
    }

    /// Position in the route table; `None` for generation-only routes.
    pub fn index(&self) -> Option<RouteIndex> {
        self.index
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn allow_fixation(&self) -> bool {
        self.fixation
    }

    /// Whether this route or any enclosing behavior used a regex condition.
    pub fn is_regexp(&self) -> bool {
        self.regexp
    }

    pub fn is_default_route(&self) -> bool {
        self.default_route
    }

    pub fn is_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    pub fn segments(&self) -> Option<&[Segment]> {
        self.segments.as_deref()
    }

    /// Condition tests in the order a match evaluates them.
    pub fn condition_tests(&self) -> &[CompiledCondition] {
        &self.conditions
    }

    pub fn condition_source(&self, key: &ConditionKey) -> Option<&str> {
        self.conditions
            .iter()
            .find(|condition| &condition.key == key)
            .map(|condition| condition.source.as_str())
    }

    pub fn original_conditions(&self) -> &BTreeMap<ConditionKey, String> {
        &self.original_conditions
    }

    pub fn params(&self) -> &[(String, ParamTemplate)] {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&ParamTemplate> {
        self.params
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, template)| template)
    }

    pub(crate) fn with_index(&self, index: RouteIndex) -> Self {
        let mut route = self.clone();
        route.index = Some(index);
        route
    }

    /// Short identification used in error messages.
    pub(crate) fn label(&self) -> String {
        match (&self.name, self.index) {
            (Some(name), _) => format!("'{name}'"),
            (None, Some(index)) => format!("#{index}"),
            (None, None) => self
                .original_conditions
                .get(&ConditionKey::Path)
                .map(|path| format!("'{path}'"))
                .unwrap_or_else(|| "<unnamed>".to_string()),
        }
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("index", &self.index)
            .field("name", &self.name)
            .field("fixation", &self.fixation)
            .field("regexp", &self.regexp)
            .field("conditions", &self.original_conditions)
            .field("params", &self.params)
            .field("deferred", &self.deferred.is_some())
            .finish()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "#{index}")?,
            None => f.write_str("#-")?,
        }
        for (key, source) in &self.original_conditions {
            write!(f, " {key}={source}")?;
        }
        f.write_str(" =>")?;
        for (key, template) in &self.params {
            match template.as_literal() {
                Some(value) => write!(f, " {key}={value}")?,
                None => write!(f, " {key}=<capture>")?,
            }
        }
        if let Some(name) = &self.name {
            write!(f, " as {name}")?;
        }
        Ok(())
    }
}
