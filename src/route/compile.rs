use std::borrow::Cow;
use std::sync::Arc;

use regex::Regex;
use smallvec::SmallVec;

use super::Route;
use crate::condition::ConditionKey;
use crate::pattern::ParamTemplate;
use crate::request::RouteRequest;
use crate::router::RouterOptions;
use crate::types::RouteParams;

/// Compiled form of one route: `Some(params)` when the request satisfies it.
pub type RouteMatcher = Box<dyn Fn(&dyn RouteRequest) -> Option<RouteParams> + Send + Sync>;

type Groups = SmallVec<[Option<String>; 8]>;

struct CompiledParam {
    name: String,
    template: ParamTemplate,
    /// Used when a bare capture did not participate in the match.
    fallback: Option<String>,
}

fn subject<'r>(
    request: &'r dyn RouteRequest,
    key: &ConditionKey,
    lowercase_method: bool,
) -> Cow<'r, str> {
    match key {
        ConditionKey::Path => Cow::Borrowed(request.path()),
        ConditionKey::Method if lowercase_method => {
            Cow::Owned(request.method().to_ascii_lowercase())
        }
        ConditionKey::Method => Cow::Borrowed(request.method()),
        ConditionKey::Protocol => Cow::Borrowed(request.protocol()),
        ConditionKey::Attribute(name) => request.attribute(name).unwrap_or_default(),
    }
}

fn capture_value<'c>(
    captured: &'c [(&ConditionKey, Groups)],
    key: &ConditionKey,
    group: usize,
) -> Option<&'c str> {
    captured
        .iter()
        .find(|(condition, _)| *condition == key)
        .and_then(|(_, groups)| groups.get(group))
        .and_then(|value| value.as_deref())
}

impl Route {
    /// Builds the matcher closure for this route.
    ///
    /// Conditions are tested in key order; all must match. When the route
    /// carries a deferred block its result decides the outcome.
    pub fn compile(&self, options: &RouterOptions) -> RouteMatcher {
        let conditions: Vec<(ConditionKey, Arc<Regex>)> = self
            .conditions
            .iter()
            .map(|condition| (condition.key.clone(), Arc::clone(&condition.regex)))
            .collect();

        let params: Vec<CompiledParam> = self
            .params
            .iter()
            .map(|(name, template)| CompiledParam {
                name: name.clone(),
                template: template.clone(),
                fallback: (name == "action" && template.as_capture().is_some())
                    .then(|| options.default_action.clone()),
            })
            .collect();

        let lowercase_method = options.case_insensitive_method;
        let deferred = self.deferred.clone();

        if options.debug {
            tracing::debug!(route = %self, "compiled route");
        }

        Box::new(move |request: &dyn RouteRequest| {
            let mut captured: SmallVec<[(&ConditionKey, Groups); 4]> = SmallVec::new();

            for (key, regex) in &conditions {
                let value = subject(request, key, lowercase_method);
                let captures = regex.captures(&value)?;
                let groups: Groups = captures
                    .iter()
                    .map(|group| group.map(|m| m.as_str().to_string()))
                    .collect();
                captured.push((key, groups));
            }

            let mut resolved = RouteParams::with_capacity(params.len());
            for param in &params {
                let value = param
                    .template
                    .render(|key, group| capture_value(&captured, key, group))
                    .or_else(|| param.fallback.clone());
                if let Some(value) = value {
                    resolved.insert(param.name.clone(), value);
                }
            }

            match &deferred {
                Some(block) => block(request, &resolved),
                None => Some(resolved),
            }
        })
    }
}
