use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap as FastHashMap;

use crate::registry::{NamedTarget, RegistryMetrics};
use crate::request::RouteRequest;
use crate::route::{GenerateArgs, GenerateError, GenerateResult, Route, RouteMatcher};
use crate::route::{append_query, encode_path_segment};
use crate::router::{RouterError, RouterOptions, RouterResult};
use crate::types::{RouteIndex, RouteMatch, RouteParams};

/// Params that the default route places in the path rather than the query.
const DEFAULT_ROUTE_KEYS: [&str; 4] = ["controller", "action", "id", "format"];

/// Compiled, immutable route table.
///
/// Routes and their matchers share one ordering, so the index returned by
/// [`RouterReadOnly::match_request`] always addresses the route that matched.
pub struct RouterReadOnly {
    routes: Vec<Arc<Route>>,
    matchers: Vec<RouteMatcher>,
    named: FastHashMap<String, Arc<Route>>,
    default_route: Option<RouteIndex>,
    metrics: RegistryMetrics,
}

impl RouterReadOnly {
    pub(crate) fn compile(
        routes: &[Arc<Route>],
        named: &FastHashMap<String, NamedTarget>,
        options: &RouterOptions,
        metrics: RegistryMetrics,
    ) -> Self {
        let matchers = routes.iter().map(|route| route.compile(options)).collect();

        let named = named
            .iter()
            .filter_map(|(name, target)| {
                let route = match target {
                    NamedTarget::Registered(index) => Arc::clone(routes.get(*index)?),
                    NamedTarget::Detached(route) => Arc::clone(route),
                };
                Some((name.clone(), route))
            })
            .collect();

        let default_route = routes.iter().position(|route| route.is_default_route());

        tracing::event!(
            tracing::Level::DEBUG,
            routes = routes.len(),
            named = metrics.named_routes,
            "compiled route table"
        );

        Self {
            routes: routes.to_vec(),
            matchers,
            named,
            default_route,
            metrics,
        }
    }

    /// First route whose conditions all hold, with its resolved params.
    #[tracing::instrument(level = "debug", skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub fn match_request(&self, request: &dyn RouteRequest) -> Option<RouteMatch> {
        let found = self
            .matchers
            .iter()
            .enumerate()
            .find_map(|(index, matcher)| matcher(request).map(|params| (index, params)));

        match &found {
            Some((index, _)) => tracing::trace!(route = index, "route matched"),
            None => tracing::trace!("no route matched"),
        }
        found
    }

    /// Generates a URL from the route registered under `name`.
    pub fn generate<'g>(
        &self,
        name: &str,
        args: impl Into<GenerateArgs<'g>>,
        fallback: &RouteParams,
    ) -> RouterResult<String> {
        let route = self
            .named
            .get(name)
            .ok_or_else(|| RouterError::NamedRouteNotFound {
                name: name.to_string(),
            })?;
        Ok(route.generate(args, fallback)?)
    }

    /// Generates from the first route whose literal params agree with
    /// `params`, falling back to the default route.
    pub fn generate_for_params(
        &self,
        params: &RouteParams,
        fallback: &RouteParams,
    ) -> RouterResult<String> {
        for route in &self.routes {
            if !route.is_consistent_with(params, fallback) {
                continue;
            }
            let mut remaining = params.clone();
            for key in route.literal_param_keys(params) {
                remaining.remove(&key);
            }
            return Ok(route.generate(&remaining, fallback)?);
        }

        if self.default_route.is_some() {
            return Ok(self.generate_for_default_route(params, fallback)?);
        }
        Err(GenerateError::NoDefaultRoute.into())
    }

    /// `/controller[/action][/id][.format][?query]`.
    ///
    /// The action is required once anything follows the controller. A
    /// `format` of `"current"` takes the format from `fallback`.
    pub fn generate_for_default_route(
        &self,
        params: &RouteParams,
        fallback: &RouteParams,
    ) -> GenerateResult<String> {
        let controller = params
            .get("controller")
            .or_else(|| fallback.get("controller"))
            .ok_or(GenerateError::ControllerNotSpecified)?;

        let mut url = format!("/{controller}");

        let has_query = params
            .keys()
            .any(|key| !DEFAULT_ROUTE_KEYS.contains(&key.as_str()));
        let needs_action = ["action", "id", "format"]
            .iter()
            .any(|key| params.contains_key(*key))
            || has_query;

        if needs_action {
            let action = params
                .get("action")
                .or_else(|| fallback.get("action"))
                .ok_or_else(|| GenerateError::ActionNotSpecified {
                    controller: controller.clone(),
                })?;
            url.push('/');
            url.push_str(action);
        }

        if let Some(id) = params.get("id") {
            url.push('/');
            url.push_str(&encode_path_segment(id));
        }

        if let Some(format) = params.get("format") {
            let format = match format.as_str() {
                "current" => fallback.get("format").unwrap_or(format),
                _ => format,
            };
            url.push('.');
            url.push_str(format);
        }

        append_query(&mut url, params, &DEFAULT_ROUTE_KEYS);
        Ok(url)
    }

    pub fn route(&self, index: RouteIndex) -> Option<&Arc<Route>> {
        self.routes.get(index)
    }

    pub fn named_route(&self, name: &str) -> Option<&Arc<Route>> {
        self.named.get(name)
    }

    pub fn default_route(&self) -> Option<&Arc<Route>> {
        self.default_route.and_then(|index| self.routes.get(index))
    }

    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn metrics(&self) -> RegistryMetrics {
        self.metrics
    }
}

impl fmt::Debug for RouterReadOnly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterReadOnly")
            .field("routes", &self.routes)
            .field("named", &self.named.keys().collect::<Vec<_>>())
            .field("default_route", &self.default_route)
            .field("metrics", &self.metrics)
            .finish()
    }
}
