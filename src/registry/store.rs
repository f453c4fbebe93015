use std::collections::BTreeMap;
use std::sync::Arc;

use hashbrown::HashMap as FastHashMap;

use crate::behavior::{BehaviorError, BehaviorId, BehaviorNode, BehaviorResult, NamespaceScope};
use crate::behavior::concat_without_endcaps;
use crate::condition::{ConditionKey, Conditions};
use crate::pattern::{PatternResult, count_captures};
use crate::registry::RegistryMetrics;
use crate::route::{DeferredBlock, Route, RouteDraft};
use crate::router::RouterOptions;
use crate::types::RouteIndex;

#[derive(Debug, Clone)]
pub(crate) enum NamedTarget {
    Registered(RouteIndex),
    /// Named generation-only route that never enters the match table.
    Detached(Arc<Route>),
}

pub(crate) struct RegistryParts {
    pub routes: Vec<Route>,
    pub named: FastHashMap<String, NamedTarget>,
    pub metrics: RegistryMetrics,
}

/// Arena of behaviors plus the routes they registered during one DSL pass.
#[derive(Debug)]
pub(crate) struct RouteRegistry {
    options: RouterOptions,
    behaviors: Vec<BehaviorNode>,
    routes: Vec<Route>,
    named: FastHashMap<String, NamedTarget>,
    metrics: RegistryMetrics,
}

impl RouteRegistry {
    pub fn new(options: RouterOptions) -> Self {
        let mut root_params = BTreeMap::new();
        root_params.insert("action".to_string(), options.default_action.clone());
        let root = BehaviorNode::new(
            None,
            Conditions::new(),
            root_params,
            &options,
        );

        let mut metrics = RegistryMetrics::default();
        metrics.record_behavior();

        Self {
            options,
            behaviors: vec![root],
            routes: Vec::new(),
            named: FastHashMap::new(),
            metrics,
        }
    }

    pub fn root(&self) -> BehaviorId {
        BehaviorId(0)
    }

    pub fn add_behavior(
        &mut self,
        parent: BehaviorId,
        conditions: Conditions,
        params: BTreeMap<String, String>,
    ) -> BehaviorId {
        let node = BehaviorNode::new(
            Some(parent),
            conditions,
            params,
            &self.options,
        );
        self.behaviors.push(node);
        self.metrics.record_behavior();
        BehaviorId(self.behaviors.len() - 1)
    }

    pub fn node(&self, id: BehaviorId) -> &BehaviorNode {
        &self.behaviors[id.0]
    }

    pub fn node_mut(&mut self, id: BehaviorId) -> &mut BehaviorNode {
        &mut self.behaviors[id.0]
    }

    /// Nodes from the root down to `id`.
    fn chain(&self, id: BehaviorId) -> Vec<&BehaviorNode> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.node(id);
            chain.push(node);
            current = node.parent;
        }
        chain.reverse();
        chain
    }

    fn merge_sources<F>(&self, id: BehaviorId, pick: F) -> BTreeMap<ConditionKey, String>
    where
        F: Fn(&BehaviorNode) -> &BTreeMap<ConditionKey, String>,
    {
        let mut merged: BTreeMap<ConditionKey, String> = BTreeMap::new();
        for node in self.chain(id) {
            for (key, source) in pick(node) {
                let value = if *key == ConditionKey::Path {
                    concat_without_endcaps(merged.get(key).map(String::as_str), Some(source))
                        .unwrap_or_default()
                } else {
                    source.clone()
                };
                merged.insert(key.clone(), value);
            }
        }
        merged
    }

    pub fn merged_conditions(&self, id: BehaviorId) -> BTreeMap<ConditionKey, String> {
        self.merge_sources(id, |node| &node.conditions)
    }

    pub fn merged_original_conditions(&self, id: BehaviorId) -> BTreeMap<ConditionKey, String> {
        self.merge_sources(id, |node| &node.original_conditions)
    }

    /// Params of the whole chain, descendants winning.
    ///
    /// A placeholder param whose capture was dropped by an overriding
    /// condition is removed along with it.
    pub fn merged_params(&self, id: BehaviorId) -> BTreeMap<String, String> {
        let chain = self.chain(id);
        let mut merged = BTreeMap::new();
        for node in &chain {
            merged.extend(node.params.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        let live = self.merged_placeholders(id);
        for name in chain.iter().flat_map(|node| node.placeholders.keys()) {
            if live.contains_key(name) {
                continue;
            }
            let stale = merged
                .get(name)
                .is_some_and(|value| value.strip_prefix(':') == Some(name.as_str()));
            if stale {
                merged.remove(name);
            }
        }
        merged
    }

    /// Placeholders of the whole chain with capture indexes valid for the
    /// merged conditions.
    ///
    /// Path captures shift by the groups of every earlier path fragment. A
    /// node that sets a non-path condition replaces the ancestor's value, so
    /// the ancestor's placeholders on that key are dropped.
    pub fn merged_placeholders(&self, id: BehaviorId) -> FastHashMap<String, (ConditionKey, usize)> {
        let mut merged: FastHashMap<String, (ConditionKey, usize)> = FastHashMap::new();
        let mut path_offset = 0usize;

        for node in self.chain(id) {
            for key in node.conditions.keys() {
                if *key != ConditionKey::Path {
                    merged.retain(|_, (existing, _)| existing != key);
                }
            }

            for (name, (key, capture)) in &node.placeholders {
                let capture = if *key == ConditionKey::Path {
                    capture + path_offset
                } else {
                    *capture
                };
                merged.insert(name.clone(), (key.clone(), capture));
            }

            if let Some(path) = node.conditions.get(&ConditionKey::Path) {
                path_offset += count_captures(path);
            }
        }

        merged
    }

    pub fn has_regexp(&self, id: BehaviorId) -> bool {
        self.chain(id)
            .iter()
            .any(|node| node.conditions_have_regexp)
    }

    /// Nearest namespace scope and the behavior that declared it.
    pub fn merged_namespace(&self, id: BehaviorId) -> Option<(BehaviorId, NamespaceScope)> {
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.node(id);
            if let Some(scope) = &node.namespace {
                return Some((id, scope.clone()));
            }
            current = node.parent;
        }
        None
    }

    /// Singular names of the enclosing resources, outermost first.
    pub fn resource_parents(&self, id: BehaviorId) -> Vec<String> {
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.node(id);
            if let Some(parents) = &node.resource_parents {
                return parents.clone();
            }
            current = node.parent;
        }
        Vec::new()
    }

    pub fn build_route(
        &self,
        id: BehaviorId,
        deferred: Option<DeferredBlock>,
        default_route: bool,
    ) -> PatternResult<Route> {
        let draft = RouteDraft {
            conditions: self.merged_conditions(id),
            original_conditions: self.merged_original_conditions(id),
            params: self.merged_params(id),
            placeholders: self.merged_placeholders(id),
            regexp: self.has_regexp(id),
            deferred,
            default_route,
        };
        Route::from_draft(draft)
    }

    /// Appends `route` to the table; its index is the table length before.
    pub fn register(&mut self, route: Route) -> RouteIndex {
        let index = self.routes.len();
        let route = route.with_index(index);
        tracing::trace!(route = %route, "registered route");
        self.routes.push(route);
        self.metrics.record_route();
        index
    }

    pub fn route(&self, index: RouteIndex) -> &Route {
        &self.routes[index]
    }

    fn claim_name(&mut self, name: &str) -> BehaviorResult<()> {
        if name.is_empty() {
            return Err(BehaviorError::EmptyRouteName);
        }
        if self.named.contains_key(name) {
            return Err(BehaviorError::DuplicateRouteName {
                name: name.to_string(),
            });
        }
        self.metrics.record_name();
        Ok(())
    }

    pub fn name_route(&mut self, index: RouteIndex, name: &str) -> BehaviorResult<()> {
        self.claim_name(name)?;
        let route = &mut self.routes[index];
        if let Some(previous) = route.name.replace(name.to_string()) {
            self.named.remove(&previous);
        }
        self.named
            .insert(name.to_string(), NamedTarget::Registered(index));
        Ok(())
    }

    pub fn name_detached(&mut self, mut route: Route, name: &str) -> BehaviorResult<()> {
        self.claim_name(name)?;
        route.name = Some(name.to_string());
        self.named
            .insert(name.to_string(), NamedTarget::Detached(Arc::new(route)));
        Ok(())
    }

    pub fn set_fixation(&mut self, index: RouteIndex, enabled: bool) {
        self.routes[index].fixation = enabled;
    }

    pub fn into_parts(self) -> RegistryParts {
        RegistryParts {
            routes: self.routes,
            named: self.named,
            metrics: self.metrics,
        }
    }
}
