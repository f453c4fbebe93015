use std::cell::RefCell;
use std::sync::Arc;

use hashbrown::HashMap as FastHashMap;
use parking_lot::RwLock;

use crate::behavior::Behavior;
use crate::readonly::RouterReadOnly;
use crate::registry::{NamedTarget, RegistryMetrics, RegistryParts, RouteRegistry};
use crate::request::RouteRequest;
use crate::route::{GenerateArgs, Route};
use crate::router::{RouterError, RouterOptions, RouterResult};
use crate::types::{RouteIndex, RouteMatch, RouteParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Replace,
    Append,
    Prepend,
}

#[derive(Debug)]
struct RouterState {
    options: RouterOptions,
    routes: Vec<Arc<Route>>,
    named: FastHashMap<String, NamedTarget>,
    metrics: RegistryMetrics,
    readonly: Option<Arc<RouterReadOnly>>,
}

impl RouterState {
    fn new(options: RouterOptions) -> Self {
        Self {
            options,
            routes: Vec::new(),
            named: FastHashMap::new(),
            metrics: RegistryMetrics::default(),
            readonly: None,
        }
    }

    fn shift_named(named: &mut FastHashMap<String, NamedTarget>, offset: usize) {
        for target in named.values_mut() {
            if let NamedTarget::Registered(index) = target {
                *index += offset;
            }
        }
    }

    fn reindexed(routes: impl IntoIterator<Item = Route>, offset: usize) -> Vec<Arc<Route>> {
        routes
            .into_iter()
            .enumerate()
            .map(|(i, route)| Arc::new(route.with_index(offset + i)))
            .collect()
    }

    fn install(&mut self, placement: Placement, parts: RegistryParts) {
        let RegistryParts {
            routes,
            mut named,
            metrics,
        } = parts;

        match placement {
            Placement::Replace => {
                self.routes = Self::reindexed(routes, 0);
                self.named = named;
                self.metrics = metrics;
            }
            Placement::Append => {
                let offset = self.routes.len();
                Self::shift_named(&mut named, offset);
                self.routes.extend(Self::reindexed(routes, offset));
                self.named.extend(named);
                self.metrics.absorb(metrics);
            }
            Placement::Prepend => {
                let offset = routes.len();
                let existing = std::mem::take(&mut self.routes)
                    .into_iter()
                    .map(Arc::unwrap_or_clone);
                let mut table = Self::reindexed(routes, 0);
                table.extend(Self::reindexed(existing, offset));
                self.routes = table;
                Self::shift_named(&mut self.named, offset);
                self.named.extend(named);
                self.metrics.absorb(metrics);
            }
        }

        let readonly =
            RouterReadOnly::compile(&self.routes, &self.named, &self.options, self.metrics);
        self.readonly = Some(Arc::new(readonly));
    }
}

/// Owner of the route table.
///
/// Routes are declared through a [`Behavior`] DSL pass; every pass compiles
/// a fresh [`RouterReadOnly`] that replaces the previous one in a single
/// write, so concurrent readers see either the old or the new table.
#[derive(Debug)]
pub struct Router {
    inner: RwLock<RouterState>,
}

impl Default for Router {
    fn default() -> Self {
        Self {
            inner: RwLock::new(RouterState::new(RouterOptions::default())),
        }
    }
}

impl Router {
    pub fn new(options: Option<RouterOptions>) -> RouterResult<Self> {
        let options = options.unwrap_or_default();
        options.validate()?;
        Ok(Self {
            inner: RwLock::new(RouterState::new(options)),
        })
    }

    pub fn options(&self) -> RouterOptions {
        self.inner.read().options.clone()
    }

    /// Runs one DSL pass against a fresh registry, outside the table lock.
    fn declare<F>(&self, f: F) -> RouterResult<RegistryParts>
    where
        F: for<'a> FnOnce(Behavior<'a>) -> RouterResult<()>,
    {
        let options = self.options();
        let registry = RefCell::new(RouteRegistry::new(options));
        f(Behavior::root(&registry))?;
        Ok(registry.into_inner().into_parts())
    }

    fn mutate<F>(&self, placement: Placement, f: F) -> RouterResult<()>
    where
        F: for<'a> FnOnce(Behavior<'a>) -> RouterResult<()>,
    {
        let parts = self.declare(f)?;
        let declared = parts.routes.len();

        let mut guard = self.inner.write();
        guard.install(placement, parts);

        tracing::event!(
            tracing::Level::DEBUG,
            operation = ?placement,
            declared,
            total = guard.routes.len(),
            "route table updated"
        );
        Ok(())
    }

    /// Replaces the route table with the routes declared by `f`.
    ///
    /// When `f` fails the current table is left untouched.
    #[tracing::instrument(level = "debug", skip(self, f))]
    pub fn prepare<F>(&self, f: F) -> RouterResult<()>
    where
        F: for<'a> FnOnce(Behavior<'a>) -> RouterResult<()>,
    {
        self.mutate(Placement::Replace, f)
    }

    /// Adds the routes declared by `f` after the existing ones.
    #[tracing::instrument(level = "debug", skip(self, f))]
    pub fn append<F>(&self, f: F) -> RouterResult<()>
    where
        F: for<'a> FnOnce(Behavior<'a>) -> RouterResult<()>,
    {
        self.mutate(Placement::Append, f)
    }

    /// Adds the routes declared by `f` before the existing ones; existing
    /// routes move to the indexes behind them.
    #[tracing::instrument(level = "debug", skip(self, f))]
    pub fn prepend<F>(&self, f: F) -> RouterResult<()>
    where
        F: for<'a> FnOnce(Behavior<'a>) -> RouterResult<()>,
    {
        self.mutate(Placement::Prepend, f)
    }

    pub fn get_readonly(&self) -> RouterResult<Arc<RouterReadOnly>> {
        self.inner
            .read()
            .readonly
            .clone()
            .ok_or(RouterError::NotCompiled)
    }

    pub fn match_request(&self, request: &dyn RouteRequest) -> RouterResult<Option<RouteMatch>> {
        Ok(self.get_readonly()?.match_request(request))
    }

    pub fn generate<'g>(
        &self,
        name: &str,
        args: impl Into<GenerateArgs<'g>>,
        fallback: &RouteParams,
    ) -> RouterResult<String> {
        self.get_readonly()?.generate(name, args, fallback)
    }

    pub fn generate_for_params(
        &self,
        params: &RouteParams,
        fallback: &RouteParams,
    ) -> RouterResult<String> {
        self.get_readonly()?.generate_for_params(params, fallback)
    }

    pub fn generate_for_default_route(
        &self,
        params: &RouteParams,
        fallback: &RouteParams,
    ) -> RouterResult<String> {
        Ok(self
            .get_readonly()?
            .generate_for_default_route(params, fallback)?)
    }

    pub fn route(&self, index: RouteIndex) -> RouterResult<Option<Arc<Route>>> {
        Ok(self.get_readonly()?.route(index).cloned())
    }

    pub fn len(&self) -> usize {
        self.inner.read().routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn metrics(&self) -> RegistryMetrics {
        self.inner.read().metrics
    }
}
