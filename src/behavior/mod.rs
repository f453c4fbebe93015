mod error;
mod inflect;
mod node;
mod params;
mod resources;

pub use error::{BehaviorError, BehaviorResult};
pub use inflect::singularize;
pub use node::BehaviorId;
pub use params::ParamSpec;
pub use resources::ResourceOptions;

pub(crate) use node::{BehaviorNode, NamespaceScope, concat_without_endcaps};

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::sync::Arc;

use hashbrown::HashMap as FastHashMap;

use crate::condition::{Condition, ConditionKey, Conditions};
use crate::registry::RouteRegistry;
use crate::request::RouteRequest;
use crate::route::{DeferredBlock, Route};
use crate::router::RouterResult;
use crate::types::{RouteIndex, RouteParams};

pub const DEFAULT_ROUTE_PATTERN: &str = r"^/:controller(/:action(/:id)?)?(\.:format)?$";

/// A node of the route DSL.
///
/// Every `match_*` call produces a child carrying additional conditions;
/// `to`/`defer_to` finalize the chain into a registered [`Route`].
#[derive(Clone, Copy)]
pub struct Behavior<'a> {
    registry: &'a RefCell<RouteRegistry>,
    id: BehaviorId,
}

impl std::fmt::Debug for Behavior<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Behavior").field("id", &self.id).finish()
    }
}

impl<'a> Behavior<'a> {
    pub(crate) fn root(registry: &'a RefCell<RouteRegistry>) -> Self {
        let id = registry.borrow().root();
        Self { registry, id }
    }

    pub fn id(&self) -> BehaviorId {
        self.id
    }

    fn child(&self, conditions: Conditions, params: BTreeMap<String, String>) -> Behavior<'a> {
        let id = self
            .registry
            .borrow_mut()
            .add_behavior(self.id, conditions, params);
        Behavior {
            registry: self.registry,
            id,
        }
    }

    pub fn match_path(&self, path: impl Into<Condition>) -> Behavior<'a> {
        self.child(Conditions::new().path(path), BTreeMap::new())
    }

    pub fn match_with(&self, path: impl Into<Condition>, conditions: Conditions) -> Behavior<'a> {
        self.child(conditions.path(path), BTreeMap::new())
    }

    pub fn match_conditions(&self, conditions: Conditions) -> Behavior<'a> {
        self.child(conditions, BTreeMap::new())
    }

    /// Like [`Behavior::match_path`], yielding the child to `f`.
    pub fn match_path_with<F>(&self, path: impl Into<Condition>, f: F) -> RouterResult<Behavior<'a>>
    where
        F: FnOnce(Behavior<'a>) -> RouterResult<()>,
    {
        let child = self.match_path(path);
        f(child)?;
        Ok(child)
    }

    /// Finalizes the chain into a registered route.
    pub fn to(&self, params: impl Into<ParamSpec>) -> RouterResult<RouteRef<'a>> {
        self.finish(params.into(), None, false)
    }

    /// Yields a child that adds `params` to every route declared inside `f`.
    pub fn to_with<F>(&self, params: impl Into<ParamSpec>, f: F) -> RouterResult<Behavior<'a>>
    where
        F: FnOnce(Behavior<'a>) -> RouterResult<()>,
    {
        let child = self.child(Conditions::new(), params.into().into_entries());
        f(child)?;
        Ok(child)
    }

    /// Registers a route whose match is decided by `block` at request time.
    pub fn defer_to<F>(&self, params: impl Into<ParamSpec>, block: F) -> RouterResult<RouteRef<'a>>
    where
        F: Fn(&dyn RouteRequest, &RouteParams) -> Option<RouteParams> + Send + Sync + 'static,
    {
        let block: DeferredBlock = Arc::new(block);
        self.finish(params.into(), Some(block), false)
    }

    /// `/:controller(/:action(/:id)?)?(.:format)?`
    pub fn default_routes(&self, params: impl Into<ParamSpec>) -> RouterResult<RouteRef<'a>> {
        self.match_path(Condition::regex(DEFAULT_ROUTE_PATTERN))
            .finish(params.into(), None, true)
    }

    /// Scopes the routes declared in `f` under `name`.
    ///
    /// The namespace is not a request condition; resource helpers read it to
    /// prefix paths, controller names and route names.
    pub fn namespace<F>(&self, name: &str, f: F) -> RouterResult<Behavior<'a>>
    where
        F: FnOnce(Behavior<'a>) -> RouterResult<()>,
    {
        let name = name.trim_matches('/');
        if name.is_empty() {
            return Err(BehaviorError::EmptyNamespace.into());
        }
        let child = self.child(Conditions::new(), BTreeMap::new());
        self.registry.borrow_mut().node_mut(child.id).namespace = Some(NamespaceScope {
            name: name.to_string(),
            path_applied: false,
        });
        f(child)?;
        Ok(child)
    }

    fn finish(
        &self,
        params: ParamSpec,
        deferred: Option<DeferredBlock>,
        default_route: bool,
    ) -> RouterResult<RouteRef<'a>> {
        let route = self.to_route(params, deferred, default_route)?;
        let index = self.registry.borrow_mut().register(route);
        Ok(RouteRef {
            registry: self.registry,
            index,
        })
    }

    /// Builds a route from the merged chain without registering it.
    pub(crate) fn to_route(
        &self,
        params: ParamSpec,
        deferred: Option<DeferredBlock>,
        default_route: bool,
    ) -> RouterResult<Route> {
        let target = if params.is_empty() {
            *self
        } else {
            self.child(Conditions::new(), params.into_entries())
        };
        let route = self
            .registry
            .borrow()
            .build_route(target.id, deferred, default_route)?;
        Ok(route)
    }

    pub fn merged_conditions(&self) -> BTreeMap<ConditionKey, String> {
        self.registry.borrow().merged_conditions(self.id)
    }

    pub fn merged_original_conditions(&self) -> BTreeMap<ConditionKey, String> {
        self.registry.borrow().merged_original_conditions(self.id)
    }

    pub fn merged_params(&self) -> BTreeMap<String, String> {
        self.registry.borrow().merged_params(self.id)
    }

    pub fn merged_placeholders(&self) -> FastHashMap<String, (ConditionKey, usize)> {
        self.registry.borrow().merged_placeholders(self.id)
    }

    pub fn merged_namespace(&self) -> Option<String> {
        self.registry
            .borrow()
            .merged_namespace(self.id)
            .map(|(_, scope)| scope.name)
    }

    /// Whether this behavior or an ancestor used a regex condition.
    pub fn is_regexp(&self) -> bool {
        self.registry.borrow().has_regexp(self.id)
    }
}

/// A route registered during the current DSL pass.
#[derive(Clone, Copy)]
pub struct RouteRef<'a> {
    registry: &'a RefCell<RouteRegistry>,
    index: RouteIndex,
}

impl std::fmt::Debug for RouteRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteRef")
            .field("index", &self.index)
            .finish()
    }
}

impl<'a> RouteRef<'a> {
    /// Index within the routes declared by this pass.
    ///
    /// `prepare` keeps it as the table index. `append` and `prepend` splice
    /// the pass into an existing table, so read [`Route::index`] from the
    /// compiled table there.
    pub fn index(&self) -> RouteIndex {
        self.index
    }

    /// Names the route for [`crate::Router::generate`].
    pub fn name(self, name: &str) -> RouterResult<Self> {
        self.registry.borrow_mut().name_route(self.index, name)?;
        Ok(self)
    }

    /// Allows session fixation for requests dispatched to this route.
    pub fn fixatable(self, enabled: bool) -> Self {
        self.registry.borrow_mut().set_fixation(self.index, enabled);
        self
    }

    /// Runs `f` on a copy of the route; `f` may keep declaring routes.
    pub fn with_route<R>(&self, f: impl FnOnce(&Route) -> R) -> R {
        let route = self.registry.borrow().route(self.index).clone();
        f(&route)
    }
}
