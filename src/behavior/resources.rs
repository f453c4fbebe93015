use hashbrown::HashSet as FastHashSet;

use super::{Behavior, BehaviorError, BehaviorResult, NamespaceScope, ParamSpec, RouteRef};
use super::inflect::singularize;
use crate::condition::{Condition, Conditions};
use crate::enums::{HttpMethod, MethodSet};
use crate::router::RouterResult;

/// Options accepted by [`Behavior::resources`] and [`Behavior::resource`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceOptions {
    pub name_prefix: Option<String>,
    pub namespace: Option<String>,
    pub controller: Option<String>,
    /// Member keys replacing `:id`, e.g. `["year", "slug"]` for `/:year/:slug`.
    pub keys: Option<Vec<String>>,
    pub member: Vec<(String, MethodSet)>,
    pub collection: Vec<(String, MethodSet)>,
}

impl ResourceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = Some(prefix.into());
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn controller(mut self, controller: impl Into<String>) -> Self {
        self.controller = Some(controller.into());
        self
    }

    pub fn keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn member(mut self, action: impl Into<String>, methods: impl Into<MethodSet>) -> Self {
        self.member.push((action.into(), methods.into()));
        self
    }

    pub fn collection(mut self, action: impl Into<String>, methods: impl Into<MethodSet>) -> Self {
        self.collection.push((action.into(), methods.into()));
        self
    }
}

fn is_word(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

fn validate_actions(
    resource: &str,
    kind: &'static str,
    actions: &[(String, MethodSet)],
) -> BehaviorResult<()> {
    let mut seen = FastHashSet::new();
    for (action, methods) in actions {
        if !is_word(action) {
            return Err(BehaviorError::InvalidResourceAction {
                resource: resource.to_string(),
                kind,
                action: action.clone(),
            });
        }
        if methods.is_empty() {
            return Err(BehaviorError::EmptyActionMethods {
                resource: resource.to_string(),
                kind,
                action: action.clone(),
            });
        }
        if !seen.insert(action.as_str()) {
            return Err(BehaviorError::DuplicateResourceAction {
                resource: resource.to_string(),
                kind,
                action: action.clone(),
            });
        }
    }
    Ok(())
}

/// `:id`, or the custom keys joined as `:k1/:k2`.
fn member_keys(resource: &str, keys: Option<&Vec<String>>) -> BehaviorResult<Option<String>> {
    let Some(keys) = keys else {
        return Ok(None);
    };
    if keys.is_empty() {
        return Err(BehaviorError::EmptyResourceKeys {
            resource: resource.to_string(),
        });
    }
    for key in keys {
        let valid = key
            .bytes()
            .enumerate()
            .all(|(i, b)| b.is_ascii_alphabetic() || b == b'_' || (i > 0 && b.is_ascii_digit()));
        if key.is_empty() || !valid {
            return Err(BehaviorError::InvalidResourceAction {
                resource: resource.to_string(),
                kind: "key",
                action: key.clone(),
            });
        }
    }
    Ok(Some(
        keys.iter()
            .map(|key| format!(":{key}"))
            .collect::<Vec<_>>()
            .join("/"),
    ))
}

fn namespace_to_name_prefix(namespace: &str) -> String {
    format!("{}_", namespace.replace('/', "_"))
}

/// Resolved naming and scoping shared by plural and singular resources.
struct ResourceScope<'a> {
    next_level: Behavior<'a>,
    controller: String,
    name_prefix: String,
    parents: Vec<String>,
}

impl ResourceScope<'_> {
    fn route_name(&self, base: &str) -> String {
        let parent_prefix = if self.parents.is_empty() {
            String::new()
        } else {
            format!("{}_", self.parents.join("_"))
        };
        format!("{}{}{}", self.name_prefix, parent_prefix, base)
    }

    fn params(&self, action: &str) -> ParamSpec {
        ParamSpec::new()
            .set("controller", self.controller.clone())
            .set("action", action)
    }
}

impl<'a> Behavior<'a> {
    fn resource_scope(&self, name: &str, options: &ResourceOptions) -> BehaviorResult<ResourceScope<'a>> {
        if !is_word(name) {
            return Err(BehaviorError::InvalidResourceName {
                name: name.to_string(),
            });
        }

        let (namespace, prefix_path) = match &options.namespace {
            Some(explicit) => {
                let explicit = explicit.trim_matches('/').to_string();
                if explicit.is_empty() {
                    return Err(BehaviorError::EmptyNamespace);
                }
                (Some(explicit), true)
            }
            None => match self.registry.borrow().merged_namespace(self.id) {
                Some((_, scope)) => (Some(scope.name), !scope.path_applied),
                None => (None, false),
            },
        };

        let path = match (&namespace, prefix_path) {
            (Some(namespace), true) => format!("/{namespace}/{name}"),
            _ => format!("/{name}"),
        };
        let next_level = self.match_path(path);

        let (controller, parents) = {
            let mut registry = self.registry.borrow_mut();
            if let Some(namespace) = &namespace {
                registry.node_mut(next_level.id).namespace = Some(NamespaceScope {
                    name: namespace.clone(),
                    path_applied: true,
                });
            }

            let inherited = registry
                .merged_params(self.id)
                .get("controller")
                .filter(|value| !value.contains(':') && !value.contains('['))
                .cloned();
            let base = options
                .controller
                .clone()
                .or(inherited)
                .unwrap_or_else(|| name.to_string());
            let controller = match &namespace {
                Some(namespace) if !base.starts_with(&format!("{namespace}/")) => {
                    format!("{namespace}/{base}")
                }
                _ => base,
            };

            (controller, registry.resource_parents(self.id))
        };

        let name_prefix = match (&options.name_prefix, &namespace) {
            (Some(prefix), _) => format!("{prefix}_"),
            (None, Some(namespace)) => namespace_to_name_prefix(namespace),
            (None, None) => String::new(),
        };

        Ok(ResourceScope {
            next_level,
            controller,
            name_prefix,
            parents,
        })
    }

    fn resource_route(
        &self,
        scope: &ResourceScope<'a>,
        path: String,
        methods: impl Into<Condition>,
        action: &str,
    ) -> RouterResult<RouteRef<'a>> {
        scope
            .next_level
            .match_conditions(
                Conditions::new()
                    .path(Condition::regex(path))
                    .method(methods),
            )
            .to(scope.params(action))
    }

    fn generation_route(
        &self,
        scope: &ResourceScope<'a>,
        path: &str,
        action: &str,
        name: String,
    ) -> RouterResult<()> {
        let route = scope
            .next_level
            .match_path(path)
            .to_route(scope.params(action), None, false)?;
        self.registry.borrow_mut().name_detached(route, &name)?;
        Ok(())
    }

    /// Declares the RESTful route set for a plural resource.
    pub fn resources(&self, name: &str, options: ResourceOptions) -> RouterResult<Vec<RouteRef<'a>>> {
        self.resources_with(name, options, |_| Ok(()))
    }

    /// Like [`Behavior::resources`], yielding the nested member scope
    /// (`/<name>/:<singular>_id`) to `f`.
    #[tracing::instrument(level = "debug", skip(self, options, f), fields(resource = %name))]
    pub fn resources_with<F>(
        &self,
        name: &str,
        options: ResourceOptions,
        f: F,
    ) -> RouterResult<Vec<RouteRef<'a>>>
    where
        F: FnOnce(Behavior<'a>) -> RouterResult<()>,
    {
        validate_actions(name, "member", &options.member)?;
        validate_actions(name, "collection", &options.collection)?;
        let custom_keys = member_keys(name, options.keys.as_ref())?;
        let keys = custom_keys.clone().unwrap_or_else(|| ":id".to_string());

        let scope = self.resource_scope(name, &options)?;
        let singular = singularize(name);
        let plural_name = scope.route_name(name);
        let singular_name = scope.route_name(&singular);
        let mut routes = Vec::with_capacity(8 + options.member.len() + options.collection.len());

        for (action, methods) in &options.member {
            routes.push(self.resource_route(
                &scope,
                format!(r"^/{keys}/{action}(\.:format)?$"),
                *methods,
                action,
            )?);
            self.generation_route(
                &scope,
                &format!("/{keys}/{action}"),
                action,
                format!("{action}_{singular_name}"),
            )?;
        }

        for (action, methods) in &options.collection {
            routes.push(self.resource_route(
                &scope,
                format!(r"^/{action}(\.:format)?$"),
                *methods,
                action,
            )?);
            self.generation_route(
                &scope,
                &format!("/{action}"),
                action,
                format!("{action}_{plural_name}"),
            )?;
        }

        let standard = [
            (r"^/?(\.:format)?$".to_string(), HttpMethod::Get, "index"),
            (r"^/new$".to_string(), HttpMethod::Get, "new"),
            (r"^/?(\.:format)?$".to_string(), HttpMethod::Post, "create"),
            (format!(r"^/{keys}(\.:format)?$"), HttpMethod::Get, "show"),
            (format!(r"^/{keys}[;/]edit$"), HttpMethod::Get, "edit"),
            (format!(r"^/{keys}[;/]delete$"), HttpMethod::Get, "delete"),
            (format!(r"^/{keys}(\.:format)?$"), HttpMethod::Put, "update"),
            (format!(r"^/{keys}(\.:format)?$"), HttpMethod::Delete, "destroy"),
        ];
        for (path, method, action) in standard {
            routes.push(self.resource_route(&scope, path, method, action)?);
        }

        let named = [
            (String::new(), "index", plural_name.clone()),
            (format!("/{keys}"), "show", singular_name.clone()),
            ("/new".to_string(), "new", format!("new_{singular_name}")),
            (format!("/{keys}/edit"), "edit", format!("edit_{singular_name}")),
            (format!("/{keys}/delete"), "delete", format!("delete_{singular_name}")),
        ];
        for (path, action, route_name) in named {
            self.generation_route(&scope, &path, action, route_name)?;
        }

        tracing::debug!(
            resource = %name,
            routes = routes.len(),
            controller = %scope.controller,
            "declared resources"
        );

        let nested_path = match custom_keys {
            Some(keys) => format!("/{keys}"),
            None => format!("/:{singular}_id"),
        };
        let nested = scope.next_level.match_path(nested_path);
        let mut parents = scope.parents.clone();
        parents.push(singular);
        self.registry.borrow_mut().node_mut(nested.id).resource_parents = Some(parents);
        f(nested)?;

        Ok(routes)
    }

    /// Declares the route set for a singular resource.
    pub fn resource(&self, name: &str, options: ResourceOptions) -> RouterResult<Vec<RouteRef<'a>>> {
        self.resource_with(name, options, |_| Ok(()))
    }

    /// Like [`Behavior::resource`], yielding the resource scope to `f`.
    #[tracing::instrument(level = "debug", skip(self, options, f), fields(resource = %name))]
    pub fn resource_with<F>(
        &self,
        name: &str,
        options: ResourceOptions,
        f: F,
    ) -> RouterResult<Vec<RouteRef<'a>>>
    where
        F: FnOnce(Behavior<'a>) -> RouterResult<()>,
    {
        if options.keys.is_some() {
            return Err(BehaviorError::UnsupportedResourceOption {
                resource: name.to_string(),
                option: "keys",
            }
            .into());
        }
        if !options.collection.is_empty() {
            return Err(BehaviorError::UnsupportedResourceOption {
                resource: name.to_string(),
                option: "collection",
            }
            .into());
        }
        validate_actions(name, "member", &options.member)?;

        let scope = self.resource_scope(name, &options)?;
        let route_name = scope.route_name(name);
        let mut routes = Vec::with_capacity(6 + options.member.len());

        for (action, methods) in &options.member {
            routes.push(self.resource_route(
                &scope,
                format!(r"^/{action}(\.:format)?$"),
                *methods,
                action,
            )?);
            self.generation_route(
                &scope,
                &format!("/{action}"),
                action,
                format!("{action}_{route_name}"),
            )?;
        }

        let standard = [
            (r"^[;/]new$", HttpMethod::Get, "new"),
            (r"^/?(\.:format)?$", HttpMethod::Post, "create"),
            (r"^/?(\.:format)?$", HttpMethod::Get, "show"),
            (r"^[;/]edit$", HttpMethod::Get, "edit"),
            (r"^/?(\.:format)?$", HttpMethod::Put, "update"),
            (r"^/?(\.:format)?$", HttpMethod::Delete, "destroy"),
        ];
        for (path, method, action) in standard {
            routes.push(self.resource_route(&scope, path.to_string(), method, action)?);
        }

        let named = [
            ("", "show", route_name.clone()),
            ("/new", "new", format!("new_{route_name}")),
            ("/edit", "edit", format!("edit_{route_name}")),
        ];
        for (path, action, route_label) in named {
            self.generation_route(&scope, path, action, route_label)?;
        }

        let mut parents = scope.parents.clone();
        parents.push(name.to_string());
        self.registry
            .borrow_mut()
            .node_mut(scope.next_level.id)
            .resource_parents = Some(parents);
        f(scope.next_level)?;

        Ok(routes)
    }
}
