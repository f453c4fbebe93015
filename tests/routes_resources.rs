use route_behavior_rs::{
    BehaviorError, HttpMethod, MethodSet, RequestParts, ResourceOptions, RouteParams, Router,
    RouterError, route_params,
};

fn dispatch(router: &Router, method: &str, path: &str) -> Option<(usize, RouteParams)> {
    router
        .match_request(&RequestParts::new(method, path))
        .expect("table is compiled")
}

fn action_of(router: &Router, method: &str, path: &str) -> Option<String> {
    dispatch(router, method, path).and_then(|(_, params)| params.get("action").cloned())
}

fn url(router: &Router, name: &str, params: &[(&str, &str)]) -> String {
    router
        .generate(name, &route_params(params.iter().copied()), &RouteParams::new())
        .unwrap_or_else(|err| panic!("'{name}' should generate: {err:?}"))
}

#[test]
fn resources_when_declared_then_maps_methods_to_actions() {
    let router = Router::default();
    router
        .prepare(|r| {
            let routes = r.resources("posts", ResourceOptions::new())?;
            assert_eq!(routes.len(), 8);
            Ok(())
        })
        .expect("routes should prepare");

    assert_eq!(action_of(&router, "GET", "/posts").as_deref(), Some("index"));
    assert_eq!(action_of(&router, "GET", "/posts.xml").as_deref(), Some("index"));
    assert_eq!(action_of(&router, "GET", "/posts/new").as_deref(), Some("new"));
    assert_eq!(action_of(&router, "POST", "/posts").as_deref(), Some("create"));
    assert_eq!(action_of(&router, "GET", "/posts/3").as_deref(), Some("show"));
    assert_eq!(action_of(&router, "GET", "/posts/3/edit").as_deref(), Some("edit"));
    assert_eq!(action_of(&router, "GET", "/posts/3;edit").as_deref(), Some("edit"));
    assert_eq!(action_of(&router, "GET", "/posts/3/delete").as_deref(), Some("delete"));
    assert_eq!(action_of(&router, "PUT", "/posts/3").as_deref(), Some("update"));
    assert_eq!(action_of(&router, "DELETE", "/posts/3").as_deref(), Some("destroy"));
    assert_eq!(action_of(&router, "PATCH", "/posts/3"), None);

    let (_, params) = dispatch(&router, "GET", "/posts/3.json").expect("show should match");
    assert_eq!(params.get("controller").map(String::as_str), Some("posts"));
    assert_eq!(params.get("id").map(String::as_str), Some("3"));
    assert_eq!(params.get("format").map(String::as_str), Some("json"));
}

#[test]
fn resources_when_declared_then_names_generation_routes() {
    let router = Router::default();
    router
        .prepare(|r| {
            r.resources("posts", ResourceOptions::new())?;
            Ok(())
        })
        .expect("routes should prepare");

    assert_eq!(url(&router, "posts", &[]), "/posts");
    assert_eq!(url(&router, "post", &[("id", "3")]), "/posts/3");
    assert_eq!(url(&router, "new_post", &[]), "/posts/new");
    assert_eq!(url(&router, "edit_post", &[("id", "3")]), "/posts/3/edit");
    assert_eq!(url(&router, "delete_post", &[("id", "3")]), "/posts/3/delete");

    let readonly = router.get_readonly().expect("table is compiled");
    assert_eq!(readonly.len(), 8);
    assert_eq!(readonly.metrics().named_routes, 5);
}

#[test]
fn resources_when_nested_then_child_paths_carry_parent_id() {
    let router = Router::default();
    router
        .prepare(|r| {
            r.resources_with("posts", ResourceOptions::new(), |posts| {
                posts.resources("comments", ResourceOptions::new())?;
                Ok(())
            })?;
            Ok(())
        })
        .expect("routes should prepare");

    let readonly = router.get_readonly().expect("table is compiled");
    let show = readonly.route(11).expect("nested show route");
    assert!(
        show.original_conditions()
            .values()
            .any(|path| path.contains("/:post_id/")),
        "nested path should include the parent id: {show}"
    );

    let (_, params) = dispatch(&router, "GET", "/posts/3/comments/7").expect("nested show");
    assert_eq!(
        params,
        route_params([
            ("controller", "comments"),
            ("action", "show"),
            ("post_id", "3"),
            ("id", "7"),
        ])
    );

    assert_eq!(action_of(&router, "GET", "/posts/3/comments").as_deref(), Some("index"));
    assert_eq!(action_of(&router, "POST", "/posts/3/comments").as_deref(), Some("create"));
    assert_eq!(action_of(&router, "PUT", "/posts/3/comments/7").as_deref(), Some("update"));
    assert_eq!(action_of(&router, "DELETE", "/posts/3/comments/7").as_deref(), Some("destroy"));
    assert_eq!(action_of(&router, "GET", "/posts/3/comments/7/edit").as_deref(), Some("edit"));

    assert_eq!(url(&router, "post_comments", &[("post_id", "3")]), "/posts/3/comments");
    assert_eq!(
        url(&router, "post_comment", &[("post_id", "3"), ("id", "7")]),
        "/posts/3/comments/7"
    );
    assert_eq!(
        url(&router, "new_post_comment", &[("post_id", "3")]),
        "/posts/3/comments/new"
    );
}

#[test]
fn resources_when_namespaced_then_prefixes_path_controller_and_name() {
    let router = Router::default();
    router
        .prepare(|r| {
            r.namespace("admin", |admin| {
                admin.resources_with("posts", ResourceOptions::new(), |posts| {
                    posts.resources("comments", ResourceOptions::new())?;
                    Ok(())
                })?;
                Ok(())
            })?;
            Ok(())
        })
        .expect("routes should prepare");

    let (_, params) = dispatch(&router, "GET", "/admin/posts/3").expect("namespaced show");
    assert_eq!(params.get("controller").map(String::as_str), Some("admin/posts"));
    assert_eq!(dispatch(&router, "GET", "/posts/3"), None);

    let (_, params) =
        dispatch(&router, "GET", "/admin/posts/3/comments").expect("namespaced nested index");
    assert_eq!(params.get("controller").map(String::as_str), Some("admin/comments"));

    assert_eq!(url(&router, "admin_post", &[("id", "3")]), "/admin/posts/3");
    assert_eq!(
        url(&router, "admin_post_comments", &[("post_id", "3")]),
        "/admin/posts/3/comments"
    );
}

#[test]
fn resources_when_namespace_option_given_then_applies_without_scope() {
    let router = Router::default();
    router
        .prepare(|r| {
            r.resources("users", ResourceOptions::new().namespace("staff"))?;
            Ok(())
        })
        .expect("routes should prepare");

    let (_, params) = dispatch(&router, "GET", "/staff/users").expect("namespaced index");
    assert_eq!(params.get("controller").map(String::as_str), Some("staff/users"));
    assert_eq!(url(&router, "staff_users", &[]), "/staff/users");
}

#[test]
fn resources_when_member_and_collection_given_then_registers_them_first() {
    let router = Router::default();
    router
        .prepare(|r| {
            let routes = r.resources(
                "posts",
                ResourceOptions::new()
                    .member("publish", HttpMethod::Put)
                    .collection("search", MethodSet::GET | MethodSet::POST),
            )?;
            assert_eq!(routes.len(), 10);
            assert_eq!(routes[0].index(), 0);
            Ok(())
        })
        .expect("routes should prepare");

    let (index, params) = dispatch(&router, "PUT", "/posts/4/publish").expect("member route");
    assert_eq!(index, 0);
    assert_eq!(params.get("action").map(String::as_str), Some("publish"));
    assert_eq!(params.get("id").map(String::as_str), Some("4"));

    let (index, params) = dispatch(&router, "GET", "/posts/search").expect("collection route");
    assert_eq!(index, 1);
    assert_eq!(params.get("action").map(String::as_str), Some("search"));
    assert_eq!(action_of(&router, "POST", "/posts/search").as_deref(), Some("search"));
    assert_eq!(action_of(&router, "GET", "/posts/4/publish"), None);

    assert_eq!(url(&router, "publish_post", &[("id", "4")]), "/posts/4/publish");
    assert_eq!(url(&router, "search_posts", &[]), "/posts/search");
}

#[test]
fn resources_when_custom_keys_given_then_member_paths_use_them() {
    let router = Router::default();
    router
        .prepare(|r| {
            r.resources_with(
                "archives",
                ResourceOptions::new().keys(["year", "month"]),
                |archive| {
                    archive.resources("entries", ResourceOptions::new())?;
                    Ok(())
                },
            )?;
            Ok(())
        })
        .expect("routes should prepare");

    let (_, params) = dispatch(&router, "GET", "/archives/2024/05").expect("show by keys");
    assert_eq!(params.get("action").map(String::as_str), Some("show"));
    assert_eq!(params.get("year").map(String::as_str), Some("2024"));
    assert_eq!(params.get("month").map(String::as_str), Some("05"));

    assert_eq!(
        url(&router, "archive", &[("year", "2024"), ("month", "05")]),
        "/archives/2024/05"
    );
    assert_eq!(
        url(&router, "archive_entries", &[("year", "2024"), ("month", "05")]),
        "/archives/2024/05/entries"
    );
}

#[test]
fn resources_when_name_prefix_and_controller_given_then_overrides_defaults() {
    let router = Router::default();
    router
        .prepare(|r| {
            r.resources(
                "posts",
                ResourceOptions::new().name_prefix("blog").controller("articles"),
            )?;
            Ok(())
        })
        .expect("routes should prepare");

    let (_, params) = dispatch(&router, "GET", "/posts").expect("index");
    assert_eq!(params.get("controller").map(String::as_str), Some("articles"));
    assert_eq!(url(&router, "blog_posts", &[]), "/posts");
    assert_eq!(url(&router, "blog_post", &[("id", "1")]), "/posts/1");
}

#[test]
fn resource_when_singular_then_declares_six_routes_without_id() {
    let router = Router::default();
    router
        .prepare(|r| {
            let routes = r.resource("profile", ResourceOptions::new())?;
            assert_eq!(routes.len(), 6);
            Ok(())
        })
        .expect("routes should prepare");

    assert_eq!(action_of(&router, "GET", "/profile").as_deref(), Some("show"));
    assert_eq!(action_of(&router, "GET", "/profile/new").as_deref(), Some("new"));
    assert_eq!(action_of(&router, "POST", "/profile").as_deref(), Some("create"));
    assert_eq!(action_of(&router, "GET", "/profile/edit").as_deref(), Some("edit"));
    assert_eq!(action_of(&router, "PUT", "/profile").as_deref(), Some("update"));
    assert_eq!(action_of(&router, "DELETE", "/profile").as_deref(), Some("destroy"));

    assert_eq!(url(&router, "profile", &[]), "/profile");
    assert_eq!(url(&router, "new_profile", &[]), "/profile/new");
    assert_eq!(url(&router, "edit_profile", &[]), "/profile/edit");
    assert_eq!(action_of(&router, "GET", "/profile/delete"), None);
    match router
        .generate("delete_profile", &RouteParams::new(), &RouteParams::new())
        .expect_err("singular resources have no delete route")
    {
        RouterError::NamedRouteNotFound { name } => assert_eq!(name, "delete_profile"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn resource_when_nesting_plural_resources_then_names_use_singular_parent() {
    let router = Router::default();
    router
        .prepare(|r| {
            r.resource_with("account", ResourceOptions::new(), |account| {
                account.resources("invoices", ResourceOptions::new())?;
                Ok(())
            })?;
            Ok(())
        })
        .expect("routes should prepare");

    let (_, params) = dispatch(&router, "GET", "/account/invoices/9").expect("nested show");
    assert_eq!(params.get("controller").map(String::as_str), Some("invoices"));
    assert_eq!(params.get("id").map(String::as_str), Some("9"));
    assert_eq!(url(&router, "account_invoice", &[("id", "9")]), "/account/invoices/9");
}

#[test]
fn resources_when_keys_empty_then_returns_configuration_error() {
    let router = Router::default();

    let err = router.prepare(|r| {
        r.resources("posts", ResourceOptions::new().keys(Vec::<String>::new()))?;
        Ok(())
    });

    match err.expect_err("expected empty keys error") {
        RouterError::Behavior(BehaviorError::EmptyResourceKeys { resource }) => {
            assert_eq!(resource, "posts");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn resources_when_member_has_no_methods_then_returns_configuration_error() {
    let router = Router::default();

    let err = router.prepare(|r| {
        r.resources("posts", ResourceOptions::new().member("publish", MethodSet::empty()))?;
        Ok(())
    });

    match err.expect_err("expected empty methods error") {
        RouterError::Behavior(BehaviorError::EmptyActionMethods { action, .. }) => {
            assert_eq!(action, "publish");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn resources_when_action_repeated_then_returns_configuration_error() {
    let router = Router::default();

    let err = router.prepare(|r| {
        r.resources(
            "posts",
            ResourceOptions::new()
                .collection("search", HttpMethod::Get)
                .collection("search", HttpMethod::Post),
        )?;
        Ok(())
    });

    match err.expect_err("expected duplicate action error") {
        RouterError::Behavior(BehaviorError::DuplicateResourceAction { kind, action, .. }) => {
            assert_eq!(kind, "collection");
            assert_eq!(action, "search");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn resource_when_collection_given_then_rejects_option() {
    let router = Router::default();

    let err = router.prepare(|r| {
        r.resource("profile", ResourceOptions::new().collection("list", HttpMethod::Get))?;
        Ok(())
    });

    match err.expect_err("expected unsupported option error") {
        RouterError::Behavior(BehaviorError::UnsupportedResourceOption { option, .. }) => {
            assert_eq!(option, "collection");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn resources_when_declared_twice_then_route_names_collide() {
    let router = Router::default();

    let err = router.prepare(|r| {
        r.resources("posts", ResourceOptions::new())?;
        r.resources("posts", ResourceOptions::new())?;
        Ok(())
    });

    match err.expect_err("expected duplicate name error") {
        RouterError::Behavior(BehaviorError::DuplicateRouteName { name }) => {
            assert_eq!(name, "posts");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
