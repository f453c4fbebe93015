pub mod behavior;
pub mod condition;
pub mod enums;
pub mod model;
pub mod pattern;
pub mod readonly;
pub mod registry;
pub mod request;
pub mod route;
pub mod router;
pub mod types;

pub use behavior::{
    Behavior, BehaviorError, BehaviorId, DEFAULT_ROUTE_PATTERN, ParamSpec, ResourceOptions, RouteRef,
    singularize,
};
pub use condition::{Condition, ConditionKey, Conditions};
pub use enums::{HttpMethod, MethodSet};
pub use model::RouteModel;
pub use pattern::{DEFAULT_PLACEHOLDER_PATTERN, ParamTemplate, PatternError, Segment};
pub use readonly::RouterReadOnly;
pub use registry::RegistryMetrics;
pub use request::{RequestParts, RouteRequest};
pub use route::{GenerateArgs, GenerateError, Route, RouteMatcher, params_to_query_string};
pub use router::{
    Router, RouterError, RouterOptions, RouterOptionsBuilder, RouterOptionsError, RouterResult,
};
pub use types::{RouteIndex, RouteMatch, RouteParams, route_params};
