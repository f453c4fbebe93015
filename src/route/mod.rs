mod compile;
mod error;
mod generate;
mod query;
mod route;

pub use compile::RouteMatcher;
pub use error::{GenerateError, GenerateResult};
pub use generate::GenerateArgs;
pub use query::params_to_query_string;
pub(crate) use query::{append_query, encode_path_segment};
pub use route::{CompiledCondition, DeferredBlock, Route};

pub(crate) use route::RouteDraft;
