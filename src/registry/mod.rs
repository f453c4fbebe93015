mod stats;
mod store;

pub use stats::RegistryMetrics;
pub(crate) use store::{NamedTarget, RegistryParts, RouteRegistry};
