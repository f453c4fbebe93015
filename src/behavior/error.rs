use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BehaviorError {
    #[error("route name '{name}' is already taken")]
    DuplicateRouteName { name: String },
    #[error("route name must not be empty")]
    EmptyRouteName,
    #[error("namespace name must not be empty")]
    EmptyNamespace,
    #[error("resource name '{name}' must be a non-empty word")]
    InvalidResourceName { name: String },
    #[error("resource '{resource}' was given an empty key list")]
    EmptyResourceKeys { resource: String },
    #[error("resource '{resource}' declares invalid {kind} action '{action}'")]
    InvalidResourceAction {
        resource: String,
        kind: &'static str,
        action: String,
    },
    #[error("resource '{resource}' declares {kind} action '{action}' without methods")]
    EmptyActionMethods {
        resource: String,
        kind: &'static str,
        action: String,
    },
    #[error("resource '{resource}' declares {kind} action '{action}' more than once")]
    DuplicateResourceAction {
        resource: String,
        kind: &'static str,
        action: String,
    },
    #[error("singular resource '{resource}' does not support the '{option}' option")]
    UnsupportedResourceOption {
        resource: String,
        option: &'static str,
    },
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
