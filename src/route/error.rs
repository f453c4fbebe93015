use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("route {route} has a regex condition and can not be generated")]
    RegexpRoute { route: String },
    #[error("route {route} has no path to generate from")]
    NoPathSegments { route: String },
    #[error("route {route} needs a value for '{param}'")]
    MissingParameter { route: String, param: String },
    #[error("route {route} contains an anonymous segment that can not be generated")]
    UnsupportedSegment { route: String },
    #[error("no route is consistent with the given params and no default route is declared")]
    NoDefaultRoute,
    #[error("controller not specified")]
    ControllerNotSpecified,
    #[error("action not specified for controller '{controller}'")]
    ActionNotSpecified { controller: String },
}

pub type GenerateResult<T> = Result<T, GenerateError>;
