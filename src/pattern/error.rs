use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("condition '{condition}' has an invalid regex '{source_text}': {message}")]
    InvalidRegex {
        condition: String,
        source_text: String,
        message: String,
    },
    #[error("param '{param}' references unknown placeholder ':{name}'")]
    UnknownPlaceholder { param: String, name: String },
    #[error("param '{param}' references condition '{condition}', which the route does not have")]
    UnknownCondition { param: String, condition: String },
    #[error(
        "param '{param}' references capture {index} of condition '{condition}', which only has {available}"
    )]
    CaptureOutOfRange {
        param: String,
        condition: String,
        index: usize,
        available: usize,
    },
}

pub type PatternResult<T> = Result<T, PatternError>;
