use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pattern::{DEFAULT_PLACEHOLDER_PATTERN, count_captures};

pub const DEFAULT_ACTION: &str = "index";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouterOptions {
    /// Action used by the root behavior and by default routes whose
    /// `:action` group did not participate.
    pub default_action: String,
    /// Character class every `:name` placeholder is rewritten into.
    pub placeholder_pattern: String,
    pub case_insensitive_method: bool,
    /// Logs every compiled route at debug level.
    pub debug: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            default_action: DEFAULT_ACTION.to_string(),
            placeholder_pattern: DEFAULT_PLACEHOLDER_PATTERN.to_string(),
            case_insensitive_method: true,
            debug: false,
        }
    }
}

impl RouterOptions {
    pub fn builder() -> RouterOptionsBuilder {
        RouterOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), RouterOptionsError> {
        if self.default_action.trim().is_empty() {
            return Err(RouterOptionsError::EmptyDefaultAction);
        }
        if let Err(err) = Regex::new(&self.placeholder_pattern) {
            return Err(RouterOptionsError::InvalidPlaceholderPattern {
                pattern: self.placeholder_pattern.clone(),
                message: err.to_string(),
            });
        }
        let groups = count_captures(&self.placeholder_pattern);
        if groups > 0 {
            return Err(RouterOptionsError::CapturingPlaceholderPattern {
                pattern: self.placeholder_pattern.clone(),
                groups,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct RouterOptionsBuilder {
    options: RouterOptions,
}

impl RouterOptionsBuilder {
    pub fn default_action<S: Into<String>>(mut self, action: S) -> Self {
        self.options.default_action = action.into();
        self
    }

    pub fn placeholder_pattern<S: Into<String>>(mut self, pattern: S) -> Self {
        self.options.placeholder_pattern = pattern.into();
        self
    }

    pub fn case_insensitive_method(mut self, value: bool) -> Self {
        self.options.case_insensitive_method = value;
        self
    }

    pub fn debug(mut self, value: bool) -> Self {
        self.options.debug = value;
        self
    }

    pub fn build(self) -> Result<RouterOptions, RouterOptionsError> {
        let options = self.options;
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterOptionsError {
    #[error("default_action must not be empty")]
    EmptyDefaultAction,
    #[error("placeholder pattern '{pattern}' is not a valid regex: {message}")]
    InvalidPlaceholderPattern { pattern: String, message: String },
    #[error("placeholder pattern '{pattern}' must not contain capturing groups (found {groups})")]
    CapturingPlaceholderPattern { pattern: String, groups: usize },
}
