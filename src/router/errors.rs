use thiserror::Error;

use super::RouterOptionsError;
use crate::behavior::BehaviorError;
use crate::pattern::PatternError;
use crate::route::GenerateError;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("router has no compiled route table; call prepare first")]
    NotCompiled,
    #[error("named route '{name}' not found")]
    NamedRouteNotFound { name: String },
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Behavior(#[from] BehaviorError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Options(#[from] RouterOptionsError),
}

pub type RouterResult<T> = Result<T, RouterError>;
