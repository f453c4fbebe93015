mod error;
mod lexer;
mod segment;
mod template;

pub use error::{PatternError, PatternResult};
pub use lexer::{
    DEFAULT_PLACEHOLDER_PATTERN, Placeholder, Rewritten, count_captures, count_parens_up_to,
    deduce_placeholders,
};
pub use segment::{Segment, segments_from_path};
pub use template::{ParamTemplate, TemplatePart};
