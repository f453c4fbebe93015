use crate::condition::ConditionKey;

use super::lexer::ident_len;
use super::{PatternError, PatternResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    Capture { condition: ConditionKey, group: usize },
}

/// An output param value compiled against a route's placeholders.
///
/// `:name` reads a placeholder, `:cond[N]` reads capture `N` of condition
/// `cond` and a bare `[N]` reads capture `N` of the path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamTemplate {
    parts: Vec<TemplatePart>,
}

fn bracket_index(bytes: &[u8], at: usize) -> Option<(usize, usize)> {
    if bytes.get(at) != Some(&b'[') {
        return None;
    }
    let digits = bytes[at + 1..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 || bytes.get(at + 1 + digits) != Some(&b']') {
        return None;
    }
    let index = std::str::from_utf8(&bytes[at + 1..at + 1 + digits])
        .ok()?
        .parse()
        .ok()?;
    Some((index, at + digits + 2))
}

impl ParamTemplate {
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            parts: vec![TemplatePart::Literal(value.into())],
        }
    }

    /// Compiles `value`; `placeholder` resolves `:name` and `captures`
    /// reports how many groups a condition of the route has.
    pub fn parse<P, C>(param: &str, value: &str, placeholder: P, captures: C) -> PatternResult<Self>
    where
        P: Fn(&str) -> Option<(ConditionKey, usize)>,
        C: Fn(&ConditionKey) -> Option<usize>,
    {
        let bytes = value.as_bytes();
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut i = 0usize;

        let check = |condition: ConditionKey, group: usize| -> PatternResult<TemplatePart> {
            let available = captures(&condition).ok_or_else(|| PatternError::UnknownCondition {
                param: param.to_string(),
                condition: condition.to_string(),
            })?;
            if group > available {
                return Err(PatternError::CaptureOutOfRange {
                    param: param.to_string(),
                    condition: condition.to_string(),
                    index: group,
                    available,
                });
            }
            Ok(TemplatePart::Capture { condition, group })
        };

        while i < bytes.len() {
            let mut capture = None;

            if bytes[i] == b':' {
                let len = ident_len(bytes, i + 1);
                if len > 0 {
                    let name = &value[i + 1..i + 1 + len];
                    let after = i + 1 + len;
                    if let Some((group, end)) = bracket_index(bytes, after) {
                        capture = Some((check(ConditionKey::from(name), group)?, end));
                    } else {
                        let (condition, group) = placeholder(name).ok_or_else(|| {
                            PatternError::UnknownPlaceholder {
                                param: param.to_string(),
                                name: name.to_string(),
                            }
                        })?;
                        capture = Some((TemplatePart::Capture { condition, group }, after));
                    }
                }
            } else if let Some((group, end)) = bracket_index(bytes, i) {
                capture = Some((check(ConditionKey::Path, group)?, end));
            }

            match capture {
                Some((part, end)) => {
                    if !literal.is_empty() {
                        parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
                    }
                    parts.push(part);
                    i = end;
                }
                None => {
                    let ch = value[i..].chars().next().unwrap_or_default();
                    literal.push(ch);
                    i += ch.len_utf8().max(1);
                }
            }
        }

        if !literal.is_empty() || parts.is_empty() {
            parts.push(TemplatePart::Literal(literal));
        }

        Ok(Self { parts })
    }

    pub fn parts(&self) -> &[TemplatePart] {
        &self.parts
    }

    /// The single capture this template consists of, if any.
    pub fn as_capture(&self) -> Option<(&ConditionKey, usize)> {
        match self.parts.as_slice() {
            [TemplatePart::Capture { condition, group }] => Some((condition, *group)),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self.parts.as_slice() {
            [TemplatePart::Literal(value)] => Some(value),
            _ => None,
        }
    }

    /// Renders against match captures.
    ///
    /// A template that is a single capture yields `None` when the group did
    /// not participate; captures inside mixed templates render as empty text.
    pub fn render<'c, F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&ConditionKey, usize) -> Option<&'c str>,
    {
        if let Some((condition, group)) = self.as_capture() {
            return lookup(condition, group).map(str::to_string);
        }

        let mut out = String::new();
        for part in &self.parts {
            match part {
                TemplatePart::Literal(value) => out.push_str(value),
                TemplatePart::Capture { condition, group } => {
                    out.push_str(lookup(condition, *group).unwrap_or_default());
                }
            }
        }
        Some(out)
    }
}
