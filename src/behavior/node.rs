use std::collections::BTreeMap;

use hashbrown::HashMap as FastHashMap;

use crate::condition::{Condition, ConditionKey, Conditions};
use crate::pattern::deduce_placeholders;
use crate::router::RouterOptions;

/// Handle of a behavior inside the registry arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BehaviorId(pub(crate) usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NamespaceScope {
    pub name: String,
    /// Set once a resource has added `/<name>` to the path.
    pub path_applied: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct BehaviorNode {
    pub parent: Option<BehaviorId>,
    /// Regex sources with placeholders already rewritten into groups.
    pub conditions: BTreeMap<ConditionKey, String>,
    /// Anchored, unescaped and unrewritten sources kept for generation.
    pub original_conditions: BTreeMap<ConditionKey, String>,
    pub params: BTreeMap<String, String>,
    /// Captures introduced by this node's own conditions only.
    pub placeholders: FastHashMap<String, (ConditionKey, usize)>,
    pub conditions_have_regexp: bool,
    pub namespace: Option<NamespaceScope>,
    pub resource_parents: Option<Vec<String>>,
}

impl BehaviorNode {
    pub fn new(
        parent: Option<BehaviorId>,
        conditions: Conditions,
        params: BTreeMap<String, String>,
        options: &RouterOptions,
    ) -> Self {
        let mut conditions = conditions;
        if conditions
            .get(&ConditionKey::Path)
            .is_some_and(|path| path.is_empty_path())
        {
            conditions.remove(&ConditionKey::Path);
        }

        let mut node = BehaviorNode {
            parent,
            conditions: BTreeMap::new(),
            original_conditions: BTreeMap::new(),
            params,
            placeholders: FastHashMap::new(),
            conditions_have_regexp: false,
            namespace: None,
            resource_parents: None,
        };

        for (key, condition) in conditions.into_entries() {
            let condition = if key == ConditionKey::Method && options.case_insensitive_method {
                fold_method_case(condition)
            } else {
                condition
            };
            node.conditions_have_regexp |= condition.is_regex();
            let rewritten =
                deduce_placeholders(&condition.to_source(), &options.placeholder_pattern);

            for placeholder in rewritten.placeholders {
                let Some(name) = placeholder.name else {
                    continue;
                };
                node.params
                    .entry(name.clone())
                    .or_insert_with(|| format!(":{name}"));
                node.placeholders
                    .insert(name, (key.clone(), placeholder.capture));
            }

            node.original_conditions
                .insert(key.clone(), condition.to_original());
            node.conditions.insert(key, rewritten.source);
        }

        node
    }
}

/// Requests are lowercased before method conditions run, so literals are
/// lowercased and regexes made case-insensitive.
fn fold_method_case(condition: Condition) -> Condition {
    match condition {
        Condition::Literal(value) => Condition::Literal(value.to_ascii_lowercase()),
        Condition::Regex(source) if !source.starts_with("(?i)") => {
            Condition::Regex(format!("(?i){source}"))
        }
        regex => regex,
    }
}

/// Joins two path fragments, dropping the `$` and `^` at the seam.
pub(crate) fn concat_without_endcaps(left: Option<&str>, right: Option<&str>) -> Option<String> {
    match (left, right) {
        (None, None) => None,
        (Some(left), None) => Some(left.to_string()),
        (None, Some(right)) => Some(right.to_string()),
        (Some(left), Some(right)) => {
            let left = left.strip_suffix('$').unwrap_or(left);
            let right = right.strip_prefix('^').unwrap_or(right);
            Some(format!("{left}{right}"))
        }
    }
}
