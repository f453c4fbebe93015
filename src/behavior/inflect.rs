const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "fish",
    "information",
    "media",
    "metadata",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("teeth", "tooth"),
    ("feet", "foot"),
    ("statuses", "status"),
];

/// Singular form of an English resource name (`posts` -> `post`).
pub fn singularize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    if UNCOUNTABLE.iter().any(|w| lower.ends_with(w)) {
        return word.to_string();
    }

    for (plural, singular) in IRREGULAR {
        if lower.ends_with(plural) {
            let stem = &word[..word.len() - plural.len()];
            return format!("{stem}{singular}");
        }
    }

    let strip = |suffix_len: usize, replacement: &str| {
        format!("{}{}", &word[..word.len() - suffix_len], replacement)
    };

    if lower.ends_with("ies") && lower.len() > 3 {
        strip(3, "y")
    } else if ["sses", "shes", "ches", "xes", "zzes"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        strip(2, "")
    } else if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        word.to_string()
    } else if lower.ends_with('s') && lower.len() > 1 {
        strip(1, "")
    } else {
        word.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::singularize;

    #[test]
    fn singularize_when_regular_plural_then_drops_suffix() {
        assert_eq!(singularize("posts"), "post");
        assert_eq!(singularize("comments"), "comment");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("addresses"), "address");
        assert_eq!(singularize("archives"), "archive");
    }

    #[test]
    fn singularize_when_irregular_or_uncountable_then_uses_tables() {
        assert_eq!(singularize("people"), "person");
        assert_eq!(singularize("sales_people"), "sales_person");
        assert_eq!(singularize("statuses"), "status");
        assert_eq!(singularize("news"), "news");
        assert_eq!(singularize("status"), "status");
    }
}
