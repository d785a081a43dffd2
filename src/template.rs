//! Placeholder substitution
//!
//! Templates reference properties as `{name}` or, for nested values,
//! `{name.field}`. Anything that does not look like a property name (e.g. a
//! CSS block `{ color: red }`) is left untouched.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z0-9_]+)*)\}").expect("valid placeholder regex")
});

/// Replace every `{name}` in `template` with `lookup(name)`.
///
/// Names the lookup does not know are replaced with an empty string.
pub fn populate_tags<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<Value>,
{
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            lookup(&caps[1]).map(|v| value_to_text(&v)).unwrap_or_default()
        })
        .into_owned()
}

/// Placeholder names in order of first appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_RE.captures_iter(template) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Text form of a property value inside markup.
///
/// Strings verbatim, numbers in decimal, `true` as `1`; `false`, null and
/// composite values render empty.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, Value)]) -> impl Fn(&str) -> Option<Value> {
        let map: HashMap<String, Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_populate_known_tags() {
        let out = populate_tags(
            r#"<a href="{target}" class="{class}">{label}</a>"#,
            lookup(&[
                ("target", json!("/foo")),
                ("class", json!("btn")),
                ("label", json!("Go")),
            ]),
        );
        assert_eq!(out, r#"<a href="/foo" class="btn">Go</a>"#);
    }

    #[test]
    fn test_unknown_tags_render_empty() {
        let out = populate_tags("[{label}|{nope}]", lookup(&[("label", json!("x"))]));
        assert_eq!(out, "[x|]");
    }

    #[test]
    fn test_non_placeholder_braces_untouched() {
        let out = populate_tags("<style>a { color: red }</style>{x}", lookup(&[("x", json!(7))]));
        assert_eq!(out, "<style>a { color: red }</style>7");
    }

    #[test]
    fn test_dotted_tags_are_passed_whole() {
        let out = populate_tags(
            "{targetPage.title}",
            lookup(&[("targetPage.title", json!("Team"))]),
        );
        assert_eq!(out, "Team");
    }

    #[test]
    fn test_repeated_tags() {
        let out = populate_tags("{a}-{a}", lookup(&[("a", json!("z"))]));
        assert_eq!(out, "z-z");
    }

    #[test]
    fn test_placeholders_unique_in_order() {
        assert_eq!(
            placeholders("{label} {target} {label} {targetPage.title}"),
            vec!["label", "target", "targetPage.title"]
        );
    }

    #[test]
    fn test_value_to_text() {
        assert_eq!(value_to_text(&json!("s")), "s");
        assert_eq!(value_to_text(&json!(42)), "42");
        assert_eq!(value_to_text(&json!(1.5)), "1.5");
        assert_eq!(value_to_text(&json!(true)), "1");
        assert_eq!(value_to_text(&json!(false)), "");
        assert_eq!(value_to_text(&Value::Null), "");
        assert_eq!(value_to_text(&json!(["a"])), "");
    }
}
