//! Path templates
//!
//! Detail endpoints embed context values in their path, e.g.
//! `/salesorders/{salesorder_id}`. Values come from the stream context and
//! are percent-encoded as single path segments.

use crate::error::{Error, Result};
use crate::types::{value_to_string, Context};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use url::Url;

/// Regex for matching placeholders: {name}
static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\s*([a-zA-Z_][a-zA-Z0-9_]*)\s*\}").expect("placeholder regex is valid")
});

/// Render a path template with values from `ctx`
pub fn render(template: &str, ctx: &Context) -> Result<String> {
    let mut missing = Vec::new();

    let rendered = PLACEHOLDER_REGEX.replace_all(template, |cap: &Captures<'_>| {
        let name = &cap[1];
        if let Some(value) = ctx.get(name).and_then(value_to_string) {
            encode_segment(&value)
        } else {
            missing.push(name.to_string());
            String::new()
        }
    });

    if missing.is_empty() {
        Ok(rendered.into_owned())
    } else {
        Err(Error::undefined_var(missing.join(", ")))
    }
}

/// Base URL whose path is replaced when encoding a segment
static SEGMENT_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://localhost/").expect("segment base URL is valid"));

/// Percent-encode `value` so it stays one path segment
fn encode_segment(value: &str) -> String {
    let mut url = SEGMENT_BASE.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(value);
    }
    url.path().trim_start_matches('/').to_string()
}

/// All placeholder names in a template
pub fn extract_variables(template: &str) -> Vec<String> {
    PLACEHOLDER_REGEX
        .captures_iter(template)
        .map(|cap| cap[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx(pairs: &[(&str, serde_json::Value)]) -> Context {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_simple_substitution() {
        let c = ctx(&[("salesorder_id", json!("460000000039129"))]);
        assert_eq!(
            render("/salesorders/{salesorder_id}", &c).unwrap(),
            "/salesorders/460000000039129"
        );
    }

    #[test]
    fn test_number_substitution() {
        let c = ctx(&[("journal_id", json!(42))]);
        let path = render("/journals/{journal_id}", &c).unwrap();
        assert_eq!(path, "/journals/42");
    }

    #[test]
    fn test_undefined_variable() {
        let c = ctx(&[("organization_id", json!("1"))]);
        let err = render("/purchaseorders/{purchaseorder_id}", &c).unwrap_err();
        assert!(matches!(err, Error::UndefinedVariable { .. }));
        assert_eq!(
            err.to_string(),
            "Undefined variable in template: purchaseorder_id"
        );
    }

    #[test]
    fn test_values_are_encoded_as_one_segment() {
        let c = ctx(&[("salesorder_id", json!("a/b c?d#e"))]);
        let path = render("/salesorders/{salesorder_id}", &c).unwrap();
        assert_eq!(path, "/salesorders/a%2Fb%20c%3Fd%23e");
    }

    #[test]
    fn test_no_placeholders() {
        assert_eq!(render("/invoices", &Context::new()).unwrap(), "/invoices");
        assert!(extract_variables("/invoices").is_empty());
    }

    #[test]
    fn test_extract_variables() {
        assert_eq!(
            extract_variables("/a/{first}/b/{ second }"),
            vec!["first".to_string(), "second".to_string()]
        );
    }
}
