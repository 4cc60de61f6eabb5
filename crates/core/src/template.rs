//! Document template interpolation for compliance exports.
//!
//! Templates carry `{placeholder}` tokens (for example `{vendor.name}`)
//! that are replaced with values from a JSON object. Rendering never
//! fails on unknown placeholders: they are kept verbatim and reported so
//! the caller can decide whether the export is complete.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Regex pattern matching `{placeholder}` tokens in document templates.
pub const PLACEHOLDER_PATTERN: &str = r"\{([a-zA-Z_][a-zA-Z0-9_.]*)\}";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Output of [`render_template`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTemplate {
    pub text: String,
    /// Placeholders with no value, sorted and de-duplicated.
    pub missing: Vec<String>,
}

impl RenderedTemplate {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Reject empty templates and unbalanced braces.
pub fn validate_template(template: &str) -> Result<(), CoreError> {
    if template.trim().is_empty() {
        return Err(CoreError::Validation(
            "Template must not be empty".to_string(),
        ));
    }

    let mut depth = 0usize;
    for (offset, ch) in template.char_indices() {
        match ch {
            '{' => {
                if depth > 0 {
                    return Err(CoreError::Validation(format!(
                        "Nested '{{' at byte {offset}"
                    )));
                }
                depth += 1;
            }
            '}' => {
                if depth == 0 {
                    return Err(CoreError::Validation(format!(
                        "Unmatched '}}' at byte {offset}"
                    )));
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Err(CoreError::Validation("Unclosed '{' in template".to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Placeholders
// ---------------------------------------------------------------------------

/// Extract all placeholder names (without braces), sorted and de-duplicated.
pub fn extract_placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER_RE
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Substitute every placeholder with its value from `values`.
///
/// Dotted names are first looked up as a flat key, then as a path into
/// nested objects (`{vendor.name}` -> `values["vendor"]["name"]`).
/// Strings are inserted verbatim, `null` as the empty string, and any
/// other value as its JSON text.
pub fn render_template(template: &str, values: &Map<String, Value>) -> RenderedTemplate {
    let mut missing = BTreeSet::new();

    let text = PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            match lookup(values, name) {
                Some(value) => value_to_text(value),
                None => {
                    missing.insert(name.to_string());
                    caps[0].to_string()
                }
            }
        })
        .into_owned();

    RenderedTemplate {
        text,
        missing: missing.into_iter().collect(),
    }
}

fn lookup<'a>(values: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    if let Some(value) = values.get(name) {
        return Some(value);
    }
    let mut segments = name.split('.');
    let mut current = values.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
