//! Validation rule types.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

/// Message for an empty required field.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Message for a value that does not match the rule's pattern.
pub const INVALID_FORMAT_MESSAGE: &str = "Invalid format";

/// Pattern used by [`ValidationRule::email`].
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Compiled e-mail regex shared by every e-mail rule.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Field-specific check run last. Returns an error message or `None`.
pub type CustomValidator = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Field name -> rule.
pub type RuleSet = BTreeMap<String, ValidationRule>;

/// Field name -> current raw value.
pub type FormValues = BTreeMap<String, String>;

/// Field name -> error message, one entry per validated field.
pub type ErrorMap = BTreeMap<String, Option<String>>;

/// Constraints for a single field. Every constraint is optional.
#[derive(Clone, Default)]
pub struct ValidationRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub custom: Option<CustomValidator>,
}

impl ValidationRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule matching [`EMAIL_PATTERN`].
    pub fn email() -> Self {
        Self::new().pattern(EMAIL_RE.clone())
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Minimum length in characters.
    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    /// Maximum length in characters.
    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(check));
        self
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_constraints() {
        let rule = ValidationRule::new().required().min_length(3).max_length(10);
        assert!(rule.required);
        assert_eq!(rule.min_length, Some(3));
        assert_eq!(rule.max_length, Some(10));
        assert!(rule.pattern.is_none());
        assert!(rule.custom.is_none());
    }

    #[test]
    fn email_pattern_compiles_and_matches() {
        let rule = ValidationRule::email();
        let re = rule.pattern.as_ref().unwrap();
        assert!(re.is_match("auditor@example.com"));
        assert!(!re.is_match("auditor@example"));
        assert!(!re.is_match("two words@example.com"));
    }

    #[test]
    fn debug_hides_closure() {
        let rule = ValidationRule::new().custom(|_| None);
        let rendered = format!("{rule:?}");
        assert!(rendered.contains("custom: true"));
    }
}
