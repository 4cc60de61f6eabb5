//! Rule evaluator -- pure logic, no form state.

use super::rules::{
    ErrorMap, FormValues, RuleSet, ValidationRule, INVALID_FORMAT_MESSAGE, REQUIRED_MESSAGE,
};

/// Validate one value against one rule.
///
/// Checks run in a fixed order and the first violation wins:
/// required, emptiness (an empty optional field passes), minimum length,
/// maximum length, pattern, custom. A value consisting only of
/// whitespace counts as empty. Lengths are counted in characters.
pub fn validate_field(value: &str, rule: &ValidationRule) -> Option<String> {
    let is_empty = value.trim().is_empty();

    if rule.required && is_empty {
        return Some(REQUIRED_MESSAGE.to_string());
    }
    if is_empty {
        return None;
    }

    let length = value.chars().count();
    if let Some(min) = rule.min_length {
        if length < min {
            return Some(format!("Minimum {min} characters"));
        }
    }
    if let Some(max) = rule.max_length {
        if length > max {
            return Some(format!("Maximum {max} characters"));
        }
    }

    if let Some(pattern) = &rule.pattern {
        if !pattern.is_match(value) {
            return Some(INVALID_FORMAT_MESSAGE.to_string());
        }
    }

    rule.custom.as_ref().and_then(|check| check(value))
}

/// Validate every field declared in `rules`.
///
/// Keys in `values` without a rule are ignored; declared fields missing
/// from `values` are validated as the empty string. The result holds one
/// entry per rule.
pub fn validate_form(values: &FormValues, rules: &RuleSet) -> ErrorMap {
    rules
        .iter()
        .map(|(field, rule)| {
            let value = values.get(field).map(String::as_str).unwrap_or("");
            (field.clone(), validate_field(value, rule))
        })
        .collect()
}

/// `true` if any field carries an error message.
pub fn has_errors(errors: &ErrorMap) -> bool {
    errors.values().any(Option::is_some)
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::*;

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn required_fails_on_empty() {
        let rule = ValidationRule::new().required();
        assert_eq!(validate_field("", &rule).as_deref(), Some(REQUIRED_MESSAGE));
        assert_eq!(validate_field("   ", &rule).as_deref(), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn required_passes_with_value() {
        let rule = ValidationRule::new().required();
        assert!(validate_field("SOC 2", &rule).is_none());
    }

    #[test]
    fn min_length_fires_instead_of_required() {
        let rule = ValidationRule::new().required().min_length(8);
        assert_eq!(
            validate_field("short", &rule).as_deref(),
            Some("Minimum 8 characters")
        );
    }

    #[test]
    fn empty_optional_field_skips_remaining_rules() {
        let rule = ValidationRule::new()
            .min_length(3)
            .pattern(Regex::new("^x+$").unwrap())
            .custom(|_| Some("never".into()));
        assert!(validate_field("", &rule).is_none());
    }

    #[test]
    fn max_length_fails_over_limit() {
        let rule = ValidationRule::new().max_length(4);
        assert_eq!(
            validate_field("vendor", &rule).as_deref(),
            Some("Maximum 4 characters")
        );
        assert!(validate_field("abcd", &rule).is_none());
    }

    #[test]
    fn lengths_count_characters_not_bytes() {
        let rule = ValidationRule::new().max_length(5);
        assert!(validate_field("ééééé", &rule).is_none());
        assert!(validate_field("éééééé", &rule).is_some());
    }

    #[test]
    fn email_pattern_mismatch_is_invalid_format() {
        let rule = ValidationRule::email();
        assert_eq!(
            validate_field("not-an-email", &rule).as_deref(),
            Some(INVALID_FORMAT_MESSAGE)
        );
        assert!(validate_field("a@b.com", &rule).is_none());
    }

    #[test]
    fn custom_runs_last() {
        let rule = ValidationRule::new()
            .min_length(2)
            .custom(|v| (v == "TBD").then(|| "Owner must be a person".to_string()));
        assert_eq!(
            validate_field("T", &rule).as_deref(),
            Some("Minimum 2 characters")
        );
        assert_eq!(
            validate_field("TBD", &rule).as_deref(),
            Some("Owner must be a person")
        );
        assert!(validate_field("Dana", &rule).is_none());
    }

    #[test]
    fn validate_form_only_covers_declared_fields() {
        let mut rules = RuleSet::new();
        rules.insert("title".into(), ValidationRule::new().required());
        rules.insert("owner".into(), ValidationRule::new().required());

        let errors = validate_form(&values(&[("title", "Q3 audit"), ("notes", "")]), &rules);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors["title"], None);
        assert_eq!(errors["owner"].as_deref(), Some(REQUIRED_MESSAGE));
        assert!(!errors.contains_key("notes"));
        assert!(has_errors(&errors));
    }

    #[test]
    fn has_errors_false_when_all_none() {
        let mut errors = ErrorMap::new();
        errors.insert("a".into(), None);
        errors.insert("b".into(), None);
        assert!(!has_errors(&errors));
        assert!(!has_errors(&ErrorMap::new()));
    }
}
