//! REST-backed GRC resources.
//!
//! Every resource is described once through [`Resource`]; the generic
//! [`ResourceStore`](crate::store::ResourceStore) handles all of them.
//! Drafts expose the form rule set used by their create/edit forms and a
//! conversion from validated form values.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use grc_core::error::CoreError;
use grc_core::form::{validate_form, FormValues, RuleSet};
use grc_core::types::DbId;

pub mod audit;
pub mod policy;
pub mod vendor;

pub use audit::{Audit, AuditDraft, AuditStatus};
pub use policy::{Policy, PolicyDraft, PolicyStatus};
pub use vendor::{Vendor, VendorDraft, VendorRisk};

/// Date format used by date inputs and the API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A GRC entity served under a REST collection endpoint.
pub trait Resource: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Human-readable entity name used in errors and logs.
    const ENTITY: &'static str;

    /// Collection path relative to the API root, e.g. `/audits`.
    const ENDPOINT: &'static str;

    /// Create/update payload.
    type Draft: Serialize + Send + Sync;

    fn id(&self) -> DbId;

    /// Path of a single item.
    fn item_path(id: DbId) -> String {
        format!("{}/{id}", Self::ENDPOINT)
    }
}

// ---------------------------------------------------------------------------
// Form helpers shared by the drafts
// ---------------------------------------------------------------------------

/// Validate `values` against `rules`, folding all field errors into one
/// [`CoreError::Validation`].
pub(crate) fn check_form(values: &FormValues, rules: &RuleSet) -> Result<(), CoreError> {
    let failures: Vec<String> = validate_form(values, rules)
        .into_iter()
        .filter_map(|(field, error)| error.map(|message| format!("{field}: {message}")))
        .collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(failures.join("; ")))
    }
}

pub(crate) fn text(values: &FormValues, field: &str) -> String {
    values
        .get(field)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

pub(crate) fn optional_text(values: &FormValues, field: &str) -> Option<String> {
    Some(text(values, field)).filter(|v| !v.is_empty())
}

/// Parse a snake_case choice (e.g. `in_progress`) into a serde enum.
/// An empty value yields `default`.
pub(crate) fn choice<T>(values: &FormValues, field: &str, default: T) -> Result<T, CoreError>
where
    T: DeserializeOwned,
{
    let raw = text(values, field);
    if raw.is_empty() {
        return Ok(default);
    }
    serde_json::from_value(Value::String(raw.clone()))
        .map_err(|_| CoreError::Validation(format!("{field}: unknown option '{raw}'")))
}

pub(crate) fn optional_date(
    values: &FormValues,
    field: &str,
) -> Result<Option<NaiveDate>, CoreError> {
    let Some(raw) = optional_text(values, field) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(&raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| CoreError::Validation(format!("{field}: expected YYYY-MM-DD, got '{raw}'")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn item_path_appends_id() {
        assert_eq!(Audit::item_path(7), "/audits/7");
        assert_eq!(Vendor::item_path(12), "/vendors/12");
    }

    #[test]
    fn choice_parses_snake_case_and_defaults() {
        let values = form(&[("status", "in_progress"), ("blank", " ")]);
        assert_eq!(
            choice(&values, "status", AuditStatus::Planned).unwrap(),
            AuditStatus::InProgress
        );
        assert_eq!(
            choice(&values, "blank", AuditStatus::Planned).unwrap(),
            AuditStatus::Planned
        );
        assert_matches!(
            choice(&form(&[("status", "paused")]), "status", AuditStatus::Planned),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn optional_date_parses_iso_dates() {
        let values = form(&[("due", "2026-12-31"), ("bad", "31/12/2026")]);
        assert_eq!(
            optional_date(&values, "due").unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 31)
        );
        assert_eq!(optional_date(&values, "missing").unwrap(), None);
        assert!(optional_date(&values, "bad").is_err());
    }
}
