//! Compliance audits (`/audits`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use grc_core::error::CoreError;
use grc_core::form::{FormValues, RuleSet, ValidationRule};
use grc_core::types::{DbId, Timestamp};

use super::{check_form, choice, optional_date, text, Resource};

/// Lifecycle of an audit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl AuditStatus {
    /// Planned or in-progress audits count as open on the dashboard.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Planned | Self::InProgress)
    }
}

/// An audit as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Audit {
    pub id: DbId,
    pub title: String,
    /// Control framework audited against, e.g. `SOC 2` or `ISO 27001`.
    pub framework: String,
    pub status: AuditStatus,
    pub owner: String,
    pub due_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create/update payload for an audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditDraft {
    pub title: String,
    pub framework: String,
    pub status: AuditStatus,
    pub owner: String,
    pub due_date: Option<NaiveDate>,
}

impl Resource for Audit {
    const ENTITY: &'static str = "Audit";
    const ENDPOINT: &'static str = "/audits";
    type Draft = AuditDraft;

    fn id(&self) -> DbId {
        self.id
    }
}

impl AuditDraft {
    /// Rules for the audit create/edit form.
    pub fn form_rules() -> RuleSet {
        let mut rules = RuleSet::new();
        rules.insert(
            "title".into(),
            ValidationRule::new().required().min_length(3).max_length(200),
        );
        rules.insert(
            "framework".into(),
            ValidationRule::new().required().max_length(100),
        );
        rules.insert(
            "owner".into(),
            ValidationRule::new().required().max_length(100),
        );
        rules
    }

    /// Build a draft from submitted form values.
    pub fn from_form(values: &FormValues) -> Result<Self, CoreError> {
        check_form(values, &Self::form_rules())?;
        Ok(Self {
            title: text(values, "title"),
            framework: text(values, "framework"),
            status: choice(values, "status", AuditStatus::default())?,
            owner: text(values, "owner"),
            due_date: optional_date(values, "due_date")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn deserializes_api_payload() {
        let audit: Audit = serde_json::from_value(json!({
            "id": 3,
            "title": "Annual SOC 2",
            "framework": "SOC 2",
            "status": "in_progress",
            "owner": "Dana",
            "due_date": "2026-11-30",
            "created_at": "2026-01-05T10:00:00Z",
            "updated_at": "2026-02-01T08:30:00Z"
        }))
        .unwrap();
        assert_eq!(audit.id(), 3);
        assert!(audit.status.is_open());
        assert_eq!(audit.due_date, NaiveDate::from_ymd_opt(2026, 11, 30));
    }

    #[test]
    fn closed_statuses_are_not_open() {
        assert!(!AuditStatus::Completed.is_open());
        assert!(!AuditStatus::Cancelled.is_open());
    }

    #[test]
    fn from_form_builds_draft() {
        let values: FormValues = [
            ("title", " Q4 access review "),
            ("framework", "ISO 27001"),
            ("owner", "Sam"),
            ("status", "completed"),
            ("due_date", ""),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let draft = AuditDraft::from_form(&values).unwrap();
        assert_eq!(draft.title, "Q4 access review");
        assert_eq!(draft.status, AuditStatus::Completed);
        assert_eq!(draft.due_date, None);
    }

    #[test]
    fn from_form_reports_every_failing_field() {
        let err = AuditDraft::from_form(&FormValues::new()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("title: This field is required"));
        assert!(msg.contains("framework: This field is required"));
        assert!(msg.contains("owner: This field is required"));
    }
}
