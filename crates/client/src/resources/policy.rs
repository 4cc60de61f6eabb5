//! Governance policies (`/policies`).

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use grc_core::error::CoreError;
use grc_core::form::{FormValues, RuleSet, ValidationRule};
use grc_core::types::{DbId, Timestamp};

use super::{check_form, choice, optional_date, text, Resource};

/// Semantic-ish policy version such as `1.0` or `2.3.1`.
pub const VERSION_PATTERN: &str = r"^\d+(\.\d+){1,2}$";

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VERSION_PATTERN).expect("valid regex"));

/// Publication state of a policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyStatus {
    #[default]
    Draft,
    UnderReview,
    Published,
    Retired,
}

/// A policy as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub id: DbId,
    pub name: String,
    pub version: String,
    pub status: PolicyStatus,
    pub owner: String,
    pub review_date: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Policy {
    /// Published policies whose review date has passed.
    pub fn is_review_overdue(&self, today: NaiveDate) -> bool {
        self.status == PolicyStatus::Published && self.review_date.is_some_and(|d| d < today)
    }
}

/// Create/update payload for a policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDraft {
    pub name: String,
    pub version: String,
    pub status: PolicyStatus,
    pub owner: String,
    pub review_date: Option<NaiveDate>,
}

impl Resource for Policy {
    const ENTITY: &'static str = "Policy";
    const ENDPOINT: &'static str = "/policies";
    type Draft = PolicyDraft;

    fn id(&self) -> DbId {
        self.id
    }
}

impl PolicyDraft {
    /// Rules for the policy create/edit form.
    pub fn form_rules() -> RuleSet {
        let mut rules = RuleSet::new();
        rules.insert(
            "name".into(),
            ValidationRule::new().required().min_length(3).max_length(200),
        );
        rules.insert(
            "version".into(),
            ValidationRule::new().required().pattern(VERSION_RE.clone()),
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
            name: text(values, "name"),
            version: text(values, "version"),
            status: choice(values, "status", PolicyStatus::default())?,
            owner: text(values, "owner"),
            review_date: optional_date(values, "review_date")?,
        })
    }
}
