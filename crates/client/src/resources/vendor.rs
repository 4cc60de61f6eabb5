//! Third-party vendors (`/vendors`).

use serde::{Deserialize, Serialize};

use grc_core::error::CoreError;
use grc_core::form::{FormValues, RuleSet, ValidationRule};
use grc_core::types::{DbId, Timestamp};

use super::{check_form, choice, optional_text, text, Resource};

/// Inherent risk tier assigned to a vendor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorRisk {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// A vendor as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: DbId,
    pub name: String,
    pub contact_email: String,
    pub risk: VendorRisk,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create/update payload for a vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorDraft {
    pub name: String,
    pub contact_email: String,
    pub risk: VendorRisk,
    pub description: Option<String>,
}

impl Resource for Vendor {
    const ENTITY: &'static str = "Vendor";
    const ENDPOINT: &'static str = "/vendors";
    type Draft = VendorDraft;

    fn id(&self) -> DbId {
        self.id
    }
}

impl VendorDraft {
    /// Rules for the vendor create/edit form.
    pub fn form_rules() -> RuleSet {
        let mut rules = RuleSet::new();
        rules.insert(
            "name".into(),
            ValidationRule::new().required().max_length(200),
        );
        rules.insert("contact_email".into(), ValidationRule::email().required());
        rules.insert("description".into(), ValidationRule::new().max_length(2_000));
        rules
    }

    /// Build a draft from submitted form values.
    pub fn from_form(values: &FormValues) -> Result<Self, CoreError> {
        check_form(values, &Self::form_rules())?;
        Ok(Self {
            name: text(values, "name"),
            contact_email: text(values, "contact_email"),
            risk: choice(values, "risk", VendorRisk::default())?,
            description: optional_text(values, "description"),
        })
    }
}
