//! Form validation engine.
//!
//! Provides declarative rule types, a pure per-field evaluator and the
//! stateful [`FormSession`] that gates feedback on touched state and
//! guards submission.

pub mod evaluator;
pub mod rules;
pub mod session;

pub use evaluator::{has_errors, validate_field, validate_form};
pub use rules::{CustomValidator, ErrorMap, FormValues, RuleSet, ValidationRule};
pub use session::{FormSession, SubmitBlocked};
