//! Stateful form session: values, errors, touched fields, submit guard.
//!
//! A field moves one way from untouched to touched (only [`FormSession::reset`]
//! goes back). Feedback is gated on that state:
//!
//! - change: store the value, re-validate only if the field is touched;
//! - blur: mark touched, validate;
//! - submit: validate every declared field, mark all of them touched and
//!   call the submit callback only when no error remains.

use std::collections::BTreeSet;
use std::future::Future;

use super::evaluator::{has_errors, validate_field, validate_form};
use super::rules::{ErrorMap, FormValues, RuleSet};

/// Why a submission did not reach the submit callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitBlocked {
    /// At least one declared field failed validation.
    #[error("Form has validation errors")]
    Invalid,

    /// A previous submission has not settled yet.
    #[error("A submission is already in progress")]
    InFlight,
}

/// Validation state for one form instance.
#[derive(Debug, Clone)]
pub struct FormSession {
    initial: FormValues,
    values: FormValues,
    rules: RuleSet,
    errors: ErrorMap,
    touched: BTreeSet<String>,
    submitting: bool,
}

impl FormSession {
    pub fn new(initial: FormValues, rules: RuleSet) -> Self {
        Self {
            values: initial.clone(),
            initial,
            rules,
            errors: ErrorMap::new(),
            touched: BTreeSet::new(),
            submitting: false,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Current value of `field`, empty if never set.
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Error currently shown for `field`.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).and_then(|e| e.as_deref())
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether the current values pass every rule. Does not update the
    /// visible errors.
    pub fn is_valid(&self) -> bool {
        !has_errors(&validate_form(&self.values, &self.rules))
    }

    /// Record an edit. Re-validates the field only if it is already
    /// touched, so untouched fields never show premature errors.
    pub fn handle_change(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
        if self.is_touched(field) {
            self.revalidate(field);
        }
    }

    /// Mark `field` touched and validate it.
    pub fn handle_blur(&mut self, field: &str) {
        self.touched.insert(field.to_string());
        self.revalidate(field);
    }

    /// Replace all values programmatically (e.g. when loading a record).
    ///
    /// Touched state is kept; touched fields are re-validated.
    pub fn set_values(&mut self, values: FormValues) {
        self.values = values;
        let touched: Vec<String> = self.touched.iter().cloned().collect();
        for field in touched {
            self.revalidate(&field);
        }
    }

    /// First half of a submission for event-driven callers.
    ///
    /// Validates every declared field, marks all of them touched and, if
    /// the form is valid, sets the submitting flag and returns a snapshot
    /// of the values. The caller must call
    /// [`finish_submit`](Self::finish_submit) once its submission settles.
    pub fn begin_submit(&mut self) -> Result<FormValues, SubmitBlocked> {
        if self.submitting {
            return Err(SubmitBlocked::InFlight);
        }

        self.errors = validate_form(&self.values, &self.rules);
        self.touched.extend(self.rules.keys().cloned());

        if has_errors(&self.errors) {
            return Err(SubmitBlocked::Invalid);
        }

        self.submitting = true;
        Ok(self.values.clone())
    }

    /// Clear the submitting flag.
    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    /// Validate, then run `on_submit` with the current values.
    ///
    /// The callback's output is returned as is; a failed submission is the
    /// caller's concern and never turns into field errors. The submitting
    /// flag is cleared however the callback settles, including when this
    /// future is dropped before completion.
    pub async fn handle_submit<F, Fut>(
        &mut self,
        on_submit: F,
    ) -> Result<Fut::Output, SubmitBlocked>
    where
        F: FnOnce(FormValues) -> Fut,
        Fut: Future,
    {
        let values = self.begin_submit()?;
        let _guard = SubmittingGuard(&mut self.submitting);
        Ok(on_submit(values).await)
    }

    /// Restore initial values and clear errors, touched and submitting.
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
        self.touched.clear();
        self.submitting = false;
    }

    fn revalidate(&mut self, field: &str) {
        if let Some(rule) = self.rules.get(field) {
            let value = self.values.get(field).map(String::as_str).unwrap_or("");
            self.errors.insert(field.to_string(), validate_field(value, rule));
        }
    }
}

/// Clears the submitting flag on drop.
struct SubmittingGuard<'a>(&'a mut bool);

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
