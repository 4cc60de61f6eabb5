//! JSON encoding of widget layouts for storage by callers.
//!
//! The engine never persists anything itself; these helpers produce and
//! consume the `layout_json` payload a caller stores (remote API, local
//! file). Decoding validates ids and normalises positions.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::CoreError;

use super::layout::normalize_positions;
use super::widget::Widget;

/// Encode widgets as a JSON array in display order.
pub fn layout_to_json(widgets: &[Widget]) -> Result<Value, CoreError> {
    serde_json::to_value(widgets)
        .map_err(|e| CoreError::Internal(format!("Failed to encode layout: {e}")))
}

/// Decode a persisted layout.
///
/// The value must be a JSON array of widget objects with unique ids.
/// Widgets are ordered by their stored `position` and re-ranked densely.
pub fn layout_from_json(value: &Value) -> Result<Vec<Widget>, CoreError> {
    if !value.is_array() {
        return Err(CoreError::Validation(
            "layout_json must be a JSON array".to_string(),
        ));
    }
    let widgets: Vec<Widget> = serde_json::from_value(value.clone())
        .map_err(|e| CoreError::Validation(format!("Invalid widget in layout_json: {e}")))?;
    validate_widget_ids(&widgets)?;
    Ok(normalize_positions(widgets))
}

/// Reject empty ids ([`CoreError::Validation`]) and duplicate ids
/// ([`CoreError::Conflict`]).
pub fn validate_widget_ids(widgets: &[Widget]) -> Result<(), CoreError> {
    let mut seen = HashSet::with_capacity(widgets.len());
    for widget in widgets {
        if widget.id.trim().is_empty() {
            return Err(CoreError::Validation(
                "Widget id must not be empty".to_string(),
            ));
        }
        if !seen.insert(widget.id.as_str()) {
            return Err(CoreError::Conflict(format!(
                "Duplicate widget id '{}'",
                widget.id
            )));
        }
    }
    Ok(())
}
