//! Dashboard widget layout engine.
//!
//! Provides the widget model, the in-memory [`WidgetLayout`] engine
//! (reorder, visibility, drag tracking, save callback) and JSON helpers
//! for persisted layouts -- all without I/O.

pub mod layout;
pub mod persistence;
pub mod widget;

pub use layout::{SaveCallback, WidgetLayout};
pub use persistence::{layout_from_json, layout_to_json, validate_widget_ids};
pub use widget::{Widget, WidgetKind, WidgetSize};
