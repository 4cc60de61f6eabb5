//! `grc-core` -- pure engines behind the GRC dashboard.
//!
//! The crate contains no network or storage I/O. Callers (UI components,
//! the REST client in `grc-client`) drive the engines and render results:
//!
//! - [`dashboard`] -- ordered widget layout with drag-reorder, visibility
//!   toggling and a save callback on drag completion.
//! - [`form`] -- declarative per-field validation with touched-state
//!   gating and a guarded submit flow.
//! - [`template`] -- `{placeholder}` interpolation for document exports.

pub mod dashboard;
pub mod error;
pub mod form;
pub mod template;
pub mod types;
