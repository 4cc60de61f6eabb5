//! `grc-client` library crate.
//!
//! REST-facing collaborators of the `grc-core` engines: configuration,
//! the HTTP transport, one generic CRUD store shared by every GRC
//! resource, and the bridge that persists dashboard layouts. The
//! `grc-sync` binary entrypoint lives in `main.rs`.

pub mod config;
pub mod error;
pub mod layout_sync;
pub mod resources;
pub mod store;
pub mod transport;
