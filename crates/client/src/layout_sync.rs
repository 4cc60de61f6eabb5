//! Persists dashboard layouts through the REST API.
//!
//! The layout engine's save hook is synchronous, so [`save_channel`]
//! returns a hook that only forwards snapshots over an unbounded channel.
//! [`LayoutSync::run`] drains that channel on the async side, coalescing
//! bursts of drags into a single `PUT` of the newest snapshot.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::mpsc;

use grc_core::dashboard::{layout_from_json, layout_to_json, Widget};

use crate::error::ClientError;
use crate::transport::Transport;

/// API path holding the current user's dashboard layout.
pub const LAYOUT_ENDPOINT: &str = "/dashboard/layout";

/// Build a layout save hook and the receiver fed by it.
///
/// Pass the hook to
/// [`WidgetLayout::with_on_save`](grc_core::dashboard::WidgetLayout::with_on_save)
/// and the receiver to [`LayoutSync::run`].
pub fn save_channel() -> (
    impl FnMut(&[Widget]) + Send + 'static,
    mpsc::UnboundedReceiver<Vec<Widget>>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let on_save = move |widgets: &[Widget]| {
        if tx.send(widgets.to_vec()).is_err() {
            tracing::warn!("Layout sync stopped; snapshot discarded");
        }
    };
    (on_save, rx)
}

/// Loads and saves the dashboard layout.
pub struct LayoutSync {
    transport: Arc<dyn Transport>,
}

impl LayoutSync {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch the saved layout. No saved layout yields an empty list.
    ///
    /// Accepts either `{ "layout_json": [...] }` or a bare array.
    pub async fn load(&self) -> Result<Vec<Widget>, ClientError> {
        let value = self.transport.get(LAYOUT_ENDPOINT).await?;
        let layout = match value {
            Value::Null => return Ok(Vec::new()),
            Value::Object(mut map) if map.contains_key("layout_json") => {
                map.remove("layout_json").unwrap_or(Value::Null)
            }
            other => other,
        };
        if layout.is_null() {
            return Ok(Vec::new());
        }
        Ok(layout_from_json(&layout)?)
    }

    /// Store `widgets` as the current layout.
    pub async fn save(&self, widgets: &[Widget]) -> Result<(), ClientError> {
        let body = json!({ "layout_json": layout_to_json(widgets)? });
        self.transport.put(LAYOUT_ENDPOINT, &body).await?;
        tracing::debug!(widget_count = widgets.len(), "Dashboard layout saved");
        Ok(())
    }

    /// Save snapshots until every sender is dropped.
    ///
    /// Snapshots queued while a save is in flight are collapsed to the
    /// newest one. Failures are logged and do not stop the loop. Returns
    /// the number of successful saves.
    pub async fn run(&self, mut snapshots: mpsc::UnboundedReceiver<Vec<Widget>>) -> usize {
        let mut saved = 0;
        while let Some(mut snapshot) = snapshots.recv().await {
            let mut skipped = 0usize;
            while let Ok(newer) = snapshots.try_recv() {
                snapshot = newer;
                skipped += 1;
            }
            if skipped > 0 {
                tracing::debug!(skipped, "Coalesced layout snapshots");
            }

            match self.save(&snapshot).await {
                Ok(()) => saved += 1,
                Err(e) => tracing::error!(error = %e, "Failed to save dashboard layout"),
            }
        }
        tracing::info!(saved, "Layout sync finished");
        saved
    }
}
