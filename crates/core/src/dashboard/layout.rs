//! In-memory widget layout engine.
//!
//! [`WidgetLayout`] owns an ordered widget sequence and is the only place
//! it is mutated. Every operation is synchronous and total apart from
//! [`WidgetLayout::move_widget`], which rejects out-of-range indices.

use std::fmt;

use crate::error::CoreError;

use super::widget::{Widget, WidgetSize};

/// Save hook invoked with the full widget sequence when a drag ends.
pub type SaveCallback = Box<dyn FnMut(&[Widget]) + Send>;

/// Ordered collection of dashboard widgets.
pub struct WidgetLayout {
    widgets: Vec<Widget>,
    initial: Vec<Widget>,
    dragging: Option<String>,
    on_save: Option<SaveCallback>,
}

impl WidgetLayout {
    /// Seed a layout from the caller's initial list.
    ///
    /// List order is display order; positions are re-derived from it, so
    /// stale `position` values never reach the save hook.
    /// [`reset`](Self::reset) restores this sequence. Use
    /// [`from_saved`](Self::from_saved) for persisted data whose order
    /// comes from `position` instead.
    pub fn new(mut initial: Vec<Widget>) -> Self {
        renumber_positions(&mut initial);
        Self {
            widgets: initial.clone(),
            initial,
            dragging: None,
            on_save: None,
        }
    }

    /// Seed a layout from persisted widgets, sorting on `position` and
    /// re-ranking to `0..N-1`. Ties keep their input order.
    pub fn from_saved(widgets: Vec<Widget>) -> Self {
        Self::new(normalize_positions(widgets))
    }

    /// Register the save hook invoked by [`end_drag`](Self::end_drag).
    pub fn with_on_save<F>(mut self, on_save: F) -> Self
    where
        F: FnMut(&[Widget]) + Send + 'static,
    {
        self.on_save = Some(Box::new(on_save));
        self
    }

    /// Widgets in display order.
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Visible widgets in display order.
    pub fn visible_widgets(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.iter().filter(|w| w.visible)
    }

    /// Id of the widget currently being dragged, if any.
    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Move the widget at `from` so that it ends up at index `to`, then
    /// re-derive every widget's position from its index.
    ///
    /// Both indices must be below [`len`](Self::len); otherwise the layout
    /// is left untouched and a [`CoreError::Validation`] is returned.
    pub fn move_widget(&mut self, from: usize, to: usize) -> Result<(), CoreError> {
        let len = self.widgets.len();
        if from >= len || to >= len {
            return Err(CoreError::Validation(format!(
                "Widget index out of range: move {from} -> {to} with {len} widgets"
            )));
        }
        if from == to {
            return Ok(());
        }

        let widget = self.widgets.remove(from);
        self.widgets.insert(to, widget);
        renumber_positions(&mut self.widgets);
        Ok(())
    }

    /// Flip the `visible` flag of the widget with `widget_id`.
    ///
    /// Unknown ids are ignored. Returns whether a widget matched.
    pub fn toggle_visibility(&mut self, widget_id: &str) -> bool {
        match self.widgets.iter_mut().find(|w| w.id == widget_id) {
            Some(widget) => {
                widget.visible = !widget.visible;
                true
            }
            None => false,
        }
    }

    /// Change the grid footprint of the widget with `widget_id`.
    ///
    /// Unknown ids are ignored. Returns whether a widget matched.
    pub fn set_widget_size(&mut self, widget_id: &str, size: WidgetSize) -> bool {
        match self.widgets.iter_mut().find(|w| w.id == widget_id) {
            Some(widget) => {
                widget.size = size;
                true
            }
            None => false,
        }
    }

    /// Record `widget_id` as the widget being dragged.
    pub fn start_drag(&mut self, widget_id: impl Into<String>) {
        self.dragging = Some(widget_id.into());
    }

    /// Clear the drag state and hand the current sequence to the save hook.
    ///
    /// This is the single persistence point of the engine.
    pub fn end_drag(&mut self) {
        self.dragging = None;
        if let Some(on_save) = self.on_save.as_mut() {
            on_save(&self.widgets);
        }
    }

    /// Restore the sequence supplied at construction and clear drag state.
    pub fn reset(&mut self) {
        self.widgets = self.initial.clone();
        self.dragging = None;
    }
}

impl fmt::Debug for WidgetLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetLayout")
            .field("widgets", &self.widgets)
            .field("dragging", &self.dragging)
            .field("has_on_save", &self.on_save.is_some())
            .finish()
    }
}

/// Set each widget's position to its index.
pub(crate) fn renumber_positions(widgets: &mut [Widget]) {
    for (index, widget) in widgets.iter_mut().enumerate() {
        widget.position = index as u32;
    }
}

/// Stable-sort by `position`, then re-rank densely.
pub(crate) fn normalize_positions(mut widgets: Vec<Widget>) -> Vec<Widget> {
    widgets.sort_by_key(|w| w.position);
    renumber_positions(&mut widgets);
    widgets
}
