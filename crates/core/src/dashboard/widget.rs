//! Widget model for the GRC dashboard.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What a widget renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Stats,
    Chart,
    List,
    Custom,
}

/// Grid footprint of a widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetSize {
    Small,
    #[default]
    Medium,
    Large,
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// A positioned, visibility-toggleable dashboard tile.
///
/// `position` is the widget's rank in display order. Within a
/// [`WidgetLayout`](super::WidgetLayout) positions are kept dense
/// (`0..N-1`) and always match the index in the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    pub id: String,
    pub title: String,
    pub kind: WidgetKind,
    #[serde(default)]
    pub size: WidgetSize,
    #[serde(default)]
    pub position: u32,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Widget {
    /// Create a visible, medium-sized widget at position 0.
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: WidgetKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            size: WidgetSize::default(),
            position: 0,
            visible: true,
        }
    }

    /// Set the grid footprint.
    pub fn with_size(mut self, size: WidgetSize) -> Self {
        self.size = size;
        self
    }

    /// Set the display rank.
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }

    /// Start hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}
