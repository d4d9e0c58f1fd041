//! Display-ready view models for the dropdown.
//!
//! View models are derived from [`ResultListController`](super::ResultListController)
//! state and contain no logic. Hosts that redraw from scratch (like the
//! terminal renderer) can consume [`DropdownVisualState`] directly.

/// Text of one dropdown row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropdownRow {
    /// Street line (primary text).
    pub primary: String,

    /// Locality line (secondary text).
    pub secondary: String,
}

/// What the dropdown looks like right now.
#[derive(Debug, Clone, PartialEq)]
pub enum DropdownVisualState {
    /// No dropdown is attached.
    Hidden,

    /// A search is running; the dropdown has this height.
    Loading {
        height: f32,
    },

    /// Rows are shown at this height.
    ShowingResults {
        rows: Vec<DropdownRow>,
        height: f32,
    },
}

impl DropdownVisualState {
    /// Height of the dropdown, `0.0` when hidden.
    #[must_use]
    pub const fn height(&self) -> f32 {
        match self {
            Self::Hidden => 0.0,
            Self::Loading { height } | Self::ShowingResults { height, .. } => *height,
        }
    }
}
