//! Dropdown ownership, platform widget interfaces, and terminal rendering.
//!
//! # Architecture
//!
//! ```text
//! AutocompleteController → ResultListController → ListView (host) → pixels / ANSI
//!                                 ↓
//!                       DropdownVisualState (view model)
//! ```
//!
//! # Modules
//!
//! - [`capabilities`]: Text input and list view interfaces the host implements
//! - [`dropdown`]: The single owned dropdown and its height formula
//! - [`viewmodel`]: Display-ready rows and the derived visual state
//! - [`terminal`]: ANSI text implementation of the list view
//! - [`helpers`]: Grapheme-aware width utilities
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod capabilities;
pub mod dropdown;
pub mod helpers;
pub mod terminal;
pub mod theme;
pub mod viewmodel;

pub use capabilities::{ListView, ListViewFactory, Rect, TextInput};
pub use dropdown::{DropdownMetrics, ResultListController};
pub use terminal::{TerminalListFactory, TerminalListView};
pub use theme::Theme;
pub use viewmodel::{DropdownRow, DropdownVisualState};
