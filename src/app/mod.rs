//! Application layer coordinating state, events, and actions.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Host notification → Event → handle_event → State mutation → Actions → Side effects
//!                                ↑                                         ↓
//!                                └────────── Search completions ───────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`controller`]: Executes actions against the field, dropdown, gateway, and delegate
//! - [`delegate`]: Optional consumer callbacks
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`search_state`]: Query tokens and the search lifecycle
//! - [`state`]: Pure per-field state

pub mod actions;
pub mod controller;
pub mod delegate;
pub mod handler;
pub mod search_state;
pub mod state;

pub use actions::Action;
pub use controller::AutocompleteController;
pub use delegate::AutocompleteDelegate;
pub use handler::{handle_event, Event};
pub use search_state::{QueryToken, SearchState};
pub use state::AutocompleteState;
