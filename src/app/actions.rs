//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) never touches views, the text field,
//! the delegate, or the network. It returns a list of [`Action`]s instead, and
//! the [`AutocompleteController`](super::AutocompleteController) executes them
//! in order.

use crate::domain::{PlaceHandle, PlaceResult, SearchError};
use crate::gateway::SearchRequest;

/// Commands produced by the event handler.
#[derive(Debug, Clone)]
pub enum Action {
    /// Creates and attaches the dropdown below the field if none exists yet.
    EnsureDropdown,

    /// Starts the dropdown's loading indicator.
    ShowLoading,

    /// Starts a search through the gateway.
    IssueSearch(SearchRequest),

    /// Replaces the dropdown rows, resizes it, and stops the loading indicator.
    UpdateResults(Vec<PlaceResult>),

    /// Stops the loading indicator and leaves the rows as they are.
    UpdateError(SearchError),

    /// Tells the delegate that the current search failed.
    NotifySearchError(SearchError),

    /// Tells the delegate which place was picked.
    NotifySelection(PlaceHandle),

    /// Replaces the text of the bound field.
    SetInputText(String),

    /// Detaches and drops the dropdown.
    DismissDropdown,
}
