//! Pure state of one autocomplete field.
//!
//! [`AutocompleteState`] is the single source of truth for the search side of
//! the field: the live [`SearchState`], the current [`QueryToken`], the rows
//! the dropdown is showing, and whether a dropdown is attached at all. It holds
//! no views and performs no I/O, so every transition can be tested directly.

use super::search_state::{QueryToken, SearchState};
use crate::domain::{MapCompleteError, PlaceResult, Result, SearchError};
use crate::Config;
use unicode_segmentation::UnicodeSegmentation;

/// Central state container for one field.
#[derive(Debug, Clone, Default)]
pub struct AutocompleteState {
    /// Searches start once the text is longer than this many characters.
    pub minimum_input_length: usize,

    /// Lifecycle of the current search.
    pub search: SearchState,

    /// Token of the most recently issued search.
    pub current_token: QueryToken,

    /// Rows currently rendered in the dropdown.
    ///
    /// Replaced on success, left alone on failure, cleared on selection.
    pub results: Vec<PlaceResult>,

    /// Whether a dropdown view is attached below the field.
    pub dropdown_attached: bool,
}

impl AutocompleteState {
    /// Creates an idle state with the given length threshold.
    #[must_use]
    pub fn new(minimum_input_length: usize) -> Self {
        Self {
            minimum_input_length,
            ..Self::default()
        }
    }

    /// Creates an idle state from the configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.minimum_input_length_for_search)
    }

    /// Length of `text` in user-perceived characters (grapheme clusters).
    #[must_use]
    pub fn input_length(text: &str) -> usize {
        text.graphemes(true).count()
    }

    /// Whether `text` is long enough to search for.
    #[must_use]
    pub fn passes_length_gate(&self, text: &str) -> bool {
        Self::input_length(text) > self.minimum_input_length
    }

    /// Marks `text` as the current query and returns its fresh token.
    ///
    /// Any search issued earlier becomes stale.
    pub fn issue_query(&mut self, text: &str) -> QueryToken {
        self.current_token = self.current_token.next();
        self.search = SearchState::Pending(text.to_string());
        self.current_token
    }

    /// Whether a completion tagged with `token` may still be applied.
    #[must_use]
    pub fn is_current(&self, token: QueryToken) -> bool {
        token == self.current_token && self.search.is_pending()
    }

    /// Records a successful completion of the current search.
    pub fn record_success(&mut self, results: &[PlaceResult]) {
        self.results = results.to_vec();
        self.search = SearchState::Succeeded(results.to_vec());
    }

    /// Records a failed completion of the current search. Rows stay as they were.
    pub fn record_failure(&mut self, error: &SearchError) {
        self.search = SearchState::Failed(error.clone());
    }

    /// Returns the row at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`MapCompleteError::InvalidRow`] when `index` is not a visible row.
    pub fn result_at(&self, index: usize) -> Result<&PlaceResult> {
        self.results.get(index).ok_or(MapCompleteError::InvalidRow {
            index,
            count: self.results.len(),
        })
    }

    /// Returns to idle after a selection.
    ///
    /// The token advances so searches still in flight are treated as stale,
    /// and the rows go away with the dropdown.
    pub fn settle_after_selection(&mut self) {
        self.current_token = self.current_token.next();
        self.search = SearchState::Idle;
        self.results.clear();
        self.dropdown_attached = false;
    }
}
