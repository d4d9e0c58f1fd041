//! Optional consumer callbacks.

use crate::domain::{PlaceHandle, SearchError};

/// Callbacks a consumer may implement to hear about the field.
///
/// Both methods default to doing nothing, so a consumer implements zero, one,
/// or both. A field with no delegate at all behaves the same as one whose
/// delegate implements neither.
pub trait AutocompleteDelegate {
    /// A place was picked from the dropdown.
    fn did_select_location_from_table(&mut self, place: &PlaceHandle) {
        let _ = place;
    }

    /// The current search failed.
    ///
    /// This can fire once per keystroke while the provider is failing. Do not
    /// open modal dialogs or block in here.
    fn search_did_return_error(&mut self, error: &SearchError) {
        let _ = error;
    }
}
