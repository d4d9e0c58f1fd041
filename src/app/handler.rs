//! Event handling and state transitions.
//!
//! [`handle_event`] is the whole autocomplete state machine. It pattern-matches
//! the incoming [`Event`], mutates [`AutocompleteState`], and returns the
//! [`Action`]s the controller must execute.
//!
//! # Event Types
//!
//! - **Field**: `TextChanged`, `EditingBegan`
//! - **Dropdown**: `RowSelected`
//! - **Gateway**: `SearchCompleted`
//!
//! # Example
//!
//! ```rust
//! use mapcomplete::app::{handle_event, Action, AutocompleteState, Event};
//!
//! let mut state = AutocompleteState::new(5);
//! let (changed, actions) = handle_event(&mut state, &Event::TextChanged("123 Main".into()))?;
//! assert!(changed);
//! assert!(matches!(actions.last(), Some(Action::IssueSearch(_))));
//! # Ok::<(), mapcomplete::MapCompleteError>(())
//! ```

use crate::app::{Action, AutocompleteState};
use crate::domain::error::Result;
use crate::domain::format_street_line;
use crate::gateway::{SearchCompletion, SearchRequest};

/// Events delivered to one field.
#[derive(Debug, Clone)]
pub enum Event {
    /// The field's text changed; carries the full current text.
    TextChanged(String),

    /// The field gained focus.
    EditingBegan,

    /// A search finished, possibly for a superseded query.
    SearchCompleted(SearchCompletion),

    /// The user tapped the dropdown row at this index.
    RowSelected(usize),
}

/// Processes an event, mutates state, and returns actions to execute.
///
/// The boolean is `true` when something visible changed and the host should
/// redraw.
///
/// # Errors
///
/// Returns [`MapCompleteError::InvalidRow`](crate::MapCompleteError::InvalidRow)
/// when a selection points outside the rows currently shown. State is left
/// untouched in that case.
pub fn handle_event(state: &mut AutocompleteState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::TextChanged(text) => {
            if !state.passes_length_gate(text) {
                tracing::trace!(
                    length = AutocompleteState::input_length(text),
                    threshold = state.minimum_input_length,
                    "text below search threshold"
                );
                return Ok((false, vec![]));
            }

            let mut actions = vec![];
            if !state.dropdown_attached {
                state.dropdown_attached = true;
                actions.push(Action::EnsureDropdown);
            }

            let token = state.issue_query(text);
            tracing::debug!(token = %token, query = %text, "issuing search");

            actions.push(Action::ShowLoading);
            actions.push(Action::IssueSearch(SearchRequest::new(token, text.as_str())));
            Ok((true, actions))
        }
        Event::EditingBegan => {
            if state.dropdown_attached {
                return Ok((false, vec![]));
            }
            tracing::debug!("editing began, attaching dropdown");
            state.dropdown_attached = true;
            Ok((true, vec![Action::EnsureDropdown]))
        }
        Event::SearchCompleted(completion) => {
            if !state.is_current(completion.token) {
                tracing::debug!(
                    token = %completion.token,
                    current = %state.current_token,
                    "discarding stale search completion"
                );
                return Ok((false, vec![]));
            }

            match &completion.outcome {
                Ok(results) => {
                    tracing::debug!(
                        token = %completion.token,
                        result_count = results.len(),
                        "search succeeded"
                    );
                    state.record_success(results);
                    Ok((true, vec![Action::UpdateResults(results.clone())]))
                }
                Err(error) => {
                    tracing::debug!(token = %completion.token, error = %error, "search failed");
                    state.record_failure(error);
                    Ok((
                        true,
                        vec![
                            Action::UpdateError(error.clone()),
                            Action::NotifySearchError(error.clone()),
                        ],
                    ))
                }
            }
        }
        Event::RowSelected(index) => {
            let selected = state.result_at(*index)?.clone();
            let text = format_street_line(selected.placemark());
            tracing::debug!(row = index, text = %text, "row selected");

            state.settle_after_selection();

            Ok((
                true,
                vec![
                    Action::NotifySelection(selected.handle()),
                    Action::SetInputText(text),
                    Action::DismissDropdown,
                ],
            ))
        }
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::TextChanged(_) => "text_changed",
        Event::EditingBegan => "editing_began",
        Event::SearchCompleted(_) => "search_completed",
        Event::RowSelected(_) => "row_selected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{QueryToken, SearchState};
    use crate::domain::{MapCompleteError, PlaceResult, Placemark, SearchError};

    fn springfield() -> PlaceResult {
        PlaceResult::from_placemark(Placemark {
            sub_thoroughfare: Some("123".into()),
            thoroughfare: Some("Main St".into()),
            locality: Some("Springfield".into()),
            administrative_area: Some("IL".into()),
            ..Placemark::default()
        })
    }

    fn issued_token(actions: &[Action]) -> QueryToken {
        actions
            .iter()
            .find_map(|action| match action {
                Action::IssueSearch(request) => Some(request.token),
                _ => None,
            })
            .expect("an IssueSearch action")
    }

    #[test]
    fn short_text_issues_nothing() {
        let mut state = AutocompleteState::new(5);
        for text in ["", "1", "123 M", "12345"] {
            let (changed, actions) =
                handle_event(&mut state, &Event::TextChanged(text.to_string())).unwrap();
            assert!(!changed);
            assert!(actions.is_empty(), "{text:?} issued {actions:?}");
        }
        assert!(matches!(state.search, SearchState::Idle));
        assert!(!state.dropdown_attached);
    }

    #[test]
    fn first_long_text_attaches_dropdown_then_searches() {
        let mut state = AutocompleteState::new(5);
        let (_, actions) =
            handle_event(&mut state, &Event::TextChanged("123 Main".to_string())).unwrap();

        assert!(matches!(actions[0], Action::EnsureDropdown));
        assert!(matches!(actions[1], Action::ShowLoading));
        assert!(matches!(&actions[2], Action::IssueSearch(r) if r.query == "123 Main"));

        let (_, again) =
            handle_event(&mut state, &Event::TextChanged("123 Main S".to_string())).unwrap();
        assert!(!again.iter().any(|a| matches!(a, Action::EnsureDropdown)));
    }

    #[test]
    fn focus_attaches_dropdown_once() {
        let mut state = AutocompleteState::new(5);
        let (changed, actions) = handle_event(&mut state, &Event::EditingBegan).unwrap();
        assert!(changed);
        assert!(matches!(actions.as_slice(), [Action::EnsureDropdown]));

        let (changed, actions) = handle_event(&mut state, &Event::EditingBegan).unwrap();
        assert!(!changed);
        assert!(actions.is_empty());
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut state = AutocompleteState::new(5);
        let (_, first) =
            handle_event(&mut state, &Event::TextChanged("123 Main".to_string())).unwrap();
        let (_, second) =
            handle_event(&mut state, &Event::TextChanged("123 Main S".to_string())).unwrap();

        let stale = SearchCompletion::new(issued_token(&first), Ok(vec![springfield()]));
        let (changed, actions) = handle_event(&mut state, &Event::SearchCompleted(stale)).unwrap();
        assert!(!changed);
        assert!(actions.is_empty());
        assert!(state.results.is_empty());
        assert!(state.search.is_pending());

        let fresh = SearchCompletion::new(issued_token(&second), Ok(vec![springfield()]));
        let (changed, actions) = handle_event(&mut state, &Event::SearchCompleted(fresh)).unwrap();
        assert!(changed);
        assert!(matches!(&actions[..], [Action::UpdateResults(r)] if r.len() == 1));
    }

    #[test]
    fn failure_updates_list_and_notifies() {
        let mut state = AutocompleteState::new(5);
        let (_, issued) =
            handle_event(&mut state, &Event::TextChanged("123 Main".to_string())).unwrap();

        let failed = SearchCompletion::new(
            issued_token(&issued),
            Err(SearchError::Provider("offline".into())),
        );
        let (_, actions) = handle_event(&mut state, &Event::SearchCompleted(failed)).unwrap();

        assert!(matches!(
            &actions[..],
            [Action::UpdateError(_), Action::NotifySearchError(_)]
        ));
        assert!(matches!(state.search, SearchState::Failed(_)));
    }

    #[test]
    fn completion_is_applied_only_once() {
        let mut state = AutocompleteState::new(5);
        let (_, issued) =
            handle_event(&mut state, &Event::TextChanged("123 Main".to_string())).unwrap();
        let completion = SearchCompletion::new(issued_token(&issued), Ok(vec![springfield()]));

        handle_event(&mut state, &Event::SearchCompleted(completion.clone())).unwrap();
        let (changed, actions) =
            handle_event(&mut state, &Event::SearchCompleted(completion)).unwrap();
        assert!(!changed);
        assert!(actions.is_empty());
    }

    #[test]
    fn selection_sets_street_line_and_dismisses() {
        let mut state = AutocompleteState::new(5);
        let (_, issued) =
            handle_event(&mut state, &Event::TextChanged("123 Main".to_string())).unwrap();
        let done = SearchCompletion::new(issued_token(&issued), Ok(vec![springfield()]));
        handle_event(&mut state, &Event::SearchCompleted(done)).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::RowSelected(0)).unwrap();

        assert!(matches!(actions[0], Action::NotifySelection(_)));
        assert!(matches!(&actions[1], Action::SetInputText(t) if t == "123 Main St"));
        assert!(matches!(actions[2], Action::DismissDropdown));
        assert!(!state.dropdown_attached);
        assert!(matches!(state.search, SearchState::Idle));
    }

    #[test]
    fn selection_outside_rows_is_rejected() {
        let mut state = AutocompleteState::new(5);
        let error = handle_event(&mut state, &Event::RowSelected(3)).unwrap_err();
        assert!(matches!(error, MapCompleteError::InvalidRow { index: 3, count: 0 }));
    }
}
