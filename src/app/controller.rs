//! The orchestrator bound to one text field.
//!
//! [`AutocompleteController`] forwards host notifications into
//! [`handle_event`] and executes the returned [`Action`]s against the bound
//! [`TextInput`], the dropdown slot, the gateway, and the delegate.
//!
//! Searches are never spawned. Each issued search is a future parked in a
//! [`FuturesUnordered`] that the host drives from its UI task through
//! [`AutocompleteController::next_completion`], so every state mutation
//! happens on that one task and no locks are involved.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut controller = AutocompleteController::new(&config, field, factory, gateway);
//! controller.on_text_changed("123 Main");
//! while let Some(completion) = controller.next_completion().await {
//!     controller.apply_completion(completion);
//! }
//! ```

use crate::app::{
    handle_event, Action, AutocompleteDelegate, AutocompleteState, Event, SearchState,
};
use crate::domain::PlaceResult;
use crate::gateway::{SearchCompletion, SearchGateway, SearchRequest};
use crate::ui::{
    DropdownMetrics, DropdownVisualState, ListViewFactory, ResultListController, TextInput,
};
use crate::Config;
use futures_util::future::BoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};
use futures_util::FutureExt;
use std::sync::Arc;

/// Autocomplete behaviour for one text field.
pub struct AutocompleteController<I, F>
where
    I: TextInput,
    F: ListViewFactory,
{
    state: AutocompleteState,
    input: I,
    factory: F,
    dropdown: Option<ResultListController<F::View>>,
    metrics: DropdownMetrics,
    gateway: Arc<dyn SearchGateway>,
    delegate: Option<Box<dyn AutocompleteDelegate>>,
    in_flight: FuturesUnordered<BoxFuture<'static, SearchCompletion>>,
}

impl<I, F> AutocompleteController<I, F>
where
    I: TextInput,
    F: ListViewFactory,
{
    /// Binds a controller to `input`. No dropdown exists until the field is
    /// focused or the first search is issued.
    pub fn new(config: &Config, input: I, factory: F, gateway: Arc<dyn SearchGateway>) -> Self {
        tracing::debug!(
            minimum_input_length = config.minimum_input_length_for_search,
            row_height = config.row_height,
            max_visible_height = config.max_visible_height,
            "binding autocomplete controller"
        );

        Self {
            state: AutocompleteState::from_config(config),
            input,
            factory,
            dropdown: None,
            metrics: DropdownMetrics::from(config),
            gateway,
            delegate: None,
            in_flight: FuturesUnordered::new(),
        }
    }

    /// Registers a delegate, replacing any previous one.
    #[must_use]
    pub fn with_delegate(mut self, delegate: Box<dyn AutocompleteDelegate>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Registers or clears the delegate.
    pub fn set_delegate(&mut self, delegate: Option<Box<dyn AutocompleteDelegate>>) {
        self.delegate = delegate;
    }

    /// The field's text changed to `text`.
    ///
    /// Returns `true` when the host should redraw.
    pub fn on_text_changed(&mut self, text: &str) -> bool {
        self.dispatch(Event::TextChanged(text.to_string()))
    }

    /// The field gained focus.
    pub fn on_editing_began(&mut self) -> bool {
        self.dispatch(Event::EditingBegan)
    }

    /// The user picked dropdown row `index`.
    pub fn on_row_selected(&mut self, index: usize) -> bool {
        self.dispatch(Event::RowSelected(index))
    }

    /// Applies a finished search. Stale completions are dropped.
    pub fn apply_completion(&mut self, completion: SearchCompletion) -> bool {
        let _context = completion
            .trace_context
            .as_ref()
            .and_then(crate::gateway::TraceContext::attach);
        self.dispatch(Event::SearchCompleted(completion))
    }

    /// Waits for the next in-flight search to finish, in arrival order.
    ///
    /// Resolves to `None` immediately when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<SearchCompletion> {
        self.in_flight.next().await
    }

    /// Drives every in-flight search to completion and applies each result.
    pub async fn settle(&mut self) {
        while let Some(completion) = self.next_completion().await {
            self.apply_completion(completion);
        }
    }

    /// Runs one event through the state machine and executes its actions.
    pub fn dispatch(&mut self, event: Event) -> bool {
        match handle_event(&mut self.state, &event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for action in actions {
                    self.execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    fn execute_action(&mut self, action: Action) {
        match action {
            Action::EnsureDropdown => {
                if self.dropdown.is_none() {
                    let anchor = self.input.frame();
                    self.dropdown = Some(ResultListController::attach(
                        &mut self.factory,
                        anchor,
                        self.metrics,
                    ));
                }
            }
            Action::ShowLoading => {
                if let Some(dropdown) = self.dropdown.as_mut() {
                    dropdown.show(true);
                }
            }
            Action::IssueSearch(request) => self.issue_search(request),
            Action::UpdateResults(results) => {
                if let Some(dropdown) = self.dropdown.as_mut() {
                    dropdown.update(results);
                }
            }
            Action::UpdateError(error) => {
                if let Some(dropdown) = self.dropdown.as_mut() {
                    dropdown.update_error(&error);
                }
            }
            Action::NotifySearchError(error) => {
                if let Some(delegate) = self.delegate.as_mut() {
                    delegate.search_did_return_error(&error);
                }
            }
            Action::NotifySelection(place) => {
                if let Some(delegate) = self.delegate.as_mut() {
                    delegate.did_select_location_from_table(&place);
                }
            }
            Action::SetInputText(text) => self.input.set_text(&text),
            Action::DismissDropdown => {
                if let Some(dropdown) = self.dropdown.take() {
                    dropdown.dismiss();
                }
            }
        }
    }

    fn issue_search(&mut self, request: SearchRequest) {
        let search = self.gateway.search(&request.query);
        self.in_flight.push(
            search
                .map(move |outcome| SearchCompletion::for_request(&request, outcome))
                .boxed(),
        );
        tracing::debug!(in_flight = self.in_flight.len(), "search issued");
    }

    /// Whether any issued search has not resolved yet.
    #[must_use]
    pub fn has_pending_searches(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Number of issued searches that have not resolved yet.
    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// The attached dropdown, if any.
    #[must_use]
    pub const fn dropdown(&self) -> Option<&ResultListController<F::View>> {
        self.dropdown.as_ref()
    }

    #[must_use]
    pub const fn is_dropdown_attached(&self) -> bool {
        self.dropdown.is_some()
    }

    #[must_use]
    pub const fn search_state(&self) -> &SearchState {
        &self.state.search
    }

    #[must_use]
    pub const fn state(&self) -> &AutocompleteState {
        &self.state
    }

    /// Results currently shown in the dropdown.
    #[must_use]
    pub fn results(&self) -> &[PlaceResult] {
        &self.state.results
    }

    #[must_use]
    pub const fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    #[must_use]
    pub const fn factory(&self) -> &F {
        &self.factory
    }

    /// What the dropdown looks like right now. `Hidden` when none is
    /// attached or the attached one has nothing to show yet.
    #[must_use]
    pub fn visual_state(&self) -> DropdownVisualState {
        self.dropdown
            .as_ref()
            .map_or(DropdownVisualState::Hidden, ResultListController::visual_state)
    }
}
