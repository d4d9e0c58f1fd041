//! End-to-end behaviour of the autocomplete controller against fake widgets
//! and a gateway whose answers are released by hand.

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use mapcomplete::gateway::SearchOutcome;
use mapcomplete::ui::{DropdownRow, DropdownVisualState, ListView, ListViewFactory, Rect, TextInput};
use mapcomplete::{
    AutocompleteController, AutocompleteDelegate, Config, FixtureGateway, MapItem, PlaceHandle,
    PlaceResult, Placemark, SearchError, SearchGateway, SearchState,
};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

const FIELD: Rect = Rect::new(16.0, 80.0, 288.0, 30.0);

struct FakeField {
    text: String,
}

impl TextInput for FakeField {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn frame(&self) -> Rect {
        FIELD
    }
}

#[derive(Debug, Default)]
struct ViewLog {
    attached: Vec<Rect>,
    frame: Rect,
    loading: bool,
    rows: Vec<DropdownRow>,
    reloads: usize,
    detached: usize,
}

struct FakeView(Rc<RefCell<ViewLog>>);

impl ListView for FakeView {
    fn set_frame(&mut self, frame: Rect) {
        self.0.borrow_mut().frame = frame;
    }

    fn set_loading(&mut self, loading: bool) {
        self.0.borrow_mut().loading = loading;
    }

    fn reload(&mut self, rows: &[DropdownRow]) {
        let mut log = self.0.borrow_mut();
        log.rows = rows.to_vec();
        log.reloads += 1;
    }

    fn detach(&mut self) {
        self.0.borrow_mut().detached += 1;
    }
}

struct FakeFactory(Rc<RefCell<ViewLog>>);

impl ListViewFactory for FakeFactory {
    type View = FakeView;

    fn attach(&mut self, frame: Rect) -> FakeView {
        {
            let mut log = self.0.borrow_mut();
            log.attached.push(frame);
            log.frame = frame;
        }
        FakeView(Rc::clone(&self.0))
    }
}

/// Gateway whose searches stay pending until the test answers them.
#[derive(Clone, Default)]
struct ScriptedGateway {
    pending: Arc<Mutex<Vec<(String, oneshot::Sender<SearchOutcome>)>>>,
}

impl ScriptedGateway {
    fn queries(&self) -> Vec<String> {
        self.pending
            .lock()
            .unwrap()
            .iter()
            .map(|(query, _)| query.clone())
            .collect()
    }

    fn answer(&self, query: &str, outcome: SearchOutcome) {
        let mut pending = self.pending.lock().unwrap();
        let index = pending
            .iter()
            .position(|(q, _)| q == query)
            .unwrap_or_else(|| panic!("no pending search for {query:?}"));
        let (_, sender) = pending.remove(index);
        sender.send(outcome).unwrap();
    }
}

impl SearchGateway for ScriptedGateway {
    fn search(&self, query: &str) -> BoxFuture<'static, SearchOutcome> {
        let (sender, receiver) = oneshot::channel();
        self.pending
            .lock()
            .unwrap()
            .push((query.to_string(), sender));
        receiver
            .map(|answer| {
                answer.unwrap_or_else(|_| Err(SearchError::Provider("abandoned".to_string())))
            })
            .boxed()
    }
}

#[derive(Debug, Default)]
struct DelegateLog {
    selected: Vec<PlaceHandle>,
    errors: Vec<String>,
}

struct FullDelegate(Rc<RefCell<DelegateLog>>);

impl AutocompleteDelegate for FullDelegate {
    fn did_select_location_from_table(&mut self, place: &PlaceHandle) {
        self.0.borrow_mut().selected.push(Arc::clone(place));
    }

    fn search_did_return_error(&mut self, error: &SearchError) {
        self.0.borrow_mut().errors.push(error.to_string());
    }
}

/// Implements only the selection callback.
struct SelectionOnly(Rc<RefCell<DelegateLog>>);

impl AutocompleteDelegate for SelectionOnly {
    fn did_select_location_from_table(&mut self, place: &PlaceHandle) {
        self.0.borrow_mut().selected.push(Arc::clone(place));
    }
}

struct Harness {
    controller: AutocompleteController<FakeField, FakeFactory>,
    gateway: ScriptedGateway,
    view: Rc<RefCell<ViewLog>>,
}

impl Harness {
    fn new() -> Self {
        let gateway = ScriptedGateway::default();
        let view = Rc::new(RefCell::new(ViewLog::default()));
        let controller = AutocompleteController::new(
            &Config::default(),
            FakeField {
                text: String::new(),
            },
            FakeFactory(Rc::clone(&view)),
            Arc::new(gateway.clone()),
        );
        Self {
            controller,
            gateway,
            view,
        }
    }

    fn type_text(&mut self, text: &str) {
        self.controller.input_mut().set_text(text);
        self.controller.on_text_changed(text);
    }

    async fn apply_next(&mut self) -> bool {
        let completion = self
            .controller
            .next_completion()
            .await
            .expect("a search should be in flight");
        self.controller.apply_completion(completion)
    }
}

fn springfield() -> PlaceResult {
    PlaceResult::from_placemark(Placemark {
        sub_thoroughfare: Some("123".to_string()),
        thoroughfare: Some("Main St".to_string()),
        locality: Some("Springfield".to_string()),
        administrative_area: Some("IL".to_string()),
        ..Placemark::default()
    })
}

fn numbered(count: usize) -> Vec<PlaceResult> {
    (1..=count)
        .map(|n| {
            PlaceResult::from_placemark(Placemark {
                sub_thoroughfare: Some(n.to_string()),
                thoroughfare: Some("Elm St".to_string()),
                ..Placemark::default()
            })
        })
        .collect()
}

#[tokio::test]
async fn single_result_scenario() {
    let mut h = Harness::new();
    h.type_text("123 Main");

    assert_eq!(h.gateway.queries(), vec!["123 Main"]);
    assert!(h.view.borrow().loading);
    assert_eq!(h.view.borrow().attached, vec![Rect::new(16.0, 110.0, 288.0, 0.0)]);

    h.gateway.answer("123 Main", Ok(vec![springfield()]));
    assert!(h.apply_next().await);

    let view = h.view.borrow();
    assert!(!view.loading);
    assert_eq!(view.reloads, 2);
    assert_eq!(view.frame, Rect::new(16.0, 110.0, 288.0, 40.0));
    assert_eq!(
        view.rows,
        vec![DropdownRow {
            primary: "123 Main St".to_string(),
            secondary: ", Springfield IL".to_string(),
        }]
    );
}

#[tokio::test]
async fn eight_results_clamp_to_max_height() {
    let mut h = Harness::new();
    h.type_text("Elm Street");
    h.gateway.answer("Elm Street", Ok(numbered(8)));
    h.apply_next().await;

    assert_eq!(h.view.borrow().frame.height, 100.0);
    assert_eq!(h.view.borrow().rows.len(), 8);
    assert_eq!(h.controller.visual_state().height(), 100.0);
}

#[tokio::test]
async fn height_grows_per_row_below_the_cap() {
    for (count, height) in [(0, 0.0), (1, 40.0), (2, 80.0), (4, 160.0), (5, 100.0), (12, 100.0)] {
        let mut h = Harness::new();
        h.type_text("Elm Street");
        h.gateway.answer("Elm Street", Ok(numbered(count)));
        h.apply_next().await;
        assert_eq!(h.view.borrow().frame.height, height, "{count} results");
    }
}

#[tokio::test]
async fn short_text_never_searches() {
    let mut h = Harness::new();
    for text in ["", "1", "12", "123", "1234", "12345"] {
        h.type_text(text);
    }
    assert!(h.gateway.queries().is_empty());
    assert!(!h.controller.has_pending_searches());
    assert!(h.view.borrow().attached.is_empty());
    assert_eq!(h.controller.visual_state(), DropdownVisualState::Hidden);
}

#[tokio::test]
async fn earlier_query_resolving_first_is_discarded() {
    let mut h = Harness::new();
    h.type_text("Main Stre");
    h.type_text("Main Street");
    assert_eq!(h.controller.in_flight_count(), 2);

    h.gateway.answer("Main Stre", Ok(numbered(3)));
    assert!(!h.apply_next().await);
    assert!(h.view.borrow().rows.is_empty());
    assert!(h.view.borrow().loading);

    h.gateway.answer("Main Street", Ok(vec![springfield()]));
    assert!(h.apply_next().await);
    assert_eq!(h.view.borrow().rows.len(), 1);
    assert!(!h.view.borrow().loading);
}

#[tokio::test]
async fn earlier_query_resolving_last_is_discarded() {
    let mut h = Harness::new();
    h.type_text("Main Stre");
    h.type_text("Main Street");

    h.gateway.answer("Main Street", Ok(vec![springfield()]));
    assert!(h.apply_next().await);

    h.gateway.answer("Main Stre", Ok(numbered(3)));
    assert!(!h.apply_next().await);

    assert_eq!(h.view.borrow().rows[0].primary, "123 Main St");
    assert!(matches!(h.controller.search_state(), SearchState::Succeeded(r) if r.len() == 1));
}

#[tokio::test]
async fn errors_keep_rows_and_reach_the_delegate() {
    let mut h = Harness::new();
    let log = Rc::new(RefCell::new(DelegateLog::default()));
    h.controller
        .set_delegate(Some(Box::new(FullDelegate(Rc::clone(&log)))));

    h.type_text("Main Street");
    h.gateway.answer("Main Street", Ok(vec![springfield()]));
    h.apply_next().await;

    h.type_text("Main Street 2");
    h.gateway.answer(
        "Main Street 2",
        Err(SearchError::Provider("quota exceeded".to_string())),
    );
    h.apply_next().await;

    assert_eq!(log.borrow().errors, vec!["provider error: quota exceeded".to_string()]);
    let view = h.view.borrow();
    assert!(!view.loading);
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.frame.height, 40.0);
}

#[tokio::test]
async fn errors_without_delegate_are_absorbed() {
    let mut h = Harness::new();
    h.type_text("Main Street");
    h.gateway
        .answer("Main Street", Err(SearchError::Parse("bad body".to_string())));

    assert!(h.apply_next().await);
    assert!(!h.view.borrow().loading);
    assert!(h.view.borrow().rows.is_empty());
    assert!(matches!(h.controller.search_state(), SearchState::Failed(_)));
}

#[tokio::test]
async fn stale_errors_are_not_reported() {
    let mut h = Harness::new();
    let log = Rc::new(RefCell::new(DelegateLog::default()));
    h.controller
        .set_delegate(Some(Box::new(FullDelegate(Rc::clone(&log)))));

    h.type_text("Main Stre");
    h.type_text("Main Street");
    h.gateway
        .answer("Main Stre", Err(SearchError::Provider("late".to_string())));
    h.apply_next().await;

    assert!(log.borrow().errors.is_empty());
}

#[tokio::test]
async fn delegate_with_only_selection_ignores_errors() {
    let mut h = Harness::new();
    let log = Rc::new(RefCell::new(DelegateLog::default()));
    h.controller
        .set_delegate(Some(Box::new(SelectionOnly(Rc::clone(&log)))));

    h.type_text("Main Street");
    h.gateway
        .answer("Main Street", Err(SearchError::Provider("down".to_string())));
    h.apply_next().await;

    h.type_text("Main Street!");
    h.gateway.answer("Main Street!", Ok(vec![springfield()]));
    h.apply_next().await;
    assert!(h.controller.on_row_selected(0));

    let log = log.borrow();
    assert!(log.errors.is_empty());
    assert_eq!(log.selected.len(), 1);
    assert_eq!(log.selected[0].placemark.locality.as_deref(), Some("Springfield"));
}

#[tokio::test]
async fn selection_fills_the_field_and_detaches() {
    let mut h = Harness::new();
    h.type_text("Main Street");
    h.gateway.answer("Main Street", Ok(vec![springfield()]));
    h.apply_next().await;

    assert!(h.controller.on_row_selected(0));
    assert_eq!(h.controller.input().text(), "123 Main St");
    assert!(!h.controller.is_dropdown_attached());
    assert_eq!(h.view.borrow().detached, 1);
    assert_eq!(h.controller.visual_state(), DropdownVisualState::Hidden);
    assert!(matches!(h.controller.search_state(), SearchState::Idle));
}

#[tokio::test]
async fn selection_uses_the_chosen_row() {
    let mut h = Harness::new();
    let log = Rc::new(RefCell::new(DelegateLog::default()));
    h.controller
        .set_delegate(Some(Box::new(FullDelegate(Rc::clone(&log)))));

    let results = numbered(4);
    let third = results[2].handle();
    h.type_text("Elm Street");
    h.gateway.answer("Elm Street", Ok(results));
    h.apply_next().await;

    assert!(h.controller.on_row_selected(2));
    assert_eq!(h.controller.input().text(), "3 Elm St");

    let log = log.borrow();
    assert_eq!(log.selected.len(), 1);
    assert!(Arc::ptr_eq(&log.selected[0], &third));
    assert_eq!(log.selected[0].placemark.sub_thoroughfare.as_deref(), Some("3"));
}

#[tokio::test]
async fn searches_in_flight_at_selection_are_dropped() {
    let mut h = Harness::new();
    h.type_text("Main Street");
    h.gateway.answer("Main Street", Ok(vec![springfield()]));
    h.apply_next().await;

    h.type_text("Main Street 9");
    h.controller.on_row_selected(0);

    h.gateway.answer("Main Street 9", Ok(numbered(4)));
    assert!(!h.apply_next().await);
    assert!(!h.controller.is_dropdown_attached());
    assert_eq!(h.view.borrow().attached.len(), 1);
}

#[tokio::test]
async fn shrinking_text_leaves_the_dropdown_in_place() {
    let mut h = Harness::new();
    h.type_text("Main Street");
    h.gateway.answer("Main Street", Ok(vec![springfield()]));
    h.apply_next().await;

    h.type_text("Mai");
    assert!(h.controller.is_dropdown_attached());
    assert_eq!(h.view.borrow().rows.len(), 1);
    assert_eq!(h.view.borrow().detached, 0);
}

#[tokio::test]
async fn focus_attaches_an_empty_dropdown_once() {
    let mut h = Harness::new();
    h.controller.on_editing_began();
    h.controller.on_editing_began();

    assert_eq!(h.view.borrow().attached.len(), 1);
    assert!(h.controller.is_dropdown_attached());
    assert_eq!(h.controller.visual_state(), DropdownVisualState::Hidden);

    h.type_text("Main Street");
    assert_eq!(h.view.borrow().attached.len(), 1);
    assert_eq!(h.controller.visual_state(), DropdownVisualState::Loading { height: 0.0 });
}

#[tokio::test]
async fn invalid_row_is_ignored() {
    let mut h = Harness::new();
    h.type_text("Main Street");
    h.gateway.answer("Main Street", Ok(vec![springfield()]));
    h.apply_next().await;

    assert!(!h.controller.on_row_selected(1));
    assert_eq!(h.controller.input().text(), "Main Street");
    assert!(h.controller.is_dropdown_attached());
}

#[tokio::test]
async fn fixture_gateway_end_to_end() {
    let places = vec![
        MapItem {
            name: Some("Town Hall".to_string()),
            placemark: springfield().placemark().clone(),
            ..MapItem::default()
        },
        MapItem {
            placemark: Placemark {
                sub_thoroughfare: Some("742".to_string()),
                thoroughfare: Some("Evergreen Terrace".to_string()),
                locality: Some("Springfield".to_string()),
                ..Placemark::default()
            },
            ..MapItem::default()
        },
    ];
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", serde_json::to_string(&places).unwrap()).unwrap();

    let gateway = FixtureGateway::from_file(file.path()).unwrap();
    let view = Rc::new(RefCell::new(ViewLog::default()));
    let mut controller = AutocompleteController::new(
        &Config::default(),
        FakeField {
            text: String::new(),
        },
        FakeFactory(Rc::clone(&view)),
        Arc::new(gateway),
    );

    controller.on_text_changed("evergreen");
    controller.settle().await;

    assert_eq!(view.borrow().rows.len(), 1);
    assert_eq!(view.borrow().rows[0].primary, "742 Evergreen Terrace");
    assert!(controller.on_row_selected(0));
    assert_eq!(controller.input().text(), "742 Evergreen Terrace");
}
