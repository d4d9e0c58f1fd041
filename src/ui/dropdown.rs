//! The transient dropdown under the field.
//!
//! [`ResultListController`] owns one attached [`ListView`] plus the rows it
//! shows, its height, and the loading flag. It renders each [`PlaceResult`]
//! through the place formatter and resizes the view with the formula in
//! [`DropdownMetrics::height_for`]. It does not decide what a selection means;
//! the controller that owns it does.

use crate::domain::{format_locality_line, format_street_line, PlaceResult, SearchError};
use crate::ui::capabilities::{ListView, ListViewFactory, Rect};
use crate::ui::viewmodel::{DropdownRow, DropdownVisualState};
use crate::Config;

/// Inputs of the dropdown height formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropdownMetrics {
    /// Height of one row.
    pub row_height: f32,

    /// Height used once the row cap is reached.
    pub max_height: f32,

    /// Number of results at which the height switches to `max_height`.
    pub cap_rows: usize,
}

impl Default for DropdownMetrics {
    fn default() -> Self {
        Self {
            row_height: 40.0,
            max_height: 100.0,
            cap_rows: 5,
        }
    }
}

impl From<&Config> for DropdownMetrics {
    fn from(config: &Config) -> Self {
        Self {
            row_height: config.row_height,
            max_height: config.max_visible_height,
            cap_rows: config.cap_rows,
        }
    }
}

impl DropdownMetrics {
    /// Dropdown height for `count` results.
    ///
    /// `count * row_height` below the cap, `max_height` from the cap on.
    ///
    /// ```
    /// use mapcomplete::ui::DropdownMetrics;
    ///
    /// let metrics = DropdownMetrics::default();
    /// assert_eq!(metrics.height_for(1), 40.0);
    /// assert_eq!(metrics.height_for(8), 100.0);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn height_for(&self, count: usize) -> f32 {
        if count < self.cap_rows {
            count as f32 * self.row_height
        } else {
            self.max_height
        }
    }
}

/// Owner of the attached dropdown view.
#[derive(Debug)]
pub struct ResultListController<V: ListView> {
    view: V,
    frame: Rect,
    metrics: DropdownMetrics,
    rows: Vec<DropdownRow>,
    loading: bool,
    has_results: bool,
}

impl<V: ListView> ResultListController<V> {
    /// Creates a view directly below `anchor`, spanning its width, with
    /// height 0 and no rows.
    pub fn attach<F>(factory: &mut F, anchor: Rect, metrics: DropdownMetrics) -> Self
    where
        F: ListViewFactory<View = V>,
    {
        let frame = anchor.below(0.0);
        tracing::debug!(x = frame.x, y = frame.y, width = frame.width, "attaching dropdown");

        let mut view = factory.attach(frame);
        view.reload(&[]);

        Self {
            view,
            frame,
            metrics,
            rows: vec![],
            loading: false,
            has_results: false,
        }
    }

    /// Turns the loading indicator on or off.
    pub fn show(&mut self, loading: bool) {
        if self.loading != loading {
            self.loading = loading;
            self.view.set_loading(loading);
        }
    }

    /// Replaces the rows with `results` and resizes to fit them.
    ///
    /// Stops the loading indicator. The top-left corner stays where it is.
    pub fn update(&mut self, results: Vec<PlaceResult>) {
        self.rows = results.iter().map(Self::row_for).collect();
        self.has_results = true;

        let height = self.metrics.height_for(self.rows.len());
        self.frame = self.frame.with_height(height);

        self.show(false);
        self.view.set_frame(self.frame);
        self.view.reload(&self.rows);

        tracing::debug!(row_count = self.rows.len(), height = height, "dropdown updated");
    }

    /// Stops the loading indicator after a failed search.
    ///
    /// Rows and height are left as they were.
    pub fn update_error(&mut self, error: &SearchError) {
        tracing::debug!(error = %error, kept_rows = self.rows.len(), "dropdown keeps previous rows");
        self.show(false);
    }

    /// Detaches the view and drops the controller.
    pub fn dismiss(mut self) {
        tracing::debug!("dismissing dropdown");
        self.view.detach();
    }

    #[must_use]
    pub fn rows(&self) -> &[DropdownRow] {
        &self.rows
    }

    #[must_use]
    pub const fn frame(&self) -> Rect {
        self.frame
    }

    #[must_use]
    pub const fn height(&self) -> f32 {
        self.frame.height
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The attached view.
    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    /// Derives the current visual state.
    ///
    /// An attached dropdown that has not been loading and has never received
    /// results (focus only, or a first search that failed) reports `Hidden`.
    #[must_use]
    pub fn visual_state(&self) -> DropdownVisualState {
        if self.loading {
            DropdownVisualState::Loading {
                height: self.frame.height,
            }
        } else if !self.has_results {
            DropdownVisualState::Hidden
        } else {
            DropdownVisualState::ShowingResults {
                rows: self.rows.clone(),
                height: self.frame.height,
            }
        }
    }

    fn row_for(result: &PlaceResult) -> DropdownRow {
        DropdownRow {
            primary: format_street_line(result.placemark()),
            secondary: format_locality_line(result.placemark()),
        }
    }
}
