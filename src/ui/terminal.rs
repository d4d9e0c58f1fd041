//! A [`ListView`] that draws the dropdown as ANSI text.
//!
//! Layout units map onto terminal cells: a frame `width` is a column count and
//! each row of `row_height` units takes one line. Only `floor(height /
//! row_height)` rows fit, so a dropdown clamped to its maximum height shows a
//! partial list just like a scrolled native table would.

use crate::ui::capabilities::{ListView, ListViewFactory, Rect};
use crate::ui::helpers::{display_width, fit};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DropdownRow;
use std::fmt::Write as _;

/// Terminal-backed dropdown view.
#[derive(Debug, Clone)]
pub struct TerminalListView {
    theme: Theme,
    row_height: f32,
    frame: Rect,
    loading: bool,
    rows: Vec<DropdownRow>,
    attached: bool,
}

impl TerminalListView {
    #[must_use]
    pub fn new(theme: Theme, row_height: f32, frame: Rect) -> Self {
        Self {
            theme,
            row_height,
            frame,
            loading: false,
            rows: vec![],
            attached: true,
        }
    }

    /// Rows that fit in the current height.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn visible_row_count(&self) -> usize {
        if self.row_height <= 0.0 {
            return 0;
        }
        let fit = (self.frame.height / self.row_height).floor().max(0.0) as usize;
        fit.min(self.rows.len())
    }

    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn frame(&self) -> Rect {
        self.frame
    }

    #[must_use]
    pub fn rows(&self) -> &[DropdownRow] {
        &self.rows
    }

    /// Draws the dropdown. Detached views draw nothing.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.attached {
            return out;
        }

        let width = (self.frame.width.max(4.0)) as usize;
        let inner = width - 2;
        let colors = &self.theme.colors;
        let border = Theme::fg(&colors.border);

        let _ = writeln!(out, "{border}┌{}┐{}", "─".repeat(inner), Theme::reset());

        if self.loading {
            let _ = writeln!(
                out,
                "{border}│{}{}{border}│{}",
                Theme::fg(&colors.loading_fg),
                fit(" searching…", inner),
                Theme::reset()
            );
        }

        let visible = self.visible_row_count();
        if visible == 0 && !self.loading {
            let _ = writeln!(
                out,
                "{border}│{}{}{}{border}│{}",
                Theme::dim(),
                Theme::fg(&colors.empty_fg),
                fit(" no places", inner),
                Theme::reset()
            );
        }

        for (index, row) in self.rows.iter().take(visible).enumerate() {
            let label = format!(" {index:>2} ");
            let primary_width = display_width(&row.primary);
            let rest = inner.saturating_sub(display_width(&label));

            let primary = fit(&row.primary, rest.min(primary_width));
            let secondary = fit(&row.secondary, rest.saturating_sub(display_width(&primary)));

            let _ = writeln!(
                out,
                "{border}│{}{label}{}{}{primary}{}{}{}{secondary}{}{border}│{}",
                Theme::fg(&colors.index_fg),
                Theme::bold(),
                Theme::fg(&colors.primary_fg),
                Theme::reset(),
                Theme::dim(),
                Theme::fg(&colors.secondary_fg),
                Theme::reset(),
                Theme::reset()
            );
        }

        if self.rows.len() > visible && visible > 0 {
            let hidden = self.rows.len() - visible;
            let _ = writeln!(
                out,
                "{border}│{}{}{border}│{}",
                Theme::fg(&colors.empty_fg),
                fit(&format!(" +{hidden} more"), inner),
                Theme::reset()
            );
        }

        let _ = write!(out, "{border}└{}┘{}", "─".repeat(inner), Theme::reset());
        out
    }
}

impl ListView for TerminalListView {
    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn reload(&mut self, rows: &[DropdownRow]) {
        self.rows = rows.to_vec();
    }

    fn detach(&mut self) {
        self.attached = false;
        self.rows.clear();
    }
}

/// Creates [`TerminalListView`]s sharing one theme.
#[derive(Debug, Clone)]
pub struct TerminalListFactory {
    theme: Theme,
    row_height: f32,
}

impl TerminalListFactory {
    #[must_use]
    pub const fn new(theme: Theme, row_height: f32) -> Self {
        Self { theme, row_height }
    }
}

impl ListViewFactory for TerminalListFactory {
    type View = TerminalListView;

    fn attach(&mut self, frame: Rect) -> TerminalListView {
        TerminalListView::new(self.theme.clone(), self.row_height, frame)
    }
}
