//! Shared rendering utilities for the terminal dropdown.
//!
//! Widths are counted in grapheme clusters, never in bytes.

use unicode_segmentation::UnicodeSegmentation;

/// Number of grapheme clusters in `text`.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Cuts `text` to at most `width` graphemes, ending in `…` when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut cut: String = text.graphemes(true).take(width - 1).collect();
    cut.push('…');
    cut
}

/// Truncates or right-pads `text` to exactly `width` graphemes.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let mut fitted = truncate(text, width);
    let pad = width.saturating_sub(display_width(&fitted));
    fitted.push_str(&" ".repeat(pad));
    fitted
}
