//! Interfaces of the platform widgets the field is built on.
//!
//! The autocomplete core never draws anything itself. It drives a bound
//! [`TextInput`] and creates [`ListView`]s through a [`ListViewFactory`];
//! the host platform (a GUI toolkit, a terminal, a test fake) implements them.
//!
//! Events flow the other way through direct calls on the controller: the host
//! forwards its text-changed, editing-began, and row-selected notifications to
//! [`AutocompleteController`](crate::app::AutocompleteController).

use crate::ui::viewmodel::DropdownRow;

/// Axis-aligned rectangle in the host's layout units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle directly below this one, same x and width.
    #[must_use]
    pub fn below(&self, height: f32) -> Self {
        Self::new(self.x, self.y + self.height, self.width, height)
    }

    /// The same rectangle with a new height; the top-left corner stays put.
    #[must_use]
    pub const fn with_height(self, height: f32) -> Self {
        Self::new(self.x, self.y, self.width, height)
    }
}

/// The single-line text field the autocomplete is bound to.
pub trait TextInput {
    /// Current text.
    fn text(&self) -> String;

    /// Replaces the text. Must not emit a text-changed notification back into
    /// the controller.
    fn set_text(&mut self, text: &str);

    /// Position and size of the field in its parent container.
    fn frame(&self) -> Rect;
}

/// A selectable list shown as the dropdown.
///
/// Row taps are reported by the host to
/// [`AutocompleteController::on_row_selected`](crate::app::AutocompleteController::on_row_selected)
/// with an index in `0..rows.len()`.
pub trait ListView {
    /// Moves or resizes the view.
    fn set_frame(&mut self, frame: Rect);

    /// Shows or hides the loading indicator.
    fn set_loading(&mut self, loading: bool);

    /// Replaces all rows.
    fn reload(&mut self, rows: &[DropdownRow]);

    /// Removes the view from its parent container.
    fn detach(&mut self);
}

/// Creates list views attached to the field's parent container.
pub trait ListViewFactory {
    type View: ListView;

    /// Creates a view and attaches it at `frame`.
    fn attach(&mut self, frame: Rect) -> Self::View;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_spans_the_same_width() {
        let field = Rect::new(16.0, 80.0, 288.0, 30.0);
        assert_eq!(field.below(0.0), Rect::new(16.0, 110.0, 288.0, 0.0));
    }

    #[test]
    fn with_height_keeps_the_anchor() {
        let frame = Rect::new(16.0, 110.0, 288.0, 0.0).with_height(40.0);
        assert_eq!((frame.x, frame.y, frame.height), (16.0, 110.0, 40.0));
    }
}
