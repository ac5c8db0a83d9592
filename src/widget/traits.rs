//! The `Widget` trait for terminal-cell UI components.

use crate::buffer::Buffer;
use crate::layout::Rect;

/// A UI component that draws itself into a region of a [`Buffer`].
pub trait Widget {
    /// Move or resize the widget. Called when the layout changes.
    fn set_bounds(&mut self, bounds: Rect);

    /// Draw into `buffer`, touching only cells within the bounds.
    fn render(&self, buffer: &mut Buffer);

    /// Whether content changed since the last [`clear_redraw`](Self::clear_redraw).
    fn needs_redraw(&self) -> bool;

    /// Clear the redraw flag after rendering.
    fn clear_redraw(&mut self);
}
