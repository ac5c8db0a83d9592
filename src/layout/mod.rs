//! Layout module: Screen placement of the grid surface and status line.
//!
//! Placement is computed once at start-up and again on terminal resize.

mod rect;
mod screen;

pub use rect::Rect;
pub use screen::ScreenLayout;
