//! ScreenLayout: Where the grid surface and the status line sit on screen.

use super::rect::Rect;

/// Rows reserved below the grid surface for the status line.
pub const STATUS_ROWS: u16 = 1;

/// Placement of the grid surface and the status line in a terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Terminal rectangle the grid surface occupies.
    ///
    /// May extend past the terminal when the surface is larger than the
    /// screen; drawing is clipped but pointer mapping still uses the full rect.
    pub surface: Rect,
    /// Status line.
    pub status: Rect,
    /// Terminal size.
    pub terminal_size: (u16, u16),
}

impl ScreenLayout {
    /// Compute the layout for a terminal of `width`×`height` cells and a
    /// surface of `surface_cols`×`surface_rows` terminal cells.
    ///
    /// The surface is centered horizontally above the status line.
    pub fn compute(width: u16, height: u16, surface_cols: u16, surface_rows: u16) -> Self {
        let (_, status) = Rect::from_size(width, height)
            .split_vertical(height.saturating_sub(STATUS_ROWS));
        let x = width.saturating_sub(surface_cols) / 2;
        Self {
            surface: Rect::new(x, 0, surface_cols, surface_rows),
            status,
            terminal_size: (width, height),
        }
    }
}
