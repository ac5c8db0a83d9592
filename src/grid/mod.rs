//! Grid geometry shared by the engine, the renderer and pointer mapping.
//!
//! - [`GridDimensions`]: width and height of one simulation instance
//! - [`CellPos`]: a (row, col) grid coordinate
//! - [`BitGridView`]: live/dead queries over an engine's packed cell buffer

mod bits;

pub use bits::{is_alive, packed_len, BitGridView};

/// Width and height of a grid, fixed for the lifetime of one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridDimensions {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
}

impl GridDimensions {
    /// Create new dimensions.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total number of cells.
    #[inline]
    pub const fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Linear index of (row, col): `row * width + col`.
    #[inline]
    pub const fn index(&self, row: u32, col: u32) -> usize {
        (row as usize) * (self.width as usize) + (col as usize)
    }

    /// Check whether (row, col) lies on the grid.
    #[inline]
    pub const fn contains(&self, pos: CellPos) -> bool {
        pos.row < self.height && pos.col < self.width
    }
}

/// A cell coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellPos {
    /// Row (0 = top).
    pub row: u32,
    /// Column (0 = left).
    pub col: u32,
}

impl CellPos {
    /// Create a new position.
    #[inline]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for CellPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
