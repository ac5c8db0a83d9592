//! Decoding of the engine's packed cell buffer.
//!
//! One bit per cell, least-significant bit first within each byte:
//!
//! ```text
//! byte:   0                     1
//! bit:    0 1 2 3 4 5 6 7       0 1 2 ...
//! index:  0 1 2 3 4 5 6 7       8 9 10 ...
//! ```

use super::GridDimensions;

/// Number of bytes needed to pack `cells` bits.
#[inline]
pub const fn packed_len(cells: usize) -> usize {
    cells.div_ceil(8)
}

/// Check whether the bit for `index` is set in `buffer`.
///
/// # Panics
///
/// Panics if `index / 8` is past the end of `buffer`. Callers derive
/// indices from the grid dimensions, so this is a bookkeeping bug.
#[inline]
pub fn is_alive(index: usize, buffer: &[u8]) -> bool {
    let mask = 1u8 << (index % 8);
    buffer[index / 8] & mask == mask
}

/// A borrowed, read-only view of one frame of engine cells.
///
/// The view borrows the engine, so it cannot outlive the next mutating
/// engine call. Build a fresh one for every render.
#[derive(Debug, Clone, Copy)]
pub struct BitGridView<'a> {
    cells: &'a [u8],
    dims: GridDimensions,
}

impl<'a> BitGridView<'a> {
    /// Wrap an engine buffer.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is shorter than `ceil(width * height / 8)` bytes.
    pub fn new(cells: &'a [u8], dims: GridDimensions) -> Self {
        assert!(
            cells.len() >= packed_len(dims.cell_count()),
            "cell buffer holds {} bytes, {}x{} grid needs {}",
            cells.len(),
            dims.width,
            dims.height,
            packed_len(dims.cell_count()),
        );
        Self { cells, dims }
    }

    /// Grid dimensions.
    #[inline]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    /// Raw packed bytes.
    #[inline]
    pub const fn bytes(&self) -> &'a [u8] {
        self.cells
    }

    /// Check the cell at (row, col).
    #[inline]
    pub fn is_alive_at(&self, row: u32, col: u32) -> bool {
        debug_assert!(row < self.dims.height && col < self.dims.width);
        is_alive(self.dims.index(row, col), self.cells)
    }

    /// Count live cells.
    pub fn live_count(&self) -> usize {
        (0..self.dims.cell_count())
            .filter(|&i| is_alive(i, self.cells))
            .count()
    }
}
