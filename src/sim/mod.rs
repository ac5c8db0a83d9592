//! Simulation engine contract.
//!
//! The engine owns the grid state and the transition rule. Everything
//! else in the crate talks to it through [`Simulation`], and replaces it
//! wholesale through a [`SimulationFactory`] on reset and clear.

mod universe;

pub use universe::{Universe, UniverseFactory};

use crate::grid::{BitGridView, GridDimensions};

/// A running cellular automaton.
///
/// Dimensions never change for the lifetime of an instance. The slice
/// returned by [`cells`](Self::cells) is packed one bit per cell,
/// least-significant bit first, and is only valid until the next `&mut`
/// call.
pub trait Simulation {
    /// Number of columns.
    fn width(&self) -> u32;

    /// Number of rows.
    fn height(&self) -> u32;

    /// Advance exactly one generation.
    fn tick(&mut self);

    /// Packed cell bits, at least `ceil(width * height / 8)` bytes.
    fn cells(&self) -> &[u8];

    /// Flip a single cell.
    fn toggle_cell(&mut self, row: u32, col: u32);

    /// Stamp a glider centered on (row, col). Bounds are checked by the caller.
    fn spawn_glider(&mut self, row: u32, col: u32);

    /// Stamp a pulsar centered on (row, col). Bounds are checked by the caller.
    fn spawn_pulsar(&mut self, row: u32, col: u32);

    /// Grid dimensions.
    fn dimensions(&self) -> GridDimensions {
        GridDimensions::new(self.width(), self.height())
    }

    /// Borrow the current cells as a decoded view.
    fn view(&self) -> BitGridView<'_> {
        BitGridView::new(self.cells(), self.dimensions())
    }
}

/// Builds fresh engine instances of one fixed size.
pub trait SimulationFactory {
    /// The engine type produced.
    type Output: Simulation;

    /// A new instance in an engine-chosen randomized state.
    fn random(&mut self) -> Self::Output;

    /// A new instance with every cell dead.
    fn empty(&mut self) -> Self::Output;
}
