//! Fixed stamp patterns and the bounds check that guards them.
//!
//! A stamp is anchored on a cell and writes into the square of
//! `required_margin` cells around it, so the anchor must keep that much
//! clearance from every edge.

use crate::grid::{CellPos, GridDimensions};

/// A named stamp and the clearance its anchor needs from each grid edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternSpec {
    /// Display name.
    pub name: &'static str,
    /// Cells of clearance required on every side of the anchor.
    pub required_margin: u32,
}

/// Glider, stamped into a cleared 5x5 square.
pub const GLIDER: PatternSpec = PatternSpec {
    name: "glider",
    required_margin: 2,
};

/// Period-3 pulsar, stamped into a cleared 13x13 square.
pub const PULSAR: PatternSpec = PatternSpec {
    name: "pulsar",
    required_margin: 6,
};

/// Live cells of the glider relative to its anchor, as (row, col) offsets.
///
/// ```text
/// . # .
/// . . #
/// # # #
/// ```
pub const GLIDER_CELLS: [(i32, i32); 5] = [(-1, 0), (0, 1), (1, -1), (1, 0), (1, 1)];

/// Live cells of the pulsar relative to its anchor.
///
/// Arms sit 1 and 6 cells from the center line, spanning offsets 2..=4.
pub fn pulsar_cells() -> impl Iterator<Item = (i32, i32)> {
    const ARM: [i32; 3] = [2, 3, 4];
    const LINE: [i32; 2] = [1, 6];
    [-1, 1].into_iter().flat_map(|row_sign| {
        [-1, 1].into_iter().flat_map(move |col_sign| {
            LINE.into_iter().flat_map(move |line| {
                ARM.into_iter().flat_map(move |arm| {
                    [(row_sign * line, col_sign * arm), (row_sign * arm, col_sign * line)]
                })
            })
        })
    })
}

/// Whether a stamp needing `margin` cells of clearance fits at (row, col)
/// on a `height`×`width` grid.
///
/// True iff `margin <= row <= height - (margin + 1)` and the same holds
/// for `col` against `width`.
pub fn fits(row: u32, col: u32, height: u32, width: u32, margin: u32) -> bool {
    let (row, col, margin) = (i64::from(row), i64::from(col), i64::from(margin));
    let (height, width) = (i64::from(height), i64::from(width));
    row >= margin && row <= height - (margin + 1) && col >= margin && col <= width - (margin + 1)
}

impl PatternSpec {
    /// Whether this stamp fits with its anchor at `pos`.
    #[inline]
    pub fn fits_at(&self, pos: CellPos, dims: GridDimensions) -> bool {
        fits(pos.row, pos.col, dims.height, dims.width, self.required_margin)
    }
}
