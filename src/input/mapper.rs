//! CoordinateMapper: pointer positions to grid cells.
//!
//! The pointer lives in terminal space while the grid lives in canvas
//! pixels, and the two do not share a scale: a terminal row shows two
//! pixel rows. Positions are scaled into surface pixels, divided by the
//! cell pitch and clamped onto the grid.

use crate::grid::{CellPos, GridDimensions};
use crate::layout::Rect;

/// Maps pointer positions over one displayed surface to grid cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    /// Where the surface is displayed, in pointer units.
    rect: Rect,
    /// Surface size in pixels.
    pixel_width: u32,
    pixel_height: u32,
    cell_size: u32,
    dims: GridDimensions,
}

impl CoordinateMapper {
    /// Create a mapper for a `pixel_width`×`pixel_height` surface shown in
    /// `rect`, drawn with `cell_size`-pixel cells for a grid of `dims`.
    pub const fn new(
        rect: Rect,
        pixel_width: u32,
        pixel_height: u32,
        cell_size: u32,
        dims: GridDimensions,
    ) -> Self {
        Self {
            rect,
            pixel_width,
            pixel_height,
            cell_size,
            dims,
        }
    }

    /// Display rectangle of the surface.
    #[inline]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Horizontal and vertical pixels per pointer unit.
    pub fn scale(&self) -> (f64, f64) {
        (
            f64::from(self.pixel_width) / f64::from(self.rect.width.max(1)),
            f64::from(self.pixel_height) / f64::from(self.rect.height.max(1)),
        )
    }

    /// Cell under the pointer at (`x`, `y`).
    ///
    /// Always on the grid: positions left of, above, right of or below the
    /// surface clamp to the nearest edge cell.
    pub fn to_cell(&self, x: f64, y: f64) -> CellPos {
        let (scale_x, scale_y) = self.scale();
        let pitch = f64::from(self.cell_size + 1);
        let local_x = (x - f64::from(self.rect.x)) * scale_x;
        let local_y = (y - f64::from(self.rect.y)) * scale_y;
        CellPos::new(
            clamp_to_axis((local_y / pitch).floor(), self.dims.height),
            clamp_to_axis((local_x / pitch).floor(), self.dims.width),
        )
    }

    /// Cell under a click on terminal cell (`column`, `row`), taking the
    /// centre of that terminal cell as the pointer position.
    pub fn terminal_to_cell(&self, column: u16, row: u16) -> CellPos {
        self.to_cell(f64::from(column) + 0.5, f64::from(row) + 0.5)
    }
}

/// Clamp a floored index to `[0, len - 1]`.
fn clamp_to_axis(index: f64, len: u32) -> u32 {
    let max = len.saturating_sub(1);
    if index.is_nan() || index <= 0.0 {
        0
    } else if index >= f64::from(max) {
        max
    } else {
        // In (0, max): the cast is exact
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = index as u32;
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// 64x64 grid of 1-pixel cells: 129x129 pixels shown in 129x65 terminal cells.
    fn terminal_mapper() -> CoordinateMapper {
        CoordinateMapper::new(
            Rect::new(10, 0, 129, 65),
            129,
            129,
            1,
            GridDimensions::new(64, 64),
        )
    }

    #[test]
    fn test_origin_click_maps_to_first_cell() {
        let mapper = terminal_mapper();
        assert_eq!(mapper.terminal_to_cell(10, 0), CellPos::new(0, 0));
    }

    #[test]
    fn test_vertical_scale_is_applied() {
        let mapper = terminal_mapper();
        // Terminal row 10 covers pixel rows ~20..22, i.e. grid row 10
        assert_eq!(mapper.terminal_to_cell(10, 10).row, 10);
        // Terminal column 10 past the origin is pixel column ~10.5, grid column 5
        assert_eq!(mapper.terminal_to_cell(20, 10).col, 5);
    }

    #[test]
    fn test_clamps_outside_surface() {
        let mapper = terminal_mapper();
        assert_eq!(mapper.terminal_to_cell(0, 0), CellPos::new(0, 0));
        assert_eq!(mapper.terminal_to_cell(500, 300), CellPos::new(63, 63));
        assert_eq!(mapper.to_cell(-40.0, 1e9), CellPos::new(63, 0));
    }

    #[test]
    fn test_one_to_one_scale() {
        let mapper = CoordinateMapper::new(
            Rect::new(0, 0, 385, 385),
            385,
            385,
            5,
            GridDimensions::new(64, 64),
        );
        assert_eq!(mapper.to_cell(6.0, 0.0), CellPos::new(0, 1));
        assert_eq!(mapper.to_cell(5.9, 11.9), CellPos::new(1, 0));
    }

    #[test]
    fn test_zero_sized_rect_does_not_divide_by_zero() {
        let mapper = CoordinateMapper::new(Rect::ZERO, 9, 9, 1, GridDimensions::new(4, 4));
        let cell = mapper.to_cell(3.0, 3.0);
        assert!(cell.row < 4 && cell.col < 4);
    }

    proptest! {
        #[test]
        fn prop_always_on_grid(
            x in -1.0e6f64..1.0e6,
            y in -1.0e6f64..1.0e6,
            width in 1u32..200,
            height in 1u32..200,
            cell_size in 1u32..8,
        ) {
            let dims = GridDimensions::new(width, height);
            let mapper = CoordinateMapper::new(
                Rect::new(3, 2, 80, 24),
                (cell_size + 1) * width + 1,
                (cell_size + 1) * height + 1,
                cell_size,
                dims,
            );
            let cell = mapper.to_cell(x, y);
            prop_assert!(dims.contains(cell));
            prop_assert_eq!(cell, mapper.to_cell(x, y));
        }

        #[test]
        fn prop_cell_centre_maps_back(row in 0u32..64, col in 0u32..64) {
            let mapper = terminal_mapper();
            let (scale_x, scale_y) = mapper.scale();
            // Centre of the cell's pixel square, converted back to pointer units
            let centre_x = f64::from(col * 2 + 1) + 0.5;
            let centre_y = f64::from(row * 2 + 1) + 0.5;
            let x = 10.0 + centre_x / scale_x;
            let y = centre_y / scale_y;
            prop_assert_eq!(mapper.to_cell(x, y), CellPos::new(row, col));
        }
    }
}
