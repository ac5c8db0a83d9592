//! GridRenderer: paints grid lines and cells onto a [`Canvas`].
//!
//! Surface geometry for a grid of `w`×`h` cells of `cell_size` pixels:
//!
//! ```text
//!  x = 0   cs+1   2(cs+1)            surface width = (cs+1)*w + 1
//!  ┼───────┼───────┼──
//!  │ cell  │ cell  │     cell (row, col) starts at
//!  ┼───────┼───────┼──   (col*(cs+1) + 1, row*(cs+1) + 1)
//! ```
//!
//! Every call repaints the whole grid; nothing is diffed at this level.

use super::canvas::Canvas;
use crate::buffer::Rgb;
use crate::controller::Surface;
use crate::grid::{BitGridView, GridDimensions};
use serde::{Deserialize, Serialize};

/// Colors used by the grid renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Grid lines.
    pub grid: Rgb,
    /// Live cells.
    pub alive: Rgb,
    /// Dead cells.
    pub dead: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            grid: Rgb::from_u32(0xCC_CCCC),
            alive: Rgb::from_u32(0x00_0000),
            dead: Rgb::from_u32(0xFF_FFFF),
        }
    }
}

/// Stateless grid painter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRenderer {
    cell_size: u32,
    palette: Palette,
}

impl GridRenderer {
    /// Create a renderer drawing `cell_size`-pixel square cells.
    pub const fn new(cell_size: u32, palette: Palette) -> Self {
        Self { cell_size, palette }
    }

    /// Cell size in pixels, excluding the border.
    #[inline]
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Distance in pixels between the starts of adjacent cells.
    #[inline]
    pub const fn pitch(&self) -> u32 {
        self.cell_size + 1
    }

    /// The palette.
    #[inline]
    pub const fn palette(&self) -> Palette {
        self.palette
    }

    /// Surface size in pixels for `dims`: `(cell_size + 1) * n + 1` per axis.
    pub const fn surface_size(&self, dims: GridDimensions) -> (u32, u32) {
        (self.pitch() * dims.width + 1, self.pitch() * dims.height + 1)
    }

    /// A blank canvas sized for `dims`.
    pub fn canvas_for(&self, dims: GridDimensions) -> Canvas {
        let (width, height) = self.surface_size(dims);
        Canvas::new(width, height, self.palette.dead)
    }

    /// Draw `width + 1` vertical and `height + 1` horizontal grid lines.
    pub fn draw_grid(&self, canvas: &mut Canvas, dims: GridDimensions) {
        for i in 0..=dims.width {
            canvas.vline(i * self.pitch(), self.palette.grid);
        }
        for j in 0..=dims.height {
            canvas.hline(j * self.pitch(), self.palette.grid);
        }
    }

    /// Paint every cell alive or dead.
    pub fn draw_cells(&self, canvas: &mut Canvas, cells: &BitGridView<'_>) {
        let dims = cells.dimensions();
        for row in 0..dims.height {
            for col in 0..dims.width {
                let color = if cells.is_alive_at(row, col) {
                    self.palette.alive
                } else {
                    self.palette.dead
                };
                canvas.fill_rect(
                    col * self.pitch() + 1,
                    row * self.pitch() + 1,
                    self.cell_size,
                    self.cell_size,
                    color,
                );
            }
        }
    }
}

/// A [`Canvas`] kept in sync with the engine through a [`GridRenderer`].
#[derive(Debug, Clone)]
pub struct GridSurface {
    renderer: GridRenderer,
    canvas: Canvas,
    dims: GridDimensions,
    dirty: bool,
}

impl GridSurface {
    /// Create a surface for a grid of `dims`, with the grid lines drawn.
    pub fn new(renderer: GridRenderer, dims: GridDimensions) -> Self {
        let mut canvas = renderer.canvas_for(dims);
        renderer.draw_grid(&mut canvas, dims);
        Self {
            renderer,
            canvas,
            dims,
            dirty: true,
        }
    }

    /// The renderer.
    #[inline]
    pub const fn renderer(&self) -> &GridRenderer {
        &self.renderer
    }

    /// The painted canvas.
    #[inline]
    pub const fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Mark the canvas as needing to be shown again, e.g. after the
    /// screen it was blitted to was resized.
    pub const fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Whether the canvas changed since the last call, clearing the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl Surface for GridSurface {
    fn draw(&mut self, cells: &BitGridView<'_>) {
        debug_assert_eq!(cells.dimensions(), self.dims);
        self.renderer.draw_grid(&mut self.canvas, self.dims);
        self.renderer.draw_cells(&mut self.canvas, cells);
        self.dirty = true;
    }
}
