//! Universe: reference Conway engine on a toroidal grid.
//!
//! Standard B3/S23 rules. Edges wrap, so every cell has eight neighbors.
//! Cells are stored packed, one bit each, least-significant bit first,
//! which is exactly the layout [`Simulation::cells`] promises.

use super::{Simulation, SimulationFactory};
use crate::grid::{packed_len, GridDimensions};
use crate::pattern::{pulsar_cells, GLIDER, GLIDER_CELLS, PULSAR};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A Game of Life grid.
#[derive(Clone)]
pub struct Universe {
    width: u32,
    height: u32,
    cells: Vec<u8>,
    /// Next-generation scratch space, swapped with `cells` on every tick.
    next: Vec<u8>,
}

impl Universe {
    /// Create a universe with every cell dead.
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Universe dimensions must be non-zero");
        let len = packed_len(GridDimensions::new(width, height).cell_count());
        Self {
            width,
            height,
            cells: vec![0; len],
            next: vec![0; len],
        }
    }

    /// Create a universe where each cell is alive with probability `density`.
    pub fn random<R: Rng + ?Sized>(width: u32, height: u32, density: f64, rng: &mut R) -> Self {
        let mut universe = Self::new(width, height);
        for idx in 0..universe.cell_count() {
            if rng.gen_bool(density) {
                universe.cells[idx / 8] |= 1 << (idx % 8);
            }
        }
        universe
    }

    #[inline]
    const fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    #[inline]
    const fn index(&self, row: u32, col: u32) -> usize {
        (row as usize) * (self.width as usize) + (col as usize)
    }

    /// Check the cell at (row, col).
    #[inline]
    pub fn get(&self, row: u32, col: u32) -> bool {
        let idx = self.index(row, col);
        self.cells[idx / 8] & (1 << (idx % 8)) != 0
    }

    /// Set the cell at (row, col).
    #[inline]
    pub fn set(&mut self, row: u32, col: u32, alive: bool) {
        let idx = self.index(row, col);
        if alive {
            self.cells[idx / 8] |= 1 << (idx % 8);
        } else {
            self.cells[idx / 8] &= !(1 << (idx % 8));
        }
    }

    /// Mark every listed (row, col) alive.
    pub fn set_cells(&mut self, cells: &[(u32, u32)]) {
        for &(row, col) in cells {
            self.set(row, col, true);
        }
    }

    /// Number of live cells.
    pub fn live_count(&self) -> usize {
        (0..self.cell_count())
            .filter(|&idx| self.cells[idx / 8] & (1 << (idx % 8)) != 0)
            .count()
    }

    /// Live neighbors of (row, col), wrapping at the edges.
    fn live_neighbor_count(&self, row: u32, col: u32) -> u8 {
        let mut count = 0;
        // Adding `dim - 1` modulo `dim` steps back by one without underflow.
        for delta_row in [self.height - 1, 0, 1] {
            for delta_col in [self.width - 1, 0, 1] {
                if delta_row == 0 && delta_col == 0 {
                    continue;
                }
                let neighbor_row = (row + delta_row) % self.height;
                let neighbor_col = (col + delta_col) % self.width;
                count += u8::from(self.get(neighbor_row, neighbor_col));
            }
        }
        count
    }

    /// Wrap a signed offset from (row, col) back onto the torus.
    fn wrap(&self, row: u32, col: u32, d_row: i32, d_col: i32) -> (u32, u32) {
        let r = (i64::from(row) + i64::from(d_row)).rem_euclid(i64::from(self.height));
        let c = (i64::from(col) + i64::from(d_col)).rem_euclid(i64::from(self.width));
        // rem_euclid results are below the u32 dimensions
        (u32::try_from(r).unwrap_or(0), u32::try_from(c).unwrap_or(0))
    }

    /// Clear the square of radius `margin` around (row, col), then set `live`.
    fn stamp(&mut self, row: u32, col: u32, margin: u32, live: impl IntoIterator<Item = (i32, i32)>) {
        let m = i32::try_from(margin).unwrap_or(i32::MAX);
        for d_row in -m..=m {
            for d_col in -m..=m {
                let (r, c) = self.wrap(row, col, d_row, d_col);
                self.set(r, c, false);
            }
        }
        for (d_row, d_col) in live {
            let (r, c) = self.wrap(row, col, d_row, d_col);
            self.set(r, c, true);
        }
    }
}

impl Simulation for Universe {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn tick(&mut self) {
        self.next.fill(0);
        let (mut born, mut died) = (0usize, 0usize);

        for row in 0..self.height {
            for col in 0..self.width {
                let alive = self.get(row, col);
                let next_alive = match (alive, self.live_neighbor_count(row, col)) {
                    (true, 2 | 3) | (false, 3) => true,
                    _ => false,
                };
                match (alive, next_alive) {
                    (true, false) => died += 1,
                    (false, true) => born += 1,
                    _ => {}
                }
                if next_alive {
                    let idx = self.index(row, col);
                    self.next[idx / 8] |= 1 << (idx % 8);
                }
            }
        }

        std::mem::swap(&mut self.cells, &mut self.next);
        log::trace!("tick: {born} born, {died} died");
    }

    fn cells(&self) -> &[u8] {
        &self.cells
    }

    fn toggle_cell(&mut self, row: u32, col: u32) {
        let alive = self.get(row, col);
        self.set(row, col, !alive);
    }

    fn spawn_glider(&mut self, row: u32, col: u32) {
        debug_assert!(GLIDER.fits_at(crate::grid::CellPos::new(row, col), self.dimensions()));
        self.stamp(row, col, GLIDER.required_margin, GLIDER_CELLS);
    }

    fn spawn_pulsar(&mut self, row: u32, col: u32) {
        debug_assert!(PULSAR.fits_at(crate::grid::CellPos::new(row, col), self.dimensions()));
        self.stamp(row, col, PULSAR.required_margin, pulsar_cells());
    }
}

impl PartialEq for Universe {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Eq for Universe {}

impl std::fmt::Debug for Universe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Universe")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("live", &self.live_count())
            .finish_non_exhaustive()
    }
}

impl std::fmt::Display for Universe {
    /// One line per row: `◼` alive, `◻` dead.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                f.write_str(if self.get(row, col) { "◼" } else { "◻" })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// Produces [`Universe`]s of one fixed size.
#[derive(Debug, Clone)]
pub struct UniverseFactory {
    dims: GridDimensions,
    density: f64,
    rng: StdRng,
}

impl UniverseFactory {
    /// Create a factory. With `seed` set, the sequence of random
    /// universes is reproducible.
    pub fn new(dims: GridDimensions, density: f64, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self { dims, density, rng }
    }

    /// Dimensions of every universe this factory builds.
    pub const fn dimensions(&self) -> GridDimensions {
        self.dims
    }
}

impl SimulationFactory for UniverseFactory {
    type Output = Universe;

    fn random(&mut self) -> Universe {
        Universe::random(self.dims.width, self.dims.height, self.density, &mut self.rng)
    }

    fn empty(&mut self) -> Universe {
        Universe::new(self.dims.width, self.dims.height)
    }
}
