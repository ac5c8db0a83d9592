//! Buffer module: Terminal-side data structures for double-buffered output.
//!
//! This module contains:
//! - [`Cell`]: One terminal cell (glyph and colors)
//! - [`Buffer`]: A grid of cells representing the terminal screen
//! - [`Rgb`]: True-color representation
//! - [`diff`]: Diffing engine for generating minimal ANSI sequences

mod cell;
#[allow(clippy::module_inception)]
mod buffer;
pub mod diff;

pub use cell::{Cell, CellFlags, Rgb, UPPER_HALF_BLOCK};
pub use buffer::Buffer;
