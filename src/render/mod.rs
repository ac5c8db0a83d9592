//! Rendering: engine cells to pixels to terminal cells.
//!
//! - [`Canvas`]: an RGB pixel surface
//! - [`GridRenderer`]: paints grid lines and cells onto a canvas
//! - [`GridSurface`]: a canvas the animation controller draws into
//! - [`Presenter`]: half-block blitting and diffed terminal output

mod canvas;
mod grid_renderer;
mod present;

pub use canvas::Canvas;
pub use grid_renderer::{GridRenderer, GridSurface, Palette};
pub use present::{blit, PresentStats, Presenter};
