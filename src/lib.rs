//! # lifeframe
//!
//! A terminal front end for Conway's Game of Life.
//!
//! The simulation engine owns the grid and the rules. This crate decodes
//! its packed cell buffer, paints it onto a pixel canvas, drives the
//! animation at a controllable number of generations per frame, turns
//! mouse clicks into cell toggles and pattern stamps, and keeps rolling
//! frame-rate statistics.
//!
//! ## Core Concepts
//!
//! - **Engine contract**: [`Simulation`] and [`SimulationFactory`], with
//!   [`Universe`] as the bundled toroidal engine
//! - **Packed cells**: one bit per cell, least-significant bit first, read
//!   through a borrowed [`BitGridView`]
//! - **Half-block canvas**: each terminal cell shows two pixel rows, and
//!   output is double-buffered and diffed
//! - **Single-threaded frames**: helper threads only deliver input events
//!   and frame ticks
//!
//! ## Example
//!
//! ```rust
//! use lifeframe::{Simulation, Universe};
//!
//! let mut universe = Universe::new(8, 8);
//! universe.spawn_glider(3, 3);
//! universe.tick();
//! assert_eq!(universe.view().live_count(), 5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod app;
pub mod buffer;
pub mod config;
pub mod controller;
pub mod error;
pub mod grid;
pub mod input;
pub mod layout;
pub mod pattern;
pub mod render;
pub mod sim;
pub mod stats;
pub mod widget;

// Re-exports for convenience
pub use app::{run, App, TerminalSession};
pub use buffer::{Buffer, Cell, CellFlags, Rgb};
pub use config::AppConfig;
pub use controller::{
    AnimationController, AnimationState, ClickOutcome, FrameScheduler, Surface, TickerScheduler,
    TicksPerFrame,
};
pub use error::{ConfigError, Error, Result};
pub use grid::{is_alive, BitGridView, CellPos, GridDimensions};
pub use input::{ClickAction, CoordinateMapper};
pub use layout::{Rect, ScreenLayout};
pub use pattern::{fits, PatternSpec, GLIDER, PULSAR};
pub use render::{Canvas, GridRenderer, GridSurface, Palette, Presenter};
pub use sim::{Simulation, SimulationFactory, Universe, UniverseFactory};
pub use stats::{FrameStats, FrameStatsTracker};
