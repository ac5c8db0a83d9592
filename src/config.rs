//! Application configuration, loaded from an optional JSON file.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes. `lifeframe --example` prints the full default config.

use crate::error::{ConfigError, Error, Result};
use crate::grid::GridDimensions;
use crate::render::Palette;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Largest accepted cell size in pixels.
pub const MAX_CELL_SIZE: u32 = 16;

/// Largest accepted frame rate.
pub const MAX_TARGET_FPS: u32 = 240;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Probability that a cell starts alive on reset.
    pub density: f64,
    /// Seed for reproducible random grids. Entropy is used when unset.
    pub seed: Option<u64>,
    /// Cell size in pixels, excluding the grid line.
    pub cell_size: u32,
    /// Engine generations per displayed frame at startup.
    pub ticks_per_frame: u32,
    /// Upper bound for ticks per frame.
    pub max_ticks_per_frame: u32,
    /// Frame rate the ticker is paced at.
    pub target_fps: u32,
    /// Input thread poll timeout in milliseconds.
    pub input_poll_timeout_ms: u64,
    /// Capture mouse clicks.
    pub enable_mouse: bool,
    /// Run on the alternate screen.
    pub alternate_screen: bool,
    /// Grid colors.
    pub colors: Palette,
    /// Write logs here instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            density: 0.5,
            seed: None,
            cell_size: 1,
            ticks_per_frame: 1,
            max_ticks_per_frame: 100,
            target_fps: 60,
            input_poll_timeout_ms: 10,
            enable_mouse: true,
            alternate_screen: true,
            colors: Palette::default(),
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse and validate a JSON config.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Grid dimensions.
    #[inline]
    pub const fn dimensions(&self) -> GridDimensions {
        GridDimensions::new(self.width, self.height)
    }

    /// Input thread poll timeout.
    #[inline]
    pub const fn input_poll_timeout(&self) -> Duration {
        Duration::from_millis(self.input_poll_timeout_ms)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.cell_size == 0 || self.cell_size > MAX_CELL_SIZE {
            return Err(ConfigError::InvalidCellSize { max: MAX_CELL_SIZE });
        }
        // The surface is (cell_size + 1) * n + 1 pixels wide and must be
        // addressable in terminal columns.
        let surface_fits = |cells: u32| {
            (u64::from(self.cell_size) + 1) * u64::from(cells) < u64::from(u16::MAX)
        };
        if self.width == 0 || self.height == 0 || !surface_fits(self.width) || !surface_fits(self.height) {
            return Err(ConfigError::InvalidDimensions);
        }
        if self.max_ticks_per_frame == 0
            || self.ticks_per_frame == 0
            || self.ticks_per_frame > self.max_ticks_per_frame
        {
            return Err(ConfigError::InvalidTicksPerFrame);
        }
        if self.target_fps == 0 || self.target_fps > MAX_TARGET_FPS {
            return Err(ConfigError::InvalidTargetFps { max: MAX_TARGET_FPS });
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(ConfigError::InvalidDensity);
        }
        if self.colors.alive == self.colors.dead {
            return Err(ConfigError::InvalidColor(format!(
                "alive and dead are both {}",
                self.colors.alive
            )));
        }
        Ok(())
    }
}
