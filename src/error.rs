//! Error types.

use std::path::PathBuf;

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Terminal setup or output failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        /// Path that was read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The log file could not be created.
    #[error("failed to open log file {}: {source}", path.display())]
    LogFile {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid JSON for [`AppConfig`](crate::AppConfig).
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    /// The config parsed but holds unusable values.
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Zero-sized grid, or a surface too large to address.
    #[error("grid width and height must be non-zero and fit on a terminal surface")]
    InvalidDimensions,
    /// Cell size out of range.
    #[error("cell size must be between 1 and {max}")]
    InvalidCellSize {
        /// Largest accepted cell size.
        max: u32,
    },
    /// Ticks per frame zero or above its maximum.
    #[error("ticks per frame must be between 1 and max_ticks_per_frame")]
    InvalidTicksPerFrame,
    /// Frame rate out of range.
    #[error("target fps must be between 1 and {max}")]
    InvalidTargetFps {
        /// Largest accepted frame rate.
        max: u32,
    },
    /// Density outside `0.0..=1.0`.
    #[error("density must be within 0.0..=1.0")]
    InvalidDensity,
    /// Colors that would make cells indistinguishable.
    #[error("invalid colors: {0}")]
    InvalidColor(String),
}
