//! Rolling frames-per-second statistics.
//!
//! One sample per displayed frame: `1000 / delta_ms` since the previous
//! frame. The last [`WINDOW_CAPACITY`] samples are kept and
//! latest/mean/min/max are recomputed over them on every record.

use std::collections::VecDeque;
use std::time::Instant;

/// Number of samples kept in the window.
pub const WINDOW_CAPACITY: usize = 100;

/// Smallest delta used for a sample, in milliseconds.
const MIN_DELTA_MS: f64 = 0.001;

/// Summary of the current sample window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Most recent sample.
    pub latest: f64,
    /// Mean over the window.
    pub mean: f64,
    /// Minimum over the window.
    pub min: f64,
    /// Maximum over the window.
    pub max: f64,
}

impl std::fmt::Display for FrameStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "fps {:.0} | avg {:.0} | min {:.0} | max {:.0}",
            self.latest, self.mean, self.min, self.max
        )
    }
}

/// Sliding window of frame-rate samples.
#[derive(Debug, Clone)]
pub struct FrameStatsTracker {
    /// Reference point for converting `Instant`s to milliseconds.
    epoch: Instant,
    last_timestamp_ms: f64,
    samples: VecDeque<f64>,
}

impl FrameStatsTracker {
    /// Create a tracker seeded with `start` as the previous frame time.
    pub fn new(start: Instant) -> Self {
        Self {
            epoch: start,
            last_timestamp_ms: 0.0,
            samples: VecDeque::with_capacity(WINDOW_CAPACITY + 1),
        }
    }

    /// Record a frame shown at `now`.
    pub fn record(&mut self, now: Instant) -> FrameStats {
        let now_ms = now.saturating_duration_since(self.epoch).as_secs_f64() * 1000.0;
        self.record_ms(now_ms)
    }

    /// Record a frame shown at `now_ms` on the tracker's millisecond clock,
    /// where 0.0 is the seed timestamp.
    pub fn record_ms(&mut self, now_ms: f64) -> FrameStats {
        let delta = (now_ms - self.last_timestamp_ms).max(MIN_DELTA_MS);
        self.last_timestamp_ms = now_ms;

        self.samples.push_back(1000.0 / delta);
        if self.samples.len() > WINDOW_CAPACITY {
            self.samples.pop_front();
        }

        self.summary()
            .unwrap_or_else(|| unreachable!("window holds the sample just pushed"))
    }

    /// Summary of the current window, `None` before the first record.
    pub fn summary(&self) -> Option<FrameStats> {
        let latest = *self.samples.back()?;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &sample in &self.samples {
            sum += sample;
            min = min.min(sample);
            max = max.max(sample);
        }
        #[allow(clippy::cast_precision_loss)]
        let mean = sum / self.samples.len() as f64;
        Some(FrameStats { latest, mean, min, max })
    }

    /// Samples in the window, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// Number of samples in the window.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True before the first record.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
