//! Frame scheduling behind the animation controller.

use crate::actor::{Tick, TickerActor};
use crossbeam_channel::Receiver;

/// Starts and stops periodic frame callbacks.
///
/// Callbacks are delivered out of band (for the terminal app, over a
/// channel the main loop selects on). After `cancel` no further callback
/// may be delivered for the cancelled run.
pub trait FrameScheduler {
    /// Begin periodic frame callbacks.
    fn start(&mut self);

    /// Stop frame callbacks.
    fn cancel(&mut self);

    /// Whether callbacks are currently scheduled.
    fn is_active(&self) -> bool;
}

/// [`FrameScheduler`] backed by a [`TickerActor`] thread.
///
/// Each `start` spawns a fresh ticker and `cancel` joins it. A receiver
/// taken before the cancel yields only what was already queued, then
/// disconnects.
#[derive(Debug)]
pub struct TickerScheduler {
    target_fps: u32,
    ticker: Option<TickerActor>,
}

impl TickerScheduler {
    /// Create an idle scheduler pacing frames at `target_fps`.
    pub const fn new(target_fps: u32) -> Self {
        Self {
            target_fps,
            ticker: None,
        }
    }

    /// Frame rate the ticker is paced at.
    #[inline]
    pub const fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Receiver for the current run's ticks. While idle this is a receiver
    /// that never yields, so it can sit in a `select!` unconditionally.
    pub fn receiver(&self) -> Receiver<Tick> {
        self.ticker
            .as_ref()
            .map_or_else(crossbeam_channel::never, |ticker| ticker.receiver().clone())
    }
}

impl FrameScheduler for TickerScheduler {
    fn start(&mut self) {
        if self.ticker.is_none() {
            self.ticker = Some(TickerActor::with_fps(self.target_fps));
            log::debug!("ticker started at {} fps", self.target_fps);
        }
    }

    fn cancel(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.join();
            log::debug!("ticker cancelled");
        }
    }

    fn is_active(&self) -> bool {
        self.ticker.is_some()
    }
}

impl Drop for TickerScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
