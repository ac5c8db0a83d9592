//! Ticker Actor: Dedicated thread for frame pacing.
//!
//! Sends one [`Tick`] per frame interval over a small bounded channel.
//! A slow receiver loses ticks instead of building a backlog. Dropping the
//! actor stops the thread; ticks already queued die with the receiver.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A frame callback request.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    /// Frame number since the ticker started.
    pub frame: u64,
    /// When the tick fired.
    pub at: Instant,
}

/// Ticker actor that generates frame ticks.
pub struct TickerActor {
    /// Handle to the ticker thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Receiver for tick events.
    tick_rx: Receiver<Tick>,
    interval: Duration,
}

impl TickerActor {
    /// Spawn a ticker firing every `interval`.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the ticker thread.
    pub fn spawn(interval: Duration) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        // Small buffer so ticks never queue up behind a slow frame
        let (tick_tx, tick_rx) = bounded(2);

        let handle = thread::Builder::new()
            .name("lifeframe-ticker".to_string())
            .spawn(move || {
                Self::run_loop(&tick_tx, &shutdown_clone, interval);
            })
            .expect("Failed to spawn ticker thread");

        Self {
            handle: Some(handle),
            shutdown,
            tick_rx,
            interval,
        }
    }

    /// Spawn a ticker targeting `fps` frames per second.
    pub fn with_fps(fps: u32) -> Self {
        Self::spawn(Duration::from_secs(1) / fps.max(1))
    }

    /// The tick receiver, for use with `select!`.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Tick> {
        &self.tick_rx
    }

    /// Time between ticks.
    #[inline]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Signal the ticker to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the ticker thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(tick_tx: &Sender<Tick>, shutdown: &AtomicBool, interval: Duration) {
        let start = Instant::now();
        let mut frame = 0u64;
        let mut next_tick = start + interval;

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            let now = Instant::now();
            if now >= next_tick {
                // Full buffer means the receiver is behind; skip this one
                match tick_tx.try_send(Tick { frame, at: now }) {
                    Ok(()) | Err(crossbeam_channel::TrySendError::Full(_)) => {}
                    Err(crossbeam_channel::TrySendError::Disconnected(_)) => break,
                }

                frame += 1;
                next_tick += interval;

                // Behind schedule: resync instead of bursting
                if next_tick < now {
                    next_tick = now + interval;
                }
            } else {
                thread::sleep((next_tick - now).min(Duration::from_millis(1)));
            }
        }
    }
}

impl Drop for TickerActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for TickerActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickerActor")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}
