//! AnimationController: play/pause/step/reset/clear over one engine.
//!
//! # Frame order
//!
//! ```text
//! frame ──▶ tick × N ──▶ Surface::draw(view) ──▶ stats.record(now)
//!            (N read fresh every frame)
//! ```
//!
//! The controller owns the engine outright. Reset and clear replace it
//! with a new instance from the factory. The packed cell buffer is
//! borrowed for the duration of one draw and never kept.

mod scheduler;

pub use scheduler::{FrameScheduler, TickerScheduler};

use crate::grid::{BitGridView, CellPos, GridDimensions};
use crate::input::ClickAction;
use crate::pattern::PatternSpec;
use crate::sim::{Simulation, SimulationFactory};
use crate::stats::{FrameStats, FrameStatsTracker};
use std::time::Instant;

/// Something that can show one frame of cells.
pub trait Surface {
    /// Repaint from `cells`. The view is only valid for this call.
    fn draw(&mut self, cells: &BitGridView<'_>);
}

/// Whether frames are being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    /// No frames are scheduled.
    #[default]
    Paused,
    /// Each frame ticks the engine and redraws.
    Running,
}

impl std::fmt::Display for AnimationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Paused => "paused",
            Self::Running => "running",
        })
    }
}

/// Engine generations advanced per displayed frame, kept in `1..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicksPerFrame {
    value: u32,
    max: u32,
}

impl TicksPerFrame {
    /// Create a speed setting; `value` is clamped into `1..=max`.
    pub fn new(value: u32, max: u32) -> Self {
        let max = max.max(1);
        Self {
            value: value.clamp(1, max),
            max,
        }
    }

    /// Current value.
    #[inline]
    pub const fn get(&self) -> u32 {
        self.value
    }

    /// Upper bound.
    #[inline]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Set the value, clamped. Returns the value stored.
    pub fn set(&mut self, value: u32) -> u32 {
        self.value = value.clamp(1, self.max);
        self.value
    }

    /// Move the value by `delta`, clamped. Returns the value stored.
    pub fn adjust(&mut self, delta: i32) -> u32 {
        let moved = i64::from(self.value) + i64::from(delta);
        let clamped = moved.clamp(1, i64::from(self.max));
        self.value = u32::try_from(clamped).unwrap_or(self.max);
        self.value
    }
}

/// Result of a click on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The cell was flipped.
    Toggled(CellPos),
    /// The pattern was stamped at the cell.
    Spawned(PatternSpec, CellPos),
    /// The pattern would not fit at the cell; the engine was not touched.
    Rejected(PatternSpec, CellPos),
}

/// Drives one engine instance and its display.
pub struct AnimationController<F: SimulationFactory, S: FrameScheduler> {
    factory: F,
    sim: F::Output,
    scheduler: S,
    state: AnimationState,
    ticks_per_frame: TicksPerFrame,
    stats: FrameStatsTracker,
    last_stats: Option<FrameStats>,
    /// Ticks applied since the engine was last replaced.
    generation: u64,
}

impl<F: SimulationFactory, S: FrameScheduler> AnimationController<F, S> {
    /// Create a paused controller over a fresh randomized engine.
    ///
    /// `start` seeds the frame statistics clock.
    pub fn new(mut factory: F, scheduler: S, ticks_per_frame: TicksPerFrame, start: Instant) -> Self {
        let sim = factory.random();
        log::info!(
            "engine ready: {}x{}, {} ticks/frame",
            sim.width(),
            sim.height(),
            ticks_per_frame.get()
        );
        Self {
            factory,
            sim,
            scheduler,
            state: AnimationState::Paused,
            ticks_per_frame,
            stats: FrameStatsTracker::new(start),
            last_stats: None,
            generation: 0,
        }
    }

    /// Current state.
    #[inline]
    pub const fn state(&self) -> AnimationState {
        self.state
    }

    /// Whether frames are being produced.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == AnimationState::Running
    }

    /// The current engine.
    #[inline]
    pub const fn simulation(&self) -> &F::Output {
        &self.sim
    }

    /// Grid dimensions of the current engine.
    pub fn dimensions(&self) -> GridDimensions {
        self.sim.dimensions()
    }

    /// The frame scheduler.
    #[inline]
    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Ticks applied since the last reset or clear.
    #[inline]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Current speed setting.
    #[inline]
    pub const fn ticks_per_frame(&self) -> TicksPerFrame {
        self.ticks_per_frame
    }

    /// Set ticks per frame, clamped. Takes effect on the next frame.
    pub fn set_ticks_per_frame(&mut self, value: u32) -> u32 {
        let value = self.ticks_per_frame.set(value);
        log::debug!("ticks per frame: {value}");
        value
    }

    /// Move ticks per frame by `delta`, clamped. Takes effect on the next frame.
    pub fn adjust_ticks_per_frame(&mut self, delta: i32) -> u32 {
        let value = self.ticks_per_frame.adjust(delta);
        log::debug!("ticks per frame: {value}");
        value
    }

    /// Statistics from the most recent frame.
    #[inline]
    pub const fn last_stats(&self) -> Option<FrameStats> {
        self.last_stats
    }

    /// Start producing frames. No-op while running.
    pub fn play(&mut self) {
        if self.is_running() {
            return;
        }
        self.scheduler.start();
        self.state = AnimationState::Running;
        log::debug!("animation running");
    }

    /// Stop producing frames. No-op while paused.
    pub fn pause(&mut self) {
        if !self.is_running() {
            return;
        }
        self.scheduler.cancel();
        self.state = AnimationState::Paused;
        log::debug!("animation paused");
    }

    /// Play when paused, pause when running.
    pub fn toggle(&mut self) {
        match self.state {
            AnimationState::Paused => self.play(),
            AnimationState::Running => self.pause(),
        }
    }

    /// Advance one generation and draw it. The state is unchanged.
    pub fn step(&mut self, surface: &mut impl Surface) {
        self.tick_once();
        self.redraw(surface);
    }

    /// Replace the engine with a fresh randomized one. Nothing is drawn.
    pub fn reset(&mut self) {
        self.sim = self.factory.random();
        self.generation = 0;
        log::info!("engine reset");
    }

    /// Replace the engine with an all-dead one and draw it.
    pub fn clear(&mut self, surface: &mut impl Surface) {
        self.sim = self.factory.empty();
        self.generation = 0;
        log::info!("engine cleared");
        self.redraw(surface);
    }

    /// Draw the current engine state without advancing it.
    pub fn redraw(&self, surface: &mut impl Surface) {
        surface.draw(&self.sim.view());
    }

    /// Run one scheduled frame shown at `now`.
    ///
    /// Returns `None` without touching the engine when paused, which
    /// happens for a frame that was already queued when `pause` ran.
    pub fn on_frame(&mut self, surface: &mut impl Surface, now: Instant) -> Option<FrameStats> {
        if !self.is_running() {
            log::debug!("dropping frame delivered while paused");
            return None;
        }

        let ticks = self.ticks_per_frame.get();
        for _ in 0..ticks {
            self.tick_once();
        }
        self.redraw(surface);

        let stats = self.stats.record(now);
        self.last_stats = Some(stats);
        log::trace!("frame: {ticks} ticks, generation {}, {stats}", self.generation);
        Some(stats)
    }

    /// Apply a click on `cell`, then redraw.
    ///
    /// Pattern stamps are validated first; a stamp that would cross the
    /// grid edge is logged and skipped without calling the engine.
    pub fn handle_click(
        &mut self,
        cell: CellPos,
        action: ClickAction,
        surface: &mut impl Surface,
    ) -> ClickOutcome {
        let outcome = match action.pattern() {
            None => {
                self.sim.toggle_cell(cell.row, cell.col);
                ClickOutcome::Toggled(cell)
            }
            Some(pattern) if !pattern.fits_at(cell, self.dimensions()) => {
                log::warn!(
                    "{} at {cell} needs {} cells of clearance on a {}x{} grid",
                    pattern.name,
                    pattern.required_margin,
                    self.sim.width(),
                    self.sim.height()
                );
                ClickOutcome::Rejected(pattern, cell)
            }
            Some(pattern) => {
                match action {
                    ClickAction::SpawnPulsar => self.sim.spawn_pulsar(cell.row, cell.col),
                    _ => self.sim.spawn_glider(cell.row, cell.col),
                }
                log::info!("spawned {} at {cell}", pattern.name);
                ClickOutcome::Spawned(pattern, cell)
            }
        };
        self.redraw(surface);
        outcome
    }

    fn tick_once(&mut self) {
        self.sim.tick();
        self.generation += 1;
    }
}

impl<F: SimulationFactory, S: FrameScheduler> std::fmt::Debug for AnimationController<F, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationController")
            .field("state", &self.state)
            .field("dimensions", &self.dimensions())
            .field("ticks_per_frame", &self.ticks_per_frame)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::packed_len;
    use crate::input::CoordinateMapper;
    use crate::layout::Rect;
    use crate::pattern::{GLIDER, PULSAR};
    use crate::sim::UniverseFactory;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Tick,
        Toggle(u32, u32),
        Glider(u32, u32),
        Pulsar(u32, u32),
        Draw,
    }

    type Log = Rc<RefCell<Vec<Call>>>;

    struct MockSim {
        dims: GridDimensions,
        cells: Vec<u8>,
        log: Log,
    }

    impl Simulation for MockSim {
        fn width(&self) -> u32 {
            self.dims.width
        }
        fn height(&self) -> u32 {
            self.dims.height
        }
        fn tick(&mut self) {
            self.log.borrow_mut().push(Call::Tick);
        }
        fn cells(&self) -> &[u8] {
            &self.cells
        }
        fn toggle_cell(&mut self, row: u32, col: u32) {
            self.log.borrow_mut().push(Call::Toggle(row, col));
        }
        fn spawn_glider(&mut self, row: u32, col: u32) {
            self.log.borrow_mut().push(Call::Glider(row, col));
        }
        fn spawn_pulsar(&mut self, row: u32, col: u32) {
            self.log.borrow_mut().push(Call::Pulsar(row, col));
        }
    }

    struct MockFactory {
        dims: GridDimensions,
        log: Log,
        random_calls: usize,
        empty_calls: usize,
    }

    impl MockFactory {
        fn build(&self) -> MockSim {
            MockSim {
                dims: self.dims,
                cells: vec![0; packed_len(self.dims.cell_count())],
                log: Rc::clone(&self.log),
            }
        }
    }

    impl SimulationFactory for MockFactory {
        type Output = MockSim;

        fn random(&mut self) -> MockSim {
            self.random_calls += 1;
            self.build()
        }

        fn empty(&mut self) -> MockSim {
            self.empty_calls += 1;
            self.build()
        }
    }

    #[derive(Default)]
    struct MockScheduler {
        active: bool,
        starts: usize,
        cancels: usize,
    }

    impl FrameScheduler for MockScheduler {
        fn start(&mut self) {
            self.active = true;
            self.starts += 1;
        }
        fn cancel(&mut self) {
            self.active = false;
            self.cancels += 1;
        }
        fn is_active(&self) -> bool {
            self.active
        }
    }

    struct MockSurface {
        log: Log,
    }

    impl Surface for MockSurface {
        fn draw(&mut self, _cells: &BitGridView<'_>) {
            self.log.borrow_mut().push(Call::Draw);
        }
    }

    fn setup(width: u32, height: u32) -> (AnimationController<MockFactory, MockScheduler>, MockSurface, Log) {
        let log: Log = Rc::default();
        let factory = MockFactory {
            dims: GridDimensions::new(width, height),
            log: Rc::clone(&log),
            random_calls: 0,
            empty_calls: 0,
        };
        let controller = AnimationController::new(
            factory,
            MockScheduler::default(),
            TicksPerFrame::new(1, 100),
            Instant::now(),
        );
        let surface = MockSurface { log: Rc::clone(&log) };
        (controller, surface, log)
    }

    fn take(log: &Log) -> Vec<Call> {
        std::mem::take(&mut *log.borrow_mut())
    }

    #[test]
    fn test_starts_paused_with_random_engine() {
        let (controller, _, log) = setup(8, 8);
        assert_eq!(controller.state(), AnimationState::Paused);
        assert_eq!(controller.factory.random_calls, 1);
        assert!(!controller.scheduler().is_active());
        assert!(take(&log).is_empty());
    }

    #[test]
    fn test_three_ticks_before_render() {
        let (mut controller, mut surface, log) = setup(8, 8);
        controller.set_ticks_per_frame(3);
        controller.play();

        let stats = controller.on_frame(&mut surface, Instant::now());
        assert!(stats.is_some());
        assert_eq!(take(&log), vec![Call::Tick, Call::Tick, Call::Tick, Call::Draw]);
        assert_eq!(controller.generation(), 3);
    }

    #[test]
    fn test_speed_change_applies_next_frame() {
        let (mut controller, mut surface, log) = setup(8, 8);
        controller.play();
        controller.on_frame(&mut surface, Instant::now());
        assert_eq!(take(&log), vec![Call::Tick, Call::Draw]);

        controller.adjust_ticks_per_frame(1);
        controller.on_frame(&mut surface, Instant::now());
        assert_eq!(take(&log), vec![Call::Tick, Call::Tick, Call::Draw]);
    }

    #[test]
    fn test_pause_right_after_play_never_ticks() {
        let (mut controller, mut surface, log) = setup(8, 8);
        controller.play();
        controller.pause();

        assert_eq!(controller.scheduler().starts, 1);
        assert_eq!(controller.scheduler().cancels, 1);
        // A frame queued before the cancel arrives late
        assert!(controller.on_frame(&mut surface, Instant::now()).is_none());
        assert!(take(&log).is_empty());
        assert_eq!(controller.generation(), 0);
    }

    #[test]
    fn test_play_and_pause_are_idempotent() {
        let (mut controller, _, _) = setup(8, 8);
        controller.pause();
        assert_eq!(controller.scheduler().cancels, 0);

        controller.play();
        controller.play();
        assert_eq!(controller.scheduler().starts, 1);
        assert!(controller.is_running());

        controller.toggle();
        assert_eq!(controller.state(), AnimationState::Paused);
        controller.toggle();
        assert_eq!(controller.scheduler().starts, 2);
    }

    #[test]
    fn test_step_keeps_state() {
        let (mut controller, mut surface, log) = setup(8, 8);
        controller.step(&mut surface);
        assert_eq!(controller.state(), AnimationState::Paused);
        assert_eq!(take(&log), vec![Call::Tick, Call::Draw]);

        controller.play();
        controller.step(&mut surface);
        assert!(controller.is_running());
        assert_eq!(take(&log), vec![Call::Tick, Call::Draw]);
    }

    #[test]
    fn test_reset_does_not_render() {
        let (mut controller, mut surface, log) = setup(8, 8);
        controller.step(&mut surface);
        take(&log);

        controller.reset();
        assert_eq!(controller.factory.random_calls, 2);
        assert_eq!(controller.generation(), 0);
        assert!(take(&log).is_empty());
    }

    #[test]
    fn test_clear_renders_immediately() {
        let (mut controller, mut surface, log) = setup(8, 8);
        controller.play();
        controller.clear(&mut surface);

        assert_eq!(controller.factory.empty_calls, 1);
        assert_eq!(take(&log), vec![Call::Draw]);
        // Clearing does not stop the animation
        assert!(controller.is_running());
    }

    #[test]
    fn test_pulsar_near_edge_rejected() {
        let (mut controller, mut surface, log) = setup(64, 64);
        let cell = CellPos::new(3, 3);
        let outcome = controller.handle_click(cell, ClickAction::SpawnPulsar, &mut surface);

        assert_eq!(outcome, ClickOutcome::Rejected(PULSAR, cell));
        assert_eq!(take(&log), vec![Call::Draw]);
    }

    #[test]
    fn test_spawns_reach_engine() {
        let (mut controller, mut surface, log) = setup(64, 64);
        let glider = controller.handle_click(CellPos::new(2, 2), ClickAction::SpawnGlider, &mut surface);
        let pulsar = controller.handle_click(CellPos::new(6, 57), ClickAction::SpawnPulsar, &mut surface);

        assert_eq!(glider, ClickOutcome::Spawned(GLIDER, CellPos::new(2, 2)));
        assert_eq!(pulsar, ClickOutcome::Spawned(PULSAR, CellPos::new(6, 57)));
        assert_eq!(
            take(&log),
            vec![Call::Glider(2, 2), Call::Draw, Call::Pulsar(6, 57), Call::Draw]
        );
    }

    #[test]
    fn test_toggle_click() {
        let (mut controller, mut surface, log) = setup(8, 8);
        let outcome = controller.handle_click(CellPos::new(0, 7), ClickAction::Toggle, &mut surface);
        assert_eq!(outcome, ClickOutcome::Toggled(CellPos::new(0, 7)));
        assert_eq!(take(&log), vec![Call::Toggle(0, 7), Call::Draw]);
    }

    #[test]
    fn test_frame_stats_recorded() {
        let (mut controller, mut surface, _) = setup(8, 8);
        let start = Instant::now();
        controller.play();
        controller.on_frame(&mut surface, start + Duration::from_millis(20));
        let stats = controller.on_frame(&mut surface, start + Duration::from_millis(40));

        let stats = stats.unwrap();
        assert_eq!(controller.last_stats(), Some(stats));
        assert!(stats.latest > 0.0);
    }

    struct FailingSurface {
        draws: usize,
        fail_on: usize,
    }

    impl Surface for FailingSurface {
        fn draw(&mut self, _cells: &BitGridView<'_>) {
            self.draws += 1;
            assert_ne!(self.draws, self.fail_on, "draw failed");
        }
    }

    #[test]
    fn test_stats_sampled_after_render() {
        let (mut controller, _, _) = setup(8, 8);
        let mut surface = FailingSurface { draws: 0, fail_on: 2 };
        let start = Instant::now();
        controller.play();
        let first = controller.on_frame(&mut surface, start + Duration::from_millis(20));
        assert!(first.is_some());

        // The second frame's render fails before its sample is taken
        let frame = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            controller.on_frame(&mut surface, start + Duration::from_millis(25))
        }));
        assert!(frame.is_err());
        assert_eq!(controller.last_stats(), first);

        // The next sample measures from the first frame, not the failed one
        let third = controller
            .on_frame(&mut surface, start + Duration::from_millis(40))
            .unwrap();
        assert!((third.latest - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_ticks_per_frame_clamped() {
        let mut ticks = TicksPerFrame::new(0, 10);
        assert_eq!(ticks.get(), 1);
        assert_eq!(ticks.adjust(-5), 1);
        assert_eq!(ticks.set(50), 10);
        assert_eq!(ticks.adjust(3), 10);
        assert_eq!(TicksPerFrame::new(5, 0).get(), 1);
    }

    struct LiveCells(Vec<CellPos>);

    impl Surface for LiveCells {
        fn draw(&mut self, cells: &BitGridView<'_>) {
            let dims = cells.dimensions();
            self.0.clear();
            for row in 0..dims.height {
                for col in 0..dims.width {
                    if cells.is_alive_at(row, col) {
                        self.0.push(CellPos::new(row, col));
                    }
                }
            }
        }
    }

    #[test]
    fn test_click_origin_on_empty_grid() {
        let dims = GridDimensions::new(64, 64);
        let mut controller = AnimationController::new(
            UniverseFactory::new(dims, 0.5, Some(3)),
            MockScheduler::default(),
            TicksPerFrame::new(1, 100),
            Instant::now(),
        );
        let mut surface = LiveCells(Vec::new());
        controller.clear(&mut surface);
        assert!(surface.0.is_empty());

        // 129x129 pixels shown 1:1 in a surface anchored at the origin
        let mapper = CoordinateMapper::new(Rect::new(0, 0, 129, 129), 129, 129, 1, dims);
        let cell = mapper.to_cell(0.0, 0.0);
        controller.handle_click(cell, ClickAction::Toggle, &mut surface);

        assert_eq!(surface.0, vec![CellPos::new(0, 0)]);
    }
}
