//! App: The terminal front end and its event loop.
//!
//! ```text
//! input thread ──InputEvent──┐
//!                            ├──▶ select! ──▶ App ──▶ AnimationController
//! ticker thread ──Tick───────┘                 │
//!                                              └──▶ GridSurface ──▶ Presenter ──▶ stdout
//! ```
//!
//! Everything after the `select!` runs on the main thread, one event at a
//! time, so a frame always completes before the next input is handled.

use crate::actor::{InputActor, InputEvent, KeyCode, KeyModifiers, MouseButton, MouseEvent, Tick};
use crate::buffer::Rgb;
use crate::config::AppConfig;
use crate::controller::{AnimationController, ClickOutcome, TickerScheduler, TicksPerFrame};
use crate::error::Result;
use crate::input::{ClickAction, CoordinateMapper};
use crate::layout::{Rect, ScreenLayout};
use crate::render::{blit, GridRenderer, GridSurface, Presenter};
use crate::sim::UniverseFactory;
use crate::widget::{StatusBar, Widget};
use crossbeam_channel::{bounded, select, Receiver};
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use std::time::Instant;

/// Key help shown in the middle of the status line.
const KEY_HELP: &str = "space play/pause  s step  r reset  c clear  +/- speed  q quit";

/// Raw mode, alternate screen and mouse capture for the life of the value.
///
/// Dropping it restores the terminal, so an error returned from the event
/// loop still leaves a usable shell.
#[derive(Debug)]
pub struct TerminalSession {
    enable_mouse: bool,
    alternate_screen: bool,
}

impl TerminalSession {
    /// Put the terminal into the mode the app runs in.
    ///
    /// # Errors
    ///
    /// Returns an error if any terminal mode change fails.
    pub fn enter(config: &AppConfig) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on Drop undoes whatever succeeded
        let session = Self {
            enable_mouse: config.enable_mouse,
            alternate_screen: config.alternate_screen,
        };

        let mut stdout = io::stdout();
        if session.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        if session.enable_mouse {
            execute!(stdout, EnableMouseCapture)?;
        }
        execute!(stdout, cursor::Hide)?;
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        if self.enable_mouse {
            let _ = execute!(stdout, DisableMouseCapture);
        }
        if self.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
    }
}

/// Application state: the controller, its surface and the terminal view.
pub struct App<W: Write> {
    config: AppConfig,
    controller: AnimationController<UniverseFactory, TickerScheduler>,
    surface: GridSurface,
    presenter: Presenter<W>,
    status: StatusBar,
    layout: ScreenLayout,
    mapper: CoordinateMapper,
    running: bool,
}

impl<W: Write> App<W> {
    /// Build the app for a terminal of `width`×`height` cells writing to
    /// `writer`. The animation is paused until [`start`](Self::start).
    pub fn new(config: AppConfig, writer: W, width: u16, height: u16) -> Self {
        let dims = config.dimensions();
        let renderer = GridRenderer::new(config.cell_size, config.colors);
        let controller = AnimationController::new(
            UniverseFactory::new(dims, config.density, config.seed),
            TickerScheduler::new(config.target_fps),
            TicksPerFrame::new(config.ticks_per_frame, config.max_ticks_per_frame),
            Instant::now(),
        );
        let surface = GridSurface::new(renderer, dims);
        let layout = compute_layout(&renderer, &config, width, height);
        let mapper = build_mapper(&renderer, &config, layout.surface);

        Self {
            controller,
            surface,
            presenter: Presenter::new(writer, width, height),
            status: StatusBar::new(layout.status),
            layout,
            mapper,
            config,
            running: true,
        }
    }

    /// Draw the initial grid and start the animation.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn start(&mut self) -> Result<()> {
        self.controller.redraw(&mut self.surface);
        self.controller.play();
        self.render()
    }

    /// Whether the app should keep running.
    #[inline]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// The animation controller.
    #[inline]
    pub const fn controller(&self) -> &AnimationController<UniverseFactory, TickerScheduler> {
        &self.controller
    }

    /// Current screen layout.
    #[inline]
    pub const fn layout(&self) -> ScreenLayout {
        self.layout
    }

    /// The presenter.
    #[inline]
    pub const fn presenter_mut(&mut self) -> &mut Presenter<W> {
        &mut self.presenter
    }

    /// Receiver for the running animation's frame ticks.
    pub fn tick_receiver(&self) -> Receiver<Tick> {
        self.controller.scheduler().receiver()
    }

    /// Run one animation frame.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn on_tick(&mut self, tick: Tick) -> Result<()> {
        if self.controller.on_frame(&mut self.surface, tick.at).is_some() {
            self.render()?;
        }
        Ok(())
    }

    /// React to one input event.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::Key { code, modifiers } => self.handle_key(code, modifiers),
            InputEvent::MouseDown(mouse) => self.handle_mouse(mouse),
            InputEvent::Resize { width, height } => self.resize(width, height),
            InputEvent::Error(message) => {
                log::warn!("input error: {message}");
                return Ok(());
            }
            InputEvent::Shutdown => {
                self.running = false;
                return Ok(());
            }
        }
        if self.running {
            self.render()?;
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => self.quit(),
            KeyCode::Char('c') if modifiers.control => self.quit(),
            KeyCode::Char(' ') => self.controller.toggle(),
            KeyCode::Char('s' | '.') | KeyCode::Enter => self.controller.step(&mut self.surface),
            KeyCode::Char('r') => {
                self.controller.reset();
                self.controller.redraw(&mut self.surface);
            }
            KeyCode::Char('c') => self.controller.clear(&mut self.surface),
            KeyCode::Char('+' | '=') | KeyCode::Up => {
                self.controller.adjust_ticks_per_frame(1);
            }
            KeyCode::Char('-') | KeyCode::Down => {
                self.controller.adjust_ticks_per_frame(-1);
            }
            KeyCode::Char(digit @ '1'..='9') => {
                self.controller.set_ticks_per_frame(digit.to_digit(10).unwrap_or(1));
            }
            KeyCode::Char(_) => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !self.config.enable_mouse || mouse.button != MouseButton::Left {
            return;
        }
        if !self.visible_surface().contains(mouse.x, mouse.y) {
            log::debug!("click at ({}, {}) outside the grid", mouse.x, mouse.y);
            return;
        }

        let cell = self.mapper.terminal_to_cell(mouse.x, mouse.y);
        let action = ClickAction::from_modifiers(mouse.modifiers);
        if let ClickOutcome::Toggled(cell) =
            self.controller.handle_click(cell, action, &mut self.surface)
        {
            log::debug!("toggled {cell}");
        }
    }

    fn resize(&mut self, width: u16, height: u16) {
        let renderer = *self.surface.renderer();
        self.layout = compute_layout(&renderer, &self.config, width, height);
        self.mapper = build_mapper(&renderer, &self.config, self.layout.surface);
        self.status.set_bounds(self.layout.status);
        self.surface.invalidate();
        self.presenter.resize(width, height);
        log::debug!("resized to {width}x{height}");
    }

    fn quit(&mut self) {
        self.controller.pause();
        self.running = false;
        log::info!("quit at generation {}", self.controller.generation());
        let stats = self.presenter.stats();
        log::debug!(
            "presented {} frames: {} cells changed, {} bytes, {}us average",
            stats.frames,
            stats.cells_changed,
            stats.bytes_written,
            stats.avg_present_us
        );
    }

    /// Part of the surface rect that is on screen above the status line.
    fn visible_surface(&self) -> Rect {
        let surface = self.layout.surface;
        let (width, _) = self.layout.terminal_size;
        Rect::new(
            surface.x,
            surface.y,
            surface.width.min(width.saturating_sub(surface.x)),
            surface.height.min(self.layout.status.y.saturating_sub(surface.y)),
        )
    }

    fn update_status(&mut self) {
        let ticks = self.controller.ticks_per_frame().get();
        self.status.set_left(format!(
            "{} | {ticks} ticks/frame | gen {}",
            self.controller.state(),
            self.controller.generation()
        ));
        self.status.set_center(KEY_HELP);
        self.status.set_right(
            self.controller
                .last_stats()
                .map_or_else(|| "fps --".to_string(), |stats| stats.to_string()),
        );
    }

    /// Recompose whatever changed and present it. Nothing is written when
    /// neither the grid canvas nor the status line changed.
    fn render(&mut self) -> Result<()> {
        self.update_status();
        let grid_changed = self.surface.take_dirty();
        let status_changed = self.status.needs_redraw();
        if !grid_changed && !status_changed {
            return Ok(());
        }

        let area = self.visible_surface();
        let buffer = self.presenter.buffer_mut();
        if grid_changed {
            blit(self.surface.canvas(), buffer, area, Rgb::DEFAULT_BG);
        }
        if status_changed {
            self.status.render(buffer);
            self.status.clear_redraw();
        }
        self.presenter.present()?;
        Ok(())
    }
}

impl<W: Write> std::fmt::Debug for App<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("controller", &self.controller)
            .field("layout", &self.layout)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

fn compute_layout(renderer: &GridRenderer, config: &AppConfig, width: u16, height: u16) -> ScreenLayout {
    let (pixel_width, pixel_height) = renderer.surface_size(config.dimensions());
    let cols = u16::try_from(pixel_width).unwrap_or(u16::MAX);
    let rows = u16::try_from(pixel_height.div_ceil(2)).unwrap_or(u16::MAX);
    ScreenLayout::compute(width, height, cols, rows)
}

fn build_mapper(renderer: &GridRenderer, config: &AppConfig, rect: Rect) -> CoordinateMapper {
    let (pixel_width, pixel_height) = renderer.surface_size(config.dimensions());
    CoordinateMapper::new(
        rect,
        pixel_width,
        pixel_height,
        renderer.cell_size(),
        config.dimensions(),
    )
}

/// Run the interactive app on the current terminal until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or output fails.
pub fn run(config: AppConfig) -> Result<()> {
    let (width, height) = terminal::size()?;
    let session = TerminalSession::enter(&config)?;

    let (input_tx, input_rx) = bounded::<InputEvent>(64);
    let input = InputActor::spawn(input_tx, config.input_poll_timeout());

    let mut app = App::new(config, io::stdout(), width, height);
    log::info!("starting on a {width}x{height} terminal");
    app.start()?;

    while app.is_running() {
        let ticks = app.tick_receiver();
        select! {
            recv(input_rx) -> event => match event {
                Ok(event) => app.handle_event(event)?,
                Err(_) => break,
            },
            recv(ticks) -> tick => {
                // A disconnect here means the ticker was just cancelled
                if let Ok(tick) = tick {
                    app.on_tick(tick)?;
                }
            }
        }
    }

    input.stop(input_rx);
    drop(app);
    drop(session);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::AnimationState;
    use crate::grid::CellPos;
    use crate::sim::Simulation;

    const TERM: (u16, u16) = (200, 80);

    fn app() -> App<Vec<u8>> {
        let config = AppConfig {
            seed: Some(42),
            ..AppConfig::default()
        };
        App::new(config, Vec::new(), TERM.0, TERM.1)
    }

    fn key(c: char) -> InputEvent {
        InputEvent::Key {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
        }
    }

    fn click(x: u16, y: u16, modifiers: KeyModifiers) -> InputEvent {
        InputEvent::MouseDown(MouseEvent {
            x,
            y,
            button: MouseButton::Left,
            modifiers,
        })
    }

    fn live(app: &App<Vec<u8>>) -> usize {
        app.controller().simulation().live_count()
    }

    #[test]
    fn test_layout_centers_grid() {
        let app = app();
        // 64 cells of 1 pixel: 129 pixels wide, 65 terminal rows tall
        assert_eq!(app.layout().surface, Rect::new(35, 0, 129, 65));
        assert_eq!(app.layout().status.y, 79);
    }

    #[test]
    fn test_start_runs_and_presents() {
        let mut app = app();
        app.start().unwrap();
        assert_eq!(app.controller().state(), AnimationState::Running);
        let out = String::from_utf8(app.presenter_mut().writer_mut().clone()).unwrap();
        assert!(out.contains('▀'));
        assert!(out.contains("gen 0"));
    }

    #[test]
    fn test_space_toggles() {
        let mut app = app();
        app.handle_event(key(' ')).unwrap();
        assert!(app.controller().is_running());
        app.handle_event(key(' ')).unwrap();
        assert!(!app.controller().is_running());
    }

    #[test]
    fn test_step_and_speed_keys() {
        let mut app = app();
        app.handle_event(key('s')).unwrap();
        app.handle_event(key('.')).unwrap();
        assert_eq!(app.controller().generation(), 2);

        app.handle_event(key('7')).unwrap();
        assert_eq!(app.controller().ticks_per_frame().get(), 7);
        app.handle_event(key('+')).unwrap();
        app.handle_event(key('=')).unwrap();
        assert_eq!(app.controller().ticks_per_frame().get(), 9);
        app.handle_event(key('-')).unwrap();
        assert_eq!(app.controller().ticks_per_frame().get(), 8);
    }

    #[test]
    fn test_clear_then_reset() {
        let mut app = app();
        app.handle_event(key('c')).unwrap();
        assert_eq!(live(&app), 0);
        app.handle_event(key('r')).unwrap();
        assert!(live(&app) > 0);
        assert_eq!(app.controller().generation(), 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        app.handle_event(key('q')).unwrap();
        assert!(!app.is_running());

        let mut app = self::app();
        app.handle_event(InputEvent::Key {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers {
                control: true,
                ..KeyModifiers::NONE
            },
        })
        .unwrap();
        assert!(!app.is_running());
        // Ctrl+C quits without clearing
        assert!(live(&app) > 0);
    }

    #[test]
    fn test_click_toggles_mapped_cell() {
        let mut app = app();
        app.handle_event(key('c')).unwrap();
        app.handle_event(click(35, 0, KeyModifiers::NONE)).unwrap();

        let view = app.controller().simulation().view();
        assert!(view.is_alive_at(0, 0));
        assert_eq!(view.live_count(), 1);
    }

    #[test]
    fn test_modified_clicks() {
        let mut app = app();
        app.handle_event(key('c')).unwrap();

        // Shift near the corner: pulsar needs 6 cells of clearance
        let shift = KeyModifiers { shift: true, ..KeyModifiers::NONE };
        app.handle_event(click(35 + 6, 3, shift)).unwrap();
        assert_eq!(live(&app), 0);

        // Alt in the middle: glider
        let alt = KeyModifiers { alt: true, ..KeyModifiers::NONE };
        let cell = app.mapper.terminal_to_cell(35 + 64, 32);
        assert_eq!(cell, CellPos::new(32, 32));
        app.handle_event(click(35 + 64, 32, alt)).unwrap();
        assert_eq!(live(&app), 5);
    }

    #[test]
    fn test_clicks_outside_grid_ignored() {
        let mut app = app();
        app.handle_event(key('c')).unwrap();
        app.handle_event(click(0, 0, KeyModifiers::NONE)).unwrap();
        app.handle_event(click(40, 79, KeyModifiers::NONE)).unwrap();
        assert_eq!(live(&app), 0);

        app.handle_event(InputEvent::MouseDown(MouseEvent {
            x: 40,
            y: 10,
            button: MouseButton::Right,
            modifiers: KeyModifiers::NONE,
        }))
        .unwrap();
        assert_eq!(live(&app), 0);
    }

    #[test]
    fn test_resize_relayouts() {
        let mut app = app();
        app.handle_event(InputEvent::Resize { width: 100, height: 30 }).unwrap();
        assert_eq!(app.presenter_mut().size(), (100, 30));
        assert_eq!(app.layout().surface.x, 0);
        assert_eq!(app.layout().status, Rect::new(0, 29, 100, 1));
    }

    #[test]
    fn test_stale_tick_after_pause_ignored() {
        let mut app = app();
        app.start().unwrap();
        app.handle_event(key(' ')).unwrap();
        app.on_tick(Tick { frame: 0, at: Instant::now() }).unwrap();
        assert_eq!(app.controller().generation(), 0);
    }

    #[test]
    fn test_shutdown_event_stops() {
        let mut app = app();
        app.handle_event(InputEvent::Error("boom".into())).unwrap();
        assert!(app.is_running());
        app.handle_event(InputEvent::Shutdown).unwrap();
        assert!(!app.is_running());
    }

    fn output(app: &mut App<Vec<u8>>) -> String {
        String::from_utf8(std::mem::take(app.presenter_mut().writer_mut())).unwrap()
    }

    #[test]
    fn test_unchanged_screen_not_presented() {
        let mut app = app();
        app.start().unwrap();
        let frames = app.presenter_mut().stats().frames;

        app.handle_event(key('x')).unwrap();
        assert_eq!(app.presenter_mut().stats().frames, frames);

        app.handle_event(key('s')).unwrap();
        assert_eq!(app.presenter_mut().stats().frames, frames + 1);
    }

    #[test]
    fn test_resize_repaints_grid() {
        let mut app = app();
        app.start().unwrap();
        output(&mut app);

        app.handle_event(InputEvent::Resize { width: 150, height: 70 }).unwrap();
        let out = output(&mut app);
        assert!(out.starts_with("\x1b[?25l\x1b[H"));
        assert!(out.contains('▀'));
        assert!(out.contains("gen 0"));
    }

    #[test]
    fn test_output_uses_only_color_sgr() {
        let mut app = app();
        app.start().unwrap();
        for c in ['s', 'c', 'r', ' ', ' ', '+'] {
            app.handle_event(key(c)).unwrap();
        }
        app.on_tick(Tick { frame: 0, at: Instant::now() }).unwrap();

        let out = output(&mut app);
        for sequence in out.split("\x1b[").skip(1) {
            let Some(end) = sequence.find(|c: char| c.is_ascii_alphabetic()) else {
                continue;
            };
            if sequence[end..].starts_with('m') {
                let params = &sequence[..end];
                assert!(
                    params == "0" || params.starts_with("38;2;") || params.starts_with("48;2;"),
                    "unexpected SGR {params:?}"
                );
            }
        }
    }
}
