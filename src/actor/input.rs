//! Input Actor: Dedicated thread for polling terminal events.
//!
//! Polls crossterm with a short timeout so the shutdown flag is seen
//! promptly, and forwards converted events to the main loop.

use super::messages::{InputEvent, KeyCode, KeyModifiers, MouseButton, MouseEvent};
use crossbeam_channel::{Receiver, Sender};
use crossterm::event::{self, Event, KeyEventKind};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Input actor that polls terminal events.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input thread.
    ///
    /// `poll_timeout` bounds how long a shutdown request can go unnoticed.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the thread.
    pub fn spawn(sender: Sender<InputEvent>, poll_timeout: Duration) -> Self {
        Self::spawn_source(sender, move || {
            if event::poll(poll_timeout)? {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        })
    }

    /// Spawn the thread over any event source. `next_event` must return
    /// within a bounded time so the shutdown flag is checked.
    fn spawn_source<P>(sender: Sender<InputEvent>, next_event: P) -> Self
    where
        P: FnMut() -> io::Result<Option<Event>> + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("lifeframe-input".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &shutdown_clone, next_event);
            })
            .expect("Failed to spawn input thread");

        Self {
            handle: Some(handle),
            shutdown,
        }
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Drop the receiving end, then join.
    ///
    /// The thread may be blocked sending into a full channel. With the
    /// receiver gone that send fails and the thread exits.
    pub fn stop(self, events: Receiver<InputEvent>) {
        drop(events);
        self.join();
    }

    fn run_loop<P>(sender: &Sender<InputEvent>, shutdown: &AtomicBool, mut next_event: P)
    where
        P: FnMut() -> io::Result<Option<Event>>,
    {
        while !shutdown.load(Ordering::Relaxed) {
            let forwarded = match next_event() {
                Ok(Some(event)) => convert_event(event).map(|event| sender.send(event)),
                Ok(None) => None,
                Err(e) => {
                    log::warn!("input poll failed: {e}");
                    Some(sender.send(InputEvent::Error(e.to_string())))
                }
            };
            if matches!(forwarded, Some(Err(_))) {
                log::debug!("input receiver dropped");
                return;
            }
        }
        let _ = sender.send(InputEvent::Shutdown);
        log::debug!("input thread stopped");
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Convert a crossterm event, dropping anything the app does not bind.
fn convert_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key_event) => {
            // Presses only, not release or repeat
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            Some(InputEvent::Key {
                code: convert_key_code(key_event.code)?,
                modifiers: convert_modifiers(key_event.modifiers),
            })
        }
        Event::Mouse(mouse) => match mouse.kind {
            event::MouseEventKind::Down(button) => Some(InputEvent::MouseDown(MouseEvent {
                x: mouse.column,
                y: mouse.row,
                button: convert_mouse_button(button),
                modifiers: convert_modifiers(mouse.modifiers),
            })),
            _ => None,
        },
        Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        _ => None,
    }
}

fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
    Some(match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Up => KeyCode::Up,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::Esc => KeyCode::Esc,
        _ => return None,
    })
}

fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: mods.contains(event::KeyModifiers::SHIFT),
        control: mods.contains(event::KeyModifiers::CONTROL),
        alt: mods.contains(event::KeyModifiers::ALT),
        super_key: mods.contains(event::KeyModifiers::SUPER),
    }
}

const fn convert_mouse_button(button: event::MouseButton) -> MouseButton {
    match button {
        event::MouseButton::Left => MouseButton::Left,
        event::MouseButton::Right => MouseButton::Right,
        event::MouseButton::Middle => MouseButton::Middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use crossterm::event::{KeyEvent, MouseEventKind};

    fn space() -> Event {
        Event::Key(KeyEvent::new(event::KeyCode::Char(' '), event::KeyModifiers::NONE))
    }

    #[test]
    fn test_convert_key_press() {
        let event = Event::Key(KeyEvent::new(
            event::KeyCode::Char(' '),
            event::KeyModifiers::NONE,
        ));
        assert_eq!(
            convert_event(event),
            Some(InputEvent::Key {
                code: KeyCode::Char(' '),
                modifiers: KeyModifiers::NONE,
            })
        );
    }

    #[test]
    fn test_unbound_key_dropped() {
        let event = Event::Key(KeyEvent::new(event::KeyCode::F(5), event::KeyModifiers::NONE));
        assert_eq!(convert_event(event), None);
    }

    #[test]
    fn test_convert_mouse_down_with_modifiers() {
        let event = Event::Mouse(event::MouseEvent {
            kind: MouseEventKind::Down(event::MouseButton::Left),
            column: 12,
            row: 7,
            modifiers: event::KeyModifiers::SHIFT | event::KeyModifiers::CONTROL,
        });
        let Some(InputEvent::MouseDown(mouse)) = convert_event(event) else {
            panic!("expected MouseDown");
        };
        assert_eq!((mouse.x, mouse.y), (12, 7));
        assert_eq!(mouse.button, MouseButton::Left);
        assert!(mouse.modifiers.shift && mouse.modifiers.control);
        assert!(!mouse.modifiers.alt);
    }

    #[test]
    fn test_mouse_moves_dropped() {
        let event = Event::Mouse(event::MouseEvent {
            kind: MouseEventKind::Moved,
            column: 0,
            row: 0,
            modifiers: event::KeyModifiers::NONE,
        });
        assert_eq!(convert_event(event), None);
    }

    #[test]
    fn test_convert_resize() {
        assert_eq!(
            convert_event(Event::Resize(120, 40)),
            Some(InputEvent::Resize { width: 120, height: 40 })
        );
    }

    #[test]
    fn test_source_events_forwarded() {
        let (tx, rx) = bounded(8);
        let mut pending = vec![Ok(Some(space())), Ok(None), Err(io::Error::other("tty gone"))];
        pending.reverse();
        let actor = InputActor::spawn_source(tx, move || {
            pending.pop().unwrap_or_else(|| {
                thread::sleep(Duration::from_millis(1));
                Ok(None)
            })
        });

        let timeout = Duration::from_secs(5);
        assert!(matches!(rx.recv_timeout(timeout), Ok(InputEvent::Key { .. })));
        assert_eq!(rx.recv_timeout(timeout), Ok(InputEvent::Error("tty gone".into())));

        actor.shutdown();
        assert_eq!(rx.recv_timeout(timeout), Ok(InputEvent::Shutdown));
        actor.join();
    }

    #[test]
    fn test_stop_unblocks_full_channel() {
        let (tx, rx) = bounded(1);
        let actor = InputActor::spawn_source(tx, || Ok(Some(space())));

        // Wait until the channel is full and the thread is blocked sending
        while !rx.is_full() {
            thread::sleep(Duration::from_millis(1));
        }

        let (done_tx, done_rx) = bounded(1);
        thread::spawn(move || {
            actor.stop(rx);
            let _ = done_tx.send(());
        });
        assert!(done_rx.recv_timeout(Duration::from_secs(5)).is_ok());
    }
}
