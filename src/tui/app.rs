//! Application state and main loop
//!
//! The app never touches the engine directly: it reads published
//! [`Signals`] and sends gestures through the session handle.

use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::terminal::{self, Tui};
use super::ui;
use crate::engine::{status_message, Gesture, Signals, MAX_MOOD};
use crate::session::PalHandle;

/// Per-frame wobble derived from the current signals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Jitter {
    /// Horizontal sprite offset in cells
    pub offset: i16,
    /// Seed for which sprite rows get color-shifted
    pub glitch: u8,
}

/// Main TUI application state
pub struct App {
    /// Should the app exit?
    pub should_quit: bool,
    /// Latest signals from the session
    pub signals: Signals,
    /// Current frame wobble
    pub jitter: Jitter,

    handle: PalHandle,
    frame_interval: Duration,
    rng: StdRng,
}

impl App {
    pub fn new(handle: PalHandle, frame_interval: Duration) -> Self {
        let signals = handle.current();
        Self {
            should_quit: false,
            signals,
            jitter: Jitter::default(),
            handle,
            frame_interval,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Hand the session back for an orderly shutdown.
    pub fn into_handle(self) -> PalHandle {
        self.handle
    }

    /// Run the main event loop
    pub async fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        terminal::set_title("Pixel Pal");

        let mut events = EventStream::new();
        let mut signals = self.handle.signals();
        let mut frames = tokio::time::interval(self.frame_interval);

        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, self))?;

            tokio::select! {
                _ = frames.tick() => self.on_tick(),

                changed = signals.changed() => {
                    if changed.is_err() {
                        tracing::warn!("session ended, leaving TUI");
                        self.should_quit = true;
                    } else {
                        let next = signals.borrow_and_update().clone();
                        self.on_signals(next);
                    }
                }

                event = events.next() => match event {
                    Some(Ok(Event::Key(key))) => self.handle_key(key)?,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => self.should_quit = true,
                },
            }
        }

        Ok(())
    }

    fn on_signals(&mut self, next: Signals) {
        if next.broken && !self.signals.broken {
            terminal::send_notification("Pixel Pal", status_message(MAX_MOOD));
        } else if next.show_appeasement_prompt && !self.signals.show_appeasement_prompt {
            terminal::send_notification("Pixel Pal", status_message(next.mood));
        }
        self.signals = next;
    }

    /// Handle a key event
    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') | KeyCode::Enter => self.handle.interact(Gesture::Attention)?,
            KeyCode::Char('a') if self.signals.show_appeasement_prompt => {
                self.handle.interact(Gesture::Appease)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn on_tick(&mut self) {
        self.jitter = if self.signals.broken {
            Jitter::default()
        } else if self.signals.shaking {
            Jitter {
                offset: self.rng.random_range(-3..=3),
                glitch: 0,
            }
        } else if self.signals.glitching {
            Jitter {
                offset: self.rng.random_range(-1..=1),
                glitch: self.rng.random_range(1..=u8::MAX),
            }
        } else {
            Jitter::default()
        };
    }
}
