//! Terminal event source.
//!
//! The dashboard runs on one thread: the main loop waits for input with a
//! timeout equal to the time left until the next poll is due.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Application events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keyboard input.
    Key(KeyEvent),
    /// Terminal resize (width, height).
    Resize(u16, u16),
}

/// Blocking source of terminal events.
pub trait EventSource {
    /// Waits up to `timeout` for the next event.
    ///
    /// Returns `Ok(None)` when the timeout elapsed first.
    fn next(&mut self, timeout: Duration) -> io::Result<Option<Event>>;
}

/// Reads events from the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let event = match event::read()? {
            // Windows reports releases too.
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
            CrosstermEvent::Resize(width, height) => Event::Resize(width, height),
            _ => return Ok(None),
        };
        Ok(Some(event))
    }
}
