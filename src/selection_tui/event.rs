/// Loosely based on https://github.com/ratatui/templates/blob/main/event-driven/template/src/event.rs
use std::time::Duration;

use color_eyre::eyre::{Context, Result};
use ratatui::crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

const TIMEOUT: Duration = Duration::from_millis(250);

/// Terminal events the presenter reacts to.
#[derive(Clone, Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized and needs a redraw.
    Resize,
    /// Nothing happened within the poll timeout.
    Tick,
}

/// Blocking reader for terminal events.
#[derive(Debug, Default)]
pub struct EventReader;

impl EventReader {
    /// Waits for the next event, emitting a tick when nothing arrives in time.
    ///
    /// Key releases and repeats are dropped so every press is handled once.
    pub fn next(&self) -> Result<Event> {
        if !event::poll(TIMEOUT).wrap_err("failed to poll for crossterm events")? {
            return Ok(Event::Tick);
        }

        let event = match event::read().wrap_err("failed to read crossterm event")? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
            CrosstermEvent::Resize(_, _) => Event::Resize,
            _ => Event::Tick,
        };
        Ok(event)
    }
}
