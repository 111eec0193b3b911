//! Terminal and request events for the dashboard loop.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use log::{debug, error};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::dashboard::ToolEvent;

/// Everything the runner reacts to.
#[derive(Debug)]
pub enum Event {
    /// Key press (releases and repeats are dropped)
    Key(KeyEvent),
    /// Nothing happened during one tick
    Tick,
    Resize(u16, u16),
    /// A tool request finished
    Tool(ToolEvent),
}

impl From<ToolEvent> for Event {
    fn from(done: ToolEvent) -> Self {
        Event::Tool(done)
    }
}

/// Source of terminal events, polled on a blocking thread.
pub struct EventHandler {
    tick_rate: Duration,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(250)
    }
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Start polling crossterm and forward events into `tx`.
    ///
    /// The thread exits within one tick after the receiver is dropped.
    pub fn spawn(self, tx: mpsc::Sender<Event>) -> JoinHandle<()> {
        tokio::task::spawn_blocking(move || {
            loop {
                let event = match self.poll() {
                    Ok(event) => event,
                    Err(e) => {
                        error!("Terminal event error: {}", e);
                        break;
                    }
                };
                if tx.blocking_send(event).is_err() {
                    break;
                }
            }
            debug!("Terminal event thread stopped");
        })
    }

    fn poll(&self) -> std::io::Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }
        Ok(match event::read()? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
            CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
            _ => Event::Tick,
        })
    }
}
