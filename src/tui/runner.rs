//! TUI Runner - main event loop.
//!
//! The `TuiRunner` owns the terminal, app and dispatcher. It runs the main
//! loop: render → wait for a terminal event or a request completion →
//! dispatch queued tickets → repeat.

use std::sync::Arc;

use eyre::Result;
use log::info;
use tokio::sync::mpsc;

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views::render;
use crate::api::DashboardApi;
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::dashboard::ToolEvent;

/// Main TUI runner that owns the event loop.
pub struct TuiRunner {
    /// The terminal instance
    terminal: Tui,
    /// Application state and input handling
    app: App,
    /// Spawns request tasks
    dispatcher: Dispatcher,
    /// Completions from request tasks
    tool_rx: mpsc::Receiver<ToolEvent>,
    tick_rate_ms: u64,
}

impl TuiRunner {
    /// Create a new TUI runner.
    pub fn new(terminal: Tui, config: &Config, api: Arc<dyn DashboardApi>) -> Self {
        let (dispatcher, tool_rx) = Dispatcher::new(api);
        Self {
            terminal,
            app: App::new(config),
            dispatcher,
            tool_rx,
            tick_rate_ms: config.tui.tick_rate_ms,
        }
    }

    /// Run the main TUI loop.
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting TUI main loop");

        let (term_tx, mut term_rx) = mpsc::channel(64);
        let _poller = EventHandler::new(self.tick_rate_ms).spawn(term_tx);

        loop {
            // 1. Render current state
            self.terminal.draw(|f| render(&self.app, f))?;

            // 2. Wait for terminal input or a finished request
            let event = tokio::select! {
                event = term_rx.recv() => match event {
                    Some(event) => event,
                    None => break,
                },
                Some(done) = self.tool_rx.recv() => Event::from(done),
            };

            // 3. Update state and dispatch any tickets it produced
            if handle_event(&mut self.app, &mut self.dispatcher, event) {
                break;
            }
        }

        // Closing the channel stops the poll thread
        drop(term_rx);
        let aborted = self.dispatcher.cancel_all();
        info!("TUI main loop ended ({} request(s) aborted)", aborted);
        Ok(())
    }
}

/// Apply one event. Returns true when the app should quit.
pub fn handle_event(app: &mut App, dispatcher: &mut Dispatcher, event: Event) -> bool {
    match event {
        Event::Key(key) => {
            if app.handle_key(key) {
                return true;
            }
        }
        Event::Tool(done) => {
            dispatcher.complete(&done);
            app.apply(done);
        }
        Event::Tick | Event::Resize(_, _) => {
            // Redraw happens on the next loop iteration
        }
    }

    for ticket in app.take_pending() {
        dispatcher.dispatch(ticket);
    }

    app.should_quit
}
