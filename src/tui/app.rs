//! TUI Application
//!
//! Owns the dashboard state and turns key presses into focus changes, query
//! edits and request tickets for the runner to dispatch.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::Config;
use crate::dashboard::{Applied, Dashboard, Ticket, ToolEvent, ToolId};
use crate::maps::MapLinks;

/// Main TUI application
pub struct App {
    /// All tool state
    pub dashboard: Dashboard,
    /// Panel receiving keyboard input
    pub focus: ToolId,
    /// Whether the help overlay is visible
    pub show_help: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Backend base URL, shown in the header
    pub backend_url: String,
    /// Deep link builder for result panels
    pub links: MapLinks,
    scroll: [u16; 3],
    pending: Vec<Ticket>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            dashboard: Dashboard::new(config),
            focus: ToolId::default(),
            show_help: false,
            should_quit: false,
            backend_url: config.backend.base_url.clone(),
            links: MapLinks::new(&config.maps),
            scroll: [0; 3],
            pending: Vec::new(),
        }
    }

    /// Create with default config
    pub fn with_defaults() -> Self {
        Self::new(&Config::default())
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_focus(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Scroll offset of a tool's result area.
    pub fn scroll(&self, tool: ToolId) -> u16 {
        self.scroll[slot(tool)]
    }

    fn scroll_by(&mut self, tool: ToolId, delta: i32) {
        let current = self.scroll[slot(tool)] as i32;
        self.scroll[slot(tool)] = (current + delta).clamp(0, u16::MAX as i32) as u16;
    }

    /// Press a tool's trigger. Queues a ticket when the trigger is enabled.
    pub fn trigger(&mut self, tool: ToolId) -> bool {
        match self.dashboard.trigger(tool) {
            Some(ticket) => {
                self.scroll[slot(tool)] = 0;
                self.pending.push(ticket);
                true
            }
            None => false,
        }
    }

    /// Tickets queued since the last call.
    pub fn take_pending(&mut self) -> Vec<Ticket> {
        std::mem::take(&mut self.pending)
    }

    /// Fold a completed request into the dashboard.
    pub fn apply(&mut self, event: ToolEvent) -> Applied {
        self.dashboard.apply(event)
    }

    /// Handle a key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.show_help {
            // Any key closes help
            self.show_help = false;
            return false;
        }

        match key.code {
            KeyCode::Esc => self.quit(),
            KeyCode::F(1) => self.show_help = true,
            KeyCode::Tab => self.next_focus(),
            KeyCode::BackTab => self.prev_focus(),
            KeyCode::Enter => {
                self.trigger(self.focus);
            }
            KeyCode::Up => self.scroll_by(self.focus, -1),
            KeyCode::Down => self.scroll_by(self.focus, 1),
            KeyCode::PageUp => self.scroll_by(self.focus, -10),
            KeyCode::PageDown => self.scroll_by(self.focus, 10),
            _ => self.handle_panel_key(key),
        }

        self.should_quit
    }

    fn handle_panel_key(&mut self, key: KeyEvent) {
        match self.focus {
            // The recipe panel has no input, so letters act as commands
            ToolId::Recipe => match key.code {
                KeyCode::Char('q') => self.quit(),
                KeyCode::Char('g') => {
                    self.trigger(ToolId::Recipe);
                }
                KeyCode::Char('?') => self.show_help = true,
                _ => {}
            },
            ToolId::Locator => {
                self.dashboard.company_query.handle_key(&key);
            }
            ToolId::SupplyChain => {
                self.dashboard.product_query.handle_key(&key);
            }
        }
    }
}

fn slot(tool: ToolId) -> usize {
    match tool {
        ToolId::Recipe => 0,
        ToolId::Locator => 1,
        ToolId::SupplyChain => 2,
    }
}
