//! Terminal User Interface for hackdash.
//!
//! Three stacked tool panels (recipe, company locator, supply chain) driven
//! by one tokio event loop that multiplexes key presses, ticks and request
//! completions.

mod app;
mod events;
mod input;
mod runner;
mod views;

pub use app::App;
pub use events::{Event, EventHandler};
pub use input::TextInput;
pub use runner::TuiRunner;
pub use views::{location_lines, node_card, recipe_lines, render, supply_chain_lines};

use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use eyre::Result;
use ratatui::prelude::*;
use std::io::{Stdout, stdout};

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode.
///
/// Enables raw mode and switches to the alternate screen.
pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
///
/// Disables raw mode and leaves the alternate screen.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Combine the outcome of the event loop with that of restoring the terminal.
///
/// A loop error wins; a restore error that would otherwise be lost is logged.
pub fn finish(run: Result<()>, restore: Result<()>) -> Result<()> {
    match (run, restore) {
        (Err(run_err), Err(restore_err)) => {
            log::error!("Failed to restore terminal: {:#}", restore_err);
            Err(run_err)
        }
        (Err(run_err), Ok(())) => Err(run_err),
        (Ok(()), restore) => restore,
    }
}

/// Dashboard palette.
pub mod colors {
    use ratatui::style::Color;

    pub const FOUND: Color = Color::Rgb(74, 222, 128); // Green
    pub const NOT_FOUND: Color = Color::Rgb(239, 68, 68); // Red
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const LOADING: Color = Color::Rgb(255, 215, 0); // Gold
    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const DIM: Color = Color::DarkGray;
}
