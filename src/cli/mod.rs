//! CLI module for hackdash - command-line interface and subcommands.
//!
//! Provides the main entry point with one-shot subcommands for each tool
//! and the TUI launch.

pub mod commands;
pub mod oneshot;
pub mod output;

pub use commands::{Cli, Commands};
pub use oneshot::run_tool;
