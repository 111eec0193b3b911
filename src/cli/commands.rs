//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - recipe: generate a recipe from the configured ingredients
//! - locate: geocode a company
//! - supply-chain: map a product's supply chain
//! - ping: check the backend is reachable

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// hackdash - recipe, company locator and supply chain dashboard
#[derive(Parser, Debug)]
#[command(name = "hackdash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend base URL (overrides the config file)
    #[arg(short, long, global = true)]
    pub backend: Option<String>,

    /// Subcommand to execute; the dashboard opens when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a recipe from the configured ingredients
    Recipe {
        /// Print the decoded payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the address and coordinates of a company
    Locate {
        /// Company name, e.g. "Tesla Gigafactory Texas"
        company: String,

        /// Print the decoded payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the companies in a product's supply chain and where they are
    SupplyChain {
        /// Product name, e.g. "iPhone 15 Pro"
        product: String,

        /// Print the decoded payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the backend answers
    Ping,
}
