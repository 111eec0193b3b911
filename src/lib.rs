//! hackdash - terminal dashboard for three AI/geocoding demo tools
//!
//! Recipe generation, company geolocation and supply chain mapping, each a
//! single HTTP round trip to a backend that fronts the AI and maps services.

pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod dispatch;
pub mod error;
pub mod maps;
pub mod model;
pub mod tui;

pub use error::{DashError, Result};
