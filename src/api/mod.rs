//! Backend API layer - request types, client trait and HTTP implementation
//!
//! This module provides:
//! - Request bodies for the recipe and locate calls
//! - `DashboardApi` trait for backend abstraction
//! - `HttpBackend` implementation over reqwest
//! - `MockDashboardApi` for tests and offline demos

pub mod client;
pub mod http;
pub mod types;

pub use client::{ApiCall, DashboardApi, MockDashboardApi};
pub use http::HttpBackend;
pub use types::{LocateRequest, RecipeRequest};
