//! `WeatherGrid` - Weather dashboard proxy and client core
//!
//! This library provides the server-side proxy for the upstream weather
//! APIs, the client-side data orchestrator and the pure helpers that turn
//! upstream payloads into dashboard values.

pub mod api;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod upstream;
pub mod web;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export core types for public API
pub use api::ProxyState;
pub use clock::LocalClock;
pub use config::WeatherGridConfig;
pub use error::WeatherGridError;
pub use models::{Coordinate, DailySummary, SearchResult};
pub use orchestrator::{AppState, DashboardApi, Domain, DomainState, Orchestrator, ProxyClient};
pub use upstream::UpstreamClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherGridError>;
