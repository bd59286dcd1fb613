//! Server-side proxy for the upstream weather APIs
//!
//! Each handler resolves its query, attaches the credential through
//! [`UpstreamClient`] and passes the upstream JSON body through unchanged.

pub mod error;
pub mod handlers;
pub mod query;

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::Result;
use crate::config::{CacheConfig, WeatherGridConfig};
use crate::models::Coordinate;
use crate::upstream::UpstreamClient;

pub use error::{ApiError, ErrorBody};

/// Shared state for the proxy handlers
#[derive(Clone)]
pub struct ProxyState {
    pub upstream: Arc<UpstreamClient>,
    pub default_coordinate: Coordinate,
    pub cache: CacheConfig,
}

impl ProxyState {
    pub fn new(config: &WeatherGridConfig) -> Result<Self> {
        Ok(Self {
            upstream: Arc::new(UpstreamClient::new(config)?),
            default_coordinate: config.default_coordinate()?,
            cache: config.cache.clone(),
        })
    }
}

pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/weather", get(handlers::current_weather))
        .route("/daily-forecast", get(handlers::daily_forecast))
        .route("/pollution", get(handlers::air_pollution))
        .route("/uv", get(handlers::uv_index))
        .route("/location-search", get(handlers::location_search))
        .with_state(state)
}
