//! Upstream weather API client
//!
//! Builds the OpenWeatherMap and Open-Meteo request URLs, issues them and
//! classifies failures. The credential is only ever placed in the outgoing
//! URL: it is skipped by tracing spans, stripped from transport errors and
//! never part of a returned message.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::WeatherGridConfig;
use crate::models::{Coordinate, Domain};
use crate::{Result, WeatherGridError};

/// Geocoding results requested per search
pub const SEARCH_LIMIT: u8 = 5;

/// HTTP client for the third-party weather APIs
#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    api_key: Option<String>,
    openweather_base_url: String,
    open_meteo_base_url: String,
}

impl UpstreamClient {
    /// Create a new upstream client from configuration
    pub fn new(config: &WeatherGridConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.upstream_timeout())
            .user_agent(concat!("weathergrid/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                WeatherGridError::config(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            api_key: config.upstream.api_key.clone(),
            openweather_base_url: trim_base(&config.upstream.openweather_base_url),
            open_meteo_base_url: trim_base(&config.upstream.open_meteo_base_url),
        })
    }

    /// Whether a credential is configured
    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Current conditions for a coordinate
    pub async fn current_weather(&self, coordinate: Coordinate) -> Result<Value> {
        let key = self.credential()?;
        let url = format!(
            "{}/data/2.5/weather?lat={}&lon={}&appid={}",
            self.openweather_base_url, coordinate.latitude, coordinate.longitude, key
        );
        self.get_json(Domain::Forecast, &url).await
    }

    /// 5-day/3-hour forecast for a coordinate
    pub async fn daily_forecast(&self, coordinate: Coordinate) -> Result<Value> {
        let key = self.credential()?;
        let url = format!(
            "{}/data/2.5/forecast?lat={}&lon={}&appid={}",
            self.openweather_base_url, coordinate.latitude, coordinate.longitude, key
        );
        self.get_json(Domain::DailyForecast, &url).await
    }

    /// Current air pollution for a coordinate
    pub async fn air_pollution(&self, coordinate: Coordinate) -> Result<Value> {
        let key = self.credential()?;
        let url = format!(
            "{}/data/2.5/air_pollution?lat={}&lon={}&appid={}",
            self.openweather_base_url, coordinate.latitude, coordinate.longitude, key
        );
        self.get_json(Domain::AirPollution, &url).await
    }

    /// Today's UV index maxima for a coordinate (Open-Meteo, keyless)
    pub async fn uv_index(&self, coordinate: Coordinate) -> Result<Value> {
        self.credential()?;
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&daily=uv_index_max,uv_index_clear_sky_max&timezone=auto&forecast_days=1",
            self.open_meteo_base_url, coordinate.latitude, coordinate.longitude
        );
        self.get_json(Domain::Uv, &url).await
    }

    /// Direct geocoding for a free-text query
    pub async fn location_search(&self, query: &str) -> Result<Value> {
        let key = self.credential()?;
        let url = format!(
            "{}/geo/1.0/direct?q={}&limit={}&appid={}",
            self.openweather_base_url,
            urlencoding::encode(query),
            SEARCH_LIMIT,
            key
        );
        self.get_json(Domain::LocationSearch, &url).await
    }

    fn credential(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            WeatherGridError::config(format!(
                "Upstream API key is missing; set {}",
                crate::config::API_KEY_ENV
            ))
        })
    }

    #[instrument(name = "upstream_request", skip(self, domain, url), fields(domain = domain.label()))]
    async fn get_json(&self, domain: Domain, url: &str) -> Result<Value> {
        let start = Instant::now();
        debug!("Calling upstream API");

        let response = self.client.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            warn!(error = %e, "Upstream request failed");
            WeatherGridError::upstream(format!("{} request failed: {e}", domain.label()))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Upstream responded with an error status");
            return Err(WeatherGridError::upstream_status(
                format!("{} API responded with status {}", domain.label(), status.as_u16()),
                status.as_u16(),
            ));
        }

        let body: Value = response.json().await.map_err(|e| {
            let e = e.without_url();
            warn!(error = %e, "Upstream body could not be decoded");
            WeatherGridError::upstream(format!("Invalid {} data received: {e}", domain.label()))
        })?;

        let elapsed = start.elapsed();
        info!(elapsed_ms = elapsed.as_millis() as u64, "Upstream request succeeded");
        if elapsed > Duration::from_secs(5) {
            warn!("Slow upstream response: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(body)
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
