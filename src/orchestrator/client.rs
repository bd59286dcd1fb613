//! Transport from the dashboard to the proxy

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::api::ErrorBody;
use crate::models::{Coordinate, Domain};
use crate::{Result, WeatherGridError};

/// The proxy surface as seen by the orchestrator
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Fetch one coordinate domain
    async fn fetch(&self, domain: Domain, coordinate: Coordinate) -> Result<Value>;

    /// Geocode a free-text query
    async fn search(&self, query: &str) -> Result<Value>;
}

/// [`DashboardApi`] over HTTP against a running proxy
#[derive(Clone)]
pub struct ProxyClient {
    client: Client,
    base_url: String,
}

impl ProxyClient {
    /// `base_url` is the proxy mount point, e.g. `http://localhost:3000/api`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WeatherGridError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get(&self, domain: Domain, url: String) -> Result<Value> {
        debug!(domain = domain.label(), %url, "Requesting proxy");

        let response = self.client.get(&url).send().await.map_err(|e| {
            WeatherGridError::upstream(format!("Failed to fetch {} data: {e}", domain.label()))
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.message)
                .unwrap_or_else(|_| format!("Failed to fetch {} data", domain.label()));
            return Err(WeatherGridError::proxy(message, status.as_u16()));
        }

        response.json().await.map_err(|e| {
            WeatherGridError::upstream(format!("Invalid {} data received: {e}", domain.label()))
        })
    }
}

#[async_trait]
impl DashboardApi for ProxyClient {
    async fn fetch(&self, domain: Domain, coordinate: Coordinate) -> Result<Value> {
        let url = format!(
            "{}{}?lat={}&lon={}",
            self.base_url,
            domain.path(),
            coordinate.latitude,
            coordinate.longitude
        );
        self.get(domain, url).await
    }

    async fn search(&self, query: &str) -> Result<Value> {
        let url = format!(
            "{}{}?q={}",
            self.base_url,
            Domain::LocationSearch.path(),
            urlencoding::encode(query)
        );
        self.get(Domain::LocationSearch, url).await
    }
}
