//! Query-string parameters accepted by the proxy handlers

use serde::Deserialize;

use crate::models::Coordinate;
use crate::{Result, WeatherGridError};

/// Optional `lat`/`lon`, kept as raw strings so that blank values fall back
/// to the default instead of failing extraction
#[derive(Debug, Default, Deserialize)]
pub struct CoordinateQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

impl CoordinateQuery {
    /// Resolve against `fallback`. Each axis falls back on its own when it
    /// is absent or blank; a present value must parse and be in range.
    pub fn resolve(&self, fallback: Coordinate) -> Result<Coordinate> {
        let latitude = parse_axis("lat", self.lat.as_deref())?.unwrap_or(fallback.latitude);
        let longitude = parse_axis("lon", self.lon.as_deref())?.unwrap_or(fallback.longitude);
        Coordinate::new(latitude, longitude)
    }
}

fn parse_axis(name: &str, raw: Option<&str>) -> Result<Option<f64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<f64>().map(Some).map_err(|_| {
            WeatherGridError::validation(format!("Parameter '{name}' must be a number, got: {value}"))
        }),
    }
}

/// Free-text geocoding query
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

impl SearchQuery {
    /// The trimmed query, rejecting a missing or blank one
    pub fn text(&self) -> Result<&str> {
        match self.q.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => Ok(q),
            _ => Err(WeatherGridError::validation("Search query is required")),
        }
    }
}
