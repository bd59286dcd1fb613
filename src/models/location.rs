//! Location model for geographic coordinates and search results

use serde::{Deserialize, Serialize};

use crate::WeatherGridError;

/// A validated (latitude, longitude) pair
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees, within [-90, 90]
    pub latitude: f64,
    /// Longitude in decimal degrees, within [-180, 180]
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting values outside the valid ranges
    pub fn new(latitude: f64, longitude: f64) -> crate::Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(WeatherGridError::validation(format!(
                "Latitude must be between -90 and 90, got: {latitude}"
            )));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherGridError::validation(format!(
                "Longitude must be between -180 and 180, got: {longitude}"
            )));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Format as a coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// One entry of a geocoding search response
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchResult {
    /// Place name
    pub name: String,
    /// Region/state, not reported for every place
    #[serde(default)]
    pub state: Option<String>,
    /// Country code (ISO 3166-1 alpha-2)
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl SearchResult {
    /// Display label, e.g. "Springfield, Illinois, US"
    #[must_use]
    pub fn label(&self) -> String {
        match &self.state {
            Some(state) if !state.is_empty() => {
                format!("{}, {}, {}", self.name, state, self.country)
            }
            _ => format!("{}, {}", self.name, self.country),
        }
    }

    /// Coordinate of this result
    pub fn coordinate(&self) -> crate::Result<Coordinate> {
        Coordinate::new(self.lat, self.lon)
    }
}

/// A city offered as a one-click location on the dashboard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeaturedCity {
    pub name: &'static str,
    pub country: &'static str,
    pub state: &'static str,
    pub lat: f64,
    pub lon: f64,
}

pub const FEATURED_CITIES: [FeaturedCity; 5] = [
    FeaturedCity {
        name: "Manila",
        country: "PH",
        state: "Metro Manila",
        lat: 14.5995,
        lon: 120.9842,
    },
    FeaturedCity {
        name: "Tokyo",
        country: "JP",
        state: "Tokyo",
        lat: 35.6762,
        lon: 139.6503,
    },
    FeaturedCity {
        name: "New York",
        country: "US",
        state: "New York",
        lat: 40.7128,
        lon: -74.006,
    },
    FeaturedCity {
        name: "London",
        country: "GB",
        state: "England",
        lat: 51.5074,
        lon: -0.1278,
    },
    FeaturedCity {
        name: "Dubai",
        country: "AE",
        state: "Dubai",
        lat: 25.2048,
        lon: 55.2708,
    },
];
