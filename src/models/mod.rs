//! Data models for the Weather Grid application
//!
//! This module contains the core domain models organized by concern:
//! - Location: coordinates, geocoding results and featured cities
//! - Weather: typed views over current weather, pollution and UV payloads
//! - Forecast: 3-hour forecast records and the five-day aggregation
//! - Air quality: AQI bands and scaling
//! - Domain: the five proxied data domains

pub mod air_quality;
pub mod domain;
pub mod forecast;
pub mod location;
pub mod weather;

// Re-export all public types for convenient access
pub use air_quality::{AIR_QUALITY_BANDS, AirQualityBand, band_for, scale_aqi};
pub use domain::Domain;
pub use forecast::{DailySummary, ForecastRecord, ForecastResponse, five_day_aggregate};
pub use location::{Coordinate, FEATURED_CITIES, FeaturedCity, SearchResult};
pub use weather::{AirPollutionResponse, Condition, CurrentWeather, UvResponse};
