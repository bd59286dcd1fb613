//! Typed views over the upstream payloads the dashboard reads
//!
//! The proxy relays upstream JSON verbatim; these structures only pick out
//! the fields the dashboard derives values from, ignoring everything else.

use serde::{Deserialize, Serialize};

/// Weather condition entry shared by current weather and forecast records
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Condition {
    /// Condition group ("Clear", "Clouds", "Rain", ...)
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Current conditions from OpenWeatherMap `/data/2.5/weather`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentWeather {
    /// City name
    #[serde(default)]
    pub name: String,
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub wind: Option<Wind>,
    #[serde(default)]
    pub sys: Option<SunTimes>,
    /// Visibility in meters
    #[serde(default)]
    pub visibility: Option<f64>,
    /// UTC offset in seconds
    #[serde(default)]
    pub timezone: Option<i64>,
    /// Observation time, Unix seconds
    #[serde(default)]
    pub dt: Option<i64>,
}

/// Temperatures in Kelvin, pressure in hPa, humidity in percent
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: f64,
    pub humidity: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct Wind {
    /// m/s
    pub speed: f64,
    /// Direction the wind blows from, degrees
    #[serde(default)]
    pub deg: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SunTimes {
    #[serde(default)]
    pub country: Option<String>,
    pub sunrise: i64,
    pub sunset: i64,
}

/// Air pollution from OpenWeatherMap `/data/2.5/air_pollution`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AirPollutionResponse {
    pub list: Vec<AirPollutionEntry>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AirPollutionEntry {
    pub main: AirQuality,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct AirQuality {
    /// 1 (good) to 5 (very poor)
    pub aqi: u32,
}

impl AirPollutionResponse {
    /// AQI of the first entry, if any
    #[must_use]
    pub fn current_aqi(&self) -> Option<u32> {
        self.list.first().map(|entry| entry.main.aqi)
    }
}

/// Daily UV forecast from Open-Meteo
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UvResponse {
    pub daily: UvDaily,
    #[serde(default)]
    pub timezone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UvDaily {
    #[serde(default)]
    pub time: Vec<String>,
    pub uv_index_max: Vec<Option<f64>>,
    #[serde(default)]
    pub uv_index_clear_sky_max: Vec<Option<f64>>,
}

impl UvResponse {
    /// Today's maximum UV index
    #[must_use]
    pub fn today_max(&self) -> Option<f64> {
        self.daily.uv_index_max.first().copied().flatten()
    }
}
