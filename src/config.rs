//! Configuration management for the Weather Grid server
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::WeatherGridError;
use crate::models::Coordinate;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the upstream credential when the layered
/// configuration does not provide one.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Root configuration structure for the Weather Grid server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherGridConfig {
    /// Upstream API configuration
    pub upstream: UpstreamConfig,
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Response caching hints
    pub cache: CacheConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Fallback location settings
    pub defaults: DefaultsConfig,
}

/// Upstream API configuration settings
#[derive(Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// OpenWeatherMap API key. Never serialized, never logged.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Base URL for OpenWeatherMap (weather, forecast, pollution, geocoding)
    #[serde(default = "default_openweather_base_url")]
    pub openweather_base_url: String,
    /// Base URL for Open-Meteo (UV index)
    #[serde(default = "default_open_meteo_base_url")]
    pub open_meteo_base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_upstream_timeout")]
    pub timeout_seconds: u32,
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("openweather_base_url", &self.openweather_base_url)
            .field("open_meteo_base_url", &self.open_meteo_base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// HTTP server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory with a built frontend to serve as fallback (optional)
    #[serde(default)]
    pub static_dir: Option<String>,
}

/// Cache hint settings handed to the hosting layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL for the weather, forecast and pollution domains
    #[serde(default = "default_weather_ttl")]
    pub weather_ttl_seconds: u32,
    /// TTL for the UV domain
    #[serde(default = "default_uv_ttl")]
    pub uv_ttl_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Fallback location used when a request carries no coordinate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_city_name")]
    pub city_name: String,
    /// Shown when the forecast does not report a population
    #[serde(default = "default_population")]
    pub population: u64,
}

// Default value functions
fn default_openweather_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_open_meteo_base_url() -> String {
    "https://api.open-meteo.com".to_string()
}

fn default_upstream_timeout() -> u32 {
    10
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_weather_ttl() -> u32 {
    3600
}

fn default_uv_ttl() -> u32 {
    900
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_latitude() -> f64 {
    14.65
}

fn default_longitude() -> f64 {
    120.9667
}

fn default_city_name() -> String {
    "Caloocan City".to_string()
}

fn default_population() -> u64 {
    1_661_584
}

impl Default for WeatherGridConfig {
    fn default() -> Self {
        Self {
            upstream: UpstreamConfig {
                api_key: None,
                openweather_base_url: default_openweather_base_url(),
                open_meteo_base_url: default_open_meteo_base_url(),
                timeout_seconds: default_upstream_timeout(),
            },
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                static_dir: None,
            },
            cache: CacheConfig {
                weather_ttl_seconds: default_weather_ttl(),
                uv_ttl_seconds: default_uv_ttl(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
            defaults: DefaultsConfig {
                latitude: default_latitude(),
                longitude: default_longitude(),
                city_name: default_city_name(),
                population: default_population(),
            },
        }
    }
}

impl WeatherGridConfig {
    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        Self::load_layered(config_path, None)
    }

    /// Layer the file under the `WEATHERGRID_*` variables. `env` replaces the
    /// process environment when given.
    fn load_layered(
        config_path: Option<PathBuf>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        let fallback_key = match &env {
            Some(vars) => vars.get(API_KEY_ENV).cloned(),
            None => std::env::var(API_KEY_ENV).ok(),
        };

        // WEATHERGRID_UPSTREAM__API_KEY, WEATHERGRID_SERVER__PORT, ...
        builder = builder.add_source(
            Environment::with_prefix("WEATHERGRID")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WeatherGridConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        if config.upstream.api_key.is_none() {
            config.upstream.api_key = fallback_key;
        }

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weathergrid").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self
            .upstream
            .api_key
            .as_deref()
            .is_some_and(|key| key.trim().is_empty())
        {
            self.upstream.api_key = None;
        }
        if self.upstream.openweather_base_url.is_empty() {
            self.upstream.openweather_base_url = default_openweather_base_url();
        }
        if self.upstream.open_meteo_base_url.is_empty() {
            self.upstream.open_meteo_base_url = default_open_meteo_base_url();
        }
        if self.upstream.timeout_seconds == 0 {
            self.upstream.timeout_seconds = default_upstream_timeout();
        }
        if self.cache.weather_ttl_seconds == 0 {
            self.cache.weather_ttl_seconds = default_weather_ttl();
        }
        if self.cache.uv_ttl_seconds == 0 {
            self.cache.uv_ttl_seconds = default_uv_ttl();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.defaults.city_name.is_empty() {
            self.defaults.city_name = default_city_name();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.default_coordinate()?;
        Ok(())
    }

    /// The configured fallback coordinate
    pub fn default_coordinate(&self) -> std::result::Result<Coordinate, WeatherGridError> {
        Coordinate::new(self.defaults.latitude, self.defaults.longitude)
            .map_err(|e| WeatherGridError::config(format!("Invalid default location: {e}")))
    }

    /// Upstream request timeout
    #[must_use]
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.timeout_seconds.into())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.upstream.timeout_seconds > 300 {
            return Err(
                WeatherGridError::config("Upstream timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.cache.weather_ttl_seconds > 86_400 || self.cache.uv_ttl_seconds > 86_400 {
            return Err(WeatherGridError::config("Cache TTL cannot exceed 86400 seconds").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherGridError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherGridError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for url in [
            &self.upstream.openweather_base_url,
            &self.upstream.open_meteo_base_url,
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WeatherGridError::config(format!(
                    "Upstream base URL must be a valid HTTP or HTTPS URL, got '{url}'"
                ))
                .into());
            }
        }

        Ok(())
    }
}
