//! Error types and handling for the Weather Grid application

use thiserror::Error;

/// Main error type for the Weather Grid application
#[derive(Error, Debug)]
pub enum WeatherGridError {
    /// Configuration-related errors (missing credential, invalid settings)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream API errors. The status code is kept for diagnostics only.
    #[error("Upstream error: {message}")]
    Upstream {
        message: String,
        status: Option<u16>,
    },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Error response from the proxy, as seen by the dashboard. Displays the
    /// proxy's own message unchanged.
    #[error("{message}")]
    Proxy { message: String, status: u16 },
}

impl WeatherGridError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream error without a status (transport failure)
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
            status: None,
        }
    }

    /// Create a new upstream error for a non-success HTTP status
    pub fn upstream_status<S: Into<String>>(message: S, status: u16) -> Self {
        Self::Upstream {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new error for a non-success proxy response
    pub fn proxy<S: Into<String>>(message: S, status: u16) -> Self {
        Self::Proxy {
            message: message.into(),
            status,
        }
    }

    /// Upstream status code, if this error carries one
    #[must_use]
    pub fn upstream_status_code(&self) -> Option<u16> {
        match self {
            WeatherGridError::Upstream { status, .. } => *status,
            WeatherGridError::Proxy { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherGridError::Config { .. } => "Server configuration error".to_string(),
            WeatherGridError::Upstream { .. } => {
                "Unable to reach the weather service. Please try again later.".to_string()
            }
            WeatherGridError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            WeatherGridError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            WeatherGridError::Proxy { message, .. } => message.clone(),
        }
    }
}
