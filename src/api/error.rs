//! HTTP error responses for the proxy handlers

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::WeatherGridError;
use crate::models::Domain;

/// Error body returned to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// Handler error carrying the status to respond with
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    /// Convert a failed domain call into the uniform response. Details are
    /// logged here and never forwarded.
    pub fn from_domain(domain: Domain, err: WeatherGridError) -> Self {
        match err {
            WeatherGridError::Config { message } => {
                error!(domain = domain.label(), "{message}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    "Server configuration error",
                )
            }
            WeatherGridError::Upstream { message, status } => {
                error!(domain = domain.label(), upstream_status = ?status, "{message}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "UPSTREAM_ERROR",
                    format!("Error fetching {} data", domain.label()),
                )
            }
            WeatherGridError::Validation { message } => {
                warn!(domain = domain.label(), "{message}");
                Self::bad_request(message)
            }
            other => {
                error!(domain = domain.label(), error = %other, "Unexpected proxy failure");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    other.user_message(),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
