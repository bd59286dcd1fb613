use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::Value;

use super::ProxyState;
use super::error::ApiError;
use super::query::{CoordinateQuery, SearchQuery};
use crate::models::Domain;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::VERSION,
    })
}

pub async fn current_weather(
    State(state): State<ProxyState>,
    Query(query): Query<CoordinateQuery>,
) -> Result<Response, ApiError> {
    let coordinate = query
        .resolve(state.default_coordinate)
        .map_err(|e| ApiError::from_domain(Domain::Forecast, e))?;
    let body = state
        .upstream
        .current_weather(coordinate)
        .await
        .map_err(|e| ApiError::from_domain(Domain::Forecast, e))?;
    Ok(cacheable(body, state.cache.weather_ttl_seconds))
}

pub async fn daily_forecast(
    State(state): State<ProxyState>,
    Query(query): Query<CoordinateQuery>,
) -> Result<Response, ApiError> {
    let coordinate = query
        .resolve(state.default_coordinate)
        .map_err(|e| ApiError::from_domain(Domain::DailyForecast, e))?;
    let body = state
        .upstream
        .daily_forecast(coordinate)
        .await
        .map_err(|e| ApiError::from_domain(Domain::DailyForecast, e))?;
    Ok(cacheable(body, state.cache.weather_ttl_seconds))
}

pub async fn air_pollution(
    State(state): State<ProxyState>,
    Query(query): Query<CoordinateQuery>,
) -> Result<Response, ApiError> {
    let coordinate = query
        .resolve(state.default_coordinate)
        .map_err(|e| ApiError::from_domain(Domain::AirPollution, e))?;
    let body = state
        .upstream
        .air_pollution(coordinate)
        .await
        .map_err(|e| ApiError::from_domain(Domain::AirPollution, e))?;
    Ok(cacheable(body, state.cache.weather_ttl_seconds))
}

pub async fn uv_index(
    State(state): State<ProxyState>,
    Query(query): Query<CoordinateQuery>,
) -> Result<Response, ApiError> {
    let coordinate = query
        .resolve(state.default_coordinate)
        .map_err(|e| ApiError::from_domain(Domain::Uv, e))?;
    let body = state
        .upstream
        .uv_index(coordinate)
        .await
        .map_err(|e| ApiError::from_domain(Domain::Uv, e))?;
    Ok(cacheable(body, state.cache.uv_ttl_seconds))
}

/// Geocoding search. The query is checked before the credential so a blank
/// search never reaches configuration handling.
pub async fn location_search(
    State(state): State<ProxyState>,
    Query(query): Query<SearchQuery>,
) -> Result<Response, ApiError> {
    let text = query
        .text()
        .map_err(|e| ApiError::from_domain(Domain::LocationSearch, e))?;
    let body = state
        .upstream
        .location_search(text)
        .await
        .map_err(|e| ApiError::from_domain(Domain::LocationSearch, e))?;
    Ok(Json(body).into_response())
}

/// Pass the upstream body through unchanged with a shared-cache hint
fn cacheable(body: Value, ttl_secs: u32) -> Response {
    let directive = format!("public, s-maxage={ttl_secs}, stale-while-revalidate={ttl_secs}");
    ([(header::CACHE_CONTROL, directive)], Json(body)).into_response()
}
