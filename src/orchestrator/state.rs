//! Dashboard state held by the orchestrator

use crate::models::{
    AirPollutionResponse, Coordinate, CurrentWeather, Domain, ForecastResponse, SearchResult,
    UvResponse,
};

/// Value, in-flight flag and last error of one domain.
///
/// `data` survives a failed refresh, so it may sit next to an `error`.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for DomainState<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
        }
    }
}

impl<T> DomainState<T> {
    pub(crate) fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub(crate) fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.is_loading = false;
        self.error = None;
    }

    pub(crate) fn fail(&mut self, error: String) {
        self.is_loading = false;
        self.error = Some(error);
    }
}

/// Everything the dashboard widgets read
#[derive(Debug, Clone)]
pub struct AppState {
    pub coordinate: Coordinate,
    pub forecast: DomainState<CurrentWeather>,
    pub daily_forecast: DomainState<ForecastResponse>,
    pub air_pollution: DomainState<AirPollutionResponse>,
    pub uv: DomainState<UvResponse>,
    pub location_search: DomainState<Vec<SearchResult>>,
}

impl AppState {
    #[must_use]
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            forecast: DomainState::default(),
            daily_forecast: DomainState::default(),
            air_pollution: DomainState::default(),
            uv: DomainState::default(),
            location_search: DomainState::default(),
        }
    }

    /// Loading flag and error of a domain, without its data
    #[must_use]
    pub fn status(&self, domain: Domain) -> (bool, Option<&str>) {
        let (is_loading, error) = match domain {
            Domain::Forecast => (self.forecast.is_loading, &self.forecast.error),
            Domain::DailyForecast => (self.daily_forecast.is_loading, &self.daily_forecast.error),
            Domain::AirPollution => (self.air_pollution.is_loading, &self.air_pollution.error),
            Domain::Uv => (self.uv.is_loading, &self.uv.error),
            Domain::LocationSearch => (self.location_search.is_loading, &self.location_search.error),
        };
        (is_loading, error.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_refresh_keeps_stale_data() {
        let mut state = DomainState::default();
        state.begin();
        state.succeed(42);
        state.begin();
        assert!(state.is_loading);
        assert_eq!(state.data, Some(42));

        state.fail("timeout".to_string());
        assert!(!state.is_loading);
        assert_eq!(state.data, Some(42));
        assert_eq!(state.error.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_begin_clears_previous_error() {
        let mut state: DomainState<u8> = DomainState::default();
        state.fail("boom".to_string());
        state.begin();
        assert!(state.error.is_none());
    }
}
