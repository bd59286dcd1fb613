//! Client-side data orchestrator
//!
//! Owns the dashboard [`AppState`] and is the only thing that mutates it.
//! Widgets get read-only `watch` receivers. Every fetch settles into its
//! domain's state; a response that has been superseded by a newer request
//! for the same domain is dropped without touching state.

pub mod client;
pub mod state;

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::models::{
    AirPollutionResponse, Coordinate, CurrentWeather, ForecastResponse, SearchResult, UvResponse,
};
pub use crate::models::Domain;
use crate::{Result, WeatherGridError};

pub use client::{DashboardApi, ProxyClient};
pub use state::{AppState, DomainState};

type Slot<T> = fn(&mut AppState) -> &mut DomainState<T>;

pub struct Orchestrator<A> {
    api: A,
    state: watch::Sender<AppState>,
    tokens: [AtomicU64; Domain::COUNT],
    mounted: AtomicBool,
}

impl<A: DashboardApi> Orchestrator<A> {
    /// Start with empty domains at `coordinate`
    pub fn new(api: A, coordinate: Coordinate) -> Self {
        let (state, _) = watch::channel(AppState::new(coordinate));
        Self {
            api,
            state,
            tokens: Default::default(),
            mounted: AtomicBool::new(false),
        }
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    pub fn coordinate(&self) -> Coordinate {
        self.state.borrow().coordinate
    }

    /// Replace the active coordinate. Does not fetch.
    pub fn set_active_coordinate(&self, latitude: f64, longitude: f64) -> Result<Coordinate> {
        let coordinate = Coordinate::new(latitude, longitude)?;
        self.state.send_modify(|state| state.coordinate = coordinate);
        info!(location = %coordinate.format_coordinates(), "Active location changed");
        Ok(coordinate)
    }

    /// Switch to a location and refresh every coordinate domain
    pub async fn select_location(&self, latitude: f64, longitude: f64) -> Result<()> {
        self.set_active_coordinate(latitude, longitude)?;
        self.fetch_all().await;
        Ok(())
    }

    /// First call fetches everything; later calls do nothing. Returns whether
    /// this call did the fetch.
    pub async fn mount(&self) -> bool {
        if self.mounted.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.fetch_all().await;
        true
    }

    /// Fetch all coordinate domains concurrently and wait for every one to
    /// settle
    pub async fn fetch_all(&self) {
        futures::join!(
            self.fetch_forecast(),
            self.fetch_daily_forecast(),
            self.fetch_air_pollution(),
            self.fetch_uv(),
        );

        let state = self.state.borrow();
        let failed: Vec<&str> = Domain::COORDINATE_DOMAINS
            .into_iter()
            .filter(|d| state.status(*d).1.is_some())
            .map(Domain::label)
            .collect();
        if failed.is_empty() {
            info!("All dashboard domains refreshed");
        } else {
            warn!(failed = ?failed, "Dashboard refresh finished with failures");
        }
    }

    pub async fn fetch_forecast(&self) -> Option<CurrentWeather> {
        self.fetch_coordinate_domain(Domain::Forecast, |s| &mut s.forecast)
            .await
    }

    pub async fn fetch_daily_forecast(&self) -> Option<ForecastResponse> {
        self.fetch_coordinate_domain(Domain::DailyForecast, |s| &mut s.daily_forecast)
            .await
    }

    pub async fn fetch_air_pollution(&self) -> Option<AirPollutionResponse> {
        self.fetch_coordinate_domain(Domain::AirPollution, |s| &mut s.air_pollution)
            .await
    }

    pub async fn fetch_uv(&self) -> Option<UvResponse> {
        self.fetch_coordinate_domain(Domain::Uv, |s| &mut s.uv).await
    }

    /// Search locations. A blank query is ignored entirely.
    pub async fn fetch_location_search(&self, query: &str) -> Option<Vec<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        self.run_fetch(
            Domain::LocationSearch,
            |s| &mut s.location_search,
            self.api.search(query),
        )
        .await
    }

    async fn fetch_coordinate_domain<T>(&self, domain: Domain, slot: Slot<T>) -> Option<T>
    where
        T: DeserializeOwned + Clone,
    {
        let coordinate = self.coordinate();
        self.run_fetch(domain, slot, self.api.fetch(domain, coordinate))
            .await
    }

    async fn run_fetch<T, F>(&self, domain: Domain, slot: Slot<T>, request: F) -> Option<T>
    where
        T: DeserializeOwned + Clone,
        F: Future<Output = Result<Value>>,
    {
        let counter = &self.tokens[domain.index()];
        let token = counter.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| slot(state).begin());

        let outcome = request.await.and_then(|value| decode::<T>(domain, value));

        let mut applied = false;
        self.state.send_if_modified(|state| {
            if counter.load(Ordering::SeqCst) != token {
                return false;
            }
            match &outcome {
                Ok(data) => slot(state).succeed(data.clone()),
                Err(e) => slot(state).fail(e.to_string()),
            }
            applied = true;
            true
        });

        if !applied {
            debug!(domain = domain.label(), token, "Discarding superseded response");
            return None;
        }

        match outcome {
            Ok(data) => {
                info!(domain = domain.label(), "Fetched dashboard data");
                Some(data)
            }
            Err(e) => {
                warn!(domain = domain.label(), error = %e, "Dashboard fetch failed");
                None
            }
        }
    }
}

fn decode<T: DeserializeOwned>(domain: Domain, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        WeatherGridError::upstream(format!("Invalid {} data received: {e}", domain.label()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Default)]
    struct FakeApi {
        calls: Mutex<Vec<(Domain, Coordinate)>>,
        searches: Mutex<Vec<String>>,
        failing: Vec<Domain>,
        search_delays: HashMap<String, Duration>,
        slow_latitude: Option<(f64, Duration)>,
    }

    impl FakeApi {
        fn failing(domains: &[Domain]) -> Self {
            Self {
                failing: domains.to_vec(),
                ..Self::default()
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl DashboardApi for Arc<FakeApi> {
        async fn fetch(&self, domain: Domain, coordinate: Coordinate) -> Result<Value> {
            self.calls.lock().unwrap().push((domain, coordinate));
            tokio::task::yield_now().await;
            if let Some((latitude, delay)) = self.slow_latitude {
                if coordinate.latitude == latitude {
                    tokio::time::sleep(delay).await;
                }
            }
            if self.failing.contains(&domain) {
                return Err(WeatherGridError::upstream_status("Error fetching data", 500));
            }
            let mut body = fixtures::payload(domain);
            if domain == Domain::Forecast {
                // name the city after the requested coordinate
                body["name"] = Value::from(coordinate.latitude.to_string());
            }
            Ok(body)
        }

        async fn search(&self, query: &str) -> Result<Value> {
            self.searches.lock().unwrap().push(query.to_string());
            if let Some(delay) = self.search_delays.get(query) {
                tokio::time::sleep(*delay).await;
            }
            Ok(serde_json::json!([
                {"name": query, "country": "GB", "lat": 51.5074, "lon": -0.1278}
            ]))
        }
    }

    fn orchestrator(api: FakeApi) -> (Arc<FakeApi>, Orchestrator<Arc<FakeApi>>) {
        let api = Arc::new(api);
        let coordinate = Coordinate::new(14.65, 120.9667).unwrap();
        (api.clone(), Orchestrator::new(api, coordinate))
    }

    #[tokio::test]
    async fn test_fetch_all_settles_every_domain() {
        let (api, orchestrator) = orchestrator(FakeApi::default());
        orchestrator.fetch_all().await;

        let state = orchestrator.snapshot();
        for domain in Domain::COORDINATE_DOMAINS {
            assert_eq!(state.status(domain), (false, None), "{domain:?}");
        }
        assert!(state.forecast.data.is_some());
        assert!(state.daily_forecast.data.is_some());
        assert_eq!(state.air_pollution.data.unwrap().current_aqi(), Some(3));
        assert_eq!(state.uv.data.unwrap().today_max(), Some(9.45));
        assert_eq!(api.call_count(), 4);
        assert!(api.searches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_isolates_failures() {
        let (_, orchestrator) = orchestrator(FakeApi::failing(&[Domain::Uv]));
        orchestrator.fetch_all().await;

        let state = orchestrator.snapshot();
        let (loading, error) = state.status(Domain::Uv);
        assert!(!loading);
        assert!(error.unwrap().contains("Error fetching data"));
        assert!(state.uv.data.is_none());
        for domain in [Domain::Forecast, Domain::DailyForecast, Domain::AirPollution] {
            assert_eq!(state.status(domain), (false, None), "{domain:?}");
        }
    }

    #[tokio::test]
    async fn test_failed_fetch_returns_none() {
        let (_, orchestrator) = orchestrator(FakeApi::failing(&[Domain::AirPollution]));
        assert!(orchestrator.fetch_air_pollution().await.is_none());
        assert!(orchestrator.fetch_forecast().await.is_some());
    }

    #[tokio::test]
    async fn test_undecodable_payload_becomes_domain_error() {
        struct Garbage;

        #[async_trait]
        impl DashboardApi for Garbage {
            async fn fetch(&self, _: Domain, _: Coordinate) -> Result<Value> {
                Ok(serde_json::json!({"unexpected": true}))
            }
            async fn search(&self, _: &str) -> Result<Value> {
                Ok(serde_json::json!({}))
            }
        }

        let orchestrator = Orchestrator::new(Garbage, Coordinate::new(0.0, 0.0).unwrap());
        assert!(orchestrator.fetch_uv().await.is_none());
        let error = orchestrator.snapshot().uv.error.unwrap();
        assert!(error.contains("Invalid UV data"));
    }

    #[tokio::test]
    async fn test_loading_flag_is_published_while_in_flight() {
        let (_, orchestrator) = orchestrator(FakeApi::default());
        let mut rx = orchestrator.subscribe();

        let fetch = orchestrator.fetch_forecast();
        let observe = async {
            rx.changed().await.unwrap();
            rx.borrow_and_update().forecast.is_loading
        };
        let (result, saw_loading) = tokio::join!(fetch, observe);

        assert!(result.is_some());
        assert!(saw_loading);
        assert!(!orchestrator.snapshot().forecast.is_loading);
    }

    #[tokio::test]
    async fn test_mount_fetches_exactly_once() {
        let (api, orchestrator) = orchestrator(FakeApi::default());
        assert!(orchestrator.mount().await);
        assert!(!orchestrator.mount().await);
        assert_eq!(api.call_count(), 4);
    }

    #[tokio::test]
    async fn test_set_active_coordinate_validates_and_does_not_fetch() {
        let (api, orchestrator) = orchestrator(FakeApi::default());
        assert!(orchestrator.set_active_coordinate(95.0, 0.0).is_err());
        assert_eq!(orchestrator.coordinate().latitude, 14.65);

        orchestrator.set_active_coordinate(35.6762, 139.6503).unwrap();
        assert_eq!(orchestrator.coordinate().longitude, 139.6503);
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_select_location_refetches_at_new_coordinate() {
        let (api, orchestrator) = orchestrator(FakeApi::default());
        orchestrator.select_location(25.2048, 55.2708).await.unwrap();

        let calls = api.calls.lock().unwrap();
        assert_eq!(calls.len(), 4);
        assert!(calls.iter().all(|(_, c)| c.latitude == 25.2048 && c.longitude == 55.2708));
    }

    #[tokio::test]
    async fn test_blank_search_makes_no_call() {
        let (api, orchestrator) = orchestrator(FakeApi::default());
        assert!(orchestrator.fetch_location_search("   ").await.is_none());
        assert!(orchestrator.fetch_location_search("").await.is_none());
        assert!(api.searches.lock().unwrap().is_empty());
        assert_eq!(orchestrator.snapshot().location_search, DomainState::default());
    }

    #[tokio::test]
    async fn test_search_replaces_results() {
        let (_, orchestrator) = orchestrator(FakeApi::default());
        orchestrator.fetch_location_search("London").await.unwrap();
        let results = orchestrator.fetch_location_search("Paris").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Paris");
        assert_eq!(orchestrator.snapshot().location_search.data, Some(results));
    }

    #[tokio::test]
    async fn test_superseded_search_response_is_discarded() {
        let api = FakeApi {
            search_delays: HashMap::from([("Lon".to_string(), Duration::from_millis(100))]),
            ..FakeApi::default()
        };
        let (_, orchestrator) = orchestrator(api);

        let (slow, fast) = tokio::join!(
            orchestrator.fetch_location_search("Lon"),
            orchestrator.fetch_location_search("London"),
        );

        assert!(slow.is_none());
        assert_eq!(fast.unwrap()[0].name, "London");
        let state = orchestrator.snapshot().location_search;
        assert_eq!(state.data.unwrap()[0].name, "London");
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_response_for_previous_coordinate_is_discarded() {
        let api = FakeApi {
            slow_latitude: Some((14.65, Duration::from_millis(100))),
            ..FakeApi::default()
        };
        let (api, orchestrator) = orchestrator(api);

        let switch = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            orchestrator.select_location(35.6762, 139.6503).await
        };
        let ((), selected) = tokio::join!(orchestrator.fetch_all(), switch);
        selected.unwrap();

        let state = orchestrator.snapshot();
        assert_eq!(state.coordinate.latitude, 35.6762);
        assert_eq!(state.forecast.data.as_ref().unwrap().name, "35.6762");
        for domain in Domain::COORDINATE_DOMAINS {
            assert_eq!(state.status(domain), (false, None), "{domain:?}");
        }
        assert_eq!(api.call_count(), 8);
    }
}
