//! Read-only widget projections over the dashboard state
//!
//! Every widget resolves to one of four views: loading, error, empty (no
//! usable data) or ready with already-formatted values. Loading wins over
//! error, and error wins over stale data.

use chrono::{DateTime, NaiveDate, Timelike, Utc};

use crate::format::{
    self, UvCategory, feels_like_description, humidity_description, kelvin_to_celsius,
    meters_to_km, mps_to_kmh, pressure_description, sight_distance_description,
    unix_to_local_time, wind_direction_to_cardinal,
};
use crate::models::{
    DailySummary, ForecastRecord, band_for, five_day_aggregate, scale_aqi,
};
use crate::orchestrator::{AppState, DomainState};

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetView<T> {
    Loading,
    Error(String),
    Empty,
    Ready(T),
}

impl<T> WidgetView<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            WidgetView::Ready(value) => Some(value),
            _ => None,
        }
    }
}

fn project<D, T>(domain: &DomainState<D>, view: impl FnOnce(&D) -> Option<T>) -> WidgetView<T> {
    if domain.is_loading {
        return WidgetView::Loading;
    }
    if let Some(error) = &domain.error {
        return WidgetView::Error(error.clone());
    }
    match domain.data.as_ref().and_then(view) {
        Some(value) => WidgetView::Ready(value),
        None => WidgetView::Empty,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureView {
    pub city: String,
    pub temperature: i64,
    pub min_temp: i64,
    pub max_temp: i64,
    pub condition: String,
    pub description: String,
    /// UTC offset in seconds, feeds the local clock
    pub utc_offset: i64,
}

pub fn temperature(state: &AppState) -> WidgetView<TemperatureView> {
    project(&state.forecast, |weather| {
        let condition = weather.weather.first()?;
        Some(TemperatureView {
            city: weather.name.clone(),
            temperature: kelvin_to_celsius(weather.main.temp),
            min_temp: kelvin_to_celsius(weather.main.temp_min),
            max_temp: kelvin_to_celsius(weather.main.temp_max),
            condition: condition.main.clone(),
            description: condition.description.clone(),
            utc_offset: weather.timezone.unwrap_or(0),
        })
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindView {
    pub speed_kmh: i64,
    pub degrees: f64,
    pub cardinal: &'static str,
}

pub fn wind(state: &AppState) -> WidgetView<WindView> {
    project(&state.forecast, |weather| {
        let wind = weather.wind?;
        let degrees = wind.deg?;
        Some(WindView {
            speed_kmh: mps_to_kmh(wind.speed),
            degrees,
            cardinal: wind_direction_to_cardinal(degrees),
        })
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct SunView {
    pub sunrise: String,
    pub sunset: String,
}

pub fn sun(state: &AppState) -> WidgetView<SunView> {
    project(&state.forecast, |weather| {
        let sys = weather.sys.as_ref()?;
        let offset = weather.timezone?;
        Some(SunView {
            sunrise: unix_to_local_time(sys.sunrise, offset),
            sunset: unix_to_local_time(sys.sunset, offset),
        })
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadingView<T> {
    pub value: T,
    pub description: &'static str,
}

pub fn humidity(state: &AppState) -> WidgetView<ReadingView<f64>> {
    project(&state.forecast, |weather| {
        Some(ReadingView {
            value: weather.main.humidity,
            description: humidity_description(weather.main.humidity),
        })
    })
}

pub fn pressure(state: &AppState) -> WidgetView<ReadingView<f64>> {
    project(&state.forecast, |weather| {
        Some(ReadingView {
            value: weather.main.pressure,
            description: pressure_description(weather.main.pressure),
        })
    })
}

/// Visibility in km
pub fn visibility(state: &AppState) -> WidgetView<ReadingView<i64>> {
    project(&state.forecast, |weather| {
        let km = meters_to_km(weather.visibility?);
        Some(ReadingView {
            value: km,
            description: sight_distance_description(km),
        })
    })
}

/// Felt temperature in Celsius
pub fn feels_like(state: &AppState) -> WidgetView<ReadingView<i64>> {
    project(&state.forecast, |weather| {
        let main = weather.main;
        Some(ReadingView {
            value: kelvin_to_celsius(main.feels_like),
            description: feels_like_description(main.feels_like, main.temp_min, main.temp_max),
        })
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct AirQualityView {
    pub aqi: u32,
    /// AQI on the 0-100 gauge
    pub scaled: u32,
    pub description: &'static str,
}

pub fn air_pollution(state: &AppState) -> WidgetView<AirQualityView> {
    project(&state.air_pollution, |pollution| {
        let aqi = pollution.current_aqi()?;
        let scaled = scale_aqi(aqi);
        Some(AirQualityView {
            aqi,
            scaled,
            description: band_for(scaled)?.description,
        })
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct UvView {
    pub index: f64,
    pub category: UvCategory,
    pub progress_percent: f64,
}

pub fn uv(state: &AppState) -> WidgetView<UvView> {
    project(&state.uv, |uv| {
        let index = uv.today_max()?;
        Some(UvView {
            index,
            category: format::uv_category(index),
            progress_percent: format::uv_progress_percent(index),
        })
    })
}

pub fn five_day(state: &AppState) -> WidgetView<Vec<DailySummary>> {
    project(&state.daily_forecast, |forecast| {
        let days = five_day_aggregate(&forecast.list);
        (!days.is_empty()).then_some(days)
    })
}

/// One entry of the per-date forecast strip
#[derive(Debug, Clone, PartialEq)]
pub struct DayHighlight {
    /// "Today" or the weekday abbreviation
    pub label: String,
    pub condition: String,
    pub temperature: i64,
}

/// Up to five calendar dates (UTC) of the forecast, each represented by its
/// 12:00 record or else its first record
pub fn daily_highlights(state: &AppState, today: NaiveDate) -> WidgetView<Vec<DayHighlight>> {
    project(&state.daily_forecast, |forecast| {
        let mut dates: Vec<(NaiveDate, Vec<&ForecastRecord>)> = Vec::new();
        for record in &forecast.list {
            let Some(time) = DateTime::<Utc>::from_timestamp(record.dt, 0) else {
                continue;
            };
            let date = time.date_naive();
            match dates.iter_mut().find(|(d, _)| *d == date) {
                Some((_, records)) => records.push(record),
                None => dates.push((date, vec![record])),
            }
        }

        let highlights: Vec<DayHighlight> = dates
            .into_iter()
            .take(5)
            .filter_map(|(date, records)| {
                let representative = records
                    .iter()
                    .find(|r| {
                        DateTime::<Utc>::from_timestamp(r.dt, 0).is_some_and(|t| t.hour() == 12)
                    })
                    .or_else(|| records.first())?;
                Some(DayHighlight {
                    label: if date == today {
                        "Today".to_string()
                    } else {
                        date.format("%a").to_string()
                    },
                    condition: representative
                        .weather
                        .first()
                        .map_or_else(|| "Clear".to_string(), |c| c.main.clone()),
                    temperature: kelvin_to_celsius(representative.main.temp),
                })
            })
            .collect();

        (!highlights.is_empty()).then_some(highlights)
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopulationView {
    pub city: String,
    pub population: u64,
    pub formatted: String,
}

/// City population from the forecast, with `default_population` standing in
/// when upstream reports none
pub fn population(state: &AppState, default_population: u64) -> WidgetView<PopulationView> {
    project(&state.daily_forecast, |forecast| {
        let city = forecast.city.as_ref()?;
        let population = city
            .population
            .filter(|p| *p > 0)
            .unwrap_or(default_population);
        (population > 0).then(|| PopulationView {
            city: city.name.clone(),
            population,
            formatted: format::format_population(population),
        })
    })
}
