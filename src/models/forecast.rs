//! 5-day/3-hour forecast model and daily aggregation

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::weather::Condition;
use crate::format::kelvin_to_celsius;

/// Records per day in the 3-hour forecast
pub const RECORDS_PER_DAY: usize = 8;
/// Days covered by the forecast
pub const FORECAST_DAYS: usize = 5;

/// 5-day/3-hour forecast as returned by OpenWeatherMap
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ForecastResponse {
    #[serde(default)]
    pub city: Option<ForecastCity>,
    pub list: Vec<ForecastRecord>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ForecastCity {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    /// Not reported for every city, zero when unknown
    #[serde(default)]
    pub population: Option<u64>,
    /// UTC offset in seconds
    #[serde(default)]
    pub timezone: Option<i64>,
}

/// One 3-hour interval record
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ForecastRecord {
    /// Unix timestamp (seconds)
    pub dt: i64,
    pub main: ForecastMain,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

/// Temperatures in Kelvin
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct ForecastMain {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
}

/// Aggregated view of one forecast day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailySummary {
    /// "Today" for the first day, weekday abbreviation afterwards
    pub day_name: String,
    /// e.g. "Jun 3"
    pub day_date: String,
    /// Lowest `temp_min` of the day, Celsius
    pub min_temp: i64,
    /// Highest `temp_max` of the day, Celsius
    pub max_temp: i64,
    /// Dominant weather condition ("Clear", "Rain", ...)
    pub condition: String,
}

/// Colour band of a day's temperature bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    Hot,
    Warm,
    Cool,
}

impl DailySummary {
    /// Band by the average of min and max
    #[must_use]
    pub fn temperature_band(&self) -> TemperatureBand {
        let average = (self.min_temp + self.max_temp) as f64 / 2.0;
        if average >= 30.0 {
            TemperatureBand::Hot
        } else if average >= 20.0 {
            TemperatureBand::Warm
        } else {
            TemperatureBand::Cool
        }
    }
}

/// Partition `records` into days of eight consecutive records and summarize
/// each one. At most five days are produced; a trailing partial day is kept.
#[must_use]
pub fn five_day_aggregate(records: &[ForecastRecord]) -> Vec<DailySummary> {
    records
        .chunks(RECORDS_PER_DAY)
        .take(FORECAST_DAYS)
        .enumerate()
        .map(|(index, day)| summarize_day(day, index))
        .collect()
}

fn summarize_day(day: &[ForecastRecord], index: usize) -> DailySummary {
    let min_temp = day
        .iter()
        .map(|r| r.main.temp_min)
        .fold(f64::INFINITY, f64::min);
    let max_temp = day
        .iter()
        .map(|r| r.main.temp_max)
        .fold(f64::NEG_INFINITY, f64::max);

    let first = day
        .first()
        .and_then(|r| DateTime::<Utc>::from_timestamp(r.dt, 0))
        .unwrap_or_default();

    DailySummary {
        day_name: if index == 0 {
            "Today".to_string()
        } else {
            first.format("%a").to_string()
        },
        day_date: first.format("%b %-d").to_string(),
        min_temp: kelvin_to_celsius(min_temp),
        max_temp: kelvin_to_celsius(max_temp),
        condition: dominant_condition(day),
    }
}

/// Most frequent condition of the day; readings from 08:00 to 18:00 count
/// twice. Ties go to the condition seen first.
fn dominant_condition(day: &[ForecastRecord]) -> String {
    let mut frequency: Vec<(&str, u32)> = Vec::new();

    for record in day {
        let Some(condition) = record.weather.first() else {
            continue;
        };

        let hour = DateTime::<Utc>::from_timestamp(record.dt, 0).map_or(0, |t| t.hour());
        let weight = if (8..=18).contains(&hour) { 2 } else { 1 };

        match frequency.iter_mut().find(|(name, _)| *name == condition.main) {
            Some((_, count)) => *count += weight,
            None => frequency.push((condition.main.as_str(), weight)),
        }
    }

    let mut best: Option<(&str, u32)> = None;
    for (name, count) in frequency {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((name, count));
        }
    }

    best.map_or_else(|| "Clear".to_string(), |(name, _)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-06-03 00:00:00 UTC, a Monday
    const START: i64 = 1_717_372_800;

    fn record(dt: i64, min: f64, max: f64, condition: &str) -> ForecastRecord {
        ForecastRecord {
            dt,
            main: ForecastMain {
                temp: (min + max) / 2.0,
                temp_min: min,
                temp_max: max,
            },
            weather: vec![Condition {
                main: condition.to_string(),
                description: condition.to_lowercase(),
                icon: None,
            }],
        }
    }

    fn forty_records() -> Vec<ForecastRecord> {
        (0..40)
            .map(|i| {
                let base = 290.0 + (i % 8) as f64;
                record(START + i * 3 * 3600, base - 1.5, base + 1.5, "Clouds")
            })
            .collect()
    }

    #[test]
    fn test_forty_records_make_five_days() {
        let days = five_day_aggregate(&forty_records());
        assert_eq!(days.len(), 5);
        for day in &days {
            assert!(day.min_temp <= day.max_temp);
        }
        assert_eq!(days[0].day_name, "Today");
        assert_eq!(days[0].day_date, "Jun 3");
        assert_eq!(days[1].day_name, "Tue");
        assert_eq!(days[4].day_date, "Jun 7");
    }

    #[test]
    fn test_bucket_uses_exactly_its_eight_records() {
        let mut records = forty_records();
        // Extremes placed in the second day's records only.
        records[8].main.temp_min = 250.15;
        records[15].main.temp_max = 320.15;
        records[16].main.temp_min = 200.15;

        let days = five_day_aggregate(&records);
        assert_eq!(days[1].min_temp, -23);
        assert_eq!(days[1].max_temp, 47);
        assert_eq!(days[2].min_temp, -73);
        assert_ne!(days[0].min_temp, -23);
    }

    #[test]
    fn test_more_than_forty_records_are_capped_at_five_days() {
        let mut records = forty_records();
        records.extend(forty_records());
        assert_eq!(five_day_aggregate(&records).len(), 5);
    }

    #[test]
    fn test_partial_trailing_day_is_kept() {
        let records: Vec<_> = forty_records().into_iter().take(10).collect();
        let days = five_day_aggregate(&records);
        assert_eq!(days.len(), 2);
    }

    #[test]
    fn test_empty_input_has_no_days() {
        assert!(five_day_aggregate(&[]).is_empty());
    }

    #[test]
    fn test_daytime_readings_count_double() {
        // Two night "Rain" readings (00:00, 03:00) against one day "Clear" (09:00)
        // plus one night "Clear" (21:00): Rain=2, Clear=3.
        let day = vec![
            record(START, 280.0, 290.0, "Rain"),
            record(START + 3 * 3600, 280.0, 290.0, "Rain"),
            record(START + 9 * 3600, 280.0, 290.0, "Clear"),
            record(START + 21 * 3600, 280.0, 290.0, "Clear"),
        ];
        assert_eq!(dominant_condition(&day), "Clear");
    }

    #[test]
    fn test_ties_go_to_first_seen_condition() {
        let day = vec![
            record(START, 280.0, 290.0, "Snow"),
            record(START + 3 * 3600, 280.0, 290.0, "Rain"),
        ];
        assert_eq!(dominant_condition(&day), "Snow");
    }

    #[test]
    fn test_no_conditions_defaults_to_clear() {
        let mut day = vec![record(START, 280.0, 290.0, "Rain")];
        day[0].weather.clear();
        assert_eq!(dominant_condition(&day), "Clear");
    }

    #[test]
    fn test_temperature_band() {
        let mut summary = DailySummary {
            day_name: "Today".to_string(),
            day_date: "Jun 3".to_string(),
            min_temp: 28,
            max_temp: 34,
            condition: "Clear".to_string(),
        };
        assert_eq!(summary.temperature_band(), TemperatureBand::Hot);
        summary.max_temp = 20;
        assert_eq!(summary.temperature_band(), TemperatureBand::Warm);
        summary.min_temp = 10;
        assert_eq!(summary.temperature_band(), TemperatureBand::Cool);
    }

    #[test]
    fn test_deserializes_upstream_payload() {
        let payload = serde_json::json!({
            "cod": "200",
            "cnt": 1,
            "list": [{
                "dt": START,
                "main": {"temp": 300.1, "feels_like": 302.0, "temp_min": 299.5, "temp_max": 301.2, "humidity": 70},
                "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
                "dt_txt": "2024-06-03 00:00:00"
            }],
            "city": {"name": "Caloocan City", "country": "PH", "population": 0, "timezone": 28800}
        });
        let forecast: ForecastResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(forecast.list.len(), 1);
        assert_eq!(forecast.city.unwrap().timezone, Some(28800));
    }
}
