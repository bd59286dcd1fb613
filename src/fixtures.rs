//! Upstream payloads shared by unit tests

use serde_json::{Value, json};

use crate::orchestrator::Domain;

/// 2024-06-03 00:00:00 UTC
pub const START: i64 = 1_717_372_800;

pub fn current_weather() -> Value {
    json!({
        "coord": {"lon": 120.9667, "lat": 14.65},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
        "main": {
            "temp": 303.15,
            "feels_like": 309.15,
            "temp_min": 301.15,
            "temp_max": 304.15,
            "pressure": 1009,
            "humidity": 74
        },
        "visibility": 10000,
        "wind": {"speed": 4.12, "deg": 250},
        "dt": START + 21_600,
        "sys": {"country": "PH", "sunrise": START - 7_200, "sunset": START + 39_600},
        "timezone": 28_800,
        "name": "Caloocan City"
    })
}

/// 40 three-hourly records starting at [`START`]
pub fn daily_forecast() -> Value {
    let list: Vec<Value> = (0..40)
        .map(|i| {
            let base = 298.15 + f64::from(i % 8);
            json!({
                "dt": START + i64::from(i) * 10_800,
                "main": {"temp": base, "temp_min": base - 1.0, "temp_max": base + 1.0},
                "weather": [{"main": if i % 8 < 4 { "Rain" } else { "Clouds" }, "description": ""}]
            })
        })
        .collect();
    json!({
        "city": {"name": "Caloocan City", "country": "PH", "population": 0, "timezone": 28_800},
        "list": list
    })
}

pub fn air_pollution() -> Value {
    json!({"list": [{"main": {"aqi": 3}, "components": {"pm2_5": 12.1}, "dt": START}]})
}

pub fn uv() -> Value {
    json!({
        "timezone": "Asia/Manila",
        "daily": {
            "time": ["2024-06-03"],
            "uv_index_max": [9.45],
            "uv_index_clear_sky_max": [10.1]
        }
    })
}

pub fn payload(domain: Domain) -> Value {
    match domain {
        Domain::Forecast => current_weather(),
        Domain::DailyForecast => daily_forecast(),
        Domain::AirPollution => air_pollution(),
        Domain::Uv => uv(),
        Domain::LocationSearch => json!([]),
    }
}
