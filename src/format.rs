//! Unit conversions and display formatting for dashboard values
//!
//! Upstream values arrive in SI units (Kelvin, m/s, meters, Unix seconds).
//! Everything here is pure.

use chrono::{DateTime, Timelike, Utc};

/// Convert temperature from Kelvin to whole degrees Celsius
#[must_use]
pub fn kelvin_to_celsius(kelvin: f64) -> i64 {
    (kelvin - 273.15).round() as i64
}

/// Convert wind speed from m/s to whole km/h
#[must_use]
pub fn mps_to_kmh(mps: f64) -> i64 {
    (mps * 3.6).round() as i64
}

/// Convert visibility from meters to whole kilometers
#[must_use]
pub fn meters_to_km(meters: f64) -> i64 {
    (meters / 1000.0).round() as i64
}

/// Render `unix_time` shifted by `utc_offset` seconds as `hh:mm AM/PM`.
///
/// The offset is applied to the instant itself and the fields are then read
/// in UTC, so the host timezone never leaks in. Only hour and minute are
/// rendered; day rollover is ignored. Instants outside chrono's range
/// render as the epoch.
#[must_use]
pub fn unix_to_local_time(unix_time: i64, utc_offset: i64) -> String {
    let local = unix_time
        .checked_add(utc_offset)
        .and_then(|shifted| DateTime::<Utc>::from_timestamp(shifted, 0))
        .unwrap_or_default();
    let hour = local.hour();
    let period = if hour >= 12 { "PM" } else { "AM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12:02}:{:02} {period}", local.minute())
}

/// Compact population: "1.7M", "2.5K" or the plain number
#[must_use]
pub fn format_population(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Convert wind direction from degrees to a 16-point cardinal direction
#[must_use]
pub fn wind_direction_to_cardinal(degrees: f64) -> &'static str {
    match degrees.rem_euclid(360.0).round() as u16 {
        0..=11 | 349..=360 => "N",
        12..=33 => "NNE",
        34..=56 => "NE",
        57..=78 => "ENE",
        79..=101 => "E",
        102..=123 => "ESE",
        124..=146 => "SE",
        147..=168 => "SSE",
        169..=191 => "S",
        192..=213 => "SSW",
        214..=236 => "SW",
        237..=258 => "WSW",
        259..=281 => "W",
        282..=303 => "WNW",
        304..=326 => "NW",
        327..=348 => "NNW",
        _ => "Unknown",
    }
}

/// WHO/EPA UV index category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UvCategory {
    pub label: &'static str,
    pub advice: &'static str,
}

/// Category for a UV index, rounded to the nearest whole number first
#[must_use]
pub fn uv_category(uv_index: f64) -> UvCategory {
    let (label, advice) = match uv_index.round() {
        i if i <= 2.0 => ("Low", "Safe for most people."),
        i if i <= 5.0 => ("Moderate", "Use sunscreen and wear a hat."),
        i if i <= 7.0 => ("High", "Limit time in the sun and use sunscreen."),
        i if i <= 10.0 => ("Very High", "Stay in shade during midday."),
        _ => ("Extreme", "Avoid sun and stay indoors if possible."),
    };
    UvCategory { label, advice }
}

/// Position of a UV index on the 0-14 gauge, as a percentage
#[must_use]
pub fn uv_progress_percent(uv_index: f64) -> f64 {
    uv_index.round() / 14.0 * 100.0
}

#[must_use]
pub fn humidity_description(humidity: f64) -> &'static str {
    if humidity < 30.0 {
        "DRY AIR! May cause dry skin and throat."
    } else if humidity < 50.0 {
        "PERFECT HUMIDITY! Comfortable breathing."
    } else if humidity < 70.0 {
        "HIGH MOISTURE! Feels sticky, allergens increase."
    } else {
        "EXTREMELY WET AIR! Uncomfortable and mold risk."
    }
}

#[must_use]
pub fn pressure_description(pressure_hpa: f64) -> &'static str {
    if pressure_hpa < 1000.0 {
        "VERY LOW PRESSURE! Storm conditions likely."
    } else if pressure_hpa < 1015.0 {
        "LOW PRESSURE! Clouds and precipitation possible."
    } else if pressure_hpa < 1025.0 {
        "NORMAL PRESSURE! Stable weather conditions."
    } else if pressure_hpa < 1040.0 {
        "HIGH PRESSURE! Clear skies and dry conditions."
    } else {
        "VERY HIGH PRESSURE! Extremely stable, possibly hot or cold."
    }
}

#[must_use]
pub fn sight_distance_description(km: i64) -> &'static str {
    if km > 10 {
        "CRYSTAL CLEAR! Exceptional sight distance."
    } else if km > 5 {
        "CLEAR VIEW! Excellent sight distance."
    } else if km > 2 {
        "MODERATE VIEW! Some sight distance limitations."
    } else {
        "LIMITED VIEW! Restricted sight distance ahead."
    }
}

/// Compare the felt temperature with the day's range. All inputs in Kelvin.
#[must_use]
pub fn feels_like_description(feels_like: f64, temp_min: f64, temp_max: f64) -> &'static str {
    let feels = kelvin_to_celsius(feels_like) as f64;
    let average = (kelvin_to_celsius(temp_min) + kelvin_to_celsius(temp_max)) as f64 / 2.0;

    if feels >= 35.0 {
        "SCORCHING HOT! Like walking into an oven."
    } else if feels <= 0.0 {
        "FREEZING COLD! Frostbite risk."
    } else if feels < average - 5.0 {
        "FEELS MUCH COLDER than it looks!"
    } else if feels <= average + 5.0 {
        "ACTUAL FEEL matches display."
    } else {
        "FEELS MUCH HOTTER than it looks!"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(273.15, 0)]
    #[case(0.0, -273)]
    #[case(293.15, 20)]
    #[case(300.7, 28)]
    fn test_kelvin_to_celsius(#[case] kelvin: f64, #[case] expected: i64) {
        assert_eq!(kelvin_to_celsius(kelvin), expected);
    }

    #[rstest]
    #[case(10.0, 36)]
    #[case(0.0, 0)]
    #[case(3.6, 13)]
    fn test_mps_to_kmh(#[case] mps: f64, #[case] expected: i64) {
        assert_eq!(mps_to_kmh(mps), expected);
    }

    #[test]
    fn test_meters_to_km() {
        assert_eq!(meters_to_km(10_000.0), 10);
        assert_eq!(meters_to_km(2_600.0), 3);
    }

    #[test]
    fn test_local_time_applies_offset_only_once() {
        // 2024-06-03 22:00:00 UTC shown at UTC+8
        assert_eq!(unix_to_local_time(1_717_452_000, 28_800), "06:00 AM");
    }

    #[rstest]
    #[case(1_717_372_800, 0, "12:00 AM")]
    #[case(1_717_416_000, 0, "12:00 PM")]
    #[case(1_717_418_700, 0, "12:45 PM")]
    #[case(1_717_372_800, -18_000, "07:00 PM")]
    fn test_local_time_twelve_hour_clock(
        #[case] unix_time: i64,
        #[case] offset: i64,
        #[case] expected: &str,
    ) {
        assert_eq!(unix_to_local_time(unix_time, offset), expected);
    }

    #[rstest]
    #[case(i64::MAX - 10, 28_800)]
    #[case(i64::MIN + 10, -28_800)]
    #[case(i64::MAX, 0)]
    fn test_local_time_out_of_range_renders_epoch(#[case] unix_time: i64, #[case] offset: i64) {
        assert_eq!(unix_to_local_time(unix_time, offset), "12:00 AM");
    }

    #[rstest]
    #[case(1_661_584, "1.7M")]
    #[case(2_500, "2.5K")]
    #[case(999, "999")]
    #[case(1_000, "1.0K")]
    #[case(0, "0")]
    fn test_format_population(#[case] value: u64, #[case] expected: &str) {
        assert_eq!(format_population(value), expected);
    }

    #[test]
    fn test_wind_direction_to_cardinal() {
        assert_eq!(wind_direction_to_cardinal(0.0), "N");
        assert_eq!(wind_direction_to_cardinal(90.0), "E");
        assert_eq!(wind_direction_to_cardinal(180.0), "S");
        assert_eq!(wind_direction_to_cardinal(270.0), "W");
        assert_eq!(wind_direction_to_cardinal(45.0), "NE");
        assert_eq!(wind_direction_to_cardinal(-90.0), "W");
    }

    #[rstest]
    #[case(1.4, "Low")]
    #[case(2.6, "Moderate")]
    #[case(7.0, "High")]
    #[case(9.45, "Very High")]
    #[case(11.0, "Extreme")]
    fn test_uv_category(#[case] uv: f64, #[case] label: &str) {
        assert_eq!(uv_category(uv).label, label);
    }

    #[test]
    fn test_uv_progress_percent() {
        assert_eq!(uv_progress_percent(7.0), 50.0);
        assert_eq!(uv_progress_percent(14.2), 100.0);
    }

    #[test]
    fn test_descriptions() {
        assert!(humidity_description(20.0).starts_with("DRY AIR"));
        assert!(humidity_description(78.0).starts_with("EXTREMELY WET"));
        assert!(pressure_description(1009.0).starts_with("LOW PRESSURE"));
        assert!(pressure_description(1020.0).starts_with("NORMAL"));
        assert!(sight_distance_description(10).starts_with("CLEAR VIEW"));
        assert!(sight_distance_description(1).starts_with("LIMITED"));
        assert!(feels_like_description(310.15, 300.15, 302.15).starts_with("SCORCHING"));
        assert!(feels_like_description(290.15, 289.15, 291.15).starts_with("ACTUAL FEEL"));
        assert!(feels_like_description(280.15, 290.15, 292.15).starts_with("FEELS MUCH COLDER"));
    }
}
