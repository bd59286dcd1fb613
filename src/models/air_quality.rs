//! Air quality bands and AQI scaling

/// One band of the air quality table: every scaled AQI up to and including
/// `threshold` is described by `description`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AirQualityBand {
    pub threshold: u32,
    pub description: &'static str,
}

/// Ordered by ascending threshold on the 0-100 scale.
pub const AIR_QUALITY_BANDS: [AirQualityBand; 5] = [
    AirQualityBand {
        threshold: 20,
        description: "Excellent (AQI 0-20): Air quality is ideal for most individuals. No health concerns",
    },
    AirQualityBand {
        threshold: 40,
        description: "Fair (AQI 21-40): Air quality is acceptable. Some pollutants may affect very sensitive individuals",
    },
    AirQualityBand {
        threshold: 60,
        description: "Moderate (AQI 41-60): Health concerns for sensitive groups. General public is less likely to be affected",
    },
    AirQualityBand {
        threshold: 80,
        description: "Poor (AQI 61-80): Everyone may begin to experience health effects. Sensitive groups may experience more serious effects",
    },
    AirQualityBand {
        threshold: 100,
        description: "Hazardous (AQI 81-100): Health alert - risk of health effects for everyone. Avoid outdoor activities",
    },
];

/// Rescale the upstream 1-5 AQI to the 0-100 display scale, saturating at
/// `u32::MAX`
#[must_use]
pub fn scale_aqi(aqi: u32) -> u32 {
    aqi.saturating_mul(10)
}

/// First band whose threshold is at least `scaled`; `None` above 100
#[must_use]
pub fn band_for(scaled: u32) -> Option<&'static AirQualityBand> {
    AIR_QUALITY_BANDS
        .iter()
        .find(|band| scaled <= band.threshold)
}
