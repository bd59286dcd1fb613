//! Data domains

/// The five proxied data domains, shared by the proxy routes and the
/// dashboard state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Forecast,
    DailyForecast,
    AirPollution,
    Uv,
    LocationSearch,
}

impl Domain {
    /// Domains fetched for the active coordinate
    pub const COORDINATE_DOMAINS: [Domain; 4] = [
        Domain::Forecast,
        Domain::DailyForecast,
        Domain::AirPollution,
        Domain::Uv,
    ];

    pub(crate) const COUNT: usize = 5;

    pub(crate) fn index(self) -> usize {
        match self {
            Domain::Forecast => 0,
            Domain::DailyForecast => 1,
            Domain::AirPollution => 2,
            Domain::Uv => 3,
            Domain::LocationSearch => 4,
        }
    }

    /// Proxy route serving this domain
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Domain::Forecast => "/weather",
            Domain::DailyForecast => "/daily-forecast",
            Domain::AirPollution => "/pollution",
            Domain::Uv => "/uv",
            Domain::LocationSearch => "/location-search",
        }
    }

    /// Name used in logs and error messages ("Error fetching UV data")
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Domain::Forecast => "weather",
            Domain::DailyForecast => "daily forecast",
            Domain::AirPollution => "pollution",
            Domain::Uv => "UV",
            Domain::LocationSearch => "location",
        }
    }
}
