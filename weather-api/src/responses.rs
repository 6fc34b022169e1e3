//! API response types and the mapping from [`WeatherReport`].

use serde::{Deserialize, Serialize};
use weather_core::{FORECAST_DAYS, WeatherReport, describe};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationResponse {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherResponse {
    pub temperature: f64,
    pub condition: String,
    pub weather_code: u16,
    pub wind_speed: f64,
    pub wind_direction: u16,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDayResponse {
    pub date: String,
    pub max_temp: f64,
    pub min_temp: f64,
    pub condition: String,
    pub weather_code: u16,
    pub precipitation: f64,
}

/// Body of a successful weather lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub location: LocationResponse,
    pub current: CurrentWeatherResponse,
    pub forecast: Vec<ForecastDayResponse>,
}

impl From<&WeatherReport> for WeatherResponse {
    fn from(report: &WeatherReport) -> Self {
        // Coordinate lookups have no location; the fields stay present but blank.
        let (name, country) = report
            .location
            .as_ref()
            .map(|l| (l.name.clone(), l.country.clone()))
            .unwrap_or_default();

        let current = &report.current;

        Self {
            location: LocationResponse {
                name,
                country,
                latitude: report.latitude,
                longitude: report.longitude,
            },
            current: CurrentWeatherResponse {
                temperature: current.temperature,
                condition: describe(current.weather_code).into_owned(),
                weather_code: current.weather_code,
                wind_speed: current.wind_speed,
                wind_direction: current.wind_direction,
                time: current.time.clone(),
            },
            forecast: report
                .days
                .iter()
                .take(FORECAST_DAYS)
                .map(|day| ForecastDayResponse {
                    date: day.date.clone(),
                    max_temp: day.max_temp,
                    min_temp: day.min_temp,
                    condition: describe(day.weather_code).into_owned(),
                    weather_code: day.weather_code,
                    precipitation: day.precipitation,
                })
                .collect(),
        }
    }
}

/// Body of `GET /api/v1/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}
