use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::WeatherError,
    model::{Forecast, Location},
};

pub mod open_meteo;

/// Resolves a free-text place name to a [`Location`].
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn geocode(&self, city: &str) -> Result<Location, WeatherError>;
}

/// Fetches current conditions and the daily forecast for a coordinate pair.
#[async_trait]
pub trait ForecastFetcher: Send + Sync + Debug {
    async fn fetch_forecast(&self, latitude: f64, longitude: f64)
    -> Result<Forecast, WeatherError>;
}

/// Reject coordinates outside the valid latitude/longitude range.
pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(WeatherError::Validation(format!(
            "latitude must be between -90 and 90, got {latitude:.4}"
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(WeatherError::Validation(format!(
            "longitude must be between -180 and 180, got {longitude:.4}"
        )));
    }
    Ok(())
}
