//! Core library for the `weather` CLI and REST API.
//!
//! This crate defines:
//! - Configuration loading
//! - The Open-Meteo geocoding and forecast client, behind the [`Geocoder`] and
//!   [`ForecastFetcher`] traits
//! - Shared domain models and the WMO weather-code translator
//! - [`WeatherService`], which sequences geocode → forecast → report
//!
//! Presentation lives in the front-end crates.

pub mod codes;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;

pub use codes::{Category, describe};
pub use config::{Config, ProviderConfig, ServerConfig};
pub use error::{Endpoint, ErrorKind, LookupError, Stage, WeatherError};
pub use model::{
    CurrentConditions, DailyForecast, FORECAST_DAYS, Forecast, ForecastDay, Location,
    WeatherReport,
};
pub use provider::{ForecastFetcher, Geocoder, open_meteo::OpenMeteoClient, validate_coordinates};
pub use service::WeatherService;
