use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    config::ProviderConfig,
    error::{Endpoint, WeatherError},
    model::{FORECAST_DAYS, Forecast, Location},
};

use super::{ForecastFetcher, Geocoder, validate_coordinates};

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weathercode,precipitation_sum";

/// Client for the Open-Meteo geocoding and forecast APIs.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: Client,
    config: ProviderConfig,
}

impl OpenMeteoClient {
    /// Build a client whose requests all share the configured timeout.
    pub fn new(config: ProviderConfig) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("weather-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(WeatherError::Client)?;

        Ok(Self::with_client(http, config))
    }

    /// Use an existing `reqwest::Client`.
    pub fn with_client(http: Client, config: ProviderConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Issue a GET and return the body of a successful response.
    async fn get_text(
        &self,
        endpoint: Endpoint,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<String, WeatherError> {
        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| WeatherError::Network { endpoint, source })?;

        let status = res.status();
        debug!(%endpoint, status = status.as_u16(), url = %res.url(), "provider responded");

        if !status.is_success() {
            return Err(WeatherError::Status { endpoint, status });
        }

        res.text()
            .await
            .map_err(|source| WeatherError::Network { endpoint, source })
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<Location>,
}

#[async_trait]
impl Geocoder for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn geocode(&self, city: &str) -> Result<Location, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::Validation("city name must not be empty".to_string()));
        }

        let body = self
            .get_text(
                Endpoint::Geocoding,
                &self.config.geocoding_url,
                &[
                    ("name", city),
                    ("count", "1"),
                    ("language", "en"),
                    ("format", "json"),
                ],
            )
            .await?;

        let parsed: GeocodingResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::parse(Endpoint::Geocoding, e.to_string()))?;

        let location = parsed
            .results
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::NotFound(city.to_string()))?;

        debug!(
            name = %location.name,
            country = %location.country,
            lat = location.latitude,
            lon = location.longitude,
            "geocoded"
        );

        Ok(location)
    }
}

#[async_trait]
impl ForecastFetcher for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Forecast, WeatherError> {
        validate_coordinates(latitude, longitude)?;

        let lat = format!("{latitude:.4}");
        let lon = format!("{longitude:.4}");
        let days = FORECAST_DAYS.to_string();

        let body = self
            .get_text(
                Endpoint::Forecast,
                &self.config.forecast_url,
                &[
                    ("latitude", lat.as_str()),
                    ("longitude", lon.as_str()),
                    ("current_weather", "true"),
                    ("daily", DAILY_FIELDS),
                    ("timezone", "auto"),
                    ("forecast_days", days.as_str()),
                ],
            )
            .await?;

        let forecast: Forecast = serde_json::from_str(&body)
            .map_err(|e| WeatherError::parse(Endpoint::Forecast, e.to_string()))?;

        if !forecast.daily.is_aligned() {
            return Err(WeatherError::parse(
                Endpoint::Forecast,
                "daily forecast arrays have different lengths",
            ));
        }

        debug!(days = forecast.daily.len(), "forecast decoded");

        Ok(forecast)
    }
}
