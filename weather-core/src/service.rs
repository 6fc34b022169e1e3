use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    config::ProviderConfig,
    error::{LookupError, Stage, WeatherError},
    model::WeatherReport,
    provider::{ForecastFetcher, Geocoder, open_meteo::OpenMeteoClient},
};

/// Weather lookups shared by the CLI and the API.
///
/// Each lookup is sequential: geocode (for city queries), then fetch the forecast, then
/// build the report.
#[derive(Debug, Clone)]
pub struct WeatherService {
    geocoder: Arc<dyn Geocoder>,
    forecaster: Arc<dyn ForecastFetcher>,
}

impl WeatherService {
    pub fn new(geocoder: Arc<dyn Geocoder>, forecaster: Arc<dyn ForecastFetcher>) -> Self {
        Self {
            geocoder,
            forecaster,
        }
    }

    /// Service backed by a single Open-Meteo client for both calls.
    pub fn open_meteo(config: ProviderConfig) -> Result<Self, WeatherError> {
        let client = Arc::new(OpenMeteoClient::new(config)?);
        Ok(Self::new(client.clone(), client))
    }

    /// Geocode `city`, then fetch its forecast. The report's `location` is always set.
    #[instrument(skip(self))]
    pub async fn weather_for_city(&self, city: &str) -> Result<WeatherReport, LookupError> {
        let location = self
            .geocoder
            .geocode(city)
            .await
            .map_err(|source| LookupError {
                stage: Stage::Geocode,
                source,
            })?;

        debug!(name = %location.name, "fetching forecast for geocoded city");

        let forecast = self
            .forecaster
            .fetch_forecast(location.latitude, location.longitude)
            .await
            .map_err(|source| LookupError {
                stage: Stage::Forecast,
                source,
            })?;

        Ok(WeatherReport::new(Some(location), forecast))
    }

    #[instrument(skip(self))]
    pub async fn weather_for_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReport, LookupError> {
        let forecast = self
            .forecaster
            .fetch_forecast(latitude, longitude)
            .await
            .map_err(|source| LookupError {
                stage: Stage::Forecast,
                source,
            })?;

        Ok(WeatherReport::new(None, forecast))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ErrorKind,
        model::{CurrentConditions, DailyForecast, Forecast, Location},
        provider::validate_coordinates,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct StubGeocoder {
        found: bool,
    }

    #[async_trait]
    impl Geocoder for StubGeocoder {
        async fn geocode(&self, city: &str) -> Result<Location, WeatherError> {
            if !self.found {
                return Err(WeatherError::NotFound(city.to_string()));
            }
            Ok(Location {
                name: city.to_string(),
                country: "Japan".to_string(),
                admin1: Some("Tokyo".to_string()),
                latitude: 35.6895,
                longitude: 139.6917,
            })
        }
    }

    #[derive(Debug, Default)]
    struct CountingFetcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ForecastFetcher for CountingFetcher {
        async fn fetch_forecast(
            &self,
            latitude: f64,
            longitude: f64,
        ) -> Result<Forecast, WeatherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            validate_coordinates(latitude, longitude)?;
            Ok(Forecast {
                latitude,
                longitude,
                timezone: None,
                current_weather: CurrentConditions {
                    time: "2024-01-01T00:00".to_string(),
                    temperature: 15.2,
                    weather_code: 3,
                    wind_speed: 10.0,
                    wind_direction: 180,
                },
                daily: DailyForecast {
                    time: vec![
                        "2024-01-01".into(),
                        "2024-01-02".into(),
                        "2024-01-03".into(),
                        "2024-01-04".into(),
                    ],
                    temperature_2m_max: vec![18.0, 17.0, 16.0, 15.0],
                    temperature_2m_min: vec![10.0, 9.0, 8.0, 7.0],
                    weathercode: vec![3, 61, 0, 2],
                    precipitation_sum: vec![0.5, 4.0, 0.0, 0.0],
                },
            })
        }
    }

    fn service(found: bool) -> (WeatherService, Arc<CountingFetcher>) {
        let fetcher = Arc::new(CountingFetcher::default());
        let svc = WeatherService::new(Arc::new(StubGeocoder { found }), fetcher.clone());
        (svc, fetcher)
    }

    #[tokio::test]
    async fn city_lookup_carries_location() {
        let (svc, fetcher) = service(true);

        let report = svc.weather_for_city("Tokyo").await.unwrap();

        let location = report.location.expect("city lookups set the location");
        assert_eq!(location.name, "Tokyo");
        assert_eq!(report.latitude, 35.6895);
        assert_eq!(report.days.len(), 3);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn geocode_failure_skips_forecast() {
        let (svc, fetcher) = service(false);

        let err = svc.weather_for_city("Atlantis").await.unwrap_err();

        assert_eq!(err.stage, Stage::Geocode);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().starts_with("failed to geocode city:"));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn coordinate_lookup_has_no_location() {
        let (svc, fetcher) = service(true);

        let report = svc.weather_for_coordinates(37.7749, -122.4194).await.unwrap();

        assert!(report.location.is_none());
        assert_eq!(report.current.weather_code, 3);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn forecast_errors_are_forwarded() {
        let (svc, _) = service(true);

        let err = svc.weather_for_coordinates(100.0, 0.0).await.unwrap_err();

        assert_eq!(err.stage, Stage::Forecast);
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(err.source, WeatherError::Validation(_)));
    }
}
