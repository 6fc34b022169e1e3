//! Route handlers

use axum::{
    Json,
    extract::{
        OriginalUri, Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::Method,
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::ApiError,
    responses::{HealthResponse, WeatherResponse},
    state::AppState,
};

pub const SERVICE_NAME: &str = "weather-api";

/// GET /api/v1/weather/city/{city}
pub async fn weather_by_city(
    State(state): State<AppState>,
    city: Result<Path<String>, PathRejection>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let Path(city) = city?;
    let city = city.trim();
    if city.is_empty() {
        return Err(missing_city());
    }

    let report = state
        .weather
        .weather_for_city(city)
        .await
        .map_err(|e| ApiError::from_city_lookup(city, e))?;

    Ok(Json(WeatherResponse::from(&report)))
}

/// GET /api/v1/weather/city/ (no city segment)
pub async fn weather_by_city_missing() -> ApiError {
    missing_city()
}

fn missing_city() -> ApiError {
    ApiError::BadRequest("City name is required".to_string())
}

/// Raw query string; values are parsed by hand so bad input gets the JSON error envelope.
#[derive(Debug, Default, Deserialize)]
pub struct CoordinatesQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// GET /api/v1/weather/coordinates?lat=&lon=
pub async fn weather_by_coordinates(
    State(state): State<AppState>,
    query: Result<Query<CoordinatesQuery>, QueryRejection>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let Query(query) = query?;
    let (lat, lon) = match (non_empty(query.lat), non_empty(query.lon)) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            return Err(ApiError::BadRequest(
                "Missing required parameters: lat and lon".to_string(),
            ));
        }
    };

    let latitude = parse_coordinate("lat", &lat)?;
    let longitude = parse_coordinate("lon", &lon)?;
    debug!(latitude, longitude, "coordinates lookup");

    let report = state
        .weather
        .weather_for_coordinates(latitude, longitude)
        .await
        .map_err(ApiError::from_forecast)?;

    Ok(Json(WeatherResponse::from(&report)))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_coordinate(name: &str, raw: &str) -> Result<f64, ApiError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid value for {name}: '{raw}'")))
}

/// Any path without a route.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}

/// A known path requested with an unsupported method.
pub async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::MethodNotAllowed(format!("{method} is not supported on {}", uri.path()))
}

/// GET /api/v1/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_parsing() {
        assert_eq!(parse_coordinate("lat", "37.7749").unwrap(), 37.7749);
        assert_eq!(parse_coordinate("lon", "-122").unwrap(), -122.0);
        assert!(parse_coordinate("lat", "abc").is_err());
        assert!(parse_coordinate("lat", "NaN").is_err());
        assert!(parse_coordinate("lat", "inf").is_err());
    }

    #[test]
    fn blank_values_count_as_missing() {
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(" 1.5 ".into())), Some("1.5".to_string()));
    }
}
