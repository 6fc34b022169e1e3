//! Error types for the weather core.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Which provider endpoint an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Geocoding,
    Forecast,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Geocoding => f.write_str("geocoding"),
            Endpoint::Forecast => f.write_str("forecast"),
        }
    }
}

/// Coarse classification that front-ends map to exit codes or HTTP statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Parse,
    NotFound,
    Validation,
}

/// Failure of a single geocoding or forecast call.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{endpoint} API request failed: {source}")]
    Network {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} API returned status {}", .status.as_u16())]
    Status {
        endpoint: Endpoint,
        status: StatusCode,
    },

    #[error("failed to parse {endpoint} response: {message}")]
    Parse { endpoint: Endpoint, message: String },

    #[error("city not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::Client(_) | WeatherError::Network { .. } | WeatherError::Status { .. } => {
                ErrorKind::Network
            }
            WeatherError::Parse { .. } => ErrorKind::Parse,
            WeatherError::NotFound(_) => ErrorKind::NotFound,
            WeatherError::Validation(_) => ErrorKind::Validation,
        }
    }

    pub(crate) fn parse(endpoint: Endpoint, message: impl Into<String>) -> Self {
        WeatherError::Parse {
            endpoint,
            message: message.into(),
        }
    }
}

/// Step of a lookup that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Geocode,
    Forecast,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Geocode => f.write_str("failed to geocode city"),
            Stage::Forecast => f.write_str("failed to get forecast"),
        }
    }
}

/// Error returned by [`crate::WeatherService`]: the underlying cause plus the step it
/// happened in.
#[derive(Debug, Error)]
#[error("{stage}: {source}")]
pub struct LookupError {
    pub stage: Stage,
    #[source]
    pub source: WeatherError,
}

impl LookupError {
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_carries_code() {
        let err = WeatherError::Status {
            endpoint: Endpoint::Geocoding,
            status: StatusCode::BAD_GATEWAY,
        };
        assert_eq!(err.to_string(), "geocoding API returned status 502");
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[test]
    fn lookup_error_adds_stage_context() {
        let err = LookupError {
            stage: Stage::Geocode,
            source: WeatherError::NotFound("Atlantis".into()),
        };
        assert_eq!(err.to_string(), "failed to geocode city: city not found: Atlantis");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn kinds_follow_variants() {
        assert_eq!(
            WeatherError::parse(Endpoint::Forecast, "bad").kind(),
            ErrorKind::Parse
        );
        assert_eq!(
            WeatherError::Validation("latitude".into()).kind(),
            ErrorKind::Validation
        );
    }
}
