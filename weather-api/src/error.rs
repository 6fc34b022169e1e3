//! API error handling
//!
//! Every failure leaves the API as `{"error": {"code", "message", "status"}}`. Internal
//! errors are logged in full but answered with a generic message.

use std::any::Any;

use axum::{
    Json,
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use weather_core::{ErrorKind, LookupError, Stage};

const INTERNAL_MESSAGE: &str = "Internal server error";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Request timed out")]
    Timeout,

    /// The message is what clients see; the cause is only logged.
    #[error("Internal error: {message}")]
    Internal {
        message: &'static str,
        cause: Option<String>,
    },
}

impl ApiError {
    pub fn internal(message: &'static str) -> Self {
        Self::Internal {
            message,
            cause: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::MethodNotAllowed(_) => "METHOD_NOT_ALLOWED",
            Self::Timeout => "TIMEOUT",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Map a failed city lookup: anything that goes wrong while geocoding means the
    /// location could not be found.
    pub fn from_city_lookup(city: &str, err: LookupError) -> Self {
        match err.stage {
            Stage::Geocode => {
                tracing::info!(city, error = %err, "geocoding failed");
                Self::NotFound(format!("Could not find location '{city}'"))
            }
            Stage::Forecast => Self::from_forecast(err),
        }
    }

    /// Map a failed forecast fetch.
    pub fn from_forecast(err: LookupError) -> Self {
        match err.kind() {
            ErrorKind::Validation => Self::BadRequest(err.source.to_string()),
            _ => Self::Internal {
                message: "Failed to fetch weather data",
                cause: Some(err.to_string()),
            },
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(format!("Invalid path: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(format!("Invalid query: {}", rejection.body_text()))
    }
}

/// Error detail inside the envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub status: u16,
}

/// Standard error envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = match self {
            Self::BadRequest(msg) | Self::NotFound(msg) | Self::MethodNotAllowed(msg) => msg,
            Self::Timeout => "Request timed out".to_string(),
            Self::Internal { message, cause } => {
                if let Some(cause) = cause {
                    error!(%cause, "{message}");
                }
                message.to_string()
            }
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                status: status.as_u16(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Turn a handler panic into a 500 envelope. Installed via `CatchPanicLayer`.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    error!(panic = detail, "request handler panicked");

    ApiError::internal(INTERNAL_MESSAGE).into_response()
}
