//! Shared handler state

use std::{sync::Arc, time::Duration};

use weather_core::{ServerConfig, WeatherService};

/// State handed to every handler. The service, and the HTTP client inside it, is shared
/// by all requests.
#[derive(Debug, Clone)]
pub struct AppState {
    pub weather: Arc<WeatherService>,
    /// Deadline for a whole request, provider calls included.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(weather: WeatherService) -> Self {
        Self {
            weather: Arc::new(weather),
            request_timeout: ServerConfig::default().request_timeout(),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
