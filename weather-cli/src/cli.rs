use std::process::ExitCode;

use clap::{Parser, error::ErrorKind as ClapErrorKind};
use tracing::warn;
use weather_core::{Config, ErrorKind, LookupError, WeatherService, validate_coordinates};

use crate::format::format_report;

pub const EXIT_INVALID_INPUT: u8 = 1;
pub const EXIT_API_ERROR: u8 = 2;

const AFTER_HELP: &str = "\
Examples:
  weather-cli \"San Francisco\"
  weather-cli Tokyo
  weather-cli \"London, UK\"
  weather-cli 37.7749,-122.4194
  weather-cli \"51.5074, -0.1278\"

Output:
  Current weather and a 3-day forecast, temperatures in Celsius.

Exit codes:
  0  Success
  1  Invalid input
  2  API error (network, city not found, etc.)";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-cli",
    version,
    about = "Get weather forecasts from the command line",
    after_help = AFTER_HELP
)]
pub struct Cli {
    /// City name, or GPS coordinates as `latitude,longitude`.
    #[arg(value_name = "CITY | LAT,LON", allow_hyphen_values = true)]
    pub location: String,
}

/// What the positional argument asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    City(String),
    Coordinates { latitude: f64, longitude: f64 },
}

impl Query {
    /// Classify raw input.
    ///
    /// Input made only of digits, signs, dots, commas and whitespace, with at least one
    /// comma, is a coordinate pair. Anything else is a city name, so `London, UK` still
    /// geocodes.
    pub fn parse(input: &str) -> Result<Self, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err("location must not be empty".to_string());
        }

        let numeric = input.chars().all(|c| {
            c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '+') || c.is_whitespace()
        });

        if !(numeric && input.contains(',')) {
            return Ok(Query::City(input.to_string()));
        }

        let parts: Vec<&str> = input.split(',').map(str::trim).collect();
        let [lat, lon] = parts.as_slice() else {
            return Err("invalid coordinate format, expected: lat,lon".to_string());
        };

        let latitude: f64 = lat
            .parse()
            .map_err(|e| format!("invalid latitude '{lat}': {e}"))?;
        let longitude: f64 = lon
            .parse()
            .map_err(|e| format!("invalid longitude '{lon}': {e}"))?;

        validate_coordinates(latitude, longitude).map_err(|e| e.to_string())?;

        Ok(Query::Coordinates {
            latitude,
            longitude,
        })
    }
}

/// Exit code for a failed lookup.
pub fn exit_code_for(err: &LookupError) -> u8 {
    match err.kind() {
        ErrorKind::Validation => EXIT_INVALID_INPUT,
        ErrorKind::Network | ErrorKind::Parse | ErrorKind::NotFound => EXIT_API_ERROR,
    }
}

/// Handle a clap parse failure: help and version succeed, everything else is invalid
/// input.
pub fn handle_parse_error(err: clap::Error) -> ExitCode {
    // print() routes help/version to stdout and errors to stderr
    let _ = err.print();

    match err.kind() {
        ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::from(EXIT_INVALID_INPUT),
    }
}

impl Cli {
    pub async fn run(self) -> ExitCode {
        let query = match Query::parse(&self.location) {
            Ok(q) => q,
            Err(msg) => {
                eprintln!("Error: {msg}");
                return ExitCode::from(EXIT_INVALID_INPUT);
            }
        };

        let config = Config::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {e:#}");
            Config::default()
        });

        let service = match WeatherService::open_meteo(config.provider) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::from(EXIT_API_ERROR);
            }
        };

        let result = match &query {
            Query::City(name) => service.weather_for_city(name).await,
            Query::Coordinates {
                latitude,
                longitude,
            } => service.weather_for_coordinates(*latitude, *longitude).await,
        };

        match result {
            Ok(report) => {
                print!("{}", format_report(&report));
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::from(exit_code_for(&e))
            }
        }
    }
}
