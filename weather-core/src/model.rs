use serde::{Deserialize, Serialize};

/// Number of days requested from the provider and shown by every front-end.
pub const FORECAST_DAYS: usize = 3;

/// A place resolved by the geocoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub country: String,
    /// State or province.
    #[serde(default)]
    pub admin1: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Provider-local timestamp, e.g. `2024-01-01T00:00`.
    pub time: String,
    pub temperature: f64,
    #[serde(rename = "weathercode")]
    pub weather_code: u16,
    #[serde(rename = "windspeed")]
    pub wind_speed: f64,
    #[serde(rename = "winddirection")]
    pub wind_direction: u16,
}

/// Daily forecast as the provider sends it: parallel, index-aligned arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub weathercode: Vec<u16>,
    pub precipitation_sum: Vec<f64>,
}

impl DailyForecast {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// True when every array has the same length.
    pub fn is_aligned(&self) -> bool {
        let n = self.time.len();
        self.temperature_2m_max.len() == n
            && self.temperature_2m_min.len() == n
            && self.weathercode.len() == n
            && self.precipitation_sum.len() == n
    }

    /// Rows of the forecast, stopping at the shortest array.
    pub fn days(&self) -> impl Iterator<Item = ForecastDay> + '_ {
        self.time
            .iter()
            .zip(&self.temperature_2m_max)
            .zip(&self.temperature_2m_min)
            .zip(&self.weathercode)
            .zip(&self.precipitation_sum)
            .map(|((((date, &max), &min), &code), &precip)| ForecastDay {
                date: date.clone(),
                max_temp: max,
                min_temp: min,
                weather_code: code,
                precipitation: precip,
            })
    }
}

/// One day of the forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: String,
    pub max_temp: f64,
    pub min_temp: f64,
    pub weather_code: u16,
    pub precipitation: f64,
}

/// Decoded forecast endpoint response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub timezone: Option<String>,
    pub current_weather: CurrentConditions,
    pub daily: DailyForecast,
}

/// Everything a front-end needs to render one lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    /// Absent for coordinate-only queries.
    pub location: Option<Location>,
    pub latitude: f64,
    pub longitude: f64,
    pub current: CurrentConditions,
    /// At most [`FORECAST_DAYS`] entries.
    pub days: Vec<ForecastDay>,
}

impl WeatherReport {
    pub fn new(location: Option<Location>, forecast: Forecast) -> Self {
        let days = forecast.daily.days().take(FORECAST_DAYS).collect();

        Self {
            location,
            latitude: forecast.latitude,
            longitude: forecast.longitude,
            current: forecast.current_weather,
            days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily(n: usize) -> DailyForecast {
        DailyForecast {
            time: (1..=n).map(|d| format!("2024-01-{d:02}")).collect(),
            temperature_2m_max: vec![10.0; n],
            temperature_2m_min: vec![2.0; n],
            weathercode: vec![3; n],
            precipitation_sum: vec![0.5; n],
        }
    }

    fn forecast(n: usize) -> Forecast {
        Forecast {
            latitude: 52.52,
            longitude: 13.41,
            timezone: Some("Europe/Berlin".into()),
            current_weather: CurrentConditions {
                time: "2024-01-01T12:00".into(),
                temperature: 4.5,
                weather_code: 3,
                wind_speed: 12.0,
                wind_direction: 270,
            },
            daily: daily(n),
        }
    }

    #[test]
    fn report_truncates_to_three_days() {
        let report = WeatherReport::new(None, forecast(7));
        assert_eq!(report.days.len(), FORECAST_DAYS);
        assert_eq!(report.days[2].date, "2024-01-03");
    }

    #[test]
    fn report_does_not_pad_short_forecasts() {
        let report = WeatherReport::new(None, forecast(1));
        assert_eq!(report.days.len(), 1);
    }

    #[test]
    fn misaligned_daily_is_detected() {
        let mut d = daily(3);
        assert!(d.is_aligned());
        d.precipitation_sum.pop();
        assert!(!d.is_aligned());
        assert_eq!(d.days().count(), 2);
    }

    #[test]
    fn current_conditions_use_provider_field_names() {
        let json = r#"{"time":"2024-01-01T00:00","temperature":15.2,"weathercode":3,"windspeed":10,"winddirection":180}"#;
        let current: CurrentConditions = serde_json::from_str(json).unwrap();
        assert_eq!(current.weather_code, 3);
        assert_eq!(current.wind_speed, 10.0);
        assert_eq!(current.wind_direction, 180);
    }
}
