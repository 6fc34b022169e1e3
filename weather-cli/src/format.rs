//! Terminal rendering of a [`WeatherReport`]. The REST API has its own JSON mapping.

use std::fmt::Write;

use chrono::NaiveDate;
use weather_core::{Category, FORECAST_DAYS, WeatherReport, describe};

const RULE_WIDTH: usize = 72;

/// Render the report as fixed-layout text.
pub fn format_report(report: &WeatherReport) -> String {
    let mut out = String::new();

    out.push_str("Weather Forecast\n");
    out.push_str("================\n\n");

    if let Some(location) = &report.location {
        let mut line = location.name.clone();
        for part in [location.admin1.as_deref(), Some(location.country.as_str())]
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
        {
            line.push_str(", ");
            line.push_str(part);
        }
        let _ = writeln!(out, "Location: {line}");
    }
    let _ = writeln!(
        out,
        "Coordinates: {}\n",
        format_coordinates(report.latitude, report.longitude)
    );

    let current = &report.current;
    let _ = writeln!(out, "Current Weather ({}):", current.time);
    let _ = writeln!(out, "  Temperature: {:.1}°C", current.temperature);
    let _ = writeln!(
        out,
        "  Conditions:  {} {}",
        Category::from_code(current.weather_code).symbol(),
        describe(current.weather_code)
    );
    let _ = writeln!(
        out,
        "  Wind:        {:.1} km/h from {}° ({})\n",
        current.wind_speed,
        current.wind_direction,
        compass_point(current.wind_direction)
    );

    let _ = writeln!(out, "{FORECAST_DAYS}-Day Forecast:");
    let rule = "─".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "{:<16}  {:>9}  {:>9}  {:<24}  {:>8}",
        "Date", "Max Temp", "Min Temp", "Condition", "Precip"
    );
    let _ = writeln!(out, "{rule}");

    for day in report.days.iter().take(FORECAST_DAYS) {
        let _ = writeln!(
            out,
            "{:<16}  {:>7.1}°C  {:>7.1}°C  {:<24}  {:>5.1} mm",
            format_date(&day.date),
            day.max_temp,
            day.min_temp,
            describe(day.weather_code),
            day.precipitation
        );
    }
    let _ = writeln!(out, "{rule}");

    out
}

fn format_coordinates(latitude: f64, longitude: f64) -> String {
    let ns = if latitude < 0.0 { 'S' } else { 'N' };
    let ew = if longitude < 0.0 { 'W' } else { 'E' };
    format!("{:.2}°{ns}, {:.2}°{ew}", latitude.abs(), longitude.abs())
}

/// `2024-01-01` becomes `Mon 2024-01-01`; anything unparsable is shown as-is.
fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%a %Y-%m-%d").to_string(),
        Err(_) => date.to_string(),
    }
}

fn compass_point(degrees: u16) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let idx = ((f64::from(degrees % 360) + 22.5) / 45.0) as usize % POINTS.len();
    POINTS[idx]
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_core::{CurrentConditions, ForecastDay, Location};

    fn day(date: &str, code: u16) -> ForecastDay {
        ForecastDay {
            date: date.to_string(),
            max_temp: 18.0,
            min_temp: 10.0,
            weather_code: code,
            precipitation: 0.5,
        }
    }

    fn report(location: Option<Location>, days: Vec<ForecastDay>) -> WeatherReport {
        WeatherReport {
            location,
            latitude: 37.7749,
            longitude: -122.4194,
            current: CurrentConditions {
                time: "2024-01-01T00:00".to_string(),
                temperature: 15.2,
                weather_code: 3,
                wind_speed: 10.0,
                wind_direction: 180,
            },
            days,
        }
    }

    #[test]
    fn city_report_layout() {
        let location = Location {
            name: "San Francisco".into(),
            country: "United States".into(),
            admin1: Some("California".into()),
            latitude: 37.7749,
            longitude: -122.4194,
        };
        let text = format_report(&report(Some(location), vec![day("2024-01-01", 3)]));

        assert!(text.starts_with("Weather Forecast\n================\n\n"));
        assert!(text.contains("Location: San Francisco, California, United States\n"));
        assert!(text.contains("Coordinates: 37.77°N, 122.42°W\n"));
        assert!(text.contains("  Temperature: 15.2°C\n"));
        assert!(text.contains("Overcast"));
        assert!(text.contains("10.0 km/h from 180° (S)"));
        assert!(text.contains("Mon 2024-01-01"));
        assert!(text.contains("0.5 mm"));
    }

    #[test]
    fn coordinate_report_has_no_location_line() {
        let text = format_report(&report(None, vec![day("2024-01-01", 61)]));

        assert!(!text.contains("Location:"));
        assert!(text.contains("Coordinates: 37.77°N, 122.42°W"));
        assert!(text.contains("Slight rain"));
    }

    #[test]
    fn missing_region_is_skipped() {
        let location = Location {
            name: "Tokyo".into(),
            country: "Japan".into(),
            admin1: None,
            latitude: 35.6895,
            longitude: 139.6917,
        };
        let text = format_report(&report(Some(location), vec![]));

        assert!(text.contains("Location: Tokyo, Japan\n"));
    }

    #[test]
    fn shows_at_most_three_days_without_padding() {
        let days = vec![
            day("2024-01-01", 0),
            day("2024-01-02", 1),
            day("2024-01-03", 2),
            day("2024-01-04", 3),
        ];
        let text = format_report(&report(None, days));
        assert!(text.contains("2024-01-03"));
        assert!(!text.contains("2024-01-04"));

        let text = format_report(&report(None, vec![day("2024-01-01", 0)]));
        assert_eq!(text.matches(" mm\n").count(), 1);
    }

    #[test]
    fn hemispheres() {
        assert_eq!(format_coordinates(-33.8688, 151.2093), "33.87°S, 151.21°E");
        assert_eq!(format_coordinates(0.0, 0.0), "0.00°N, 0.00°E");
    }

    #[test]
    fn compass_points() {
        assert_eq!(compass_point(0), "N");
        assert_eq!(compass_point(350), "N");
        assert_eq!(compass_point(90), "E");
        assert_eq!(compass_point(225), "SW");
        assert_eq!(compass_point(360), "N");
    }

    #[test]
    fn unparsable_dates_pass_through() {
        assert_eq!(format_date("tomorrow"), "tomorrow");
    }
}
