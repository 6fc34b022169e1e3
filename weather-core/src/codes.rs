//! WMO weather interpretation codes.

use std::borrow::Cow;

/// Human-readable description of a WMO weather code.
///
/// Unmapped codes are described as `Unknown (<code>)`.
pub fn describe(code: u16) -> Cow<'static, str> {
    let text = match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with hail",
        99 => "Thunderstorm with heavy hail",
        other => return Cow::Owned(format!("Unknown ({other})")),
    };

    Cow::Borrowed(text)
}

/// Broad grouping of weather codes, used to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Clear,
    Cloudy,
    Rain,
    Snow,
    Storm,
}

impl Category {
    pub fn from_code(code: u16) -> Self {
        match code {
            0 | 1 => Category::Clear,
            51..=57 | 61..=67 | 80..=82 => Category::Rain,
            71..=77 | 85 | 86 => Category::Snow,
            95..=99 => Category::Storm,
            // 2, 3, fog and anything unmapped
            _ => Category::Cloudy,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Category::Clear => "☀",
            Category::Cloudy => "☁",
            Category::Rain => "☂",
            Category::Snow => "❄",
            Category::Storm => "⚡",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes() {
        assert_eq!(describe(0), "Clear sky");
        assert_eq!(describe(3), "Overcast");
        assert_eq!(describe(45), "Fog");
        assert_eq!(describe(99), "Thunderstorm with heavy hail");
    }

    #[test]
    fn unknown_code_includes_number() {
        assert_eq!(describe(4), "Unknown (4)");
        assert_eq!(describe(u16::MAX), format!("Unknown ({})", u16::MAX));
    }

    #[test]
    fn describe_is_deterministic() {
        for code in 0..=120 {
            assert_eq!(describe(code), describe(code));
        }
    }

    #[test]
    fn categories() {
        assert_eq!(Category::from_code(1), Category::Clear);
        assert_eq!(Category::from_code(48), Category::Cloudy);
        assert_eq!(Category::from_code(63), Category::Rain);
        assert_eq!(Category::from_code(82), Category::Rain);
        assert_eq!(Category::from_code(77), Category::Snow);
        assert_eq!(Category::from_code(96), Category::Storm);
        assert_eq!(Category::from_code(42), Category::Cloudy);
    }
}
