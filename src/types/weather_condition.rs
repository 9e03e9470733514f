//! Defines the `WeatherCondition` enum, mapping the textual weather categories stored
//! in the observation table to descriptive variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The weather category of one observation.
///
/// Observations store the category as lowercase text (`"sunny"`, `"cloudy"`, ...).
/// Search filters carry the raw text and compare it verbatim; this enum is used
/// where the crate needs to reason about the closed set, such as the statistics report.
///
/// # Examples
///
/// ```rust
/// use weather_search::WeatherCondition;
///
/// let condition: WeatherCondition = "Rainy".parse().unwrap();
/// assert_eq!(condition, WeatherCondition::Rainy);
/// assert_eq!(condition.to_string(), "rainy");
///
/// assert!("foggy".parse::<WeatherCondition>().is_err());
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    /// Clear skies.
    Sunny,
    /// Overcast or partly cloudy.
    Cloudy,
    /// Any rainfall.
    Rainy,
    /// Any snowfall.
    Snowy,
}

impl WeatherCondition {
    /// Every category, in the order the search form and the statistics report list them.
    pub const ALL: [WeatherCondition; 4] = [
        WeatherCondition::Sunny,
        WeatherCondition::Cloudy,
        WeatherCondition::Rainy,
        WeatherCondition::Snowy,
    ];

    /// The text stored in the `condition` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "sunny",
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::Rainy => "rainy",
            WeatherCondition::Snowy => "snowy",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returned when a string does not name one of the four categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown weather condition '{0}'")]
pub struct UnknownCondition(pub String);

impl FromStr for WeatherCondition {
    type Err = UnknownCondition;

    /// Parses a category name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        WeatherCondition::ALL
            .into_iter()
            .find(|condition| condition.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCondition(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("SNOWY".parse::<WeatherCondition>(), Ok(WeatherCondition::Snowy));
        assert_eq!(" cloudy ".parse::<WeatherCondition>(), Ok(WeatherCondition::Cloudy));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "hail".parse::<WeatherCondition>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown weather condition 'hail'");
    }

    #[test]
    fn test_display_round_trips_through_column_text() {
        for condition in WeatherCondition::ALL {
            assert_eq!(condition.to_string().parse::<WeatherCondition>(), Ok(condition));
        }
    }
}
