use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::weather_condition::WeatherCondition;

/// Format of the `date` column.
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// One row of the observation table.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    pub date: String,      // YYYY/MM/DD
    pub place: String,
    pub condition: String, // sunny / cloudy / rainy / snowy
    pub temp_max: i64,
    pub temp_min: i64,
}

impl WeatherRecord {
    pub fn new(
        date: impl Into<String>,
        place: impl Into<String>,
        condition: impl Into<String>,
        temp_max: i64,
        temp_min: i64,
    ) -> Self {
        Self {
            date: date.into(),
            place: place.into(),
            condition: condition.into(),
            temp_max,
            temp_min,
        }
    }

    /// The observation date, or `None` when the stored text is not a valid `YYYY/MM/DD` date.
    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    /// The stored category, or `None` when the text is not one of the known categories.
    pub fn weather_condition(&self) -> Option<WeatherCondition> {
        self.condition.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_accessors() {
        let record = WeatherRecord::new("2016/02/29", "Tokyo", "rainy", 12, 4);
        assert_eq!(record.naive_date(), NaiveDate::from_ymd_opt(2016, 2, 29));
        assert_eq!(record.weather_condition(), Some(WeatherCondition::Rainy));

        let odd = WeatherRecord::new("2015/02/29", "Tokyo", "misty", 12, 4);
        assert_eq!(odd.naive_date(), None);
        assert_eq!(odd.weather_condition(), None);
    }
}
