//! Per-day statistics over the records returned for a [`StatisticsFilter`].

use serde::{Deserialize, Serialize};

use crate::types::filter_record::{present, StatisticsFilter};
use crate::types::weather_condition::WeatherCondition;
use crate::types::weather_record::WeatherRecord;

/// Condition shares and average temperatures for one month/day at one place.
///
/// Percentages are truncated, so they need not add up to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    /// The `MM/DD` the report covers.
    pub date: String,
    pub place: String,
    /// Number of records the report was computed from.
    pub samples: usize,
    pub sunny_percent: u32,
    pub cloudy_percent: u32,
    pub rainy_percent: u32,
    pub snowy_percent: u32,
    /// `None` when there are no samples.
    pub temp_max_average: Option<i64>,
    pub temp_min_average: Option<i64>,
}

impl StatisticsReport {
    pub fn percent(&self, condition: WeatherCondition) -> u32 {
        match condition {
            WeatherCondition::Sunny => self.sunny_percent,
            WeatherCondition::Cloudy => self.cloudy_percent,
            WeatherCondition::Rainy => self.rainy_percent,
            WeatherCondition::Snowy => self.snowy_percent,
        }
    }
}

fn percent_of(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count * 100 / total) as u32
}

fn average(values: impl Iterator<Item = i64>, samples: usize) -> Option<i64> {
    (samples > 0).then(|| values.sum::<i64>() / samples as i64)
}

/// Summarizes `records`, normally the result of the statistics query for `filter`.
///
/// Records whose condition is not one of the known kinds still count toward the total.
pub fn summarize(filter: &StatisticsFilter, records: &[WeatherRecord]) -> StatisticsReport {
    let samples = records.len();
    let count = |condition: WeatherCondition| {
        records
            .iter()
            .filter(|r| r.weather_condition() == Some(condition))
            .count()
    };

    StatisticsReport {
        date: present(&filter.date).unwrap_or_default().to_string(),
        place: present(&filter.place).unwrap_or_default().to_string(),
        samples,
        sunny_percent: percent_of(count(WeatherCondition::Sunny), samples),
        cloudy_percent: percent_of(count(WeatherCondition::Cloudy), samples),
        rainy_percent: percent_of(count(WeatherCondition::Rainy), samples),
        snowy_percent: percent_of(count(WeatherCondition::Snowy), samples),
        temp_max_average: average(records.iter().map(|r| r.temp_max), samples),
        temp_min_average: average(records.iter().map(|r| r.temp_min), samples),
    }
}
