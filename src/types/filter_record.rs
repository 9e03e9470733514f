//! Filter records: the sparse, user-supplied search constraints for one query.
//!
//! Every field is optional raw text. A field that is `None` or an empty string
//! contributes no constraint; anything else is a constraint that still has to be
//! validated (see [`crate::validation`]) before it is compiled.

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::types::condition_set::ConditionSet;

/// Returns the field value if it carries a constraint.
pub(crate) fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Filter for the simple search: one exact value per column.
///
/// # Examples
///
/// ```rust
/// use weather_search::FilterRecord;
///
/// let filter = FilterRecord::builder().place("Tokyo").temp_max("11").build();
/// assert_eq!(filter.place.as_deref(), Some("Tokyo"));
/// assert!(filter.date.is_none());
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterRecord {
    #[builder(into)]
    pub date: Option<String>,
    #[builder(into)]
    pub place: Option<String>,
    #[builder(into)]
    pub condition: Option<String>,
    #[builder(into)]
    pub temp_max: Option<String>,
    #[builder(into)]
    pub temp_min: Option<String>,
}

impl FilterRecord {
    /// `true` when no field carries a constraint.
    pub fn is_unconstrained(&self) -> bool {
        [
            &self.date,
            &self.place,
            &self.condition,
            &self.temp_max,
            &self.temp_min,
        ]
        .into_iter()
        .all(|field| present(field).is_none())
    }
}

/// Filter for the extended search: inclusive ranges for dates and temperatures and a
/// comma-delimited set of weather categories.
///
/// # Examples
///
/// ```rust
/// use weather_search::{ConditionSet, RangeFilterRecord};
///
/// let filter = RangeFilterRecord::builder()
///     .date_from("2015/01/01")
///     .condition_set("sunny,rainy")
///     .build();
/// assert_eq!(
///     filter.conditions(),
///     ConditionSet::Two("sunny".to_string(), "rainy".to_string())
/// );
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RangeFilterRecord {
    #[builder(into)]
    pub date_from: Option<String>,
    #[builder(into)]
    pub date_to: Option<String>,
    #[builder(into)]
    pub place: Option<String>,
    #[builder(into)]
    pub condition_set: Option<String>,
    #[builder(into)]
    pub temp_max_from: Option<String>,
    #[builder(into)]
    pub temp_max_to: Option<String>,
    #[builder(into)]
    pub temp_min_from: Option<String>,
    #[builder(into)]
    pub temp_min_to: Option<String>,
}

impl RangeFilterRecord {
    /// The category field decomposed into its tokens.
    pub fn conditions(&self) -> ConditionSet {
        ConditionSet::parse(present(&self.condition_set).unwrap_or_default())
    }
}

/// Filter for the per-day statistics report. Both fields are required.
///
/// `date` is a month and day (`MM/DD`); the report covers that day across every
/// stored year.
#[derive(Debug, Default, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatisticsFilter {
    #[builder(into)]
    pub date: Option<String>,
    #[builder(into)]
    pub place: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_strings_are_absent() {
        let filter = FilterRecord::builder().date("").place("").build();
        assert!(filter.is_unconstrained());
        assert!(FilterRecord::default().is_unconstrained());
        assert!(!FilterRecord::builder().temp_min("0").build().is_unconstrained());
    }

    #[test]
    fn test_deserialize_camel_case_request() -> Result<(), serde_json::Error> {
        let filter: RangeFilterRecord = serde_json::from_str(
            r#"{"dateFrom":"2015/01/02","tempMaxTo":"20","conditionSet":"sunny,cloudy"}"#,
        )?;
        assert_eq!(filter.date_from.as_deref(), Some("2015/01/02"));
        assert_eq!(filter.temp_max_to.as_deref(), Some("20"));
        assert_eq!(filter.date_to, None);
        assert_eq!(filter.conditions().len(), 2);
        Ok(())
    }

    #[test]
    fn test_maybe_setters() {
        let place: Option<&str> = None;
        let filter = StatisticsFilter::builder()
            .date("02/29")
            .maybe_place(place)
            .build();
        assert_eq!(filter.date.as_deref(), Some("02/29"));
        assert_eq!(filter.place, None);
    }
}
