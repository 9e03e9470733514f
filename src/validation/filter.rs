//! Validators for the simple and extended search filters.

use crate::types::condition_set::ConditionSet;
use crate::types::filter_record::{present, FilterRecord, RangeFilterRecord};
use crate::validation::checks::{exceeds_length, parse_temperature, Checks, Temperature};
use crate::validation::date_format::is_valid_date;
use crate::validation::error::{TemperatureField, ValidationError};

/// Checks every field of a simple search filter.
///
/// Errors are reported in field order: date, place, condition, max temperature,
/// min temperature. An empty result means the filter can be compiled.
///
/// # Examples
///
/// ```rust
/// use weather_search::{validate_filter, FilterRecord, ValidationError};
///
/// let filter = FilterRecord::builder().date("2015/01/01A").temp_max("1000").build();
/// let errors = validate_filter(&filter);
/// assert_eq!(errors.len(), 2);
/// assert_eq!(errors[0], ValidationError::DateFormat);
/// assert_eq!(errors[1].to_string(), "Max temperature must be within 3 digits.");
/// ```
pub fn validate_filter(filter: &FilterRecord) -> Vec<ValidationError> {
    let mut checks = Checks::new();
    checks.date(present(&filter.date));
    checks.text_length(present(&filter.place), ValidationError::PlaceTooLong);
    checks.text_length(present(&filter.condition), ValidationError::ConditionTooLong);
    checks.temperature(present(&filter.temp_max), TemperatureField::Max);
    checks.temperature(present(&filter.temp_min), TemperatureField::Min);
    checks.finish()
}

/// Checks every field of an extended search filter.
///
/// Each `From`/`To` pair is checked half by half but reported as one field. Category
/// tokens are length-checked individually. Ordering between the halves of a pair is
/// checked separately by [`validate_range_order`].
pub fn validate_range_filter(filter: &RangeFilterRecord) -> Vec<ValidationError> {
    let mut checks = Checks::new();
    checks.date_pair(present(&filter.date_from), present(&filter.date_to));
    checks.text_length(present(&filter.place), ValidationError::PlaceTooLong);
    checks.flag(
        ConditionSet::split(present(&filter.condition_set).unwrap_or_default())
            .into_iter()
            .any(exceeds_length),
        ValidationError::ConditionTooLong,
    );
    checks.temperature_pair(
        present(&filter.temp_max_from),
        present(&filter.temp_max_to),
        TemperatureField::Max,
    );
    checks.temperature_pair(
        present(&filter.temp_min_from),
        present(&filter.temp_min_to),
        TemperatureField::Min,
    );
    checks.finish()
}

/// Checks that no range pair has its lower bound after its upper bound.
///
/// A pair is only compared when both halves are present and individually well formed;
/// anything else is left to [`validate_range_filter`]. Equal bounds are accepted.
pub fn validate_range_order(filter: &RangeFilterRecord) -> Vec<ValidationError> {
    let mut checks = Checks::new();

    if let (Some(from), Some(to)) = (present(&filter.date_from), present(&filter.date_to)) {
        // fixed-width, zero-padded text sorts chronologically
        let reversed = is_valid_date(from) && is_valid_date(to) && from > to;
        checks.flag(reversed, ValidationError::DateRangeOrder);
    }
    temperature_order(
        &mut checks,
        present(&filter.temp_max_from),
        present(&filter.temp_max_to),
        TemperatureField::Max,
    );
    temperature_order(
        &mut checks,
        present(&filter.temp_min_from),
        present(&filter.temp_min_to),
        TemperatureField::Min,
    );

    checks.finish()
}

fn temperature_order(
    checks: &mut Checks,
    from: Option<&str>,
    to: Option<&str>,
    field: TemperatureField,
) {
    let (Some(from), Some(to)) = (from, to) else {
        return;
    };
    if let (Temperature::Valid(low), Temperature::Valid(high)) =
        (parse_temperature(from), parse_temperature(to))
    {
        checks.flag(low > high, ValidationError::TemperatureRangeOrder(field));
    }
}
