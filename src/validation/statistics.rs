use crate::types::filter_record::{present, StatisticsFilter};
use crate::validation::checks::Checks;
use crate::validation::date_format::is_valid_month_day;
use crate::validation::error::ValidationError;

/// Checks a statistics filter: an `MM/DD` date, a place of at most ten characters,
/// and that both are given.
pub fn validate_statistics_filter(filter: &StatisticsFilter) -> Vec<ValidationError> {
    let date = present(&filter.date);
    let place = present(&filter.place);

    let mut checks = Checks::new();
    checks.flag(
        date.is_some_and(|d| !is_valid_month_day(d)),
        ValidationError::MonthDayFormat,
    );
    checks.text_length(place, ValidationError::PlaceTooLong);
    checks.flag(
        date.is_none() || place.is_none(),
        ValidationError::DateAndPlaceRequired,
    );
    checks.finish()
}
