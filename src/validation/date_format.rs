//! Strict date-text checks shared by the search and statistics validators.
//!
//! `NaiveDate::parse_from_str` accepts variable-width fields (`2016/2/9`) and signed
//! years, so every candidate is first matched against a fixed digit/separator shape
//! anchored at both ends, then handed to chrono for the calendar check.

use chrono::NaiveDate;

use crate::types::weather_record::DATE_FORMAT;

/// A leap year used to check month/day text, so that `02/29` is accepted.
pub const LEAP_REFERENCE_YEAR: i32 = 2016;

const DATE_SHAPE: &str = "dddd/dd/dd";
const MONTH_DAY_SHAPE: &str = "dd/dd";

/// `true` for a calendar-valid `YYYY/MM/DD` date with nothing before or after it.
pub fn is_valid_date(candidate: &str) -> bool {
    has_shape(candidate, DATE_SHAPE) && NaiveDate::parse_from_str(candidate, DATE_FORMAT).is_ok()
}

/// `true` for a valid `MM/DD` month and day in some year.
pub fn is_valid_month_day(candidate: &str) -> bool {
    has_shape(candidate, MONTH_DAY_SHAPE)
        && NaiveDate::parse_from_str(
            &format!("{LEAP_REFERENCE_YEAR}/{candidate}"),
            DATE_FORMAT,
        )
        .is_ok()
}

// 'd' matches one ASCII digit, any other byte must match literally
fn has_shape(candidate: &str, shape: &str) -> bool {
    candidate.len() == shape.len()
        && candidate
            .bytes()
            .zip(shape.bytes())
            .all(|(c, s)| match s {
                b'd' => c.is_ascii_digit(),
                _ => c == s,
            })
}
