use std::num::IntErrorKind;

use crate::validation::date_format::is_valid_date;
use crate::validation::error::{TemperatureField, ValidationError};

/// Longest accepted place or condition text, in characters.
pub const MAX_TEXT_LENGTH: usize = 10;

/// Temperatures must lie in `-TEMPERATURE_LIMIT..=TEMPERATURE_LIMIT`.
pub const TEMPERATURE_LIMIT: i64 = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Temperature {
    Valid(i64),
    NotNumeric,
    OutOfRange,
}

pub(crate) fn parse_temperature(raw: &str) -> Temperature {
    match raw.parse::<i64>() {
        Ok(value) if (-TEMPERATURE_LIMIT..=TEMPERATURE_LIMIT).contains(&value) => {
            Temperature::Valid(value)
        }
        Ok(_) => Temperature::OutOfRange,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Temperature::OutOfRange,
            _ => Temperature::NotNumeric,
        },
    }
}

pub(crate) fn exceeds_length(value: &str) -> bool {
    value.chars().count() > MAX_TEXT_LENGTH
}

/// Accumulates errors across field checks. Each check records its outcome and returns;
/// nothing here stops the remaining checks from running.
#[derive(Debug, Default)]
pub(crate) struct Checks {
    errors: Vec<ValidationError>,
}

impl Checks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn flag(&mut self, failed: bool, error: ValidationError) {
        if failed {
            self.errors.push(error);
        }
    }

    pub(crate) fn date(&mut self, value: Option<&str>) {
        self.date_pair(value, None);
    }

    /// One shared message when either half is malformed.
    pub(crate) fn date_pair(&mut self, from: Option<&str>, to: Option<&str>) {
        let malformed = [from, to].into_iter().flatten().any(|v| !is_valid_date(v));
        self.flag(malformed, ValidationError::DateFormat);
    }

    pub(crate) fn text_length(&mut self, value: Option<&str>, error: ValidationError) {
        self.flag(value.is_some_and(exceeds_length), error);
    }

    pub(crate) fn temperature(&mut self, value: Option<&str>, field: TemperatureField) {
        self.temperature_pair(value, None, field);
    }

    /// The format message is reported when either half is not a number; the range
    /// message when either numeric half is out of bounds. Both may be reported.
    pub(crate) fn temperature_pair(
        &mut self,
        from: Option<&str>,
        to: Option<&str>,
        field: TemperatureField,
    ) {
        let parsed: Vec<Temperature> = [from, to]
            .into_iter()
            .flatten()
            .map(parse_temperature)
            .collect();
        self.flag(
            parsed.contains(&Temperature::NotNumeric),
            ValidationError::NotNumeric(field),
        );
        self.flag(
            parsed.contains(&Temperature::OutOfRange),
            ValidationError::OutOfRange(field),
        );
    }

    pub(crate) fn finish(self) -> Vec<ValidationError> {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_temperature_bounds() {
        assert_eq!(parse_temperature("999"), Temperature::Valid(999));
        assert_eq!(parse_temperature("-999"), Temperature::Valid(-999));
        assert_eq!(parse_temperature("0"), Temperature::Valid(0));
        assert_eq!(parse_temperature("1000"), Temperature::OutOfRange);
        assert_eq!(parse_temperature("-1000"), Temperature::OutOfRange);
        assert_eq!(
            parse_temperature("99999999999999999999999"),
            Temperature::OutOfRange
        );
    }

    #[test]
    fn test_parse_temperature_rejects_non_integers() {
        for raw in ["abc", "1.5", "", "-", "１２", "12 "] {
            assert_eq!(parse_temperature(raw), Temperature::NotNumeric, "{raw:?}");
        }
    }

    #[test]
    fn test_length_counts_characters() {
        assert!(!exceeds_length("場所れれれれれれれれ"));
        assert!(exceeds_length("場所れれれれれれれれれ"));
        assert!(exceeds_length("12345678901"));
    }

    #[test]
    fn test_pair_reports_each_kind_once() {
        let mut checks = Checks::new();
        checks.temperature_pair(Some("x"), Some("y"), TemperatureField::Max);
        checks.temperature_pair(Some("abc"), Some("1000"), TemperatureField::Min);
        assert_eq!(
            checks.finish(),
            vec![
                ValidationError::NotNumeric(TemperatureField::Max),
                ValidationError::NotNumeric(TemperatureField::Min),
                ValidationError::OutOfRange(TemperatureField::Min),
            ]
        );
    }
}
