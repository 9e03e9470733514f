use std::fmt;
use thiserror::Error;

/// Which temperature column a message refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureField {
    Max,
    Min,
}

impl fmt::Display for TemperatureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemperatureField::Max => write!(f, "Max temperature"),
            TemperatureField::Min => write!(f, "Min temperature"),
        }
    }
}

/// Broad class of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A value is present but not in the expected shape (date, integer).
    Format,
    /// A value parses but lies outside a numeric or length bound.
    Range,
    /// Two individually valid values contradict each other, or a required pair is incomplete.
    Consistency,
}

/// One problem found in a filter record. `Display` yields the message shown to the user.
///
/// Errors never abort validation; a validator reports every problem it finds, in field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    #[error("Date must be a valid date in YYYY/MM/DD format.")]
    DateFormat,

    #[error("Date must be in MM/DD format.")]
    MonthDayFormat,

    #[error("Place must be 10 characters or fewer.")]
    PlaceTooLong,

    #[error("Condition must be 10 characters or fewer.")]
    ConditionTooLong,

    #[error("{0} must be a number.")]
    NotNumeric(TemperatureField),

    #[error("{0} must be within 3 digits.")]
    OutOfRange(TemperatureField),

    #[error("Date range is invalid.")]
    DateRangeOrder,

    #[error("{0} range is invalid.")]
    TemperatureRangeOrder(TemperatureField),

    #[error("Date and place must both be entered.")]
    DateAndPlaceRequired,
}

impl ValidationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ValidationError::DateFormat
            | ValidationError::MonthDayFormat
            | ValidationError::NotNumeric(_) => ErrorCategory::Format,
            ValidationError::PlaceTooLong
            | ValidationError::ConditionTooLong
            | ValidationError::OutOfRange(_) => ErrorCategory::Range,
            ValidationError::DateRangeOrder
            | ValidationError::TemperatureRangeOrder(_)
            | ValidationError::DateAndPlaceRequired => ErrorCategory::Consistency,
        }
    }
}

/// Renders errors as the plain message list handed back to the caller.
pub fn messages(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}
