//! Filter validation.
//!
//! Validators are pure functions from a filter record to an ordered list of
//! [`ValidationError`]s. They never stop at the first problem: every applicable
//! check runs and the list order follows the field order of the record.

pub mod checks;
pub mod date_format;
pub mod error;
pub mod filter;
pub mod statistics;

pub use error::{messages, ErrorCategory, TemperatureField, ValidationError};
pub use filter::{validate_filter, validate_range_filter, validate_range_order};
pub use statistics::validate_statistics_filter;
