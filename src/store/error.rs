use crate::csv::error::CsvReaderError;
use crate::query::clause::WeatherColumn;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Csv(#[from] CsvReaderError),

    #[error("Failed processing DataFrame: {0}")]
    Polars(#[from] PolarsError),

    // Errors while executing a compiled query
    #[error("Placeholder ':{0}' has no bound value")]
    UnboundPlaceholder(String),

    #[error("Value '{value}' bound to ':{placeholder}' cannot be compared with column '{column}'")]
    InvalidBinding {
        placeholder: String,
        value: String,
        column: WeatherColumn,
    },

    #[error("Result row {row} has no value in column '{column}'")]
    NullInResult { row: usize, column: WeatherColumn },

    // Errors while loading observations from a CSV file
    #[error("Line {line} has no value for column '{column}'")]
    MissingValue { line: usize, column: WeatherColumn },

    #[error("Line {line} has invalid value '{value}' for column '{column}'")]
    InvalidRow {
        line: usize,
        column: WeatherColumn,
        value: String,
    },
}
