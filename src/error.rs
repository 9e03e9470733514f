use crate::store::error::StoreError;
use crate::validation::error::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherSearchError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Filter failed validation with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),
}

impl WeatherSearchError {
    /// Caller-facing messages of a validation failure, in report order. Empty for other errors.
    pub fn messages(&self) -> Vec<String> {
        match self {
            WeatherSearchError::Validation(errors) => crate::validation::messages(errors),
            _ => Vec::new(),
        }
    }
}
