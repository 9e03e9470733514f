mod csv;
mod error;
mod query;
mod search;
mod statistics;
mod store;
mod types;
mod validation;

pub use error::WeatherSearchError;
pub use search::WeatherSearch;

pub use types::condition_set::{ConditionSet, MAX_CONDITION_CLAUSES};
pub use types::filter_record::{FilterRecord, RangeFilterRecord, StatisticsFilter};
pub use types::weather_condition::{UnknownCondition, WeatherCondition};
pub use types::weather_record::{WeatherRecord, DATE_FORMAT};

pub use validation::checks::{MAX_TEXT_LENGTH, TEMPERATURE_LIMIT};
pub use validation::date_format::{is_valid_date, is_valid_month_day};
pub use validation::{
    messages, validate_filter, validate_range_filter, validate_range_order,
    validate_statistics_filter, ErrorCategory, TemperatureField, ValidationError,
};

pub use query::{
    compile_filter, compile_list_all, compile_place_filter, compile_range_filter,
    compile_statistics_query, Clause, CompareOp, CompiledQuery, WeatherColumn, BASE_SCAN,
};

pub use crate::csv::{CsvReader, CsvReaderError, CsvRow};
pub use statistics::{summarize, StatisticsReport};
pub use store::{StoreError, WeatherFrame};
