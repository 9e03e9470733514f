pub mod condition_set;
pub mod filter_record;
pub mod weather_condition;
pub mod weather_record;
