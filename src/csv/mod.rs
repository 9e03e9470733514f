pub mod error;
pub mod reader;

pub use error::CsvReaderError;
pub use reader::{CsvReader, CsvRow};
