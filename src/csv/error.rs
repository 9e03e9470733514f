use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvReaderError {
    #[error("CSV file '{0}' is already open")]
    AlreadyOpen(PathBuf),

    #[error("CSV file '{0}' is not open")]
    NotOpen(PathBuf),

    #[error("Failed to open CSV file '{0}'")]
    FileOpen(PathBuf, #[source] std::io::Error),

    #[error("Failed to read CSV file '{0}'")]
    Read(PathBuf, #[source] csv::Error),

    // Content errors: the file exists but its layout is unusable
    #[error("CSV file '{0}' has no header")]
    NoHeader(PathBuf),

    #[error("CSV file '{path}' has duplicate header '{header}'")]
    DuplicateHeader { path: PathBuf, header: String },

    #[error("CSV file '{0}' has a blank header")]
    BlankHeader(PathBuf),

    #[error("Line {line} of CSV file '{path}' has {found} columns, expected {expected}")]
    ColumnCountMismatch {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },
}

impl CsvReaderError {
    /// `true` when the underlying file could not be opened or read, as opposed to a
    /// file whose content is malformed or a reader used out of order.
    pub fn is_resource_error(&self) -> bool {
        matches!(self, CsvReaderError::FileOpen(..) | CsvReaderError::Read(..))
    }
}
