//! A record-at-a-time reader for comma-delimited files with a header row.
//!
//! Quoting is disabled, so every `,` separates cells, and trailing empty cells are kept.
//! Each data line must have exactly as many cells as the header. Empty lines are skipped.

use csv::{ErrorKind, ReaderBuilder, StringRecord};
use log::debug;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::csv::error::CsvReaderError;

/// One data line, keyed by header name in header order. Blank cells are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    line: usize,
    cells: Vec<(String, Option<String>)>,
}

impl CsvRow {
    /// The 1-based line where reading this row started.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The cell under `column`, or `None` when the cell is blank or the column does not exist.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.cells.iter().any(|(name, _)| name == column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.cells
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Reads a CSV file one row at a time.
///
/// # Examples
///
/// ```no_run
/// use weather_search::CsvReader;
///
/// # fn main() -> Result<(), weather_search::CsvReaderError> {
/// let mut reader = CsvReader::new("weather.csv");
/// reader.open()?;
/// while let Some(row) = reader.read_line()? {
///     println!("{:?} at {:?}", row.get("date"), row.get("place"));
/// }
/// reader.close();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CsvReader {
    path: PathBuf,
    reader: Option<csv::Reader<BufReader<File>>>,
    headers: Vec<String>,
}

impl CsvReader {
    /// Creates a closed reader. Nothing is touched on disk until [`CsvReader::open`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            reader: None,
            headers: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    /// Header names of the open file, in column order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Opens the file and reads the header row.
    ///
    /// # Errors
    ///
    /// * [`CsvReaderError::AlreadyOpen`] if called twice without [`CsvReader::close`].
    /// * [`CsvReaderError::FileOpen`] if the file is missing or unreadable.
    /// * [`CsvReaderError::NoHeader`], [`CsvReaderError::DuplicateHeader`] or
    ///   [`CsvReaderError::BlankHeader`] if the header row is unusable; the reader
    ///   stays closed.
    pub fn open(&mut self) -> Result<(), CsvReaderError> {
        if self.reader.is_some() {
            return Err(CsvReaderError::AlreadyOpen(self.path.clone()));
        }
        let file = File::open(&self.path)
            .map_err(|e| CsvReaderError::FileOpen(self.path.clone(), e))?;
        let mut file = BufReader::new(file);
        // empty lines are skipped by the parser, so a blank first line is caught here
        let blank_first_line = file
            .fill_buf()
            .map_err(|e| CsvReaderError::Read(self.path.clone(), e.into()))?
            .first()
            .is_some_and(|byte| matches!(*byte, b'\n' | b'\r'));
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .quoting(false)
            .flexible(false)
            .from_reader(file);

        let mut header = StringRecord::new();
        let found = reader
            .read_record(&mut header)
            .map_err(|e| CsvReaderError::Read(self.path.clone(), e))?;
        if !found || blank_first_line {
            return Err(CsvReaderError::NoHeader(self.path.clone()));
        }
        let headers: Vec<String> = header.iter().map(str::to_string).collect();

        let mut seen = HashSet::new();
        if let Some(duplicate) = headers.iter().find(|h| !seen.insert(h.as_str())) {
            return Err(CsvReaderError::DuplicateHeader {
                path: self.path.clone(),
                header: duplicate.clone(),
            });
        }
        if headers.iter().any(String::is_empty) {
            return Err(CsvReaderError::BlankHeader(self.path.clone()));
        }

        debug!(
            "Opened CSV file {:?} with columns {:?}",
            self.path, headers
        );
        self.headers = headers;
        self.reader = Some(reader);
        Ok(())
    }

    /// Reads the next data line, or `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// * [`CsvReaderError::NotOpen`] if the reader is closed.
    /// * [`CsvReaderError::ColumnCountMismatch`] if the line does not have one cell per header.
    /// * [`CsvReaderError::Read`] on an I/O failure or invalid UTF-8.
    pub fn read_line(&mut self) -> Result<Option<CsvRow>, CsvReaderError> {
        let reader = self
            .reader
            .as_mut()
            .ok_or_else(|| CsvReaderError::NotOpen(self.path.clone()))?;

        let mut record = StringRecord::new();
        match reader.read_record(&mut record) {
            Ok(false) => return Ok(None),
            Ok(true) => {}
            Err(e) => {
                if let ErrorKind::UnequalLengths {
                    pos,
                    expected_len,
                    len,
                } = e.kind()
                {
                    return Err(CsvReaderError::ColumnCountMismatch {
                        path: self.path.clone(),
                        line: pos.as_ref().map_or(0, |p| p.line() as usize),
                        expected: *expected_len as usize,
                        found: *len as usize,
                    });
                }
                return Err(CsvReaderError::Read(self.path.clone(), e));
            }
        }

        let cells = self
            .headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| {
                let value = (!value.is_empty()).then(|| value.to_string());
                (name.clone(), value)
            })
            .collect();
        Ok(Some(CsvRow {
            line: record.position().map_or(0, |pos| pos.line() as usize),
            cells,
        }))
    }

    /// Releases the file. Calling it on a closed reader does nothing.
    pub fn close(&mut self) {
        if self.reader.take().is_some() {
            debug!("Closed CSV file {:?}", self.path);
        }
        self.headers.clear();
    }
}
