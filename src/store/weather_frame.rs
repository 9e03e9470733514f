//! Contains the `WeatherFrame` structure, the observation store that compiled queries
//! are executed against.

use bon::bon;
use log::{debug, info, warn};
use polars::df;
use polars::prelude::{col, lit, DataFrame, Expr, IntoLazy, LazyFrame};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::csv::reader::{CsvReader, CsvRow};
use crate::query::clause::{Clause, CompareOp, WeatherColumn};
use crate::query::compiler::{compile_list_all, CompiledQuery};
use crate::store::error::StoreError;
use crate::types::weather_record::WeatherRecord;
use crate::validation::checks::{parse_temperature, Temperature};
use crate::validation::date_format::is_valid_date;

/// A wrapper around a Polars `LazyFrame` holding weather observations.
///
/// The frame has one column per [`WeatherColumn`]: `date`, `place` and `condition`
/// as strings, `temp_max` and `temp_min` as `i64`. Dates are `YYYY/MM/DD` text, so
/// range comparisons on them are plain string comparisons.
///
/// Queries never modify the frame; each execution filters a clone of the lazy plan.
#[derive(Clone)]
pub struct WeatherFrame {
    /// The underlying Polars LazyFrame containing the observations.
    pub frame: LazyFrame,
}

#[bon]
impl WeatherFrame {
    /// Wraps a `LazyFrame` that already has the observation schema.
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Builds an in-memory store from records, keeping their order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weather_search::{WeatherFrame, WeatherRecord};
    ///
    /// # fn main() -> Result<(), weather_search::StoreError> {
    /// let store = WeatherFrame::from_records(&[
    ///     WeatherRecord::new("2015/01/01", "Gunma", "sunny", 7, -3),
    ///     WeatherRecord::new("2015/01/02", "Tokyo", "cloudy", 11, 6),
    /// ])?;
    /// assert_eq!(store.records()?.len(), 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_records(records: &[WeatherRecord]) -> Result<Self, StoreError> {
        let frame = df!(
            WeatherColumn::Date.name() => records.iter().map(|r| r.date.as_str()).collect::<Vec<_>>(),
            WeatherColumn::Place.name() => records.iter().map(|r| r.place.as_str()).collect::<Vec<_>>(),
            WeatherColumn::Condition.name() => records.iter().map(|r| r.condition.as_str()).collect::<Vec<_>>(),
            WeatherColumn::TempMax.name() => records.iter().map(|r| r.temp_max).collect::<Vec<i64>>(),
            WeatherColumn::TempMin.name() => records.iter().map(|r| r.temp_min).collect::<Vec<i64>>(),
        )?;
        Ok(Self::new(frame.lazy()))
    }

    /// Loads observations from a CSV file with a `date,place,condition,temp_max,temp_min`
    /// header (columns may appear in any order; extra columns are ignored).
    ///
    /// Every row must carry a valid `YYYY/MM/DD` date, non-blank place and condition,
    /// and temperatures in `-999..=999`. By default the first offending row fails the
    /// load; with `.skip_invalid(true)` such rows are logged and skipped instead.
    /// Structural problems with the file itself always fail.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use weather_search::WeatherFrame;
    ///
    /// # fn main() -> Result<(), weather_search::StoreError> {
    /// let store = WeatherFrame::from_csv()
    ///     .path("data/weather.csv")
    ///     .skip_invalid(true)
    ///     .call()?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = from_csv)]
    #[doc(hidden)]
    pub fn load_csv(
        #[builder(into)] path: PathBuf,
        #[builder(default)] skip_invalid: bool,
    ) -> Result<Self, StoreError> {
        let mut reader = CsvReader::new(path);
        reader.open()?;

        let mut records = Vec::new();
        let mut skipped = 0usize;
        while let Some(row) = reader.read_line()? {
            match record_from_row(&row) {
                Ok(record) => records.push(record),
                Err(e) if skip_invalid => {
                    warn!("Skipping row of {:?}: {}", reader.path(), e);
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        info!(
            "Loaded {} weather records from {:?} ({} skipped)",
            records.len(),
            reader.path(),
            skipped
        );
        reader.close();

        Self::from_records(&records)
    }

    /// Runs a compiled query and returns the matching records in store order.
    ///
    /// # Errors
    ///
    /// * [`StoreError::UnboundPlaceholder`] if a clause references a placeholder missing
    ///   from the bindings.
    /// * [`StoreError::InvalidBinding`] if a value cannot be compared with its column, such
    ///   as a non-numeric temperature. Validating the filter first rules this out.
    /// * [`StoreError::Polars`] if the frame cannot be evaluated.
    pub fn execute(&self, query: &CompiledQuery) -> Result<Vec<WeatherRecord>, StoreError> {
        let mut frame = self.frame.clone();
        for clause in query.clauses() {
            frame = frame.filter(clause_expr(clause, &query.bindings)?);
        }
        let records = records_from_frame(&frame.collect()?)?;
        debug!(
            "Query '{}' matched {} record(s)",
            query.fragment,
            records.len()
        );
        Ok(records)
    }

    /// Every stored record.
    pub fn records(&self) -> Result<Vec<WeatherRecord>, StoreError> {
        self.execute(&compile_list_all())
    }
}

fn bound<'a>(
    placeholder: &str,
    bindings: &'a BTreeMap<String, String>,
) -> Result<&'a str, StoreError> {
    bindings
        .get(placeholder)
        .map(String::as_str)
        .ok_or_else(|| StoreError::UnboundPlaceholder(placeholder.to_string()))
}

fn literal(
    column: WeatherColumn,
    placeholder: &str,
    bindings: &BTreeMap<String, String>,
) -> Result<Expr, StoreError> {
    let raw = bound(placeholder, bindings)?;
    if !column.is_numeric() {
        return Ok(lit(raw.to_string()));
    }
    raw.parse::<i64>()
        .map(lit)
        .map_err(|_| StoreError::InvalidBinding {
            placeholder: placeholder.to_string(),
            value: raw.to_string(),
            column,
        })
}

fn clause_expr(clause: &Clause, bindings: &BTreeMap<String, String>) -> Result<Expr, StoreError> {
    match clause {
        Clause::Compare {
            column,
            op,
            placeholder,
        } => {
            let value = literal(*column, placeholder, bindings)?;
            let target = col(column.name());
            Ok(match op {
                CompareOp::Eq => target.eq(value),
                CompareOp::GtEq => target.gt_eq(value),
                CompareOp::LtEq => target.lt_eq(value),
            })
        }
        Clause::AnyOf {
            column,
            placeholders,
        } => {
            let mut alternatives = placeholders
                .iter()
                .map(|p| Ok(col(column.name()).eq(literal(*column, p, bindings)?)))
                .collect::<Result<Vec<Expr>, StoreError>>()?
                .into_iter();
            let first = alternatives.next().unwrap_or_else(|| lit(true));
            Ok(alternatives.fold(first, |acc, expr| acc.or(expr)))
        }
        Clause::EndsWith {
            column,
            placeholder,
        } => {
            let pattern = bound(placeholder, bindings)?;
            let suffix = pattern
                .strip_prefix('%')
                .ok_or_else(|| StoreError::InvalidBinding {
                    placeholder: placeholder.clone(),
                    value: pattern.to_string(),
                    column: *column,
                })?;
            Ok(col(column.name()).str().ends_with(lit(suffix.to_string())))
        }
    }
}

fn records_from_frame(df: &DataFrame) -> Result<Vec<WeatherRecord>, StoreError> {
    let dates = df.column(WeatherColumn::Date.name())?.str()?;
    let places = df.column(WeatherColumn::Place.name())?.str()?;
    let conditions = df.column(WeatherColumn::Condition.name())?.str()?;
    let temp_maxes = df.column(WeatherColumn::TempMax.name())?.i64()?;
    let temp_mins = df.column(WeatherColumn::TempMin.name())?.i64()?;

    fn non_null<T>(value: Option<T>, row: usize, column: WeatherColumn) -> Result<T, StoreError> {
        value.ok_or(StoreError::NullInResult { row, column })
    }

    (0..df.height())
        .map(|i| {
            Ok(WeatherRecord {
                date: non_null(dates.get(i), i, WeatherColumn::Date)?.to_string(),
                place: non_null(places.get(i), i, WeatherColumn::Place)?.to_string(),
                condition: non_null(conditions.get(i), i, WeatherColumn::Condition)?.to_string(),
                temp_max: non_null(temp_maxes.get(i), i, WeatherColumn::TempMax)?,
                temp_min: non_null(temp_mins.get(i), i, WeatherColumn::TempMin)?,
            })
        })
        .collect()
}

fn record_from_row(row: &CsvRow) -> Result<WeatherRecord, StoreError> {
    let line = row.line();
    let cell = |column: WeatherColumn| {
        row.get(column.name())
            .ok_or(StoreError::MissingValue { line, column })
    };
    let invalid = |column: WeatherColumn, value: &str| StoreError::InvalidRow {
        line,
        column,
        value: value.to_string(),
    };
    let temperature = |column: WeatherColumn| {
        let raw = cell(column)?;
        match parse_temperature(raw) {
            Temperature::Valid(value) => Ok(value),
            _ => Err(invalid(column, raw)),
        }
    };

    let date = cell(WeatherColumn::Date)?;
    if !is_valid_date(date) {
        return Err(invalid(WeatherColumn::Date, date));
    }
    Ok(WeatherRecord {
        date: date.to_string(),
        place: cell(WeatherColumn::Place)?.to_string(),
        condition: cell(WeatherColumn::Condition)?.to_string(),
        temp_max: temperature(WeatherColumn::TempMax)?,
        temp_min: temperature(WeatherColumn::TempMin)?,
    })
}
