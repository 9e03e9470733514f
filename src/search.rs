//! The search service: validates filter records, compiles them and runs them against a
//! [`WeatherFrame`].

use bon::bon;
use log::{info, warn};
use std::path::PathBuf;

use crate::error::WeatherSearchError;
use crate::query::compiler::{
    compile_filter, compile_list_all, compile_place_filter, compile_range_filter,
    compile_statistics_query, CompiledQuery,
};
use crate::statistics::{summarize, StatisticsReport};
use crate::store::weather_frame::WeatherFrame;
use crate::types::filter_record::{FilterRecord, RangeFilterRecord, StatisticsFilter};
use crate::types::weather_record::WeatherRecord;
use crate::validation::error::ValidationError;
use crate::validation::filter::{validate_filter, validate_range_filter, validate_range_order};
use crate::validation::statistics::validate_statistics_filter;

/// Entry point for searching weather observations.
///
/// Every search except [`WeatherSearch::quick_search`] validates its filter first and
/// returns [`WeatherSearchError::Validation`] with the complete error list when the
/// filter is rejected; nothing is executed in that case.
///
/// # Examples
///
/// ```rust
/// use weather_search::{FilterRecord, WeatherFrame, WeatherRecord, WeatherSearch};
///
/// # fn main() -> Result<(), weather_search::WeatherSearchError> {
/// let search = WeatherSearch::new(WeatherFrame::from_records(&[
///     WeatherRecord::new("2015/01/01", "Gunma", "sunny", 7, -3),
///     WeatherRecord::new("2015/01/02", "Tokyo", "cloudy", 11, 6),
/// ])?);
///
/// let found = search.search(&FilterRecord::builder().place("Tokyo").build())?;
/// assert_eq!(found.len(), 1);
///
/// let rejected = search.search(&FilterRecord::builder().temp_max("hot").build());
/// assert_eq!(
///     rejected.unwrap_err().messages(),
///     vec!["Max temperature must be a number."]
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct WeatherSearch {
    frame: WeatherFrame,
}

#[bon]
impl WeatherSearch {
    pub fn new(frame: WeatherFrame) -> Self {
        Self { frame }
    }

    /// Creates a search service over the observations in a CSV file.
    ///
    /// See [`WeatherFrame::from_csv`] for the expected layout and `skip_invalid`.
    ///
    /// ```no_run
    /// use weather_search::WeatherSearch;
    ///
    /// # fn main() -> Result<(), weather_search::WeatherSearchError> {
    /// let search = WeatherSearch::from_csv().path("data/weather.csv").call()?;
    /// println!("{} records", search.list_all()?.len());
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = from_csv)]
    #[doc(hidden)]
    pub fn load_csv(
        #[builder(into)] path: PathBuf,
        #[builder(default)] skip_invalid: bool,
    ) -> Result<Self, WeatherSearchError> {
        let frame = WeatherFrame::from_csv()
            .path(path)
            .skip_invalid(skip_invalid)
            .call()?;
        Ok(Self::new(frame))
    }

    /// Every stored record.
    pub fn list_all(&self) -> Result<Vec<WeatherRecord>, WeatherSearchError> {
        self.run(&compile_list_all())
    }

    /// Matches on the place only. The filter is not validated; other fields are ignored.
    pub fn quick_search(
        &self,
        filter: &FilterRecord,
    ) -> Result<Vec<WeatherRecord>, WeatherSearchError> {
        self.run(&compile_place_filter(filter))
    }

    /// Exact-match search on every supplied field.
    pub fn search(&self, filter: &FilterRecord) -> Result<Vec<WeatherRecord>, WeatherSearchError> {
        reject_if_invalid("search", validate_filter(filter))?;
        self.run(&compile_filter(filter))
    }

    /// Range search. Bound ordering is only checked once every field is well formed.
    pub fn range_search(
        &self,
        filter: &RangeFilterRecord,
    ) -> Result<Vec<WeatherRecord>, WeatherSearchError> {
        reject_if_invalid("range search", validate_range_filter(filter))?;
        reject_if_invalid("range search", validate_range_order(filter))?;
        self.run(&compile_range_filter(filter))
    }

    /// Statistics for one month/day at one place across every stored year.
    pub fn statistics(
        &self,
        filter: &StatisticsFilter,
    ) -> Result<StatisticsReport, WeatherSearchError> {
        reject_if_invalid("statistics", validate_statistics_filter(filter))?;
        let records = self.run(&compile_statistics_query(filter))?;
        Ok(summarize(filter, &records))
    }

    fn run(&self, query: &CompiledQuery) -> Result<Vec<WeatherRecord>, WeatherSearchError> {
        let records = self.frame.execute(query)?;
        info!("Search returned {} record(s)", records.len());
        Ok(records)
    }
}

fn reject_if_invalid(
    operation: &str,
    errors: Vec<ValidationError>,
) -> Result<(), WeatherSearchError> {
    if errors.is_empty() {
        return Ok(());
    }
    warn!("Rejected {} filter: {:?}", operation, errors);
    Err(WeatherSearchError::Validation(errors))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> WeatherSearch {
        WeatherSearch::new(
            WeatherFrame::from_records(&[
                WeatherRecord::new("2015/01/01", "Gunma", "sunny", 7, -3),
                WeatherRecord::new("2015/01/02", "Tokyo", "cloudy", 11, 6),
                WeatherRecord::new("2015/01/03", "Osaka", "rainy", 9, 2),
                WeatherRecord::new("2015/01/04", "Tokyo", "snowy", -2, -9),
                WeatherRecord::new("2016/01/02", "Tokyo", "sunny", 10, 1),
            ])
            .unwrap(),
        )
    }

    fn validation_errors(result: Result<Vec<WeatherRecord>, WeatherSearchError>) -> Vec<ValidationError> {
        match result {
            Err(WeatherSearchError::Validation(errors)) => errors,
            other => panic!("expected a validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_list_all() -> Result<(), WeatherSearchError> {
        assert_eq!(service().list_all()?.len(), 5);
        Ok(())
    }

    #[test]
    fn test_quick_search_ignores_other_fields() -> Result<(), WeatherSearchError> {
        let filter = FilterRecord::builder()
            .place("Tokyo")
            .temp_max("not a number")
            .build();
        assert_eq!(service().quick_search(&filter)?.len(), 3);
        Ok(())
    }

    #[test]
    fn test_search_unconstrained_returns_everything() -> Result<(), WeatherSearchError> {
        assert_eq!(service().search(&FilterRecord::default())?.len(), 5);
        Ok(())
    }

    #[test]
    fn test_search_rejects_invalid_filter() {
        let filter = FilterRecord::builder()
            .date("2015/13/01")
            .place("Kagoshima-shi")
            .build();
        assert_eq!(
            validation_errors(service().search(&filter)),
            vec![ValidationError::DateFormat, ValidationError::PlaceTooLong]
        );
    }

    #[test]
    fn test_range_search() -> Result<(), WeatherSearchError> {
        let filter = RangeFilterRecord::builder()
            .date_from("2015/01/02")
            .place("Tokyo")
            .build();
        let found = service().range_search(&filter)?;
        let dates: Vec<&str> = found.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2015/01/02", "2015/01/04", "2016/01/02"]);
        Ok(())
    }

    #[test]
    fn test_range_order_checked_only_when_fields_are_clean() {
        let reversed = RangeFilterRecord::builder()
            .date_from("2015/12/31")
            .date_to("2015/01/01")
            .build();
        assert_eq!(
            validation_errors(service().range_search(&reversed)),
            vec![ValidationError::DateRangeOrder]
        );

        let malformed = RangeFilterRecord::builder()
            .date_from("2015/12/31")
            .date_to("2015/01/01")
            .temp_max_from("x")
            .build();
        assert_eq!(
            validation_errors(service().range_search(&malformed)),
            vec![ValidationError::NotNumeric(
                crate::validation::error::TemperatureField::Max
            )]
        );
    }

    #[test]
    fn test_statistics() -> Result<(), WeatherSearchError> {
        let filter = StatisticsFilter::builder().date("01/02").place("Tokyo").build();
        let report = service().statistics(&filter)?;
        assert_eq!(report.samples, 2);
        assert_eq!(report.sunny_percent, 50);
        assert_eq!(report.cloudy_percent, 50);
        assert_eq!(report.temp_max_average, Some(10));
        assert_eq!(report.temp_min_average, Some(3));
        Ok(())
    }

    #[test]
    fn test_statistics_requires_date_and_place() {
        let filter = StatisticsFilter::builder().place("Tokyo").build();
        match service().statistics(&filter) {
            Err(e) => assert_eq!(
                e.messages(),
                vec!["Date and place must both be entered."]
            ),
            Ok(report) => panic!("unexpected report {report:?}"),
        }
    }
}
