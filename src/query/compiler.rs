//! Compiles filter records into a parameterized query over the observation table.
//!
//! Every compiler walks the record's fields in declaration order and appends one
//! clause per supplied field. The first clause is introduced with `WHERE`, the rest
//! with `AND`; an empty clause list leaves the bare base scan, which matches every
//! record. Bindings hold exactly the placeholders the fragment references.
//!
//! Compilation never fails. Validate the record first: values are bound verbatim and
//! a malformed one only surfaces when the query is executed.

use log::debug;
use std::collections::BTreeMap;

use crate::query::clause::{Clause, CompareOp, WeatherColumn};
use crate::types::condition_set::ConditionSet;
use crate::types::filter_record::{present, FilterRecord, RangeFilterRecord, StatisticsFilter};

/// The unconstrained scan every query starts from.
pub const BASE_SCAN: &str = "SELECT * FROM weather";

/// A query fragment, its bound values and the clauses it was rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    /// SQL text with named `:placeholder` slots.
    pub fragment: String,
    /// Placeholder name (without `:`) to literal value.
    pub bindings: BTreeMap<String, String>,
    clauses: Vec<Clause>,
}

impl CompiledQuery {
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// `true` when the query is the bare base scan.
    pub fn is_unfiltered(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Accumulates clauses in emission order.
#[derive(Debug, Default)]
struct QueryBuilder {
    clauses: Vec<Clause>,
    bindings: BTreeMap<String, String>,
}

impl QueryBuilder {
    fn new() -> Self {
        Self::default()
    }

    fn compare(
        mut self,
        column: WeatherColumn,
        op: CompareOp,
        placeholder: &str,
        value: Option<&str>,
    ) -> Self {
        if let Some(value) = value {
            self.bindings.insert(placeholder.to_string(), value.to_string());
            self.clauses.push(Clause::Compare {
                column,
                op,
                placeholder: placeholder.to_string(),
            });
        }
        self
    }

    fn equals(self, column: WeatherColumn, placeholder: &str, value: Option<&str>) -> Self {
        self.compare(column, CompareOp::Eq, placeholder, value)
    }

    /// Binds the i-th token to `placeholder`, `placeholder2`, `placeholder3`.
    fn any_of(mut self, column: WeatherColumn, placeholder: &str, set: &ConditionSet) -> Self {
        let tokens = set.tokens();
        if tokens.is_empty() {
            return self;
        }
        let mut placeholders = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.into_iter().enumerate() {
            let name = match i {
                0 => placeholder.to_string(),
                n => format!("{placeholder}{}", n + 1),
            };
            self.bindings.insert(name.clone(), token.to_string());
            placeholders.push(name);
        }
        self.clauses.push(Clause::AnyOf {
            column,
            placeholders,
        });
        self
    }

    fn ends_with(mut self, column: WeatherColumn, placeholder: &str, suffix: Option<&str>) -> Self {
        if let Some(suffix) = suffix {
            self.bindings
                .insert(placeholder.to_string(), format!("%{suffix}"));
            self.clauses.push(Clause::EndsWith {
                column,
                placeholder: placeholder.to_string(),
            });
        }
        self
    }

    fn build(self) -> CompiledQuery {
        let mut fragment = String::from(BASE_SCAN);
        for (i, clause) in self.clauses.iter().enumerate() {
            let keyword = if i == 0 { "WHERE" } else { "AND" };
            fragment.push_str(&format!(" {keyword} {clause}"));
        }
        debug!(
            "Compiled query '{}' with {} binding(s)",
            fragment,
            self.bindings.len()
        );
        CompiledQuery {
            fragment,
            bindings: self.bindings,
            clauses: self.clauses,
        }
    }
}

/// The bare base scan: every record.
pub fn compile_list_all() -> CompiledQuery {
    QueryBuilder::new().build()
}

/// Compiles the simple search: one equality clause per supplied field.
///
/// # Examples
///
/// ```rust
/// use weather_search::{compile_filter, FilterRecord};
///
/// let filter = FilterRecord::builder().place("Tokyo").temp_max("11").build();
/// let query = compile_filter(&filter);
/// assert_eq!(
///     query.fragment,
///     "SELECT * FROM weather WHERE place = :place AND temp_max = :tempMax"
/// );
/// assert_eq!(query.bindings["tempMax"], "11");
/// ```
pub fn compile_filter(filter: &FilterRecord) -> CompiledQuery {
    QueryBuilder::new()
        .equals(WeatherColumn::Date, "date", present(&filter.date))
        .equals(WeatherColumn::Place, "place", present(&filter.place))
        .equals(WeatherColumn::Condition, "condition", present(&filter.condition))
        .equals(WeatherColumn::TempMax, "tempMax", present(&filter.temp_max))
        .equals(WeatherColumn::TempMin, "tempMin", present(&filter.temp_min))
        .build()
}

/// Compiles the quick search, which only looks at the place.
pub fn compile_place_filter(filter: &FilterRecord) -> CompiledQuery {
    QueryBuilder::new()
        .equals(WeatherColumn::Place, "place", present(&filter.place))
        .build()
}

/// Compiles the extended search.
///
/// Each range half is its own clause (`>=` for `From`, `<=` for `To`). The category set
/// contributes one OR group of up to three equalities; four or more categories
/// contribute nothing.
///
/// # Examples
///
/// ```rust
/// use weather_search::{compile_range_filter, RangeFilterRecord};
///
/// let filter = RangeFilterRecord::builder()
///     .place("Tokyo")
///     .condition_set("sunny,cloudy")
///     .build();
/// let query = compile_range_filter(&filter);
/// assert_eq!(
///     query.fragment,
///     "SELECT * FROM weather WHERE place = :place \
///      AND (condition = :condition OR condition = :condition2)"
/// );
/// assert_eq!(query.bindings.len(), 3);
/// ```
pub fn compile_range_filter(filter: &RangeFilterRecord) -> CompiledQuery {
    QueryBuilder::new()
        .compare(
            WeatherColumn::Date,
            CompareOp::GtEq,
            "dateFrom",
            present(&filter.date_from),
        )
        .compare(
            WeatherColumn::Date,
            CompareOp::LtEq,
            "dateTo",
            present(&filter.date_to),
        )
        .equals(WeatherColumn::Place, "place", present(&filter.place))
        .any_of(WeatherColumn::Condition, "condition", &filter.conditions())
        .compare(
            WeatherColumn::TempMax,
            CompareOp::GtEq,
            "tempMaxFrom",
            present(&filter.temp_max_from),
        )
        .compare(
            WeatherColumn::TempMax,
            CompareOp::LtEq,
            "tempMaxTo",
            present(&filter.temp_max_to),
        )
        .compare(
            WeatherColumn::TempMin,
            CompareOp::GtEq,
            "tempMinFrom",
            present(&filter.temp_min_from),
        )
        .compare(
            WeatherColumn::TempMin,
            CompareOp::LtEq,
            "tempMinTo",
            present(&filter.temp_min_to),
        )
        .build()
}

/// Compiles the statistics lookup: every year's record for one month/day at one place.
pub fn compile_statistics_query(filter: &StatisticsFilter) -> CompiledQuery {
    QueryBuilder::new()
        .ends_with(WeatherColumn::Date, "monthDay", present(&filter.date))
        .equals(WeatherColumn::Place, "place", present(&filter.place))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding_keys(query: &CompiledQuery) -> Vec<&str> {
        query.bindings.keys().map(String::as_str).collect()
    }

    // every placeholder in the clauses is bound, and nothing else is
    fn assert_consistent(query: &CompiledQuery) {
        let mut referenced: Vec<&str> = query
            .clauses()
            .iter()
            .flat_map(|clause| clause.placeholders())
            .collect();
        referenced.sort_unstable();
        assert_eq!(referenced, binding_keys(query));
        for name in &referenced {
            assert!(query.fragment.contains(&format!(":{name}")), "{name}");
        }
    }

    #[test]
    fn test_empty_filters_compile_to_base_scan() {
        for query in [
            compile_filter(&FilterRecord::default()),
            compile_range_filter(&RangeFilterRecord::default()),
            compile_place_filter(&FilterRecord::default()),
            compile_statistics_query(&StatisticsFilter::default()),
            compile_list_all(),
        ] {
            assert_eq!(query.fragment, BASE_SCAN);
            assert!(query.bindings.is_empty());
            assert!(query.is_unfiltered());
        }
    }

    #[test]
    fn test_blank_strings_compile_like_absent_fields() {
        let filter = FilterRecord::builder().date("").place("").temp_min("").build();
        assert_eq!(compile_filter(&filter).fragment, BASE_SCAN);
    }

    #[test]
    fn test_simple_filter_all_fields() {
        let filter = FilterRecord::builder()
            .date("2015/01/01")
            .place("Tokyo")
            .condition("sunny")
            .temp_max("7")
            .temp_min("-3")
            .build();
        let query = compile_filter(&filter);
        assert_eq!(
            query.fragment,
            "SELECT * FROM weather WHERE date = :date AND place = :place \
             AND condition = :condition AND temp_max = :tempMax AND temp_min = :tempMin"
        );
        assert_eq!(query.bindings["date"], "2015/01/01");
        assert_eq!(query.bindings["tempMin"], "-3");
        assert_consistent(&query);
    }

    #[test]
    fn test_skipped_fields_do_not_leave_dangling_and() {
        // second and fourth declared fields only
        let filter = FilterRecord::builder().place("Tokyo").temp_max("11").build();
        let query = compile_filter(&filter);
        assert_eq!(
            query.fragment,
            "SELECT * FROM weather WHERE place = :place AND temp_max = :tempMax"
        );
        assert_eq!(query.fragment.matches("WHERE").count(), 1);
        assert_eq!(query.fragment.matches(" AND ").count(), 1);
        assert_consistent(&query);

        let last_only = compile_filter(&FilterRecord::builder().temp_min("0").build());
        assert_eq!(
            last_only.fragment,
            "SELECT * FROM weather WHERE temp_min = :tempMin"
        );
    }

    #[test]
    fn test_place_filter_ignores_other_fields() {
        let filter = FilterRecord::builder()
            .date("2015/01/01")
            .place("Gunma")
            .build();
        let query = compile_place_filter(&filter);
        assert_eq!(query.fragment, "SELECT * FROM weather WHERE place = :place");
        assert_eq!(binding_keys(&query), vec!["place"]);
    }

    #[test]
    fn test_condition_set_arity() {
        let cases = [
            ("sunny", 1),
            ("sunny,cloudy", 2),
            ("sunny,cloudy,rainy", 3),
            ("sunny,cloudy,rainy,snowy", 0),
            // assumed: five or more tokens behave like four
            ("sunny,cloudy,rainy,snowy,hail", 0),
        ];
        for (raw, expected) in cases {
            let query =
                compile_range_filter(&RangeFilterRecord::builder().condition_set(raw).build());
            assert_eq!(
                query.fragment.matches("condition = ").count(),
                expected,
                "{raw}"
            );
            let bound = query
                .bindings
                .keys()
                .filter(|k| k.starts_with("condition"))
                .count();
            assert_eq!(bound, expected, "{raw}");
            assert_consistent(&query);
        }
    }

    #[test]
    fn test_condition_placeholders_are_suffixed() {
        let filter = RangeFilterRecord::builder()
            .condition_set("rainy,snowy,sunny")
            .build();
        let query = compile_range_filter(&filter);
        assert_eq!(
            query.fragment,
            "SELECT * FROM weather WHERE (condition = :condition \
             OR condition = :condition2 OR condition = :condition3)"
        );
        assert_eq!(query.bindings["condition"], "rainy");
        assert_eq!(query.bindings["condition2"], "snowy");
        assert_eq!(query.bindings["condition3"], "sunny");
    }

    #[test]
    fn test_condition_group_joins_after_earlier_clause() {
        let filter = RangeFilterRecord::builder()
            .place("Tokyo")
            .condition_set("sunny,cloudy")
            .temp_min_to("5")
            .build();
        let query = compile_range_filter(&filter);
        assert_eq!(
            query.fragment,
            "SELECT * FROM weather WHERE place = :place \
             AND (condition = :condition OR condition = :condition2) \
             AND temp_min <= :tempMinTo"
        );
        assert_consistent(&query);
    }

    #[test]
    fn test_unrestricted_set_keeps_following_clause_first() {
        let filter = RangeFilterRecord::builder()
            .condition_set("sunny,cloudy,rainy,snowy")
            .temp_max_from("10")
            .build();
        let query = compile_range_filter(&filter);
        assert_eq!(
            query.fragment,
            "SELECT * FROM weather WHERE temp_max >= :tempMaxFrom"
        );
        assert_eq!(binding_keys(&query), vec!["tempMaxFrom"]);
    }

    #[test]
    fn test_range_filter_all_fields_in_order() {
        let filter = RangeFilterRecord::builder()
            .date_from("2015/01/01")
            .date_to("2015/01/31")
            .place("Tokyo")
            .condition_set("sunny")
            .temp_max_from("0")
            .temp_max_to("20")
            .temp_min_from("-10")
            .temp_min_to("10")
            .build();
        let query = compile_range_filter(&filter);
        assert_eq!(
            query.fragment,
            "SELECT * FROM weather WHERE date >= :dateFrom AND date <= :dateTo \
             AND place = :place AND condition = :condition \
             AND temp_max >= :tempMaxFrom AND temp_max <= :tempMaxTo \
             AND temp_min >= :tempMinFrom AND temp_min <= :tempMinTo"
        );
        assert_eq!(query.clauses().len(), 8);
        assert_consistent(&query);
    }

    #[test]
    fn test_single_range_half() {
        let query = compile_range_filter(&RangeFilterRecord::builder().date_to("2015/01/03").build());
        assert_eq!(query.fragment, "SELECT * FROM weather WHERE date <= :dateTo");
        assert_eq!(query.clauses().len(), 1);
    }

    #[test]
    fn test_statistics_query() {
        let filter = StatisticsFilter::builder().date("02/29").place("Tokyo").build();
        let query = compile_statistics_query(&filter);
        assert_eq!(
            query.fragment,
            "SELECT * FROM weather WHERE date LIKE :monthDay AND place = :place"
        );
        assert_eq!(query.bindings["monthDay"], "%02/29");
        assert_consistent(&query);
    }

    #[test]
    fn test_compilation_is_deterministic() {
        let filter = RangeFilterRecord::builder()
            .place("Osaka")
            .condition_set("snowy,rainy")
            .build();
        assert_eq!(compile_range_filter(&filter), compile_range_filter(&filter));
    }
}
