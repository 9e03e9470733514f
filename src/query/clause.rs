//! Structured clauses of a compiled query and their SQL rendering.

use std::fmt;

/// Columns of the observation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherColumn {
    Date,
    Place,
    Condition,
    TempMax,
    TempMin,
}

impl WeatherColumn {
    pub fn name(&self) -> &'static str {
        match self {
            WeatherColumn::Date => "date",
            WeatherColumn::Place => "place",
            WeatherColumn::Condition => "condition",
            WeatherColumn::TempMax => "temp_max",
            WeatherColumn::TempMin => "temp_min",
        }
    }

    /// Numeric columns compare as integers; the rest compare as text.
    pub fn is_numeric(&self) -> bool {
        matches!(self, WeatherColumn::TempMax | WeatherColumn::TempMin)
    }
}

impl fmt::Display for WeatherColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    GtEq,
    LtEq,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::GtEq => ">=",
            CompareOp::LtEq => "<=",
        }
    }
}

/// One AND-joined entry of a compiled query. Placeholders are stored without the
/// leading `:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// `column <op> :placeholder`
    Compare {
        column: WeatherColumn,
        op: CompareOp,
        placeholder: String,
    },
    /// Equality against any of the placeholders, rendered as a parenthesized OR group
    /// when there is more than one.
    AnyOf {
        column: WeatherColumn,
        placeholders: Vec<String>,
    },
    /// `column LIKE :placeholder`, where the bound pattern is `%` followed by a suffix.
    EndsWith {
        column: WeatherColumn,
        placeholder: String,
    },
}

impl Clause {
    pub fn column(&self) -> WeatherColumn {
        match self {
            Clause::Compare { column, .. }
            | Clause::AnyOf { column, .. }
            | Clause::EndsWith { column, .. } => *column,
        }
    }

    pub fn placeholders(&self) -> Vec<&str> {
        match self {
            Clause::Compare { placeholder, .. } | Clause::EndsWith { placeholder, .. } => {
                vec![placeholder.as_str()]
            }
            Clause::AnyOf { placeholders, .. } => {
                placeholders.iter().map(String::as_str).collect()
            }
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Compare {
                column,
                op,
                placeholder,
            } => write!(f, "{} {} :{}", column, op.symbol(), placeholder),
            Clause::AnyOf {
                column,
                placeholders,
            } => match placeholders.as_slice() {
                [single] => write!(f, "{} = :{}", column, single),
                many => {
                    let alternatives: Vec<String> = many
                        .iter()
                        .map(|p| format!("{} = :{}", column, p))
                        .collect();
                    write!(f, "({})", alternatives.join(" OR "))
                }
            },
            Clause::EndsWith {
                column,
                placeholder,
            } => write!(f, "{} LIKE :{}", column, placeholder),
        }
    }
}
