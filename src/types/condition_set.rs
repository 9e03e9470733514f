//! The multi-valued category filter of the extended search.

/// Largest number of categories that still narrows the search. Selecting more than
/// this means every category is accepted.
pub const MAX_CONDITION_CLAUSES: usize = 3;

/// A comma-delimited category selection, decomposed by how many distinct tokens it holds.
///
/// Tokens are trimmed, empty tokens are dropped and repeats collapse onto their first
/// occurrence. Four or more distinct tokens cover every category (or more than the store
/// knows about), so they impose no constraint and are kept only as a count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionSet {
    Empty,
    One(String),
    Two(String, String),
    Three(String, String, String),
    Unrestricted(usize),
}

impl ConditionSet {
    /// The distinct, trimmed, non-empty tokens of `raw` in first-occurrence order,
    /// however many there are.
    pub fn split(raw: &str) -> Vec<&str> {
        let mut tokens: Vec<&str> = Vec::new();
        for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }
        tokens
    }

    pub fn parse(raw: &str) -> Self {
        let tokens = Self::split(raw);
        if tokens.len() > MAX_CONDITION_CLAUSES {
            return ConditionSet::Unrestricted(tokens.len());
        }
        match tokens.as_slice() {
            [a] => ConditionSet::One(a.to_string()),
            [a, b] => ConditionSet::Two(a.to_string(), b.to_string()),
            [a, b, c] => ConditionSet::Three(a.to_string(), b.to_string(), c.to_string()),
            _ => ConditionSet::Empty,
        }
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        match self {
            ConditionSet::Empty => 0,
            ConditionSet::One(_) => 1,
            ConditionSet::Two(..) => 2,
            ConditionSet::Three(..) => 3,
            ConditionSet::Unrestricted(count) => *count,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ConditionSet::Empty)
    }

    /// The categories a record may match. Empty when the set imposes no constraint.
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            ConditionSet::Empty | ConditionSet::Unrestricted(_) => Vec::new(),
            ConditionSet::One(a) => vec![a.as_str()],
            ConditionSet::Two(a, b) => vec![a.as_str(), b.as_str()],
            ConditionSet::Three(a, b, c) => vec![a.as_str(), b.as_str(), c.as_str()],
        }
    }
}
