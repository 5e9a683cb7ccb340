//! Domain types for xtrees-io.

use std::fmt;

/// Cell tokens read as missing values, besides the empty cell.
pub const MISSING_TOKENS: &[&str] = &["NA", "N/A", "NaN", "nan", "null", "NULL"];

/// A single dataset cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A cell that parses as a floating point number.
    Numeric(f64),
    /// Any other non-missing text.
    Categorical(String),
    /// An empty cell or one of [`MISSING_TOKENS`].
    Missing,
}

impl Value {
    /// Classify a raw (already trimmed) cell.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() || MISSING_TOKENS.contains(&raw) {
            return Value::Missing;
        }
        match raw.parse::<f64>() {
            Ok(v) => Value::Numeric(v),
            Err(_) => Value::Categorical(raw.to_string()),
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Numeric(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Numeric(v) => write!(f, "{v}"),
            Value::Categorical(s) => f.write_str(s),
            Value::Missing => f.write_str("NA"),
        }
    }
}

/// A tabular dataset: header plus row-major cells.
///
/// Produced by [`DatasetReader`](crate::DatasetReader). Every row has exactly
/// one value per column, in header order.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    /// Column names in file order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, Vec<Vec<Value>>) {
        (self.columns, self.rows)
    }
}

/// Predictor cells with their column names, aligned row-wise with a
/// [`ResponseVector`].
#[derive(Debug, Clone)]
pub struct PredictorMatrix {
    pub(crate) names: Vec<String>,
    pub(crate) rows: Vec<Vec<Value>>,
}

impl PredictorMatrix {
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn n_columns(&self) -> usize {
        self.names.len()
    }
}

/// Target values, one per predictor row.
#[derive(Debug, Clone)]
pub struct ResponseVector {
    pub(crate) values: Vec<Value>,
}

impl ResponseVector {
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
