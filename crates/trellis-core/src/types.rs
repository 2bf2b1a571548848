//! Lightweight tabular values used by the metric pipelines.
//!
//! These are deliberately small in-memory placeholders: the backend
//! contract (scan/map/concat/aggregate) is what matters, and an
//! out-of-core engine could substitute its own representation behind the
//! same plan AST.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::DataType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    Str(String),
}

impl Scalar {
    pub fn data_type(&self) -> DataType {
        match self {
            Scalar::Null => DataType::Utf8,
            Scalar::Bool(_) => DataType::Boolean,
            Scalar::I64(_) => DataType::Int64,
            Scalar::F64(_) => DataType::Float64,
            Scalar::Str(_) => DataType::Utf8,
        }
    }

    /// Numeric view used when extracting aggregate rows.
    pub fn as_f64(&self) -> Result<f64> {
        match self {
            Scalar::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Scalar::I64(i) => Ok(*i as f64),
            Scalar::F64(f) => Ok(*f),
            other => Err(Error::Schema(format!("not a numeric scalar: {other:?}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Scalar>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Scalar>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A source-tagged batch of columns. The tag is how `Scan { source }`
/// selects among multiple pipeline inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Concatenate two tables side-by-side. Row counts must agree and
    /// column names must not collide; metric plans control both.
    pub fn concat_columns(left: &Table, right: &Table) -> Result<Table> {
        if left.num_rows() != right.num_rows() {
            return Err(Error::Schema(format!(
                "cannot concat tables with different row counts: {} vs {}",
                left.num_rows(),
                right.num_rows()
            )));
        }
        let mut columns = Vec::with_capacity(left.columns.len() + right.columns.len());
        columns.extend(left.columns.iter().cloned());
        for col in &right.columns {
            if left.columns.iter().any(|c| c.name == col.name) {
                return Err(Error::Schema(format!(
                    "duplicate column '{}' in concat",
                    col.name
                )));
            }
            columns.push(col.clone());
        }
        Ok(Table {
            name: String::new(),
            columns,
        })
    }

    /// Extract a single-row result (e.g., a group-free aggregate) as a
    /// plain numeric row, in column order.
    pub fn to_f64_row(&self) -> Result<Vec<f64>> {
        if self.num_rows() != 1 {
            return Err(Error::Schema(format!(
                "expected a single-row table, got {} rows",
                self.num_rows()
            )));
        }
        self.columns.iter().map(|c| c.values[0].as_f64()).collect()
    }
}

/// A labeled one-dimensional sequence: a named column plus an explicit
/// row index. Ground-truth and predicted labels arrive in this form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub index: Vec<i64>,
    pub values: Vec<Scalar>,
}

impl Series {
    /// A series with the default positional index `0..len`.
    pub fn new(name: impl Into<String>, values: Vec<Scalar>) -> Self {
        let index = (0..values.len() as i64).collect();
        Self {
            name: name.into(),
            index,
            values,
        }
    }

    pub fn with_index(name: impl Into<String>, index: Vec<i64>, values: Vec<Scalar>) -> Self {
        debug_assert_eq!(index.len(), values.len());
        Self {
            name: name.into(),
            index,
            values,
        }
    }

    pub fn from_f64(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(name, values.into_iter().map(Scalar::F64).collect())
    }

    pub fn from_i64(name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        Self::new(name, values.into_iter().map(Scalar::I64).collect())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Lift into a single-column table tagged with `source`.
    pub fn to_table(&self, source: impl Into<String>) -> Table {
        Table::new(
            source,
            vec![Column::new(self.name.clone(), self.values.clone())],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_rejects_mismatched_row_counts() {
        let a = Table::new("a", vec![Column::new("x", vec![Scalar::I64(1)])]);
        let b = Table::new(
            "b",
            vec![Column::new("y", vec![Scalar::I64(1), Scalar::I64(2)])],
        );
        assert!(Table::concat_columns(&a, &b).is_err());
    }

    #[test]
    fn series_default_index_is_positional() {
        let s = Series::from_i64("y", [5, 6, 7]);
        assert_eq!(s.index, vec![0, 1, 2]);
        let t = s.to_table("y_true");
        assert_eq!(t.name, "y_true");
        assert_eq!(t.num_rows(), 3);
        assert_eq!(t.columns[0].name, "y");
    }

    #[test]
    fn single_row_extraction() {
        let t = Table::new(
            "agg",
            vec![
                Column::new("match", vec![Scalar::I64(4)]),
                Column::new("total", vec![Scalar::I64(5)]),
            ],
        );
        assert_eq!(t.to_f64_row().unwrap(), vec![4.0, 5.0]);
    }
}
