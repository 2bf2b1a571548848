//! Declarative relational plan for the tabular aggregation backend.
//!
//! A `TablePlan` is built once (the metric makers cache their aggregation
//! suffix at construction) and executed against one or more source-tagged
//! input tables.

use serde::{Deserialize, Serialize};

use crate::expr::{AggExpr, Expr};

/// Relational plan nodes (sources → transforms → single-row aggregate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TablePlan {
    /// Select the input table tagged with `source`.
    Scan { source: String },
    /// Project to exactly the listed `(name, expr)` columns, row-wise.
    Map {
        input: Box<TablePlan>,
        columns: Vec<(String, Expr)>,
    },
    /// Column-wise concatenation of aligned inputs.
    ConcatCols { inputs: Vec<TablePlan> },
    /// Group-free aggregation producing exactly one row.
    Aggregate {
        input: Box<TablePlan>,
        columns: Vec<(String, AggExpr)>,
    },
}

impl TablePlan {
    pub fn scan(source: impl Into<String>) -> Self {
        TablePlan::Scan {
            source: source.into(),
        }
    }

    pub fn map(self, columns: Vec<(String, Expr)>) -> Self {
        TablePlan::Map {
            input: Box::new(self),
            columns,
        }
    }

    pub fn aggregate(self, columns: Vec<(String, AggExpr)>) -> Self {
        TablePlan::Aggregate {
            input: Box::new(self),
            columns,
        }
    }

    pub fn concat(inputs: Vec<TablePlan>) -> Self {
        TablePlan::ConcatCols { inputs }
    }

    /// Returns the number of source tables this node consumes.
    pub fn inputs(&self) -> usize {
        use TablePlan::*;
        match self {
            Scan { .. } => 0,
            Map { .. } | Aggregate { .. } => 1,
            ConcatCols { inputs } => inputs.len(),
        }
    }
}
