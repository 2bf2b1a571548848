//! Accuracy: fraction of predictions equal to the ground truth.

use trellis_core::expr::{AggExpr, Expr};
use trellis_core::schema::DataType;

use crate::batch::Batch;
use crate::error::MetricError;
use crate::lift::lift_batch;
use crate::monoid::{Monoid, MonoidMaker};

/// Partial aggregate: match count and row count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccuracyData {
    pub matches: f64,
    pub total: f64,
}

impl Monoid for AccuracyData {
    type Output = f64;

    fn combine(&self, other: &Self) -> Self {
        Self {
            matches: self.matches + other.matches,
            total: self.total + other.total,
        }
    }

    fn result(&self) -> f64 {
        // 0/0 is IEEE NaN, intentionally unguarded.
        self.matches / self.total
    }
}

#[derive(Debug)]
pub struct Accuracy {
    map_columns: Vec<(String, Expr)>,
    agg_columns: Vec<(String, AggExpr)>,
}

impl Accuracy {
    /// Build the fixed aggregation suffix once; it is reused verbatim for
    /// every batch.
    pub fn new() -> Self {
        let map_columns = vec![(
            "match".to_string(),
            Expr::cast(
                DataType::Int64,
                Expr::eq(Expr::col("y_true"), Expr::col("y_pred")),
            ),
        )];
        let agg_columns = vec![
            ("match".to_string(), AggExpr::Sum(Expr::col("match"))),
            ("total".to_string(), AggExpr::Count(Expr::col("match"))),
        ];
        Self {
            map_columns,
            agg_columns,
        }
    }
}

impl Default for Accuracy {
    fn default() -> Self {
        Self::new()
    }
}

impl MonoidMaker for Accuracy {
    type M = AccuracyData;

    fn to_monoid(&self, batch: &Batch) -> Result<AccuracyData, MetricError> {
        let row = lift_batch(batch, &self.map_columns, &self.agg_columns)?;
        match row.as_slice() {
            [matches, total] => Ok(AccuracyData {
                matches: *matches,
                total: *total,
            }),
            other => Err(MetricError::Batch(format!(
                "accuracy aggregate returned {} columns, expected 2",
                other.len()
            ))),
        }
    }
}
