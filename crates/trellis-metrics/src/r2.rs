//! R², the coefficient of determination, in one-pass streaming form.
//!
//! The total sum of squares is recovered from (n, sum, sum_sq) alone, so
//! the four accumulator fields below are exactly what batch/distributed
//! computation needs; no second pass over the data ever happens.
//! <https://en.wikipedia.org/wiki/Coefficient_of_determination>

use trellis_core::expr::{AggExpr, Expr};

use crate::batch::Batch;
use crate::error::MetricError;
use crate::lift::lift_batch;
use crate::monoid::{Monoid, MonoidMaker};

/// Partial aggregate: count, sum of observed, sum of squared observed,
/// residual sum of squares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct R2Data {
    pub n: f64,
    pub sum: f64,
    pub sum_sq: f64,
    pub res_sum_sq: f64,
}

impl Monoid for R2Data {
    type Output = f64;

    fn combine(&self, other: &Self) -> Self {
        Self {
            n: self.n + other.n,
            sum: self.sum + other.sum,
            sum_sq: self.sum_sq + other.sum_sq,
            res_sum_sq: self.res_sum_sq + other.res_sum_sq,
        }
    }

    fn result(&self) -> f64 {
        // Zero total sum of squares (constant observations) divides to
        // IEEE infinity/NaN, intentionally unguarded.
        let ss_tot = self.sum_sq - self.sum * self.sum / self.n;
        1.0 - self.res_sum_sq / ss_tot
    }
}

#[derive(Debug)]
pub struct R2 {
    map_columns: Vec<(String, Expr)>,
    agg_columns: Vec<(String, AggExpr)>,
}

impl R2 {
    pub fn new() -> Self {
        let map_columns = vec![
            // observed and predicted values
            ("y".to_string(), Expr::col("y_true")),
            ("f".to_string(), Expr::col("y_pred")),
            // squares of observed
            (
                "y2".to_string(),
                Expr::mul(Expr::col("y_true"), Expr::col("y_true")),
            ),
            // squared residuals
            (
                "e2".to_string(),
                Expr::mul(
                    Expr::sub(Expr::col("y_true"), Expr::col("y_pred")),
                    Expr::sub(Expr::col("y_true"), Expr::col("y_pred")),
                ),
            ),
        ];
        let agg_columns = vec![
            ("n".to_string(), AggExpr::Count(Expr::col("y"))),
            ("sum".to_string(), AggExpr::Sum(Expr::col("y"))),
            ("sum_sq".to_string(), AggExpr::Sum(Expr::col("y2"))),
            ("res_sum_sq".to_string(), AggExpr::Sum(Expr::col("e2"))),
        ];
        Self {
            map_columns,
            agg_columns,
        }
    }
}

impl Default for R2 {
    fn default() -> Self {
        Self::new()
    }
}

impl MonoidMaker for R2 {
    type M = R2Data;

    fn to_monoid(&self, batch: &Batch) -> Result<R2Data, MetricError> {
        let row = lift_batch(batch, &self.map_columns, &self.agg_columns)?;
        match row.as_slice() {
            [n, sum, sum_sq, res_sum_sq] => Ok(R2Data {
                n: *n,
                sum: *sum,
                sum_sq: *sum_sq,
                res_sum_sq: *res_sum_sq,
            }),
            other => Err(MetricError::Batch(format!(
                "r2 aggregate returned {} columns, expected 4",
                other.len()
            ))),
        }
    }
}
