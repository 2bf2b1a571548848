//! Shared batch-lifting: route one batch through the tabular backend and
//! extract the single-row aggregate.

use trellis_core::expr::{AggExpr, Expr};
use trellis_core::relplan::TablePlan;

use crate::batch::Batch;
use crate::error::MetricError;

/// Source tags for the two halves of a batch.
const TRUE_SOURCE: &str = "y_true";
const PRED_SOURCE: &str = "y_pred";

/// Tag both halves of the batch, project each to its canonical column
/// name, concatenate column-wise, apply the metric's cached map/aggregate
/// suffix, and return the aggregate row.
pub(crate) fn lift_batch(
    batch: &Batch,
    map_columns: &[(String, Expr)],
    agg_columns: &[(String, AggExpr)],
) -> Result<Vec<f64>, MetricError> {
    let (y_true, y_pred) = batch.aligned()?;
    let true_table = y_true.to_table(TRUE_SOURCE);
    let pred_table = y_pred.to_table(PRED_SOURCE);

    // Prefixes depend on the incoming column names, so they are rebuilt
    // per batch; the suffix is the fixed part owned by the metric.
    let prefix_true = TablePlan::scan(TRUE_SOURCE).map(vec![(
        TRUE_SOURCE.to_string(),
        Expr::col(&y_true.name),
    )]);
    let prefix_pred = TablePlan::scan(PRED_SOURCE).map(vec![(
        PRED_SOURCE.to_string(),
        Expr::col(&y_pred.name),
    )]);
    let plan = TablePlan::concat(vec![prefix_true, prefix_pred])
        .map(map_columns.to_vec())
        .aggregate(agg_columns.to_vec());

    let agg = trellis_frame::execute(&plan, &[true_table, pred_table])?;
    Ok(agg.to_f64_row()?)
}
