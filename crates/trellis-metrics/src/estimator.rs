//! Black-box estimator capability.

use trellis_core::types::Table;

use crate::error::MetricError;

/// A trained model that can predict labels for a feature table.
///
/// Training is out of scope here; scoring only needs `predict`. The
/// returned array takes the documented raw-prediction coercion path
/// (re-indexed to the ground-truth index).
pub trait Estimator {
    fn predict(&self, x: &Table) -> Result<Vec<f64>, MetricError>;
}
