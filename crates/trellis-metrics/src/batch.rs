//! One chunk of paired ground-truth/predicted labels.

use trellis_core::types::{Scalar, Series};

use crate::error::MetricError;

/// Default column name for predictions coerced from a raw array.
const Y_PRED: &str = "y_pred";

/// The prediction half of a batch.
///
/// Estimators typically return a raw unlabeled numeric array; that is the
/// one permitted coercion, and it is re-indexed to the ground-truth index
/// under the default name before use. Everything else must arrive as a
/// labeled series whose index already matches.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicted {
    Series(Series),
    Array(Vec<f64>),
}

impl From<Series> for Predicted {
    fn from(s: Series) -> Self {
        Predicted::Series(s)
    }
}

impl From<Vec<f64>> for Predicted {
    fn from(v: Vec<f64>) -> Self {
        Predicted::Array(v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub y_true: Series,
    pub y_pred: Predicted,
}

impl Batch {
    pub fn new(y_true: Series, y_pred: impl Into<Predicted>) -> Self {
        Self {
            y_true,
            y_pred: y_pred.into(),
        }
    }

    /// Resolve the prediction half against the ground-truth index and
    /// return both series, checking the alignment preconditions.
    pub(crate) fn aligned(&self) -> Result<(&Series, Series), MetricError> {
        let y_pred = match &self.y_pred {
            Predicted::Series(s) => {
                if s.len() != self.y_true.len() {
                    return Err(MetricError::Batch(format!(
                        "length mismatch: y_true has {} rows, y_pred has {}",
                        self.y_true.len(),
                        s.len()
                    )));
                }
                if s.index != self.y_true.index {
                    return Err(MetricError::Batch(
                        "y_true and y_pred indices are not aligned".into(),
                    ));
                }
                s.clone()
            }
            Predicted::Array(v) => {
                if v.len() != self.y_true.len() {
                    return Err(MetricError::Batch(format!(
                        "length mismatch: y_true has {} rows, prediction array has {}",
                        self.y_true.len(),
                        v.len()
                    )));
                }
                Series::with_index(
                    Y_PRED,
                    self.y_true.index.clone(),
                    v.iter().copied().map(Scalar::F64).collect(),
                )
            }
        };
        Ok((&self.y_true, y_pred))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_array_inherits_truth_index() {
        let y_true = Series::with_index("y", vec![10, 20, 30], vec![
            Scalar::I64(1),
            Scalar::I64(0),
            Scalar::I64(1),
        ]);
        let batch = Batch::new(y_true, vec![1.0, 0.0, 1.0]);
        let (_, y_pred) = batch.aligned().unwrap();
        assert_eq!(y_pred.name, "y_pred");
        assert_eq!(y_pred.index, vec![10, 20, 30]);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let batch = Batch::new(Series::from_i64("y", [1, 0]), vec![1.0]);
        assert!(matches!(batch.aligned(), Err(MetricError::Batch(_))));
    }

    #[test]
    fn misaligned_series_is_rejected() {
        let y_true = Series::from_i64("y", [1, 0]);
        let y_pred = Series::with_index("p", vec![5, 6], vec![Scalar::I64(1), Scalar::I64(0)]);
        let batch = Batch::new(y_true, y_pred);
        assert!(matches!(batch.aligned(), Err(MetricError::Batch(_))));
    }
}
