//! Registry behavior through the erased `Scorer` surface.

use trellis_core::types::{Column, Scalar, Series, Table};
use trellis_metrics::{get_scorer, Batch, Estimator, MetricError, Predicted, Scorer};

struct ConstantEstimator(f64);

impl Estimator for ConstantEstimator {
    fn predict(&self, x: &Table) -> Result<Vec<f64>, MetricError> {
        Ok(vec![self.0; x.num_rows()])
    }
}

#[test]
fn scorer_cache_returns_identical_instances() {
    let first = get_scorer("r2").unwrap();
    let second = get_scorer("r2").unwrap();
    assert!(std::ptr::eq(
        first as *const dyn Scorer as *const u8,
        second as *const dyn Scorer as *const u8
    ));
}

#[test]
fn unknown_scoring_method_fails_fast() {
    let err = get_scorer("log_loss").unwrap_err();
    assert!(matches!(err, MetricError::UnknownScorer(_)));
}

#[test]
fn erased_scorer_scores_single_batches() {
    let scorer = get_scorer("accuracy").unwrap();
    let y_true = Series::from_i64("y", [1, 0, 1, 1, 0]);
    let score = scorer
        .score_data(&y_true, Predicted::Array(vec![1.0, 0.0, 0.0, 1.0, 0.0]))
        .unwrap();
    assert!((score - 0.8).abs() < 1e-12);
}

#[test]
fn erased_scorer_supports_batched_scoring() {
    let scorer = get_scorer("accuracy").unwrap();
    let mut batches = vec![
        Batch::new(Series::from_i64("y", [1, 0]), vec![1.0, 0.0]),
        Batch::new(Series::from_i64("y", [1, 1, 0]), vec![0.0, 1.0, 0.0]),
    ]
    .into_iter();
    let score = scorer.score_data_batched(&mut batches).unwrap();
    assert!((score - 0.8).abs() < 1e-12);
}

#[test]
fn erased_scorer_drives_an_estimator() {
    let scorer = get_scorer("accuracy").unwrap();
    let x = Table::new(
        "X",
        vec![Column::new(
            "f0",
            vec![Scalar::F64(0.5), Scalar::F64(0.25), Scalar::F64(0.75)],
        )],
    );
    let y = Series::from_f64("y", [1.0, 1.0, 0.0]);
    let score = scorer
        .score_estimator(&ConstantEstimator(1.0), &x, &y)
        .unwrap();
    assert!((score - 2.0 / 3.0).abs() < 1e-12);
}
