//! Lazily-populated registry over the closed set of scoring methods.

use std::sync::OnceLock;

use trellis_core::types::Series;

use crate::accuracy::Accuracy;
use crate::batch::Predicted;
use crate::error::MetricError;
use crate::monoid::Scorer;
use crate::r2::R2;

/// Scoring-method names this registry recognizes.
pub const SCORING_METHODS: [&str; 2] = ["accuracy", "r2"];

/// One write-once slot per scoring method. Each maker is constructed at
/// most once (its aggregation plan template is immutable and shared by
/// all subsequent calls) and the same instance is returned thereafter.
#[derive(Debug, Default)]
pub struct ScorerRegistry {
    accuracy: OnceLock<Accuracy>,
    r2: OnceLock<R2>,
}

impl ScorerRegistry {
    pub const fn new() -> Self {
        Self {
            accuracy: OnceLock::new(),
            r2: OnceLock::new(),
        }
    }

    pub fn get(&self, scoring: &str) -> Result<&dyn Scorer, MetricError> {
        match scoring {
            "accuracy" => Ok(self.accuracy.get_or_init(Accuracy::new)),
            "r2" => Ok(self.r2.get_or_init(R2::new)),
            other => Err(MetricError::UnknownScorer(other.to_string())),
        }
    }
}

static SCORERS: ScorerRegistry = ScorerRegistry::new();

/// Look up a scorer in the process-wide registry.
pub fn get_scorer(scoring: &str) -> Result<&'static dyn Scorer, MetricError> {
    SCORERS.get(scoring)
}

pub fn accuracy_score(
    y_true: &Series,
    y_pred: impl Into<Predicted>,
) -> Result<f64, MetricError> {
    get_scorer("accuracy")?.score_data(y_true, y_pred.into())
}

pub fn r2_score(y_true: &Series, y_pred: impl Into<Predicted>) -> Result<f64, MetricError> {
    get_scorer("r2")?.score_data(y_true, y_pred.into())
}
