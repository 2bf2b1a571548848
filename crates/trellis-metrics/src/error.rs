use thiserror::Error;
use trellis_frame::FrameError;

#[derive(Debug, Error)]
pub enum MetricError {
    #[error("unknown scoring method '{0}'; expected one of: accuracy, r2")]
    UnknownScorer(String),

    #[error("invalid batch: {0}")]
    Batch(String),

    #[error("batched scoring requires at least one batch")]
    EmptyBatches,

    #[error("estimator failure: {0}")]
    Estimator(String),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Core(#[from] trellis_core::Error),
}
