#![forbid(unsafe_code)]
//! trellis-metrics: incremental, batch-composable metric scoring.
//!
//! Each metric lifts a batch of (true, predicted) labels into a small
//! associative partial aggregate (a monoid); partial aggregates from
//! arbitrary partitionings combine into the exact global score without
//! re-scanning data. Batches are routed through the declarative tabular
//! backend (`trellis-frame`) as a fixed scan/map/aggregate plan built
//! once per metric.

pub mod accuracy;
pub mod batch;
pub mod error;
pub mod estimator;
mod lift;
pub mod monoid;
pub mod r2;
pub mod registry;

pub use accuracy::{Accuracy, AccuracyData};
pub use batch::{Batch, Predicted};
pub use error::MetricError;
pub use estimator::Estimator;
pub use monoid::{Monoid, MonoidMaker, Scorer};
pub use r2::{R2Data, R2};
pub use registry::{accuracy_score, get_scorer, r2_score, ScorerRegistry};
