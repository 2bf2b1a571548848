#![forbid(unsafe_code)]
//! trellis: grammar-based pipeline search-space generation and
//! batch-composable metric scoring.
//!
//! This crate re-exports the public surface of the workspace members;
//! see `trellis-grammar` and `trellis-metrics` for the two subsystems.

pub use trellis_core::operator::{Choice, Leaf, NonTerminal, Pipeline, PlannedOp};
pub use trellis_core::types::{Column, Scalar, Series, Table};
pub use trellis_grammar::{Grammar, GrammarError};
pub use trellis_metrics::{
    accuracy_score, get_scorer, r2_score, Accuracy, Batch, Estimator, MetricError, Monoid,
    MonoidMaker, Predicted, Scorer, ScorerRegistry, R2,
};
