//! The combine-and-finalize abstraction behind batched scoring.

use tracing::trace;
use trellis_core::types::{Series, Table};

use crate::batch::{Batch, Predicted};
use crate::error::MetricError;
use crate::estimator::Estimator;

/// An immutable partial aggregate.
///
/// `combine` must be associative and commutative, and `result` a pure
/// function of the accumulator state, so that combining the monoids of
/// any partitioning of the data equals the monoid of the whole.
pub trait Monoid: Sized {
    type Output;

    #[must_use]
    fn combine(&self, other: &Self) -> Self;

    fn result(&self) -> Self::Output;
}

/// Lifts raw label batches into monoids and scores through them.
///
/// Implementors supply `to_monoid`; every scoring surface is derived
/// from it. The batched variants lift lazily, one batch at a time, and
/// left-fold with `combine` before finalizing once.
pub trait MonoidMaker {
    type M: Monoid<Output = f64>;

    fn to_monoid(&self, batch: &Batch) -> Result<Self::M, MetricError>;

    fn score_data(
        &self,
        y_true: &Series,
        y_pred: impl Into<Predicted>,
    ) -> Result<f64, MetricError> {
        let batch = Batch::new(y_true.clone(), y_pred);
        Ok(self.to_monoid(&batch)?.result())
    }

    fn score_estimator(
        &self,
        estimator: &dyn Estimator,
        x: &Table,
        y: &Series,
    ) -> Result<f64, MetricError> {
        self.score_data(y, estimator.predict(x)?)
    }

    fn score_data_batched<I>(&self, batches: I) -> Result<f64, MetricError>
    where
        I: IntoIterator<Item = Batch>,
    {
        let mut iter = batches.into_iter();
        let first = iter.next().ok_or(MetricError::EmptyBatches)?;
        let mut acc = self.to_monoid(&first)?;
        let mut folded = 1usize;
        for batch in iter {
            acc = acc.combine(&self.to_monoid(&batch)?);
            folded += 1;
        }
        trace!(batches = folded, "finalizing batched score");
        Ok(acc.result())
    }

    fn score_estimator_batched<I>(
        &self,
        estimator: &dyn Estimator,
        batches: I,
    ) -> Result<f64, MetricError>
    where
        I: IntoIterator<Item = (Table, Series)>,
    {
        // Folded inline rather than deferring to `score_data_batched`
        // so prediction errors can propagate mid-iteration.
        let mut acc: Option<Self::M> = None;
        for (x, y) in batches {
            let batch = Batch::new(y, estimator.predict(&x)?);
            let lifted = self.to_monoid(&batch)?;
            acc = Some(match acc {
                Some(prev) => prev.combine(&lifted),
                None => lifted,
            });
        }
        let acc = acc.ok_or(MetricError::EmptyBatches)?;
        Ok(acc.result())
    }
}

/// Object-safe scoring surface, blanket-implemented for every maker so
/// the registry can hand out `&dyn Scorer`.
pub trait Scorer: Send + Sync {
    fn score_data(&self, y_true: &Series, y_pred: Predicted) -> Result<f64, MetricError>;

    fn score_estimator(
        &self,
        estimator: &dyn Estimator,
        x: &Table,
        y: &Series,
    ) -> Result<f64, MetricError>;

    fn score_data_batched(
        &self,
        batches: &mut dyn Iterator<Item = Batch>,
    ) -> Result<f64, MetricError>;

    fn score_estimator_batched(
        &self,
        estimator: &dyn Estimator,
        batches: &mut dyn Iterator<Item = (Table, Series)>,
    ) -> Result<f64, MetricError>;
}

impl core::fmt::Debug for dyn Scorer + '_ {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("dyn Scorer")
    }
}

impl<T> Scorer for T
where
    T: MonoidMaker + Send + Sync,
{
    fn score_data(&self, y_true: &Series, y_pred: Predicted) -> Result<f64, MetricError> {
        MonoidMaker::score_data(self, y_true, y_pred)
    }

    fn score_estimator(
        &self,
        estimator: &dyn Estimator,
        x: &Table,
        y: &Series,
    ) -> Result<f64, MetricError> {
        MonoidMaker::score_estimator(self, estimator, x, y)
    }

    fn score_data_batched(
        &self,
        batches: &mut dyn Iterator<Item = Batch>,
    ) -> Result<f64, MetricError> {
        MonoidMaker::score_data_batched(self, batches)
    }

    fn score_estimator_batched(
        &self,
        estimator: &dyn Estimator,
        batches: &mut dyn Iterator<Item = (Table, Series)>,
    ) -> Result<f64, MetricError> {
        MonoidMaker::score_estimator_batched(self, estimator, batches)
    }
}
