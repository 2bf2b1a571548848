//! Convenient re-exports for downstream crates.

pub use crate::error::{Error, Result};
pub use crate::expr::{AggExpr, Expr};
pub use crate::operator::{Choice, Leaf, NonTerminal, Pipeline, PlannedOp, NO_OP};
pub use crate::relplan::TablePlan;
pub use crate::schema::{DataType, Field, Schema};
pub use crate::types::{Column, Scalar, Series, Table};
