#![forbid(unsafe_code)]
//! trellis-core: pure data types shared by the grammar and metric engines.
//!
//! Design intent:
//! - Keep this crate free of I/O, randomness, and execution logic.
//! - Operator shapes and relational plans are closed sum types so that
//!   downstream recursion can match exhaustively.

pub mod error;
pub mod expr;
pub mod operator;
pub mod prelude;
pub mod relplan;
pub mod schema;
pub mod types;

pub use error::{Error, Result};
pub use operator::{Choice, Leaf, NonTerminal, Pipeline, PlannedOp};
