#![forbid(unsafe_code)]
//! trellis-frame: in-memory execution of relational metric plans.
//!
//! Design intent:
//! - Keep this crate pure and synchronous (no async, no I/O).
//! - Plans are interpreted directly over `trellis-core` tables; a larger
//!   backend could lower the same `TablePlan` AST to its own engine.

pub mod eval;

pub use eval::{execute, FrameError};
