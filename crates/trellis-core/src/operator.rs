//! Planned-operator shapes consumed by the grammar engine.
//!
//! The four shapes form a closed sum type so recursive rewriting can
//! match exhaustively; there is no "unknown operator" case at runtime.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schema::Schema;

/// Name of the designated neutral operator produced when a derivation
/// exhausts its depth budget without reaching a terminal.
pub const NO_OP: &str = "no_op";

/// Sequential composition: ordered steps plus directed dependency edges
/// between step positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub steps: Vec<PlannedOp>,
    /// Edges as `(from, to)` indices into `steps`.
    pub edges: Vec<(usize, usize)>,
}

impl Pipeline {
    /// Linear chain: an edge between each pair of consecutive steps.
    pub fn linear(steps: Vec<PlannedOp>) -> Self {
        let edges = (1..steps.len()).map(|i| (i - 1, i)).collect();
        Self { steps, edges }
    }

    /// Explicit DAG topology. Edge endpoints must index into `steps`.
    pub fn with_edges(steps: Vec<PlannedOp>, edges: Vec<(usize, usize)>) -> Result<Self> {
        for &(s, d) in &edges {
            if s >= steps.len() || d >= steps.len() {
                return Err(Error::Invariant(format!(
                    "edge ({s}, {d}) out of range for {} steps",
                    steps.len()
                )));
            }
        }
        Ok(Self { steps, edges })
    }
}

/// A choice point: exactly one alternative is selected at resolution time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub alternatives: Vec<PlannedOp>,
}

/// A terminal, directly executable unit, identified by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    pub name: String,
}

impl Leaf {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A named placeholder for a grammar rule that has not been substituted.
///
/// Non-terminals are not executable: every schema-level operation fails
/// until the name is resolved through a grammar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonTerminal {
    name: String,
}

impl NonTerminal {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn validate_schema(&self, _x: &Schema, _y: Option<&Schema>) -> Result<()> {
        Err(Error::NotImplemented("NonTerminal::validate_schema"))
    }

    pub fn transform_schema(&self, _s_x: &Schema) -> Result<Schema> {
        Err(Error::NotImplemented("NonTerminal::transform_schema"))
    }

    pub fn input_schema_fit(&self) -> Result<Schema> {
        Err(Error::NotImplemented("NonTerminal::input_schema_fit"))
    }
}

/// The closed set of operator shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlannedOp {
    Pipeline(Pipeline),
    Choice(Choice),
    Leaf(Leaf),
    NonTerminal(NonTerminal),
}

impl PlannedOp {
    /// Single-step or linear pipeline over `steps`.
    pub fn pipeline(steps: Vec<PlannedOp>) -> Self {
        PlannedOp::Pipeline(Pipeline::linear(steps))
    }

    pub fn choice(alternatives: Vec<PlannedOp>) -> Self {
        PlannedOp::Choice(Choice { alternatives })
    }

    pub fn leaf(name: impl Into<String>) -> Self {
        PlannedOp::Leaf(Leaf::new(name))
    }

    pub fn non_terminal(name: impl Into<String>) -> Self {
        PlannedOp::NonTerminal(NonTerminal::new(name))
    }

    /// The neutral identity pass-through operator.
    pub fn no_op() -> Self {
        PlannedOp::leaf(NO_OP)
    }

    pub fn is_no_op(&self) -> bool {
        matches!(self, PlannedOp::Leaf(l) if l.name == NO_OP)
    }

    /// True if no `NonTerminal` or `Choice` remains anywhere in the tree.
    pub fn is_fully_resolved(&self) -> bool {
        match self {
            PlannedOp::Pipeline(p) => p.steps.iter().all(PlannedOp::is_fully_resolved),
            PlannedOp::Choice(_) => false,
            PlannedOp::Leaf(_) => true,
            PlannedOp::NonTerminal(_) => false,
        }
    }
}
