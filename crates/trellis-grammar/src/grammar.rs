//! Rule registry plus exhaustive unfolding and random sampling.

use std::collections::HashMap;

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

use trellis_core::operator::{Choice, NonTerminal, Pipeline, PlannedOp};

use thiserror::Error;

/// The rule every derivation starts from.
const START: &str = "start";

#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("rule `start` must be defined before calling {0}")]
    MissingStart(&'static str),
}

/// A named, mutable mapping from rule name to operator shape.
///
/// Reading a name that was never defined yields a fresh [`NonTerminal`]
/// of that name, so rules can forward-reference each other (including
/// cyclically) while being defined in any order. Reads always return
/// independent clones; mutating a returned value never touches the table.
#[derive(Debug, Default)]
pub struct Grammar {
    rules: HashMap<String, PlannedOp>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind (or rebind) a rule.
    pub fn define(&mut self, name: impl Into<String>, op: PlannedOp) {
        self.rules.insert(name.into(), op);
    }

    /// Read a rule, inserting a fresh non-terminal placeholder if the
    /// name was never bound. The returned value is an independent clone.
    pub fn resolve(&mut self, name: &str) -> PlannedOp {
        self.rules
            .entry(name.to_string())
            .or_insert_with(|| PlannedOp::NonTerminal(NonTerminal::new(name)))
            .clone()
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Non-inserting read used during traversal: an absent name reads as
    /// a fresh non-terminal, exactly what `resolve` would have stored.
    fn lookup(&self, name: &str) -> PlannedOp {
        match self.rules.get(name) {
            Some(op) => op.clone(),
            None => PlannedOp::NonTerminal(NonTerminal::new(name)),
        }
    }

    /// Expand every derivation reachable from `start` within `n`
    /// non-terminal substitutions, as nested choices.
    ///
    /// Always yields a usable operator: when the depth budget exhausts
    /// every derivation, the result is the neutral no-op.
    pub fn unfold(&self, n: usize) -> Result<PlannedOp, GrammarError> {
        if !self.is_defined(START) {
            return Err(GrammarError::MissingStart("unfold"));
        }
        let unfolded = self.unfold_op(&self.lookup(START), n);
        debug!(depth = n, empty = unfolded.is_none(), "grammar unfold");
        Ok(match unfolded {
            Some(op) => PlannedOp::pipeline(vec![op]),
            None => PlannedOp::no_op(),
        })
    }

    fn unfold_op(&self, op: &PlannedOp, n: usize) -> Option<PlannedOp> {
        match op {
            PlannedOp::Pipeline(p) => {
                // Step positions are stable under rewriting, so the edge
                // topology carries over index-for-index.
                let new_steps: Option<Vec<_>> =
                    p.steps.iter().map(|s| self.unfold_op(s, n)).collect();
                new_steps.map(|steps| {
                    PlannedOp::Pipeline(Pipeline {
                        steps,
                        edges: p.edges.clone(),
                    })
                })
            }
            PlannedOp::Choice(c) => {
                let survivors: Vec<_> = c
                    .alternatives
                    .iter()
                    .filter_map(|a| self.unfold_op(a, n))
                    .collect();
                if survivors.is_empty() {
                    None
                } else {
                    Some(PlannedOp::Choice(Choice {
                        alternatives: survivors,
                    }))
                }
            }
            PlannedOp::NonTerminal(nt) => {
                if n > 0 {
                    self.unfold_op(&self.lookup(nt.name()), n - 1)
                } else {
                    None
                }
            }
            PlannedOp::Leaf(_) => Some(op.clone()),
        }
    }

    /// Draw one concrete pipeline at random, resolving every choice point
    /// uniformly, within `n` non-terminal substitutions.
    ///
    /// Re-reads the rule table on every non-terminal hop, so edits made
    /// to the grammar between samples are picked up.
    pub fn sample(&self, n: usize) -> Result<PlannedOp, GrammarError> {
        self.sample_with(n, &mut rand::rng())
    }

    /// `sample` with a caller-supplied RNG for reproducible draws.
    pub fn sample_with<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<PlannedOp, GrammarError> {
        if !self.is_defined(START) {
            return Err(GrammarError::MissingStart("sample"));
        }
        let sampled = self.sample_op(&self.lookup(START), n, rng);
        debug!(depth = n, empty = sampled.is_none(), "grammar sample");
        Ok(match sampled {
            Some(op) => PlannedOp::pipeline(vec![op]),
            None => PlannedOp::no_op(),
        })
    }

    fn sample_op<R: Rng + ?Sized>(
        &self,
        op: &PlannedOp,
        n: usize,
        rng: &mut R,
    ) -> Option<PlannedOp> {
        match op {
            PlannedOp::Pipeline(p) => {
                let new_steps: Option<Vec<_>> = p
                    .steps
                    .iter()
                    .map(|s| self.sample_op(s, n, rng))
                    .collect();
                new_steps.map(|steps| {
                    PlannedOp::Pipeline(Pipeline {
                        steps,
                        edges: p.edges.clone(),
                    })
                })
            }
            PlannedOp::Choice(c) => {
                let picked = c.alternatives.choose(rng)?;
                self.sample_op(picked, n, rng)
            }
            PlannedOp::NonTerminal(nt) => {
                if n > 0 {
                    self.sample_op(&self.lookup(nt.name()), n - 1, rng)
                } else {
                    None
                }
            }
            PlannedOp::Leaf(_) => Some(op.clone()),
        }
    }
}
