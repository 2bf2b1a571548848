#![forbid(unsafe_code)]
//! trellis-grammar: grammar-based search-space generation over planned
//! operators.
//!
//! A grammar is a mutable rule table over the four operator shapes.
//! `unfold` expands every derivation to a bounded depth; `sample` draws
//! one concrete pipeline at random. The depth budget is the only cycle
//! guard, so self-referential rule graphs always terminate.

pub mod grammar;

pub use grammar::{Grammar, GrammarError};
