//! End-to-end grammar engine tests: exhaustive unfolding and sampling
//! over recursive rule graphs.

use rand::rngs::StdRng;
use rand::SeedableRng;
use trellis_core::operator::PlannedOp;
use trellis_grammar::{Grammar, GrammarError};

/// start -> prep >> est
/// prep  -> pca | scale | prep >> prep   (recursive)
/// est   -> lr | svm
fn search_space() -> Grammar {
    let mut g = Grammar::new();
    g.define(
        "start",
        PlannedOp::pipeline(vec![
            PlannedOp::non_terminal("prep"),
            PlannedOp::non_terminal("est"),
        ]),
    );
    g.define(
        "prep",
        PlannedOp::choice(vec![
            PlannedOp::leaf("pca"),
            PlannedOp::leaf("scale"),
            PlannedOp::pipeline(vec![
                PlannedOp::non_terminal("prep"),
                PlannedOp::non_terminal("prep"),
            ]),
        ]),
    );
    g.define(
        "est",
        PlannedOp::choice(vec![PlannedOp::leaf("lr"), PlannedOp::leaf("svm")]),
    );
    g
}

fn collect_leaf_names(op: &PlannedOp, out: &mut Vec<String>) {
    match op {
        PlannedOp::Pipeline(p) => p.steps.iter().for_each(|s| collect_leaf_names(s, out)),
        PlannedOp::Choice(c) => c
            .alternatives
            .iter()
            .for_each(|a| collect_leaf_names(a, out)),
        PlannedOp::Leaf(l) => out.push(l.name.clone()),
        PlannedOp::NonTerminal(nt) => panic!("unresolved non-terminal '{}'", nt.name()),
    }
}

#[test]
fn unfold_covers_every_terminal_alternative() {
    let g = search_space();
    let unfolded = g.unfold(3).unwrap();
    let mut names = Vec::new();
    collect_leaf_names(&unfolded, &mut names);
    for expected in ["pca", "scale", "lr", "svm"] {
        assert!(names.contains(&expected.to_string()), "missing {expected}");
    }
}

#[test]
fn unfold_at_depth_zero_is_no_op() {
    let g = search_space();
    assert!(g.unfold(0).unwrap().is_no_op());
}

#[test]
fn deep_unfold_contains_shallow_derivations() {
    let g = search_space();
    // The recursive `prep` rule keeps adding derivations with depth, so
    // deeper unfolds strictly grow; the shallow terminals must persist.
    for n in [2usize, 3, 4] {
        let mut names = Vec::new();
        collect_leaf_names(&g.unfold(n).unwrap(), &mut names);
        assert!(names.contains(&"pca".to_string()));
        assert!(names.contains(&"lr".to_string()));
    }
}

#[test]
fn samples_are_concrete_pipelines_from_the_space() {
    let g = search_space();
    let mut rng = StdRng::seed_from_u64(42);
    let vocabulary = ["pca", "scale", "lr", "svm", "no_op"];
    for _ in 0..100 {
        let sampled = g.sample_with(8, &mut rng).unwrap();
        assert!(sampled.is_fully_resolved());
        let mut names = Vec::new();
        collect_leaf_names(&sampled, &mut names);
        for name in &names {
            assert!(vocabulary.contains(&name.as_str()), "unexpected leaf {name}");
        }
    }
}

#[test]
fn sampling_explores_multiple_derivations() {
    let g = search_space();
    let mut rng = StdRng::seed_from_u64(7);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..200 {
        let sampled = g.sample_with(6, &mut rng).unwrap();
        let mut names = Vec::new();
        collect_leaf_names(&sampled, &mut names);
        seen.insert(names.join(">>"));
    }
    assert!(seen.len() > 4, "expected varied samples, got {seen:?}");
}

#[test]
fn unfolded_operators_round_trip_through_json() {
    let g = search_space();
    let unfolded = g.unfold(3).unwrap();
    let json = serde_json::to_string(&unfolded).unwrap();
    let back: PlannedOp = serde_json::from_str(&json).unwrap();
    assert_eq!(unfolded, back);
}

#[test]
fn missing_start_is_an_error() {
    let mut g = Grammar::new();
    g.define("est", PlannedOp::leaf("lr"));
    assert!(matches!(g.unfold(3), Err(GrammarError::MissingStart(_))));
}
