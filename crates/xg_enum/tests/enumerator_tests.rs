use xg_core::option::Belonging;
use xg_core::value::{OptionValue, ValueType};
use xg_deps::graph::OptionGraph;
use xg_enum::prelude::*;

fn graph_with_dependent_threshold() -> OptionGraph {
    let mut g = OptionGraph::new();
    g.add_choice(
        "algorithm",
        "which algorithm to run",
        Belonging::UnderTest,
        vec![OptionValue::Str("a".into()), OptionValue::Str("b".into())],
    )
    .unwrap();
    g.add_value("threshold", "tuning knob for algorithm a", Belonging::UnderTest, ValueType::Float).unwrap();
    g.constraint_option_value_needs_option("algorithm", vec![OptionValue::Str("a".into())], "threshold").unwrap();
    g
}

#[test]
fn enumeration_drops_uncompliant_combinations() {
    let g = graph_with_dependent_threshold();
    let candidates = CandidateValues::new()
        .with_under_test("algorithm", vec![OptionValue::Str("a".into()), OptionValue::Str("b".into())])
        .with_under_test("threshold", vec![OptionValue::Float(0.1), OptionValue::Float(0.2)]);

    let results = enumerate_combinations(&g, &candidates);

    // algorithm=a needs a non-null threshold (2 surviving combos);
    // algorithm=b makes threshold irrelevant, so both of its raw combos
    // collapse (after pruning) onto one deduplicated context.
    assert_eq!(results.len(), 3);

    let b_contexts: Vec<_> = results
        .iter()
        .filter(|tc| tc.get_option("algorithm").unwrap() == Some(&OptionValue::Str("b".into())))
        .collect();
    assert_eq!(b_contexts.len(), 1);
    assert_eq!(b_contexts[0].get_option("threshold").unwrap(), None);
}

#[test]
fn enumeration_preserves_first_seen_order_after_dedup() {
    let g = graph_with_dependent_threshold();
    let candidates = CandidateValues::new()
        .with_under_test("algorithm", vec![OptionValue::Str("a".into()), OptionValue::Str("b".into())])
        .with_under_test("threshold", vec![OptionValue::Float(0.1)]);

    let results = enumerate_combinations(&g, &candidates);
    let algorithms: Vec<_> = results.iter().map(|tc| tc.get_option("algorithm").unwrap().cloned()).collect();
    assert_eq!(
        algorithms,
        vec![Some(OptionValue::Str("a".into())), Some(OptionValue::Str("b".into()))]
    );
}

#[test]
fn an_empty_candidate_list_yields_no_combinations() {
    let g = graph_with_dependent_threshold();
    let candidates = CandidateValues::new().with_under_test("algorithm", Vec::new());
    assert!(enumerate_combinations(&g, &candidates).is_empty());
}
