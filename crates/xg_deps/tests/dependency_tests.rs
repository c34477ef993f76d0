use xg_core::bundle::{BundleKind, OptionBundle, TestContext};
use xg_core::option::Belonging;
use xg_core::value::OptionValue;
use xg_deps::prelude::*;

fn ctx(under_test: &[(&str, Option<OptionValue>)]) -> TestContext {
    let names: Vec<String> = under_test.iter().map(|(n, _)| n.to_string()).collect();
    let mut bundle = OptionBundle::new(BundleKind::StuffUnderTest, names);
    for (name, value) in under_test {
        bundle.set_option(name, value.clone()).unwrap();
    }
    let env = OptionBundle::new(BundleKind::Environment, std::iter::empty());
    TestContext::new(bundle, env)
}

fn sample_graph() -> OptionGraph {
    let mut g = OptionGraph::new();
    g.add_choice(
        "algorithm",
        "which algorithm to run",
        Belonging::UnderTest,
        vec![OptionValue::Str("a".into()), OptionValue::Str("b".into())],
    )
    .unwrap();
    g.add_value("threshold", "tuning knob for algorithm a", Belonging::UnderTest, xg_core::value::ValueType::Float)
        .unwrap();
    g.constraint_option_value_needs_option("algorithm", vec![OptionValue::Str("a".into())], "threshold")
        .unwrap();
    g
}

#[test]
fn irrelevant_option_is_nulled_even_if_originally_set() {
    let g = sample_graph();
    let tc = ctx(&[
        ("algorithm", Some(OptionValue::Str("b".into()))),
        ("threshold", Some(OptionValue::Float(0.5))),
    ]);
    let pruned = g.check_compliance(&tc).expect("algorithm=b never reaches threshold, so it is simply irrelevant, not a violation");
    assert_eq!(pruned.get_option("threshold").unwrap(), None);
    assert_eq!(pruned.get_option("algorithm").unwrap(), Some(&OptionValue::Str("b".into())));
}

#[test]
fn required_sink_missing_drops_the_context() {
    let g = sample_graph();
    let tc = ctx(&[("algorithm", Some(OptionValue::Str("a".into()))), ("threshold", None)]);
    assert!(g.check_compliance(&tc).is_none());
}

#[test]
fn satisfied_dependency_keeps_sink_relevant() {
    let g = sample_graph();
    let tc = ctx(&[
        ("algorithm", Some(OptionValue::Str("a".into()))),
        ("threshold", Some(OptionValue::Float(0.1))),
    ]);
    let pruned = g.check_compliance(&tc).unwrap();
    assert_eq!(pruned.get_option("threshold").unwrap(), Some(&OptionValue::Float(0.1)));
}

#[test]
fn essential_pre_filter_drops_without_running_relevance_pass() {
    let mut g = OptionGraph::new();
    g.add_value("a", "lower bound", Belonging::UnderTest, xg_core::value::ValueType::Int).unwrap();
    g.add_value("b", "upper bound", Belonging::UnderTest, xg_core::value::ValueType::Int).unwrap();
    let predicate = Predicate::custom(|endpoints| {
        let a = endpoints.iter().find(|(n, _)| *n == "a").and_then(|(_, v)| *v);
        let b = endpoints.iter().find(|(n, _)| *n == "b").and_then(|(_, v)| *v);
        match (a, b) {
            (Some(OptionValue::Int(a)), Some(OptionValue::Int(b))) => a < b,
            _ => false,
        }
    });
    g.constraint_quick_which_has_to_happen(vec!["a".into(), "b".into()], predicate).unwrap();

    let ok = ctx(&[("a", Some(OptionValue::Int(1))), ("b", Some(OptionValue::Int(2)))]);
    assert!(g.check_compliance(&ok).is_some());

    let bad = ctx(&[("a", Some(OptionValue::Int(5))), ("b", Some(OptionValue::Int(2)))]);
    assert!(g.check_compliance(&bad).is_none());
}

#[test]
fn prohibited_combination_is_rejected() {
    let mut g = OptionGraph::new();
    g.add_flag("debug", "debug mode", Belonging::UnderTest).unwrap();
    g.add_flag("release", "release mode", Belonging::UnderTest).unwrap();
    g.constraint_prohibit_combination(vec![("debug".into(), OptionValue::Bool(true)), ("release".into(), OptionValue::Bool(true))])
        .unwrap();

    let both = ctx(&[("debug", Some(OptionValue::Bool(true))), ("release", Some(OptionValue::Bool(true)))]);
    assert!(g.check_compliance(&both).is_none());

    let one = ctx(&[("debug", Some(OptionValue::Bool(true))), ("release", Some(OptionValue::Bool(false)))]);
    assert!(g.check_compliance(&one).is_some());
}

#[test]
fn requires_mapping_rejects_null_source_and_mismatched_sink() {
    let condition = RequiresMapping::new(|v| match v {
        OptionValue::Int(n) => OptionValue::Int(n * 2),
        other => other.clone(),
    });
    let tc_null = ctx(&[("src", None), ("dst", Some(OptionValue::Int(4)))]);
    assert_eq!(condition.evaluate(&tc_null, "src", &["dst".to_string()]), ConditionOutcome::Reject);

    let tc_mismatch = ctx(&[("src", Some(OptionValue::Int(2))), ("dst", Some(OptionValue::Int(5)))]);
    assert_eq!(condition.evaluate(&tc_mismatch, "src", &["dst".to_string()]), ConditionOutcome::Reject);

    let tc_ok = ctx(&[("src", Some(OptionValue::Int(2))), ("dst", Some(OptionValue::Int(4)))]);
    assert_eq!(condition.evaluate(&tc_ok, "src", &["dst".to_string()]), ConditionOutcome::Success);
}
