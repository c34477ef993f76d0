use indexmap::IndexMap;

use xg_core::bundle::{BundleKind, OptionBundle, TestContext};
use xg_core::value::OptionValue;
use xg_enum::prelude::*;

fn tc(algorithm: &str, threshold: Option<f64>) -> TestContext {
    let mut ut = OptionBundle::new(BundleKind::StuffUnderTest, ["algorithm".to_string(), "threshold".to_string()]);
    ut.set_option("algorithm", Some(OptionValue::Str(algorithm.to_string()))).unwrap();
    ut.set_option("threshold", threshold.map(OptionValue::Float)).unwrap();
    let env = OptionBundle::new(BundleKind::Environment, std::iter::empty());
    TestContext::new(ut, env)
}

#[test]
fn mask_filters_by_equals_and_is_null() {
    let repo = Repository::from_contexts(vec![tc("a", Some(0.1)), tc("b", None), tc("a", None)]);

    let mask = TestContextMask::new().with("algorithm", MaskOption::Equals(OptionValue::Str("a".into())));
    let matched = repo.query_by_mask(&mask);
    assert_eq!(matched.len(), 2);

    let mask = TestContextMask::new().with("threshold", MaskOption::IsNotNull);
    assert_eq!(repo.query_by_mask(&mask).len(), 1);
}

#[test]
fn constant_over_set_keeps_only_contexts_matching_the_first() {
    let repo = Repository::from_contexts(vec![tc("a", Some(0.1)), tc("a", Some(0.1)), tc("a", Some(0.2))]);
    let mask = TestContextMask::new()
        .with("algorithm", MaskOption::Equals(OptionValue::Str("a".into())))
        .with("threshold", MaskOption::ConstantOverSet);
    let matched = repo.query_by_mask(&mask);
    assert_eq!(matched.len(), 2);
    for m in matched {
        assert_eq!(m.get_option("threshold").unwrap(), Some(&OptionValue::Float(0.1)));
    }
}

#[test]
fn equals_to_binds_against_late_bound_params() {
    let repo = Repository::from_contexts(vec![tc("a", Some(0.5)), tc("b", Some(0.5)), tc("a", Some(0.9))]);
    let mask = TestContextMask::new().with("algorithm", MaskOption::EqualsTo);
    let mut params = IndexMap::new();
    params.insert("algorithm".to_string(), OptionValue::Str("a".into()));
    let bound = mask.set_params(&params);
    let matched = repo.query_by_mask(&bound);
    assert_eq!(matched.len(), 2);
    for m in matched {
        assert_eq!(m.get_option("algorithm").unwrap(), Some(&OptionValue::Str("a".into())));
    }
}

#[test]
fn query_by_finding_mask_requires_exactly_one_match() {
    let repo = Repository::from_contexts(vec![tc("a", Some(0.1)), tc("b", None), tc("a", None)]);

    let unique = TestContextMask::new().with("threshold", MaskOption::IsNotNull);
    assert!(repo.query_by_finding_mask(&unique).is_ok());

    let ambiguous = TestContextMask::new().with("algorithm", MaskOption::Equals(OptionValue::Str("a".into())));
    assert!(matches!(repo.query_by_finding_mask(&ambiguous), Err(EnumError::AmbiguousMatch { count: 2 })));

    let none = TestContextMask::new().with("algorithm", MaskOption::Equals(OptionValue::Str("z".into())));
    assert!(matches!(repo.query_by_finding_mask(&none), Err(EnumError::NoMatch)));
}

#[test]
fn matches_regex_only_considers_string_values() {
    let repo = Repository::from_contexts(vec![tc("alpha", None), tc("beta", None)]);
    let mask = TestContextMask::new().with("algorithm", MaskOption::matches_regex("^al").unwrap());
    assert_eq!(repo.query_by_mask(&mask).len(), 1);
}

#[test]
fn well_specified_value_matches_masks_py_table() {
    assert_eq!(
        MaskOption::Equals(OptionValue::Str("a".into())).well_specified_value(),
        Some(WellSpecifiedValue::Single(OptionValue::Str("a".into())))
    );
    assert_eq!(MaskOption::IsNull.well_specified_value(), Some(WellSpecifiedValue::Null));
    assert_eq!(
        MaskOption::InSet(vec![OptionValue::Int(1), OptionValue::Int(2)]).well_specified_value(),
        Some(WellSpecifiedValue::Set(vec![OptionValue::Int(1), OptionValue::Int(2)]))
    );
    for unspecified in [
        MaskOption::Ignore,
        MaskOption::NotEquals(OptionValue::Int(1)),
        MaskOption::IsNotNull,
        MaskOption::matches_regex("^a").unwrap(),
        MaskOption::EqualsTo,
        MaskOption::ConstantOverSet,
    ] {
        assert!(!unspecified.represents_a_well_specified_value());
        assert_eq!(unspecified.well_specified_value(), None);
    }
}
