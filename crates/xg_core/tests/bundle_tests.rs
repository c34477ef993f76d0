use xg_core::bundle::{BundleKind, OptionBundle, TestContext};
use xg_core::errors::OptionError;
use xg_core::value::OptionValue;

#[test]
fn rejects_setting_unknown_name() {
    let mut b = OptionBundle::new(BundleKind::StuffUnderTest, ["algorithm".to_string()]);
    let err = b.set_option("heuristic", Some(OptionValue::Str("H1".into()))).unwrap_err();
    assert_eq!(err, OptionError::UnknownOption("heuristic".into()));
}

#[test]
fn permits_null_values() {
    let mut b = OptionBundle::new(BundleKind::StuffUnderTest, ["size".to_string()]);
    assert_eq!(b.get_option("size").unwrap(), None);
    b.set_option("size", Some(OptionValue::Int(10))).unwrap();
    assert_eq!(b.get_option("size").unwrap(), Some(&OptionValue::Int(10)));
    b.set_option("size", None).unwrap();
    assert_eq!(b.get_option("size").unwrap(), None);
}

#[test]
fn test_context_equality_is_value_equality() {
    let mut ut1 = OptionBundle::new(BundleKind::StuffUnderTest, ["algorithm".to_string()]);
    ut1.set_option("algorithm", Some(OptionValue::Str("MERGE".into()))).unwrap();
    let env1 = OptionBundle::new(BundleKind::Environment, ["os".to_string()]);
    let tc1 = TestContext::new(ut1.clone(), env1.clone());
    let tc2 = TestContext::new(ut1, env1);
    assert_eq!(tc1, tc2);
}

#[test]
fn prune_to_relevant_nulls_irrelevant_options() {
    let mut ut = OptionBundle::new(BundleKind::StuffUnderTest, ["algorithm".to_string(), "heuristic".to_string()]);
    ut.set_option("algorithm", Some(OptionValue::Str("BUBBLE".into()))).unwrap();
    ut.set_option("heuristic", Some(OptionValue::Str("H1".into()))).unwrap();
    let env = OptionBundle::new(BundleKind::Environment, Vec::<String>::new());
    let mut tc = TestContext::new(ut, env);

    let mut relevant = indexmap::IndexSet::new();
    relevant.insert("algorithm".to_string());
    tc.prune_to_relevant(&relevant);

    assert_eq!(tc.get_option("algorithm").unwrap(), Some(&OptionValue::Str("BUBBLE".into())));
    assert_eq!(tc.get_option("heuristic").unwrap(), None);
}
