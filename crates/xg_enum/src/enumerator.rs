//! The combination enumerator (spec §4.4, C5).
//!
//! Lexicographic Cartesian product over the UNDER_TEST and ENVIRONMENT
//! candidate value lists, filtered through [`xg_deps::graph::OptionGraph`]'s
//! compliance check, and order-preserving deduplicated — pruning can make
//! distinct raw combinations collapse onto the same (partially-nulled) test
//! context, and the first one encountered wins (spec §4.4 point 3).
//!
//! Grounded on `original_source/PhdTester/phdTester/options_builder.py`'s
//! combination-generation entry point, re-expressed as plain iteration
//! instead of Python generators.

use std::collections::HashSet;

use indexmap::IndexMap;

use xg_core::bundle::{BundleKind, OptionBundle, TestContext};
use xg_core::value::OptionValue;
use xg_deps::graph::OptionGraph;

/// The per-option candidate value lists an enumeration ranges over.
/// Settings options are fixed for the whole run and are not enumerated —
/// callers fold them into whichever bundle needs them before building the
/// [`TestContext`]s, or pass a singleton list here if they do want them
/// varied across a run (spec §3: SETTINGS "takes exactly one value per
/// run", not "one value across all runs").
#[derive(Debug, Clone, Default)]
pub struct CandidateValues {
    pub under_test: IndexMap<String, Vec<OptionValue>>,
    pub environment: IndexMap<String, Vec<OptionValue>>,
}

impl CandidateValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_under_test(mut self, name: impl Into<String>, values: Vec<OptionValue>) -> Self {
        self.under_test.insert(name.into(), values);
        self
    }

    pub fn with_environment(mut self, name: impl Into<String>, values: Vec<OptionValue>) -> Self {
        self.environment.insert(name.into(), values);
        self
    }

    /// Total number of raw combinations before compliance filtering.
    pub fn raw_combination_count(&self) -> usize {
        self.under_test.values().chain(self.environment.values()).map(Vec::len).fold(1, |acc, n| acc * n.max(1))
    }
}

fn cartesian_product(lists: &[&[OptionValue]]) -> Vec<Vec<OptionValue>> {
    lists.iter().fold(vec![Vec::new()], |acc, list| {
        acc.into_iter()
            .flat_map(|prefix| {
                list.iter().map(move |v| {
                    let mut next = prefix.clone();
                    next.push(v.clone());
                    next
                })
            })
            .collect()
    })
}

fn build_bundle(kind: BundleKind, names: &[String], values: &[OptionValue]) -> OptionBundle {
    let mut bundle = OptionBundle::new(kind, names.iter().cloned());
    for (name, value) in names.iter().zip(values) {
        bundle.set_option(name, Some(value.clone())).expect("bundle was built to accept exactly these names");
    }
    bundle
}

/// A stable per-context fingerprint (the in-order sequence of option
/// values) used for dedup; avoids requiring `TestContext` itself to be
/// `Hash` (its backing `IndexMap`s are not, by design — insertion order
/// matters more than hash-based lookup there).
fn fingerprint(tc: &TestContext) -> Vec<Option<OptionValue>> {
    tc.option_names().map(|name| tc.get_option(name).expect("name came from tc itself").cloned()).collect()
}

/// Run the full enumerate → compliance-filter → dedup pipeline (spec §4.4).
pub fn enumerate_combinations(graph: &OptionGraph, candidates: &CandidateValues) -> Vec<TestContext> {
    let ut_names: Vec<String> = candidates.under_test.keys().cloned().collect();
    let env_names: Vec<String> = candidates.environment.keys().cloned().collect();

    let mut lists: Vec<&[OptionValue]> = candidates.under_test.values().map(Vec::as_slice).collect();
    lists.extend(candidates.environment.values().map(Vec::as_slice));

    let combos = cartesian_product(&lists);
    let split = ut_names.len();

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for combo in combos {
        let (ut_values, env_values) = combo.split_at(split);
        let ut_bundle = build_bundle(BundleKind::StuffUnderTest, &ut_names, ut_values);
        let env_bundle = build_bundle(BundleKind::Environment, &env_names, env_values);
        let raw = TestContext::new(ut_bundle, env_bundle);

        let Some(pruned) = graph.check_compliance(&raw) else { continue };
        if seen.insert(fingerprint(&pruned)) {
            out.push(pruned);
        }
    }
    out
}
