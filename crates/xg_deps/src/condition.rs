//! Dependency-edge conditions (spec §4.1, C3).
//!
//! Grounded on `original_source/PhdTester/phdTester/conditions.py`. Each
//! built-in here mirrors one Python `ICondition` subclass; `RequiresMapping`
//! and `InSetImpliesNotNullSink` preserve that module's exact outcome
//! tables, confirmed by reading the source rather than guessed (see
//! `DESIGN.md`).

use std::fmt;
use std::sync::Arc;

use xg_core::bundle::TestContext;
use xg_core::value::OptionValue;

use crate::predicate::Predicate;

/// The three-valued result of evaluating a dependency edge (spec §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOutcome {
    Success,
    Reject,
    NotRelevant,
}

pub trait Condition {
    /// `source` and every entry of `sinks` are option names; current values
    /// are looked up against `tc`. An unknown name (a builder/caller
    /// mismatch, not a data condition) is treated as null rather than
    /// panicking — the graph and the test context are expected to agree on
    /// vocabulary by construction.
    fn evaluate(&self, tc: &TestContext, source: &str, sinks: &[String]) -> ConditionOutcome;
}

fn lookup<'a>(tc: &'a TestContext, name: &str) -> Option<&'a OptionValue> {
    tc.get_option(name).ok().flatten()
}

/// A condition over exactly one (source, sink) pair.
#[derive(Debug, Clone)]
pub struct SimplePairCondition {
    outcome_if_true: ConditionOutcome,
    outcome_if_false: ConditionOutcome,
    predicate: Predicate,
}

impl SimplePairCondition {
    /// `predicate` is evaluated over `[(source, source_value), (sink, sink_value)]`.
    pub fn new(predicate: Predicate, outcome_if_true: ConditionOutcome, outcome_if_false: ConditionOutcome) -> Self {
        Self { outcome_if_true, outcome_if_false, predicate }
    }
}

impl Condition for SimplePairCondition {
    fn evaluate(&self, tc: &TestContext, source: &str, sinks: &[String]) -> ConditionOutcome {
        assert_eq!(sinks.len(), 1, "SimplePairCondition requires exactly one sink, got {}", sinks.len());
        let sink = &sinks[0];
        let endpoints = [(source, lookup(tc, source)), (sink.as_str(), lookup(tc, sink))];
        if self.predicate.test(&endpoints) {
            self.outcome_if_true
        } else {
            self.outcome_if_false
        }
    }
}

/// `SUCCESS` if `predicate` holds over source + all sinks, else `REJECT`.
#[derive(Debug, Clone)]
pub struct NeedsToHappen {
    predicate: Predicate,
}

impl NeedsToHappen {
    pub fn new(predicate: Predicate) -> Self {
        Self { predicate }
    }
}

impl Condition for NeedsToHappen {
    fn evaluate(&self, tc: &TestContext, source: &str, sinks: &[String]) -> ConditionOutcome {
        let mut values = vec![(source, lookup(tc, source))];
        values.extend(sinks.iter().map(|s| (s.as_str(), lookup(tc, s))));
        if self.predicate.test(&values) {
            ConditionOutcome::Success
        } else {
            ConditionOutcome::Reject
        }
    }
}

/// `REJECT` if `predicate` holds over source + all sinks, else `SUCCESS`.
#[derive(Debug, Clone)]
pub struct CantHappen {
    predicate: Predicate,
}

impl CantHappen {
    pub fn new(predicate: Predicate) -> Self {
        Self { predicate }
    }
}

impl Condition for CantHappen {
    fn evaluate(&self, tc: &TestContext, source: &str, sinks: &[String]) -> ConditionOutcome {
        let mut values = vec![(source, lookup(tc, source))];
        values.extend(sinks.iter().map(|s| (s.as_str(), lookup(tc, s))));
        if self.predicate.test(&values) {
            ConditionOutcome::Reject
        } else {
            ConditionOutcome::Success
        }
    }
}

/// Every sink must equal `mapping(source_value)`.
///
/// Mirrors `conditions.py::RequiresMapping.accept` exactly: a null source
/// rejects immediately; any null or mismatching sink rejects; otherwise
/// (all sinks present and matching) succeeds. There is no `NOT_RELEVANT`
/// outcome for this condition, even when the source is null — confirmed by
/// reading the source, not an open question.
#[derive(Clone)]
pub struct RequiresMapping {
    mapping: Arc<dyn Fn(&OptionValue) -> OptionValue + Send + Sync>,
}

impl RequiresMapping {
    pub fn new(mapping: impl Fn(&OptionValue) -> OptionValue + Send + Sync + 'static) -> Self {
        Self { mapping: Arc::new(mapping) }
    }
}

impl fmt::Debug for RequiresMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RequiresMapping(<fn>)")
    }
}

impl Condition for RequiresMapping {
    fn evaluate(&self, tc: &TestContext, source: &str, sinks: &[String]) -> ConditionOutcome {
        let Some(source_value) = lookup(tc, source) else {
            return ConditionOutcome::Reject;
        };
        let expected = (self.mapping)(source_value);
        for sink in sinks {
            match lookup(tc, sink) {
                None => return ConditionOutcome::Reject,
                Some(v) if *v != expected => return ConditionOutcome::Reject,
                Some(_) => {}
            }
        }
        ConditionOutcome::Success
    }
}

/// If the source's value is in `allowed`: `REJECT` when any sink is null,
/// `SUCCESS` otherwise. If the source's value is not in `allowed` (including
/// when it is null): `NOT_RELEVANT`.
///
/// Mirrors `conditions.py::InSetImpliesNotNullSink.accept`.
#[derive(Debug, Clone)]
pub struct InSetImpliesNotNullSink {
    allowed: Vec<OptionValue>,
}

impl InSetImpliesNotNullSink {
    pub fn new(allowed: Vec<OptionValue>) -> Self {
        Self { allowed }
    }
}

impl Condition for InSetImpliesNotNullSink {
    fn evaluate(&self, tc: &TestContext, source: &str, sinks: &[String]) -> ConditionOutcome {
        let in_set = lookup(tc, source).map(|v| self.allowed.contains(v)).unwrap_or(false);
        if !in_set {
            return ConditionOutcome::NotRelevant;
        }
        if sinks.iter().any(|s| lookup(tc, s).is_none()) {
            ConditionOutcome::Reject
        } else {
            ConditionOutcome::Success
        }
    }
}
