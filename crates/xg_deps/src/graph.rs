//! The option dependency hypergraph itself (spec §3/§4.3, C4): a fluent
//! builder over `xg_graph::Hypergraph<OptionDef, EdgePayload>`, plus the
//! two-phase compliance check.
//!
//! Grounded on `original_source/PhdTester/phdTester/options_builder.py` for
//! the builder's method names and shape (`add_flag`/`add_choice`/`add_value`
//! /`add_multivalue`, `constraint_*`), and on `conditions.py`'s priority
//! model for the compliance algorithm.

use std::fmt;

use indexmap::IndexSet;

use xg_core::bundle::TestContext;
use xg_core::option::{Belonging, OptionDef};
use xg_core::value::{OptionValue, ValueType};
use xg_graph::Hypergraph;

use crate::condition::{CantHappen, Condition, ConditionOutcome, InSetImpliesNotNullSink, NeedsToHappen, SimplePairCondition};
use crate::errors::{DependencyError, DependencyResult};
use crate::predicate::Predicate;
use crate::priority::Priority;

/// Everything hung off a hyperedge besides its (source, sinks) endpoints.
pub struct EdgePayload {
    pub condition: Box<dyn Condition + Send + Sync>,
    /// A `REJECT` from a required edge fails the whole test context; a
    /// `REJECT` from a non-required (advisory) edge is simply not a reason
    /// to extend relevance through it.
    pub required: bool,
    /// On `SUCCESS`, whether the DFS should continue into this edge's sinks.
    pub enable_sink_visit: bool,
    pub priority: Priority,
}

impl fmt::Debug for EdgePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgePayload")
            .field("condition", &"<condition>")
            .field("required", &self.required)
            .field("enable_sink_visit", &self.enable_sink_visit)
            .field("priority", &self.priority)
            .finish()
    }
}

/// Splits a name list into (source, sinks) for constraints that relate N
/// options without one naturally distinguished source. A single-name
/// constraint becomes a self-edge (`source == sinks[0]`), which satisfies
/// the hypergraph's "at least one sink" invariant while still letting the
/// condition see exactly the one option it cares about.
fn source_and_sinks(names: &[String]) -> DependencyResult<(String, Vec<String>)> {
    match names.split_first() {
        None => Err(DependencyError::EmptyConstraint),
        Some((first, [])) => Ok((first.clone(), vec![first.clone()])),
        Some((first, rest)) => Ok((first.clone(), rest.to_vec())),
    }
}

/// The option dependency hypergraph: option definitions as vertices,
/// `EdgePayload`-carrying hyperedges as constraints between them.
#[derive(Debug)]
pub struct OptionGraph {
    graph: Hypergraph<OptionDef, EdgePayload>,
}

impl Default for OptionGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionGraph {
    pub fn new() -> Self {
        Self { graph: Hypergraph::new() }
    }

    fn add_option(&mut self, def: OptionDef) -> DependencyResult<()> {
        let name = def.name.clone();
        self.graph.add_vertex(name, def).map_err(DependencyError::from)
    }

    /// A `Bool`-typed option with no enumerated domain.
    pub fn add_flag(&mut self, name: impl Into<String>, description: impl Into<String>, belonging: Belonging) -> DependencyResult<()> {
        self.add_option(OptionDef::new(name, description, ValueType::Bool, belonging))
    }

    /// A scalar option restricted to an enumerated domain; the domain's
    /// first element fixes the option's [`ValueType`].
    pub fn add_choice(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        belonging: Belonging,
        domain: Vec<OptionValue>,
    ) -> DependencyResult<()> {
        let value_type = domain.first().map(|v| v.value_type()).unwrap_or(ValueType::Str);
        self.add_option(OptionDef::new(name, description, value_type, belonging).with_domain(domain))
    }

    /// A scalar option of the given type with no enumerated domain.
    pub fn add_value(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        belonging: Belonging,
        value_type: ValueType,
    ) -> DependencyResult<()> {
        self.add_option(OptionDef::new(name, description, value_type, belonging))
    }

    /// A list-typed option (one of the `*List` [`ValueType`] variants).
    pub fn add_multivalue(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        belonging: Belonging,
        value_type: ValueType,
    ) -> DependencyResult<()> {
        debug_assert!(value_type.is_list(), "add_multivalue expects a *List value type");
        self.add_option(OptionDef::new(name, description, value_type, belonging))
    }

    pub fn option_def(&self, name: &str) -> DependencyResult<&OptionDef> {
        self.graph.get_vertex(name).map_err(DependencyError::from)
    }

    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.graph.vertices().map(|(n, _)| n)
    }

    fn add_constraint(&mut self, source: String, sinks: Vec<String>, payload: EdgePayload) -> DependencyResult<()> {
        self.graph.add_edge(source, sinks, payload).map(|_| ()).map_err(DependencyError::from)
    }

    /// IMPORTANT: if `source`'s value is in `values`, `target` must be non-null.
    pub fn constraint_option_value_needs_option(
        &mut self,
        source: impl Into<String>,
        values: Vec<OptionValue>,
        target: impl Into<String>,
    ) -> DependencyResult<()> {
        self.add_constraint(
            source.into(),
            vec![target.into()],
            EdgePayload {
                condition: Box::new(InSetImpliesNotNullSink::new(values)),
                required: true,
                enable_sink_visit: true,
                priority: Priority::Important,
            },
        )
    }

    /// NORMAL: `target` is only meaningful (and must satisfy `predicate`
    /// against `source`) once `source` is itself relevant. `predicate` sees
    /// `[(source, source_value), (target, target_value)]`.
    pub fn constraint_option_usable_only_when(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        predicate: Predicate,
    ) -> DependencyResult<()> {
        self.add_constraint(
            source.into(),
            vec![target.into()],
            EdgePayload {
                condition: Box::new(SimplePairCondition::new(predicate, ConditionOutcome::Success, ConditionOutcome::Reject)),
                required: true,
                enable_sink_visit: true,
                priority: Priority::Normal,
            },
        )
    }

    /// NORMAL: `predicate` (over all of `names`) must hold whenever every
    /// name in `names` is relevant.
    pub fn constraint_multiple_needs_to_happen(&mut self, names: Vec<String>, predicate: Predicate) -> DependencyResult<()> {
        let (source, sinks) = source_and_sinks(&names)?;
        self.add_constraint(
            source,
            sinks,
            EdgePayload {
                condition: Box::new(NeedsToHappen::new(predicate)),
                required: true,
                enable_sink_visit: false,
                priority: Priority::Normal,
            },
        )
    }

    /// NORMAL: `predicate` (over all of `names`) must never hold.
    pub fn constraint_multiple_cant_happen(&mut self, names: Vec<String>, predicate: Predicate) -> DependencyResult<()> {
        let (source, sinks) = source_and_sinks(&names)?;
        self.add_constraint(
            source,
            sinks,
            EdgePayload {
                condition: Box::new(CantHappen::new(predicate)),
                required: true,
                enable_sink_visit: false,
                priority: Priority::Normal,
            },
        )
    }

    /// NORMAL: the exact combination of values in `combo` must never occur together.
    pub fn constraint_prohibit_combination(&mut self, combo: Vec<(String, OptionValue)>) -> DependencyResult<()> {
        let names: Vec<String> = combo.iter().map(|(n, _)| n.clone()).collect();
        let predicate = Predicate::And(combo.into_iter().map(|(n, v)| Predicate::ValueEquals(n, v)).collect());
        self.constraint_multiple_cant_happen(names, predicate)
    }

    /// NORMAL: whenever every name in `combo` is relevant, that exact
    /// combination of values must hold.
    pub fn constraint_ensure_combination(&mut self, combo: Vec<(String, OptionValue)>) -> DependencyResult<()> {
        let names: Vec<String> = combo.iter().map(|(n, _)| n.clone()).collect();
        let predicate = Predicate::And(combo.into_iter().map(|(n, v)| Predicate::ValueEquals(n, v)).collect());
        self.constraint_multiple_needs_to_happen(names, predicate)
    }

    /// ESSENTIAL_TO_RUN: a cheap pre-filter, checked against the raw
    /// (un-pruned) test context before the relevance pass even runs.
    pub fn constraint_quick_which_has_to_happen(&mut self, names: Vec<String>, predicate: Predicate) -> DependencyResult<()> {
        let (source, sinks) = source_and_sinks(&names)?;
        self.add_constraint(
            source,
            sinks,
            EdgePayload {
                condition: Box::new(NeedsToHappen::new(predicate)),
                required: true,
                enable_sink_visit: false,
                priority: Priority::EssentialToRun,
            },
        )
    }

    /// ESSENTIAL_TO_RUN: the cheap-pre-filter counterpart of [`Self::constraint_multiple_cant_happen`].
    pub fn constraint_quick_cannot_to_happen(&mut self, names: Vec<String>, predicate: Predicate) -> DependencyResult<()> {
        let (source, sinks) = source_and_sinks(&names)?;
        self.add_constraint(
            source,
            sinks,
            EdgePayload {
                condition: Box::new(CantHappen::new(predicate)),
                required: true,
                enable_sink_visit: false,
                priority: Priority::EssentialToRun,
            },
        )
    }

    /// Phase 1 (spec §4.3): walk every `EssentialToRun` edge against the raw
    /// context. A `REJECT` from a required edge fails the context.
    fn essential_pass(&self, tc: &TestContext) -> bool {
        for (_, edge) in self.graph.edges() {
            if edge.payload.priority != Priority::EssentialToRun {
                continue;
            }
            let outcome = edge.payload.condition.evaluate(tc, &edge.source, &edge.sinks);
            if edge.payload.required && outcome == ConditionOutcome::Reject {
                return false;
            }
        }
        true
    }

    /// Phase 2 (spec §4.3): DFS from every vertex that is not the sink of
    /// any `Important` in-edge, walking `Important`/`Normal` edges. Returns
    /// the set of names found relevant, or `Err` if a required edge rejected.
    fn relevance_pass(&self, tc: &TestContext) -> Result<IndexSet<String>, ()> {
        let mut important_sinks: IndexSet<String> = IndexSet::new();
        for (_, edge) in self.graph.edges() {
            if edge.payload.priority == Priority::Important {
                important_sinks.extend(edge.sinks.iter().cloned());
            }
        }

        let seeds: Vec<String> = self
            .graph
            .vertices()
            .map(|(n, _)| n.to_string())
            .filter(|n| !important_sinks.contains(n))
            .collect();

        let mut relevant: IndexSet<String> = seeds.iter().cloned().collect();
        let mut visited: IndexSet<String> = IndexSet::new();
        for seed in &seeds {
            self.visit(seed, tc, &mut relevant, &mut visited)?;
        }
        Ok(relevant)
    }

    fn visit(&self, v: &str, tc: &TestContext, relevant: &mut IndexSet<String>, visited: &mut IndexSet<String>) -> Result<(), ()> {
        if !visited.insert(v.to_string()) {
            return Ok(());
        }
        for (_, edge) in self.graph.out_edges(v) {
            if edge.payload.priority == Priority::EssentialToRun {
                continue;
            }
            let outcome = edge.payload.condition.evaluate(tc, &edge.source, &edge.sinks);
            match outcome {
                ConditionOutcome::NotRelevant => continue,
                ConditionOutcome::Reject => {
                    if edge.payload.required {
                        return Err(());
                    }
                }
                ConditionOutcome::Success => {
                    if edge.payload.enable_sink_visit {
                        for sink in &edge.sinks {
                            relevant.insert(sink.clone());
                            self.visit(sink, tc, relevant, visited)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Run the full two-phase compliance check (spec §4.3). `None` means the
    /// context is uncompliant and should be dropped; `Some` carries a clone
    /// of `tc` with every option outside the relevant set nulled out.
    pub fn check_compliance(&self, tc: &TestContext) -> Option<TestContext> {
        if !self.essential_pass(tc) {
            return None;
        }
        let relevant = self.relevance_pass(tc).ok()?;
        let mut pruned = tc.clone();
        pruned.prune_to_relevant(&relevant);
        Some(pruned)
    }
}
