//! xg_deps — constraint conditions and the option dependency hypergraph.
//!
//! Builds on [`xg_core`] (the option/value vocabulary) and [`xg_graph`] (the
//! generic hypergraph storage) to implement spec §4.1/§4.3: conditions with
//! three-valued outcomes, a fluent graph builder, and the two-phase
//! compliance check (`EssentialToRun` pre-filter, then an `Important`/
//! `Normal` relevance DFS that prunes a [`xg_core::bundle::TestContext`]
//! down to its relevant options).

#![forbid(unsafe_code)]

pub mod condition;
pub mod errors;
pub mod graph;
pub mod predicate;
pub mod priority;

pub mod prelude {
    pub use crate::condition::{
        CantHappen, Condition, ConditionOutcome, InSetImpliesNotNullSink, NeedsToHappen, RequiresMapping, SimplePairCondition,
    };
    pub use crate::errors::{DependencyError, DependencyResult};
    pub use crate::graph::{EdgePayload, OptionGraph};
    pub use crate::predicate::{Endpoint, Predicate};
    pub use crate::priority::Priority;
}
