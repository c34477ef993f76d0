//! Hyperedge priority (spec §3 "Option dependency hypergraph", §4.3).

/// A hyperedge's priority governs which pass of the two-phase compliance
/// check (§4.3) considers it. `EssentialToRun` edges are the cheap phase-1
/// pre-filter; `Important` and `Normal` edges are both walked during the
/// phase-2 relevance DFS, `Important` ones additionally deciding which
/// vertices seed that walk (a vertex that is the sink of an `Important`
/// edge is never itself a seed — it must be reached).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    EssentialToRun,
    Important,
    Normal,
}
