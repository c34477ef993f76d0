//! xg_graph — generic multi-directed hypergraph (spec §4.2, C2).
//!
//! Vertices are keyed by a stable `String` id (the option dependency graph,
//! `xg_deps`, keys them by option name). A hyperedge has one source and one
//! or more sinks and carries an arbitrary payload `E` — `xg_deps` hangs a
//! `Condition` + priority off of that payload.
//!
//! Grounded on `original_source/PhdTester/phdTester/graph.py`'s
//! `IMultiDirectedGraph`/hyperedge-capable variant, generalized from Python's
//! duck-typed vertex/edge payloads to Rust generics, and cross-checked
//! against `AmusedPolecat89-ASM`'s `asm-graph` crate for the idiomatic
//! newtype-id / builder shape of a from-scratch Rust graph type.

#![forbid(unsafe_code)]

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("duplicate vertex: {0}")]
    DuplicateVertex(String),
    #[error("unknown vertex: {0}")]
    UnknownVertex(String),
    #[error("hyperedge needs at least one sink")]
    EmptySinks,
}

pub type GraphResult<T> = Result<T, GraphError>;

/// A hyperedge: one source, one or more sinks, and a caller-supplied payload.
#[derive(Debug, Clone)]
pub struct HyperEdge<E> {
    pub source: String,
    pub sinks: Vec<String>,
    pub payload: E,
}

/// Stable index of a hyperedge within a [`Hypergraph`]'s insertion-ordered edge list.
pub type EdgeIndex = usize;

/// A typed, multi-directed hypergraph. Vertices are unique by name; between
/// the same `(source, sinks)` pair, multiple edges are allowed as long as
/// their payloads differ in meaning to the caller (we never deduplicate edges).
#[derive(Debug, Clone)]
pub struct Hypergraph<V, E> {
    vertices: IndexMap<String, V>,
    edges: Vec<HyperEdge<E>>,
    out_index: IndexMap<String, Vec<EdgeIndex>>,
    in_index: IndexMap<String, Vec<EdgeIndex>>,
}

impl<V, E> Default for Hypergraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> Hypergraph<V, E> {
    pub fn new() -> Self {
        Self {
            vertices: IndexMap::new(),
            edges: Vec::new(),
            out_index: IndexMap::new(),
            in_index: IndexMap::new(),
        }
    }

    /// Insert a vertex. Rejects a duplicate id.
    pub fn add_vertex(&mut self, id: impl Into<String>, payload: V) -> GraphResult<()> {
        let id = id.into();
        if self.vertices.contains_key(&id) {
            return Err(GraphError::DuplicateVertex(id));
        }
        self.vertices.insert(id.clone(), payload);
        self.out_index.entry(id.clone()).or_default();
        self.in_index.entry(id).or_default();
        Ok(())
    }

    pub fn contains_vertex(&self, id: &str) -> bool {
        self.vertices.contains_key(id)
    }

    pub fn get_vertex(&self, id: &str) -> GraphResult<&V> {
        self.vertices.get(id).ok_or_else(|| GraphError::UnknownVertex(id.to_string()))
    }

    pub fn vertices(&self) -> impl Iterator<Item = (&str, &V)> {
        self.vertices.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Append a hyperedge. Endpoints (`source` and every sink) must already
    /// exist (spec §3 hypergraph invariant: "a hyperedge's endpoints all
    /// exist"). Returns the new edge's stable index.
    pub fn add_edge(&mut self, source: impl Into<String>, sinks: Vec<String>, payload: E) -> GraphResult<EdgeIndex> {
        let source = source.into();
        if sinks.is_empty() {
            return Err(GraphError::EmptySinks);
        }
        if !self.vertices.contains_key(&source) {
            return Err(GraphError::UnknownVertex(source));
        }
        for sink in &sinks {
            if !self.vertices.contains_key(sink) {
                return Err(GraphError::UnknownVertex(sink.clone()));
            }
        }
        let idx = self.edges.len();
        self.out_index.entry(source.clone()).or_default().push(idx);
        for sink in &sinks {
            self.in_index.entry(sink.clone()).or_default().push(idx);
        }
        self.edges.push(HyperEdge { source, sinks, payload });
        Ok(idx)
    }

    pub fn edge(&self, idx: EdgeIndex) -> &HyperEdge<E> {
        &self.edges[idx]
    }

    /// Hyperedges whose source is `v`, insertion order — yields each edge once.
    pub fn out_edges(&self, v: &str) -> impl Iterator<Item = (EdgeIndex, &HyperEdge<E>)> {
        self.out_index
            .get(v)
            .into_iter()
            .flatten()
            .map(move |&idx| (idx, &self.edges[idx]))
    }

    /// Hyperedges having `v` among their sinks, insertion order — yields each edge once.
    pub fn in_edges(&self, v: &str) -> impl Iterator<Item = (EdgeIndex, &HyperEdge<E>)> {
        self.in_index
            .get(v)
            .into_iter()
            .flatten()
            .map(move |&idx| (idx, &self.edges[idx]))
    }

    /// Deduplicated sink vertices reachable by a single hyperedge from `v`,
    /// in first-seen (insertion) order.
    pub fn successors(&self, v: &str) -> Vec<&str> {
        let mut seen = IndexSet::new();
        for (_, edge) in self.out_edges(v) {
            for sink in &edge.sinks {
                seen.insert(sink.as_str());
            }
        }
        seen.into_iter().collect()
    }

    /// Deduplicated source vertices with a hyperedge into `v`, in first-seen order.
    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        let mut seen = IndexSet::new();
        for (_, edge) in self.in_edges(v) {
            seen.insert(edge.source.as_str());
        }
        seen.into_iter().collect()
    }

    /// Vertices with no in-edge, in insertion order — used as DFS seeds.
    pub fn roots(&self) -> impl Iterator<Item = (&str, &V)> {
        self.vertices().filter(move |(name, _)| {
            self.in_index.get(*name).map(|v| v.is_empty()).unwrap_or(true)
        })
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeIndex, &HyperEdge<E>)> {
        self.edges.iter().enumerate()
    }
}
