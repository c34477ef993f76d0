use xg_graph::{GraphError, Hypergraph};

#[test]
fn rejects_duplicate_vertex() {
    let mut g: Hypergraph<(), ()> = Hypergraph::new();
    g.add_vertex("a", ()).unwrap();
    assert_eq!(g.add_vertex("a", ()).unwrap_err(), GraphError::DuplicateVertex("a".into()));
}

#[test]
fn add_edge_requires_known_endpoints() {
    let mut g: Hypergraph<(), ()> = Hypergraph::new();
    g.add_vertex("a", ()).unwrap();
    let err = g.add_edge("a", vec!["b".to_string()], ()).unwrap_err();
    assert_eq!(err, GraphError::UnknownVertex("b".into()));
}

#[test]
fn successors_and_roots_are_deduplicated_and_ordered() {
    let mut g: Hypergraph<(), &'static str> = Hypergraph::new();
    for v in ["a", "b", "c", "d"] {
        g.add_vertex(v, ()).unwrap();
    }
    g.add_edge("a", vec!["b".into(), "c".into()], "e1").unwrap();
    g.add_edge("a", vec!["c".into(), "d".into()], "e2").unwrap();

    assert_eq!(g.successors("a"), vec!["b", "c", "d"]);
    assert_eq!(g.predecessors("c"), vec!["a"]);

    let roots: Vec<_> = g.roots().map(|(n, _)| n).collect();
    assert_eq!(roots, vec!["a"]);

    // each hyperedge yielded once from in_edges, even though c is a sink of both
    assert_eq!(g.in_edges("c").count(), 2);
}
