//! Property-based tests for graphs and union-find
//!
//! Invariants that should hold for ALL inputs:
//! - add_edge(from, to) ⇒ to ∈ outgoing(from) ∧ from ∈ incoming(to),
//!   whatever order nodes first appear in
//! - builder output agrees with the mutable graph
//! - the copy API agrees with the allocating API, order included
//! - pack() yields dense ids that agree with connected()

use std::collections::BTreeSet;

use bytegraph_ir::features::graph::{DisjointSet, Graph, GraphBuilder, MutableDirectedGraph};
use proptest::prelude::*;

fn edges_strategy() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..64, 0usize..64), 0..200)
}

#[test]
fn test_out_of_order_growth() {
    let mut graph = MutableDirectedGraph::new();
    graph.add_edge(5, 1);

    assert_eq!(graph.size(), 6);
    assert_eq!(graph.outgoing_edges(5), vec![1]);
    assert_eq!(graph.incoming_edges(1), vec![5]);
    for node in [0, 2, 3, 4] {
        assert!(graph.outgoing_edges(node).is_empty());
        assert!(graph.incoming_edges(node).is_empty());
    }
}

#[test]
fn test_copy_api_reports_count() {
    let mut builder = GraphBuilder::new();
    builder.add_edge(0, 3);
    builder.add_edge(0, 1);
    builder.add_edge(0, 3);
    let graph = builder.build();

    let mut buffer = [usize::MAX; 8];
    assert_eq!(graph.copy_outgoing_edges(0, &mut buffer), 2);
    assert_eq!(&buffer[..2], &[1, 3]);
    assert_eq!(buffer[2], usize::MAX);
}

proptest! {
    #[test]
    fn prop_added_edges_are_visible_both_ways(edges in edges_strategy()) {
        let mut graph = MutableDirectedGraph::new();
        for &(from, to) in &edges {
            graph.add_edge(from, to);
        }

        let expected_size = edges.iter().map(|&(from, to)| from.max(to) + 1).max().unwrap_or(0);
        prop_assert_eq!(graph.size(), expected_size);
        for &(from, to) in &edges {
            prop_assert!(graph.outgoing_edges(from).contains(&to));
            prop_assert!(graph.incoming_edges(to).contains(&from));
            prop_assert!(graph.has_edge(from, to));
        }

        let distinct: BTreeSet<(usize, usize)> = edges.iter().copied().collect();
        prop_assert_eq!(graph.edge_count(), distinct.len());
    }

    #[test]
    fn prop_builder_matches_mutable_graph(edges in edges_strategy()) {
        let mut mutable = MutableDirectedGraph::new();
        let mut builder = GraphBuilder::new();
        for &(from, to) in &edges {
            mutable.add_edge(from, to);
            builder.add_edge(from, to);
        }
        let built = builder.build();

        prop_assert_eq!(built.size(), mutable.size());
        for node in 0..built.size() {
            prop_assert_eq!(built.outgoing_edges(node), mutable.outgoing_edges(node));
            prop_assert_eq!(built.incoming_edges(node), mutable.incoming_edges(node));
            prop_assert_eq!(built.outgoing_edges_count(node), mutable.outgoing_edges_count(node));
            prop_assert_eq!(built.incoming_edges_count(node), mutable.incoming_edges_count(node));
        }
    }

    #[test]
    fn prop_copy_api_matches_allocating_api(edges in edges_strategy()) {
        let mut graph = MutableDirectedGraph::new();
        for &(from, to) in &edges {
            graph.add_edge(from, to);
        }

        let mut buffer = vec![0; graph.size()];
        for node in 0..graph.size() {
            let count = graph.copy_incoming_edges(node, &mut buffer);
            prop_assert_eq!(&buffer[..count], &graph.incoming_edges(node)[..]);

            let count = graph.copy_outgoing_edges(node, &mut buffer);
            prop_assert_eq!(&buffer[..count], &graph.outgoing_edges(node)[..]);
        }

        let copy = MutableDirectedGraph::from_graph(&graph);
        prop_assert_eq!(copy.size(), graph.size());
        prop_assert_eq!(copy.edge_count(), graph.edge_count());
    }

    #[test]
    fn prop_removed_edges_disappear(edges in edges_strategy()) {
        let mut graph = MutableDirectedGraph::new();
        for &(from, to) in &edges {
            graph.add_edge(from, to);
        }
        for &(from, to) in &edges {
            graph.remove_edge(from, to);
            prop_assert!(!graph.outgoing_edges(from).contains(&to));
            prop_assert!(!graph.incoming_edges(to).contains(&from));
        }
        prop_assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn prop_pack_is_dense_and_agrees_with_connected(
        size in 1usize..100,
        unions in prop::collection::vec((0usize..100, 0usize..100), 0..150),
    ) {
        let mut set = DisjointSet::with_size(size);
        for &(a, b) in &unions {
            set.union(a % size, b % size);
        }

        let packed = set.pack(size);
        prop_assert_eq!(packed.len(), size);

        let distinct: BTreeSet<usize> = packed.iter().copied().collect();
        let class_count = distinct.len();
        prop_assert_eq!(distinct, (0..class_count).collect::<BTreeSet<_>>());
        prop_assert_eq!(set.class_count(), class_count);

        for a in 0..size {
            for b in 0..size {
                prop_assert_eq!(packed[a] == packed[b], set.connected(a, b));
            }
        }
    }
}
