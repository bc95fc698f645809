//! Debug export of analysis graphs through petgraph
//!
//! Used when dumping the reference graph or CFG of a misbehaving method.

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};

use crate::features::graph::domain::Graph;

/// Convert to a petgraph `DiGraph` whose node weights are the original indices
pub fn to_petgraph<G: Graph + ?Sized>(graph: &G) -> DiGraph<usize, ()> {
    let mut exported = DiGraph::with_capacity(graph.size(), graph.edge_count());
    for node in 0..graph.size() {
        exported.add_node(node);
    }
    for node in 0..graph.size() {
        for target in graph.outgoing_edges(node) {
            exported.add_edge(NodeIndex::new(node), NodeIndex::new(target), ());
        }
    }
    exported
}

/// Graphviz DOT rendering
pub fn render_dot<G: Graph + ?Sized>(graph: &G) -> String {
    let exported = to_petgraph(graph);
    format!("{:?}", Dot::with_config(&exported, &[Config::EdgeNoLabel]))
}
