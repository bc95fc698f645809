//! Graph builder and the immutable adjacency view it produces
//!
//! Each analysis pass builds a fresh graph: accumulate edges, `build()`,
//! query. The built graph is never edited afterwards.

use serde::{Deserialize, Serialize};

use crate::features::graph::domain::Graph;

#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    successors: Vec<Vec<usize>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-sized to `size` nodes (the graph may still grow past it)
    pub fn with_size(size: usize) -> Self {
        Self {
            successors: vec![Vec::new(); size],
        }
    }

    pub fn add_edge(&mut self, from: usize, to: usize) {
        let needed = from.max(to) + 1;
        if self.successors.len() < needed {
            self.successors.resize_with(needed, Vec::new);
        }
        self.successors[from].push(to);
    }

    /// Finalize: deduplicate, sort, and derive predecessor lists
    pub fn build(self) -> AdjacencyGraph {
        let size = self.successors.len();
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); size];
        let successors: Vec<Box<[usize]>> = self
            .successors
            .into_iter()
            .enumerate()
            .map(|(node, mut targets)| {
                targets.sort_unstable();
                targets.dedup();
                for &target in &targets {
                    predecessors[target].push(node);
                }
                targets.into_boxed_slice()
            })
            .collect();

        AdjacencyGraph {
            successors,
            // nodes are visited in ascending order, so these are already sorted
            predecessors: predecessors
                .into_iter()
                .map(Vec::into_boxed_slice)
                .collect(),
        }
    }
}

/// Read-only adjacency graph with sorted, duplicate-free edge lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyGraph {
    successors: Vec<Box<[usize]>>,
    predecessors: Vec<Box<[usize]>>,
}

impl AdjacencyGraph {
    /// Borrowed successor list (empty for unknown nodes)
    #[inline]
    pub fn successors(&self, node: usize) -> &[usize] {
        self.successors.get(node).map_or(&[][..], |edges| &edges[..])
    }

    /// Borrowed predecessor list (empty for unknown nodes)
    #[inline]
    pub fn predecessors(&self, node: usize) -> &[usize] {
        self.predecessors.get(node).map_or(&[][..], |edges| &edges[..])
    }
}

impl Graph for AdjacencyGraph {
    fn size(&self) -> usize {
        self.successors.len()
    }

    fn incoming_edges(&self, node: usize) -> Vec<usize> {
        self.predecessors(node).to_vec()
    }

    fn outgoing_edges(&self, node: usize) -> Vec<usize> {
        self.successors(node).to_vec()
    }

    fn copy_incoming_edges(&self, node: usize, target: &mut [usize]) -> usize {
        let edges = self.predecessors(node);
        target[..edges.len()].copy_from_slice(edges);
        edges.len()
    }

    fn copy_outgoing_edges(&self, node: usize, target: &mut [usize]) -> usize {
        let edges = self.successors(node);
        target[..edges.len()].copy_from_slice(edges);
        edges.len()
    }

    fn incoming_edges_count(&self, node: usize) -> usize {
        self.predecessors(node).len()
    }

    fn outgoing_edges_count(&self, node: usize) -> usize {
        self.successors(node).len()
    }
}
