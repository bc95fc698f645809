//! Mutable directed graph with hash-set adjacency
//!
//! Node storage grows lazily: `add_edge(5, 1)` on an empty graph creates
//! nodes `0..=5`, the ones never mentioned getting empty adjacency sets.
//! Multi-edges collapse (adjacency is a set).

use rustc_hash::FxHashSet;

use crate::features::graph::domain::Graph;

#[derive(Debug, Clone, Default)]
pub struct MutableDirectedGraph {
    successors: Vec<FxHashSet<usize>>,
    predecessors: Vec<FxHashSet<usize>>,
}

impl MutableDirectedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of any graph, read through the zero-allocation copy API
    pub fn from_graph<G: Graph + ?Sized>(graph: &G) -> Self {
        let mut copy = Self::new();
        let mut buffer = Vec::new();
        for node in 0..graph.size() {
            buffer.resize(graph.outgoing_edges_count(node), 0);
            let count = graph.copy_outgoing_edges(node, &mut buffer);
            for &target in &buffer[..count] {
                copy.add_edge(node, target);
            }
        }
        // isolated trailing nodes still count toward size
        copy.grow(graph.size());
        copy
    }

    pub fn add_edge(&mut self, from: usize, to: usize) {
        self.grow(from.max(to) + 1);
        self.successors[from].insert(to);
        self.predecessors[to].insert(from);
    }

    /// Returns whether the edge existed
    pub fn remove_edge(&mut self, from: usize, to: usize) -> bool {
        if from >= self.successors.len() || to >= self.predecessors.len() {
            return false;
        }
        self.predecessors[to].remove(&from);
        self.successors[from].remove(&to)
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.successors
            .get(from)
            .map_or(false, |targets| targets.contains(&to))
    }

    fn grow(&mut self, size: usize) {
        while self.successors.len() < size {
            self.successors.push(FxHashSet::default());
            self.predecessors.push(FxHashSet::default());
        }
    }

    fn sorted(set: Option<&FxHashSet<usize>>) -> Vec<usize> {
        let mut edges: Vec<usize> = set.map_or_else(Vec::new, |s| s.iter().copied().collect());
        edges.sort_unstable();
        edges
    }

    /// Same ascending order as the allocating queries
    fn copy_into(set: Option<&FxHashSet<usize>>, target: &mut [usize]) -> usize {
        let mut index = 0;
        if let Some(set) = set {
            for &node in set {
                target[index] = node;
                index += 1;
            }
        }
        target[..index].sort_unstable();
        index
    }
}

impl Graph for MutableDirectedGraph {
    fn size(&self) -> usize {
        self.successors.len()
    }

    /// Sorted ascending for determinism
    fn incoming_edges(&self, node: usize) -> Vec<usize> {
        Self::sorted(self.predecessors.get(node))
    }

    /// Sorted ascending for determinism
    fn outgoing_edges(&self, node: usize) -> Vec<usize> {
        Self::sorted(self.successors.get(node))
    }

    fn copy_incoming_edges(&self, node: usize, target: &mut [usize]) -> usize {
        Self::copy_into(self.predecessors.get(node), target)
    }

    fn copy_outgoing_edges(&self, node: usize, target: &mut [usize]) -> usize {
        Self::copy_into(self.successors.get(node), target)
    }

    fn incoming_edges_count(&self, node: usize) -> usize {
        self.predecessors.get(node).map_or(0, |set| set.len())
    }

    fn outgoing_edges_count(&self, node: usize) -> usize {
        self.successors.get(node).map_or(0, |set| set.len())
    }
}
