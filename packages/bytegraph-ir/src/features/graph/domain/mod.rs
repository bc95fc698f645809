//! Graph domain - the read interface shared by every graph implementation

/// Int-indexed directed graph
///
/// Nodes are `0..size()`. Querying a node `>= size()` yields no edges.
pub trait Graph {
    fn size(&self) -> usize;

    fn incoming_edges(&self, node: usize) -> Vec<usize>;

    fn outgoing_edges(&self, node: usize) -> Vec<usize>;

    /// Write predecessors of `node` into `target`, returning how many were written
    ///
    /// # Panics
    /// If `target` is shorter than `incoming_edges_count(node)`.
    fn copy_incoming_edges(&self, node: usize, target: &mut [usize]) -> usize;

    /// Write successors of `node` into `target`, returning how many were written
    ///
    /// # Panics
    /// If `target` is shorter than `outgoing_edges_count(node)`.
    fn copy_outgoing_edges(&self, node: usize, target: &mut [usize]) -> usize;

    fn incoming_edges_count(&self, node: usize) -> usize;

    fn outgoing_edges_count(&self, node: usize) -> usize;

    /// Total edge count
    fn edge_count(&self) -> usize {
        (0..self.size()).map(|node| self.outgoing_edges_count(node)).sum()
    }
}
