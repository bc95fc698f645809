//! # Graph utilities
//!
//! Int-indexed graphs and union-find used by the dataflow analyses and
//! by CFG restructuring. Node indices are block or variable numbers taken
//! straight from the [`Program`](crate::shared::models::Program) arena.

pub mod domain;
pub mod infrastructure;

pub use domain::Graph;
pub use infrastructure::{
    render_dot, to_petgraph, AdjacencyGraph, DisjointSet, GraphBuilder, MutableDirectedGraph,
};
