//! Infrastructure layer for graphs
//!
//! - **DisjointSet**: union-find with path compression and dense packing
//! - **MutableDirectedGraph**: editable hash-set adjacency, lazy growth
//! - **GraphBuilder / AdjacencyGraph**: build-once, read-only adjacency
//! - **export**: petgraph conversion and DOT dumps

pub mod disjoint_set;
pub mod export;
pub mod graph_builder;
pub mod mutable_graph;

pub use disjoint_set::DisjointSet;
pub use export::{render_dot, to_petgraph};
pub use graph_builder::{AdjacencyGraph, GraphBuilder};
pub use mutable_graph::MutableDirectedGraph;
