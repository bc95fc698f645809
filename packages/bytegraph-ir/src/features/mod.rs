//! Feature modules
//!
//! Bottom-up: `flow_facts` and `graph` have no feature dependencies,
//! `validation` builds on `flow_facts`, the analyses and transforms build
//! on all three.

pub mod flow_facts;
pub mod graph;
pub mod validation;

pub mod escape_analysis;
pub mod graph_splitting;
pub mod null_check;
