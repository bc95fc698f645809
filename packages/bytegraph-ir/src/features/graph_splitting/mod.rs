//! Graph splitting - duplicate shared regions of the CFG
//!
//! Used to turn irreducible control flow into reducible control flow by
//! giving each entry its own copy of a region.

pub mod block_mapper;
pub mod node_splitting;
pub mod ports;

pub use block_mapper::BasicBlockMapper;
pub use node_splitting::ProgramNodeSplittingBackend;
pub use ports::GraphSplittingBackend;
