//! Flow facts - per-instruction def/use/transition extraction
//!
//! Pure, stateless functions over single instructions, plus the derived
//! control-flow graph built from the transition facts.

pub mod control_flow;
pub mod definitions;
pub mod transitions;
pub mod usages;

pub use control_flow::{block_successors, build_control_flow_graph, predecessors};
pub use definitions::{definitions, DefinitionExtractor};
pub use transitions::{transitions, TransitionExtractor};
pub use usages::{phi_usages, usages, UsageExtractor};
