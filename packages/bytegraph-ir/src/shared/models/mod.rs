//! IR data model (single source of truth for every analysis)
//!
//! Arena + index ownership: the [`Program`] owns all blocks and variables,
//! everything else holds [`Variable`] / [`BlockId`] indices.

pub mod basic_block;
pub mod instruction;
pub mod program;
pub mod types;
pub mod variable;

pub use basic_block::{BasicBlock, BlockId, Incoming, Phi};
pub use instruction::*;
pub use program::Program;
pub use types::*;
pub use variable::{Variable, VariableInfo};
