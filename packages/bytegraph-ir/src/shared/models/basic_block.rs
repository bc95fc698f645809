//! Basic blocks and phis
//!
//! A block is `phis* instructions*`, with at most one control-transfer
//! instruction, placed last. Successor edges are not stored here; they are
//! derived from the last instruction on demand (see `features::flow_facts`).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::instruction::Instruction;
use super::variable::Variable;

/// Basic block reference (index into `Program::blocks`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(u32);

impl BlockId {
    /// # Panics
    /// If `index` does not fit in `u32`.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        assert!(index <= u32::MAX as usize, "block index does not fit in u32");
        BlockId(index as u32)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One phi operand: the value flowing in when control arrives from `source`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Incoming {
    pub source: BlockId,
    pub value: Variable,
}

/// SSA merge point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phi {
    pub receiver: Variable,
    pub incomings: Vec<Incoming>,
}

impl Phi {
    pub fn new(receiver: Variable) -> Self {
        Self {
            receiver,
            incomings: Vec::new(),
        }
    }

    /// Builder: add an incoming
    pub fn with_incoming(mut self, source: BlockId, value: Variable) -> Self {
        self.incomings.push(Incoming { source, value });
        self
    }
}

/// Basic block owned by a [`Program`](super::program::Program)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicBlock {
    index: BlockId,
    pub phis: Vec<Phi>,
    pub instructions: Vec<Instruction>,
}

impl BasicBlock {
    pub(crate) fn new(index: BlockId) -> Self {
        Self {
            index,
            phis: Vec::new(),
            instructions: Vec::new(),
        }
    }

    #[inline]
    pub fn index(&self) -> BlockId {
        self.index
    }

    pub fn add(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn add_all(&mut self, instructions: impl IntoIterator<Item = Instruction>) {
        self.instructions.extend(instructions);
    }

    /// Insert before the instruction currently at `position`
    ///
    /// # Panics
    /// If `position > instructions.len()`.
    pub fn insert(&mut self, position: usize, instruction: Instruction) {
        self.instructions.insert(position, instruction);
    }

    pub fn add_phi(&mut self, phi: Phi) {
        self.phis.push(phi);
    }

    /// Last instruction, the only one allowed to transfer control
    pub fn last_instruction(&self) -> Option<&Instruction> {
        self.instructions.last()
    }

    pub fn is_empty(&self) -> bool {
        self.phis.is_empty() && self.instructions.is_empty()
    }
}
