//! Program - the method-body arena
//!
//! Owns every block and variable of one method. Creation is append-only:
//! indices are dense (`0..count`), assigned in creation order and never
//! renumbered or reclaimed, which is what lets union-find and graph code
//! index flat arrays by variable/block number.

use serde::{Deserialize, Serialize};

use super::basic_block::{BasicBlock, BlockId};
use super::variable::{Variable, VariableInfo};
use crate::errors::{IrError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    blocks: Vec<BasicBlock>,
    variables: Vec<VariableInfo>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Program with `count` anonymous variables pre-allocated
    /// (the front end's parameter slots, typically)
    pub fn with_variables(count: usize) -> Self {
        let mut program = Self::new();
        for _ in 0..count {
            program.create_variable();
        }
        program
    }

    pub fn create_variable(&mut self) -> Variable {
        let var = Variable::from_index(self.variables.len());
        self.variables.push(VariableInfo::default());
        var
    }

    pub fn create_named_variable(&mut self, debug_name: impl Into<String>) -> Variable {
        let var = self.create_variable();
        self.variables[var.index()].debug_name = Some(debug_name.into());
        var
    }

    pub fn create_basic_block(&mut self) -> BlockId {
        let id = BlockId::from_index(self.blocks.len());
        self.blocks.push(BasicBlock::new(id));
        id
    }

    #[inline]
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    #[inline]
    pub fn basic_block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn variable_at(&self, var: Variable) -> Result<&VariableInfo> {
        self.variables.get(var.index()).ok_or_else(|| {
            IrError::dangling_variable(var.index(), self.variables.len(), "variable lookup")
        })
    }

    pub fn basic_block_at(&self, id: BlockId) -> Result<&BasicBlock> {
        let count = self.blocks.len();
        self.blocks
            .get(id.index())
            .ok_or_else(|| IrError::dangling_block(id.index(), count, "block lookup"))
    }

    pub fn basic_block_at_mut(&mut self, id: BlockId) -> Result<&mut BasicBlock> {
        let count = self.blocks.len();
        self.blocks
            .get_mut(id.index())
            .ok_or_else(|| IrError::dangling_block(id.index(), count, "block lookup"))
    }

    /// Blocks in index order
    pub fn basic_blocks(&self) -> impl Iterator<Item = &BasicBlock> {
        self.blocks.iter()
    }

    /// Fail with a dangling-variable error unless `var` belongs to this program
    ///
    /// `context` is only evaluated on failure.
    #[inline]
    pub fn check_variable<S: Into<String>>(&self, var: Variable, context: impl FnOnce() -> S) -> Result<usize> {
        if var.index() < self.variables.len() {
            Ok(var.index())
        } else {
            Err(IrError::dangling_variable(
                var.index(),
                self.variables.len(),
                context(),
            ))
        }
    }

    /// Fail with a dangling-block error unless `id` belongs to this program
    ///
    /// `context` is only evaluated on failure.
    #[inline]
    pub fn check_block<S: Into<String>>(&self, id: BlockId, context: impl FnOnce() -> S) -> Result<usize> {
        if id.index() < self.blocks.len() {
            Ok(id.index())
        } else {
            Err(IrError::dangling_block(id.index(), self.blocks.len(), context()))
        }
    }
}
