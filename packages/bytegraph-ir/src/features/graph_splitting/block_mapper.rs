//! Block-reference rewriting
//!
//! Applies a block remap to every block-typed operand of a basic block:
//! branch/jump/switch targets in the instructions and the source slot of
//! every phi incoming.

use crate::shared::models::*;

pub struct BasicBlockMapper<F>
where
    F: Fn(BlockId) -> BlockId,
{
    map: F,
}

impl<F> BasicBlockMapper<F>
where
    F: Fn(BlockId) -> BlockId,
{
    pub fn new(map: F) -> Self {
        Self { map }
    }

    #[inline]
    pub fn map(&self, block: BlockId) -> BlockId {
        (self.map)(block)
    }

    pub fn transform(&self, block: &mut BasicBlock) {
        for phi in &mut block.phis {
            for incoming in &mut phi.incomings {
                incoming.source = self.map(incoming.source);
            }
        }
        for insn in &mut block.instructions {
            self.transform_instruction(insn);
        }
    }

    pub fn transform_instruction(&self, insn: &mut Instruction) {
        match insn {
            Instruction::Branching(branch) => {
                branch.consequent = self.map(branch.consequent);
                branch.alternative = self.map(branch.alternative);
            }
            Instruction::BinaryBranching(branch) => {
                branch.consequent = self.map(branch.consequent);
                branch.alternative = self.map(branch.alternative);
            }
            Instruction::Jump(jump) => {
                jump.target = self.map(jump.target);
            }
            Instruction::Switch(switch) => {
                for entry in &mut switch.entries {
                    entry.target = self.map(entry.target);
                }
                switch.default_target = self.map(switch.default_target);
            }
            // no block operands
            Instruction::IntegerConstant(_)
            | Instruction::LongConstant(_)
            | Instruction::FloatConstant(_)
            | Instruction::DoubleConstant(_)
            | Instruction::StringConstant(_)
            | Instruction::ClassConstant(_)
            | Instruction::NullConstant(_)
            | Instruction::Assign(_)
            | Instruction::Cast(_)
            | Instruction::CastNumber(_)
            | Instruction::CastInteger(_)
            | Instruction::Binary(_)
            | Instruction::Negate(_)
            | Instruction::Exit(_)
            | Instruction::Raise(_)
            | Instruction::Construct(_)
            | Instruction::ConstructArray(_)
            | Instruction::ConstructMultiArray(_)
            | Instruction::GetField(_)
            | Instruction::PutField(_)
            | Instruction::GetElement(_)
            | Instruction::PutElement(_)
            | Instruction::ArrayLength(_)
            | Instruction::CloneArray(_)
            | Instruction::UnwrapArray(_)
            | Instruction::IsInstance(_)
            | Instruction::InitClass(_)
            | Instruction::Invoke(_)
            | Instruction::InvokeDynamic(_)
            | Instruction::NullCheck(_)
            | Instruction::MonitorEnter(_)
            | Instruction::MonitorExit(_) => {}
        }
    }
}
