//! Null-check insertion
//!
//! Makes the implicit null check of virtual dispatch explicit:
//!
//! ```text
//! before:  v3 = invoke virtual A.f(v1) on v0
//! after:   v7 = nullcheck v0
//!          v3 = invoke virtual A.f(v1) on v7
//! ```
//!
//! Only appends variables. Escape analysis coalesces `v7` with `v0`
//! through the null-check, so escape facts are unchanged.

use crate::errors::Result;
use crate::shared::models::*;

pub struct NullCheckInsertion {
    kinds: Vec<InvocationType>,
}

impl Default for NullCheckInsertion {
    fn default() -> Self {
        Self::new(vec![InvocationType::Virtual])
    }
}

impl NullCheckInsertion {
    pub fn new(kinds: Vec<InvocationType>) -> Self {
        Self { kinds }
    }

    /// Insert checks into every block; returns the number inserted
    pub fn apply(&self, program: &mut Program) -> Result<usize> {
        let mut inserted = 0;
        for index in 0..program.basic_block_count() {
            inserted += self.apply_to_block(program, BlockId::from_index(index))?;
        }
        tracing::debug!(inserted, "null checks inserted");
        Ok(inserted)
    }

    fn apply_to_block(&self, program: &mut Program, block: BlockId) -> Result<usize> {
        let targets: Vec<(usize, Variable)> = program
            .basic_block_at(block)?
            .instructions
            .iter()
            .enumerate()
            .filter_map(|(position, insn)| match insn {
                Instruction::Invoke(invoke) if self.kinds.contains(&invoke.kind) => {
                    invoke.instance.map(|instance| (position, instance))
                }
                _ => None,
            })
            .collect();

        // Back to front, so earlier positions stay valid while inserting
        for &(position, instance) in targets.iter().rev() {
            let checked = program.create_variable();
            let basic_block = program.basic_block_at_mut(block)?;
            if let Instruction::Invoke(invoke) = &mut basic_block.instructions[position] {
                invoke.instance = Some(checked);
            }
            basic_block.insert(
                position,
                Instruction::NullCheck(NullCheckInstruction {
                    receiver: checked,
                    value: instance,
                }),
            );
        }
        Ok(targets.len())
    }
}
