/*
 * IR Verifier
 *
 * Detects malformed IR before an analysis trusts it:
 * - dangling variable / block operands
 * - operand shape that contradicts the variant (arity)
 * - control transfer anywhere but the last slot of a block
 * - phi incomings that disagree with the derived CFG
 *
 * Phi checks only apply to blocks reachable from the entry block (#0):
 * node splitting leaves the original blocks behind as dead code whose
 * phis legitimately go stale.
 */

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::errors::{IrError, Result};
use crate::features::flow_facts::{
    build_control_flow_graph, definitions, phi_usages, transitions, usages,
};
use crate::features::graph::AdjacencyGraph;
use crate::shared::models::*;

/// Range-check every variable and block operand in the program
///
/// Cheap enough to run in front of every analysis; afterwards, indexing
/// flat per-variable arrays by operand index cannot go out of bounds.
pub fn verify_operands(program: &Program) -> Result<()> {
    for block in program.basic_blocks() {
        let block_index = block.index().index();
        for phi in &block.phis {
            program.check_variable(phi.receiver, || format!("phi receiver in block #{block_index}"))?;
            for var in phi_usages(phi) {
                program.check_variable(var, || format!("phi incoming value in block #{block_index}"))?;
            }
            for incoming in &phi.incomings {
                program.check_block(incoming.source, || {
                    format!("phi incoming source in block #{block_index}")
                })?;
            }
        }

        for (position, insn) in block.instructions.iter().enumerate() {
            let context = || {
                format!(
                    "{} at block #{block_index}, position {position}",
                    insn.kind_name()
                )
            };
            for var in definitions(insn).into_iter().chain(usages(insn)) {
                program.check_variable(var, context)?;
            }
            for target in transitions(insn).unwrap_or_default() {
                program.check_block(target, context)?;
            }
        }
    }
    Ok(())
}

/// Full structural verification
pub fn verify_program(program: &Program) -> Result<()> {
    verify_operands(program)?;

    for block in program.basic_blocks() {
        let block_index = block.index().index();
        let last = block.instructions.len().saturating_sub(1);
        for (position, insn) in block.instructions.iter().enumerate() {
            if insn.is_control_transfer() && position != last {
                return Err(IrError::malformed(
                    block_index,
                    position,
                    format!("{} must be the last instruction of its block", insn.kind_name()),
                ));
            }
            if let Some(reason) = arity_violation(insn) {
                return Err(IrError::malformed(block_index, position, reason));
            }
        }
    }

    let cfg = build_control_flow_graph(program)?;
    let reachable = reachable_blocks(&cfg, program.basic_block_count());
    for block in program.basic_blocks() {
        let index = block.index().index();
        if reachable[index] {
            verify_phis(block, &cfg, &reachable)?;
        }
    }

    tracing::debug!(
        blocks = program.basic_block_count(),
        variables = program.variable_count(),
        "program verified"
    );
    Ok(())
}

fn arity_violation(insn: &Instruction) -> Option<String> {
    match insn {
        Instruction::Invoke(invoke) => {
            match (invoke.kind.requires_instance(), invoke.instance) {
                (true, None) => Some(format!(
                    "{} invocation of {} has no instance",
                    invoke.kind.as_str(),
                    invoke.method
                )),
                (false, Some(_)) => Some(format!("static invocation of {} has an instance", invoke.method)),
                _ => None,
            }
        }
        Instruction::ConstructMultiArray(insn) if insn.dimensions.is_empty() => {
            Some("multi-dimensional array construction without dimensions".to_string())
        }
        Instruction::Switch(switch) => {
            let mut seen = FxHashSet::default();
            switch
                .entries
                .iter()
                .find(|entry| !seen.insert(entry.condition))
                .map(|entry| format!("duplicate switch label {}", entry.condition))
        }
        Instruction::ConstructMultiArray(_)
        | Instruction::IntegerConstant(_)
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
        | Instruction::Branching(_)
        | Instruction::BinaryBranching(_)
        | Instruction::Jump(_)
        | Instruction::Exit(_)
        | Instruction::Raise(_)
        | Instruction::Construct(_)
        | Instruction::ConstructArray(_)
        | Instruction::GetField(_)
        | Instruction::PutField(_)
        | Instruction::GetElement(_)
        | Instruction::PutElement(_)
        | Instruction::ArrayLength(_)
        | Instruction::CloneArray(_)
        | Instruction::UnwrapArray(_)
        | Instruction::IsInstance(_)
        | Instruction::InitClass(_)
        | Instruction::InvokeDynamic(_)
        | Instruction::NullCheck(_)
        | Instruction::MonitorEnter(_)
        | Instruction::MonitorExit(_) => None,
    }
}

fn reachable_blocks(cfg: &AdjacencyGraph, block_count: usize) -> Vec<bool> {
    let mut reachable = vec![false; block_count];
    if block_count == 0 {
        return reachable;
    }
    let mut queue = VecDeque::from([0usize]);
    reachable[0] = true;
    while let Some(block) = queue.pop_front() {
        for &successor in cfg.successors(block) {
            if !reachable[successor] {
                reachable[successor] = true;
                queue.push_back(successor);
            }
        }
    }
    reachable
}

fn verify_phis(block: &BasicBlock, cfg: &AdjacencyGraph, reachable: &[bool]) -> Result<()> {
    let block_index = block.index().index();
    let predecessors: FxHashSet<usize> = cfg.predecessors(block_index).iter().copied().collect();

    for phi in &block.phis {
        let mut sources = FxHashSet::default();
        for incoming in &phi.incomings {
            let source = incoming.source.index();
            if !predecessors.contains(&source) {
                return Err(IrError::invalid_phi(
                    block_index,
                    format!(
                        "{} has an incoming from #{source}, which is not a predecessor",
                        phi.receiver
                    ),
                ));
            }
            if !sources.insert(source) {
                return Err(IrError::invalid_phi(
                    block_index,
                    format!("{} has two incomings from #{source}", phi.receiver),
                ));
            }
        }
        if let Some(missing) = predecessors
            .iter()
            .copied()
            .filter(|pred| reachable[*pred])
            .find(|pred| !sources.contains(pred))
        {
            return Err(IrError::invalid_phi(
                block_index,
                format!("{} has no incoming from predecessor #{missing}", phi.receiver),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: usize) -> Variable {
        Variable::from_index(i)
    }

    /// b0: branch v0 → b1 | b2; b1, b2: jump b3; b3: phi v3 = [b1: v1, b2: v2]; exit
    fn diamond(phi: Phi) -> Program {
        let mut program = Program::with_variables(4);
        let b: Vec<BlockId> = (0..4).map(|_| program.create_basic_block()).collect();
        program.basic_block_at_mut(b[0]).unwrap().add(Instruction::Branching(
            BranchingInstruction {
                condition: BranchingCondition::NotNull,
                operand: v(0),
                consequent: b[1],
                alternative: b[2],
            },
        ));
        for (block, value) in [(b[1], v(1)), (b[2], v(2))] {
            let bb = program.basic_block_at_mut(block).unwrap();
            bb.add(Instruction::NullConstant(NullConstantInstruction { receiver: value }));
            bb.add(Instruction::Jump(JumpInstruction { target: b[3] }));
        }
        let exit = program.basic_block_at_mut(b[3]).unwrap();
        exit.add_phi(phi);
        exit.add(Instruction::Exit(ExitInstruction {
            value_to_return: Some(v(3)),
        }));
        program
    }

    #[test]
    fn test_well_formed_diamond_verifies() {
        let phi = Phi::new(v(3))
            .with_incoming(BlockId::from_index(1), v(1))
            .with_incoming(BlockId::from_index(2), v(2));
        verify_program(&diamond(phi)).unwrap();
    }

    #[test]
    fn test_phi_from_non_predecessor_is_rejected() {
        let phi = Phi::new(v(3))
            .with_incoming(BlockId::from_index(0), v(1))
            .with_incoming(BlockId::from_index(2), v(2));
        assert!(matches!(
            verify_program(&diamond(phi)),
            Err(IrError::InvalidPhi { block: 3, .. })
        ));
    }

    #[test]
    fn test_phi_missing_predecessor_is_rejected() {
        let phi = Phi::new(v(3)).with_incoming(BlockId::from_index(1), v(1));
        assert!(matches!(
            verify_program(&diamond(phi)),
            Err(IrError::InvalidPhi { .. })
        ));
    }

    #[test]
    fn test_dangling_operand_is_rejected() {
        let phi = Phi::new(v(3))
            .with_incoming(BlockId::from_index(1), v(1))
            .with_incoming(BlockId::from_index(2), v(42));
        assert!(matches!(
            verify_operands(&diamond(phi)),
            Err(IrError::DanglingVariable { index: 42, .. })
        ));
    }

    #[test]
    fn test_static_invoke_with_instance_is_malformed() {
        let mut program = Program::with_variables(1);
        let b0 = program.create_basic_block();
        program.basic_block_at_mut(b0).unwrap().add(Instruction::Invoke(InvokeInstruction {
            kind: InvocationType::Static,
            method: MethodReference::new("A", "f", vec![], "V"),
            instance: Some(v(0)),
            arguments: vec![],
            receiver: None,
        }));
        assert!(matches!(
            verify_program(&program),
            Err(IrError::MalformedInstruction { block: 0, position: 0, .. })
        ));
    }

    #[test]
    fn test_control_transfer_must_be_last() {
        let mut program = Program::with_variables(1);
        let b0 = program.create_basic_block();
        let bb = program.basic_block_at_mut(b0).unwrap();
        bb.add(Instruction::Exit(ExitInstruction { value_to_return: None }));
        bb.add(Instruction::NullConstant(NullConstantInstruction { receiver: v(0) }));
        assert!(matches!(
            verify_program(&program),
            Err(IrError::MalformedInstruction { position: 0, .. })
        ));
    }
}
