//! Transition extraction: where control may go after an instruction
//!
//! `None` means the instruction falls through; `Some(vec![])` means it
//! terminates the block with no successor (exit, raise). The distinction
//! matters to CFG derivation, so the two must never be conflated.

use crate::shared::models::*;
use crate::shared::visitor::InstructionVisitor;

#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionExtractor;

pub fn transitions(insn: &Instruction) -> Option<Vec<BlockId>> {
    insn.accept(&mut TransitionExtractor)
}

impl InstructionVisitor for TransitionExtractor {
    type Output = Option<Vec<BlockId>>;

    fn visit_integer_constant(&mut self, _insn: &IntegerConstantInstruction) -> Self::Output {
        None
    }

    fn visit_long_constant(&mut self, _insn: &LongConstantInstruction) -> Self::Output {
        None
    }

    fn visit_float_constant(&mut self, _insn: &FloatConstantInstruction) -> Self::Output {
        None
    }

    fn visit_double_constant(&mut self, _insn: &DoubleConstantInstruction) -> Self::Output {
        None
    }

    fn visit_string_constant(&mut self, _insn: &StringConstantInstruction) -> Self::Output {
        None
    }

    fn visit_class_constant(&mut self, _insn: &ClassConstantInstruction) -> Self::Output {
        None
    }

    fn visit_null_constant(&mut self, _insn: &NullConstantInstruction) -> Self::Output {
        None
    }

    fn visit_assign(&mut self, _insn: &AssignInstruction) -> Self::Output {
        None
    }

    fn visit_cast(&mut self, _insn: &CastInstruction) -> Self::Output {
        None
    }

    fn visit_cast_number(&mut self, _insn: &CastNumberInstruction) -> Self::Output {
        None
    }

    fn visit_cast_integer(&mut self, _insn: &CastIntegerInstruction) -> Self::Output {
        None
    }

    fn visit_binary(&mut self, _insn: &BinaryInstruction) -> Self::Output {
        None
    }

    fn visit_negate(&mut self, _insn: &NegateInstruction) -> Self::Output {
        None
    }

    fn visit_branching(&mut self, insn: &BranchingInstruction) -> Self::Output {
        Some(vec![insn.consequent, insn.alternative])
    }

    fn visit_binary_branching(&mut self, insn: &BinaryBranchingInstruction) -> Self::Output {
        Some(vec![insn.consequent, insn.alternative])
    }

    fn visit_jump(&mut self, insn: &JumpInstruction) -> Self::Output {
        Some(vec![insn.target])
    }

    fn visit_switch(&mut self, insn: &SwitchInstruction) -> Self::Output {
        let mut targets = Vec::with_capacity(insn.entries.len() + 1);
        targets.extend(insn.entries.iter().map(|entry| entry.target));
        targets.push(insn.default_target);
        Some(targets)
    }

    fn visit_exit(&mut self, _insn: &ExitInstruction) -> Self::Output {
        Some(Vec::new())
    }

    fn visit_raise(&mut self, _insn: &RaiseInstruction) -> Self::Output {
        Some(Vec::new())
    }

    fn visit_construct(&mut self, _insn: &ConstructInstruction) -> Self::Output {
        None
    }

    fn visit_construct_array(&mut self, _insn: &ConstructArrayInstruction) -> Self::Output {
        None
    }

    fn visit_construct_multi_array(&mut self, _insn: &ConstructMultiArrayInstruction) -> Self::Output {
        None
    }

    fn visit_get_field(&mut self, _insn: &GetFieldInstruction) -> Self::Output {
        None
    }

    fn visit_put_field(&mut self, _insn: &PutFieldInstruction) -> Self::Output {
        None
    }

    fn visit_get_element(&mut self, _insn: &GetElementInstruction) -> Self::Output {
        None
    }

    fn visit_put_element(&mut self, _insn: &PutElementInstruction) -> Self::Output {
        None
    }

    fn visit_array_length(&mut self, _insn: &ArrayLengthInstruction) -> Self::Output {
        None
    }

    fn visit_clone_array(&mut self, _insn: &CloneArrayInstruction) -> Self::Output {
        None
    }

    fn visit_unwrap_array(&mut self, _insn: &UnwrapArrayInstruction) -> Self::Output {
        None
    }

    fn visit_is_instance(&mut self, _insn: &IsInstanceInstruction) -> Self::Output {
        None
    }

    fn visit_init_class(&mut self, _insn: &InitClassInstruction) -> Self::Output {
        None
    }

    fn visit_invoke(&mut self, _insn: &InvokeInstruction) -> Self::Output {
        None
    }

    fn visit_invoke_dynamic(&mut self, _insn: &InvokeDynamicInstruction) -> Self::Output {
        None
    }

    fn visit_null_check(&mut self, _insn: &NullCheckInstruction) -> Self::Output {
        None
    }

    fn visit_monitor_enter(&mut self, _insn: &MonitorEnterInstruction) -> Self::Output {
        None
    }

    fn visit_monitor_exit(&mut self, _insn: &MonitorExitInstruction) -> Self::Output {
        None
    }
}
