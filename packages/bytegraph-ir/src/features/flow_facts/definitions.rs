//! Definition extraction: which variables an instruction writes

use crate::shared::models::*;
use crate::shared::visitor::InstructionVisitor;

/// Stateless visitor producing the variables an instruction defines
#[derive(Debug, Clone, Copy, Default)]
pub struct DefinitionExtractor;

/// Variables defined by `insn` (zero or one, in practice)
pub fn definitions(insn: &Instruction) -> Vec<Variable> {
    insn.accept(&mut DefinitionExtractor)
}

impl InstructionVisitor for DefinitionExtractor {
    type Output = Vec<Variable>;

    fn visit_integer_constant(&mut self, insn: &IntegerConstantInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_long_constant(&mut self, insn: &LongConstantInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_float_constant(&mut self, insn: &FloatConstantInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_double_constant(&mut self, insn: &DoubleConstantInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_string_constant(&mut self, insn: &StringConstantInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_class_constant(&mut self, insn: &ClassConstantInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_null_constant(&mut self, insn: &NullConstantInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_assign(&mut self, insn: &AssignInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_cast(&mut self, insn: &CastInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_cast_number(&mut self, insn: &CastNumberInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_cast_integer(&mut self, insn: &CastIntegerInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_binary(&mut self, insn: &BinaryInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_negate(&mut self, insn: &NegateInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_branching(&mut self, _insn: &BranchingInstruction) -> Vec<Variable> {
        Vec::new()
    }

    fn visit_binary_branching(&mut self, _insn: &BinaryBranchingInstruction) -> Vec<Variable> {
        Vec::new()
    }

    fn visit_jump(&mut self, _insn: &JumpInstruction) -> Vec<Variable> {
        Vec::new()
    }

    fn visit_switch(&mut self, _insn: &SwitchInstruction) -> Vec<Variable> {
        Vec::new()
    }

    fn visit_exit(&mut self, _insn: &ExitInstruction) -> Vec<Variable> {
        Vec::new()
    }

    fn visit_raise(&mut self, _insn: &RaiseInstruction) -> Vec<Variable> {
        Vec::new()
    }

    fn visit_construct(&mut self, insn: &ConstructInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_construct_array(&mut self, insn: &ConstructArrayInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_construct_multi_array(&mut self, insn: &ConstructMultiArrayInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_get_field(&mut self, insn: &GetFieldInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_put_field(&mut self, _insn: &PutFieldInstruction) -> Vec<Variable> {
        Vec::new()
    }

    fn visit_get_element(&mut self, insn: &GetElementInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_put_element(&mut self, _insn: &PutElementInstruction) -> Vec<Variable> {
        Vec::new()
    }

    fn visit_array_length(&mut self, insn: &ArrayLengthInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_clone_array(&mut self, insn: &CloneArrayInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_unwrap_array(&mut self, insn: &UnwrapArrayInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_is_instance(&mut self, insn: &IsInstanceInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_init_class(&mut self, _insn: &InitClassInstruction) -> Vec<Variable> {
        Vec::new()
    }

    fn visit_invoke(&mut self, insn: &InvokeInstruction) -> Vec<Variable> {
        insn.receiver.into_iter().collect()
    }

    fn visit_invoke_dynamic(&mut self, insn: &InvokeDynamicInstruction) -> Vec<Variable> {
        insn.receiver.into_iter().collect()
    }

    fn visit_null_check(&mut self, insn: &NullCheckInstruction) -> Vec<Variable> {
        vec![insn.receiver]
    }

    fn visit_monitor_enter(&mut self, _insn: &MonitorEnterInstruction) -> Vec<Variable> {
        Vec::new()
    }

    fn visit_monitor_exit(&mut self, _insn: &MonitorExitInstruction) -> Vec<Variable> {
        Vec::new()
    }
}
