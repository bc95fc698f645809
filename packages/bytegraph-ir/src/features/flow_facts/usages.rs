//! Usage extraction: which variables an instruction reads
//!
//! Operand order is part of the contract (binary operands first/second,
//! put-element array/index/value, invoke arguments before the instance).

use crate::shared::models::*;
use crate::shared::visitor::InstructionVisitor;

/// Stateless visitor producing the variables an instruction uses, in order
#[derive(Debug, Clone, Copy, Default)]
pub struct UsageExtractor;

pub fn usages(insn: &Instruction) -> Vec<Variable> {
    insn.accept(&mut UsageExtractor)
}

/// Incoming values of a phi, in incoming order
pub fn phi_usages(phi: &Phi) -> Vec<Variable> {
    phi.incomings.iter().map(|incoming| incoming.value).collect()
}

fn invocation_usages(arguments: &[Variable], instance: Option<Variable>) -> Vec<Variable> {
    let mut used = Vec::with_capacity(arguments.len() + 1);
    used.extend_from_slice(arguments);
    used.extend(instance);
    used
}

impl InstructionVisitor for UsageExtractor {
    type Output = Vec<Variable>;

    fn visit_integer_constant(&mut self, _insn: &IntegerConstantInstruction) -> Vec<Variable> {
        Vec::new()
    }

    fn visit_long_constant(&mut self, _insn: &LongConstantInstruction) -> Vec<Variable> {
        Vec::new()
    }

    fn visit_float_constant(&mut self, _insn: &FloatConstantInstruction) -> Vec<Variable> {
        Vec::new()
    }

    fn visit_double_constant(&mut self, _insn: &DoubleConstantInstruction) -> Vec<Variable> {
        Vec::new()
    }

    fn visit_string_constant(&mut self, _insn: &StringConstantInstruction) -> Vec<Variable> {
        Vec::new()
    }

    fn visit_class_constant(&mut self, _insn: &ClassConstantInstruction) -> Vec<Variable> {
        Vec::new()
    }

    fn visit_null_constant(&mut self, _insn: &NullConstantInstruction) -> Vec<Variable> {
        Vec::new()
    }

    fn visit_assign(&mut self, insn: &AssignInstruction) -> Vec<Variable> {
        vec![insn.assignee]
    }

    fn visit_cast(&mut self, insn: &CastInstruction) -> Vec<Variable> {
        vec![insn.value]
    }

    fn visit_cast_number(&mut self, insn: &CastNumberInstruction) -> Vec<Variable> {
        vec![insn.value]
    }

    fn visit_cast_integer(&mut self, insn: &CastIntegerInstruction) -> Vec<Variable> {
        vec![insn.value]
    }

    fn visit_binary(&mut self, insn: &BinaryInstruction) -> Vec<Variable> {
        vec![insn.first_operand, insn.second_operand]
    }

    fn visit_negate(&mut self, insn: &NegateInstruction) -> Vec<Variable> {
        vec![insn.operand]
    }

    fn visit_branching(&mut self, insn: &BranchingInstruction) -> Vec<Variable> {
        vec![insn.operand]
    }

    fn visit_binary_branching(&mut self, insn: &BinaryBranchingInstruction) -> Vec<Variable> {
        vec![insn.first_operand, insn.second_operand]
    }

    fn visit_jump(&mut self, _insn: &JumpInstruction) -> Vec<Variable> {
        Vec::new()
    }

    fn visit_switch(&mut self, insn: &SwitchInstruction) -> Vec<Variable> {
        vec![insn.condition]
    }

    fn visit_exit(&mut self, insn: &ExitInstruction) -> Vec<Variable> {
        insn.value_to_return.into_iter().collect()
    }

    fn visit_raise(&mut self, insn: &RaiseInstruction) -> Vec<Variable> {
        vec![insn.exception]
    }

    fn visit_construct(&mut self, _insn: &ConstructInstruction) -> Vec<Variable> {
        Vec::new()
    }

    fn visit_construct_array(&mut self, insn: &ConstructArrayInstruction) -> Vec<Variable> {
        vec![insn.size]
    }

    fn visit_construct_multi_array(&mut self, insn: &ConstructMultiArrayInstruction) -> Vec<Variable> {
        insn.dimensions.clone()
    }

    fn visit_get_field(&mut self, insn: &GetFieldInstruction) -> Vec<Variable> {
        insn.instance.into_iter().collect()
    }

    fn visit_put_field(&mut self, insn: &PutFieldInstruction) -> Vec<Variable> {
        match insn.instance {
            Some(instance) => vec![instance, insn.value],
            None => vec![insn.value],
        }
    }

    fn visit_get_element(&mut self, insn: &GetElementInstruction) -> Vec<Variable> {
        vec![insn.array, insn.index]
    }

    fn visit_put_element(&mut self, insn: &PutElementInstruction) -> Vec<Variable> {
        vec![insn.array, insn.index, insn.value]
    }

    fn visit_array_length(&mut self, insn: &ArrayLengthInstruction) -> Vec<Variable> {
        vec![insn.array]
    }

    fn visit_clone_array(&mut self, insn: &CloneArrayInstruction) -> Vec<Variable> {
        vec![insn.array]
    }

    fn visit_unwrap_array(&mut self, insn: &UnwrapArrayInstruction) -> Vec<Variable> {
        vec![insn.array]
    }

    fn visit_is_instance(&mut self, insn: &IsInstanceInstruction) -> Vec<Variable> {
        vec![insn.value]
    }

    fn visit_init_class(&mut self, _insn: &InitClassInstruction) -> Vec<Variable> {
        Vec::new()
    }

    fn visit_invoke(&mut self, insn: &InvokeInstruction) -> Vec<Variable> {
        invocation_usages(&insn.arguments, insn.instance)
    }

    fn visit_invoke_dynamic(&mut self, insn: &InvokeDynamicInstruction) -> Vec<Variable> {
        invocation_usages(&insn.arguments, insn.instance)
    }

    fn visit_null_check(&mut self, insn: &NullCheckInstruction) -> Vec<Variable> {
        vec![insn.value]
    }

    fn visit_monitor_enter(&mut self, insn: &MonitorEnterInstruction) -> Vec<Variable> {
        vec![insn.object_ref]
    }

    fn visit_monitor_exit(&mut self, insn: &MonitorExitInstruction) -> Vec<Variable> {
        vec![insn.object_ref]
    }
}
