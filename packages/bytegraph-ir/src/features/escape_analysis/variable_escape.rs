//! Instruction-local variable escape
//!
//! A much cheaper relative of [`EscapeAnalysis`](super::EscapeAnalysis): no
//! coalescing, no reference graph, no propagation. A variable escapes when
//! some instruction hands it to something other than plain local
//! arithmetic: a branch, a return or throw, a store, a call, a monitor.
//! Register allocation uses it to keep such variables out of shared slots.

use crate::errors::Result;
use crate::features::validation::verify_operands;
use crate::shared::models::*;
use crate::shared::visitor::InstructionVisitor;

/// One flag per variable index
pub fn find_escaping_variables(program: &Program) -> Result<Vec<bool>> {
    verify_operands(program)?;

    let mut marker = EscapeMarker {
        escaping: vec![false; program.variable_count()],
    };
    for block in program.basic_blocks() {
        for insn in &block.instructions {
            insn.accept(&mut marker);
        }
    }
    Ok(marker.escaping)
}

struct EscapeMarker {
    escaping: Vec<bool>,
}

impl EscapeMarker {
    #[inline]
    fn mark(&mut self, var: Variable) {
        self.escaping[var.index()] = true;
    }
}

impl InstructionVisitor for EscapeMarker {
    type Output = ();

    fn visit_integer_constant(&mut self, _: &IntegerConstantInstruction) {}
    fn visit_long_constant(&mut self, _: &LongConstantInstruction) {}
    fn visit_float_constant(&mut self, _: &FloatConstantInstruction) {}
    fn visit_double_constant(&mut self, _: &DoubleConstantInstruction) {}
    fn visit_string_constant(&mut self, _: &StringConstantInstruction) {}
    fn visit_class_constant(&mut self, _: &ClassConstantInstruction) {}
    fn visit_null_constant(&mut self, _: &NullConstantInstruction) {}
    fn visit_assign(&mut self, _: &AssignInstruction) {}
    fn visit_cast(&mut self, _: &CastInstruction) {}
    fn visit_cast_number(&mut self, _: &CastNumberInstruction) {}
    fn visit_cast_integer(&mut self, _: &CastIntegerInstruction) {}
    fn visit_binary(&mut self, _: &BinaryInstruction) {}
    fn visit_negate(&mut self, _: &NegateInstruction) {}

    fn visit_branching(&mut self, insn: &BranchingInstruction) {
        self.mark(insn.operand);
    }

    fn visit_binary_branching(&mut self, insn: &BinaryBranchingInstruction) {
        self.mark(insn.first_operand);
        self.mark(insn.second_operand);
    }

    fn visit_jump(&mut self, _: &JumpInstruction) {}

    fn visit_switch(&mut self, insn: &SwitchInstruction) {
        self.mark(insn.condition);
    }

    fn visit_exit(&mut self, insn: &ExitInstruction) {
        if let Some(value) = insn.value_to_return {
            self.mark(value);
        }
    }

    fn visit_raise(&mut self, insn: &RaiseInstruction) {
        self.mark(insn.exception);
    }

    fn visit_construct(&mut self, _: &ConstructInstruction) {}
    fn visit_construct_array(&mut self, _: &ConstructArrayInstruction) {}
    fn visit_construct_multi_array(&mut self, _: &ConstructMultiArrayInstruction) {}
    fn visit_get_field(&mut self, _: &GetFieldInstruction) {}

    fn visit_put_field(&mut self, insn: &PutFieldInstruction) {
        if let Some(instance) = insn.instance {
            self.mark(instance);
        }
        self.mark(insn.value);
    }

    fn visit_get_element(&mut self, _: &GetElementInstruction) {}

    fn visit_put_element(&mut self, insn: &PutElementInstruction) {
        self.mark(insn.array);
        self.mark(insn.index);
        self.mark(insn.value);
    }

    fn visit_array_length(&mut self, _: &ArrayLengthInstruction) {}
    fn visit_clone_array(&mut self, _: &CloneArrayInstruction) {}
    fn visit_unwrap_array(&mut self, _: &UnwrapArrayInstruction) {}
    fn visit_is_instance(&mut self, _: &IsInstanceInstruction) {}
    fn visit_init_class(&mut self, _: &InitClassInstruction) {}

    fn visit_invoke(&mut self, insn: &InvokeInstruction) {
        if let Some(instance) = insn.instance {
            self.mark(instance);
        }
        for &argument in &insn.arguments {
            self.mark(argument);
        }
    }

    fn visit_invoke_dynamic(&mut self, insn: &InvokeDynamicInstruction) {
        if let Some(instance) = insn.instance {
            self.mark(instance);
        }
        for &argument in &insn.arguments {
            self.mark(argument);
        }
    }

    fn visit_null_check(&mut self, _: &NullCheckInstruction) {}

    fn visit_monitor_enter(&mut self, insn: &MonitorEnterInstruction) {
        self.mark(insn.object_ref);
    }

    fn visit_monitor_exit(&mut self, insn: &MonitorExitInstruction) {
        self.mark(insn.object_ref);
    }
}
