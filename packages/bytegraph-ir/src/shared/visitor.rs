//! Instruction visitor contract
//!
//! Double dispatch over the closed [`Instruction`] variant set. The trait
//! deliberately has no default methods: a visitor that compiles handles
//! every variant, and a new variant breaks every visitor until it is
//! taught about it.
//!
//! ```text
//! let defs = insn.accept(&mut DefinitionExtractor);
//! ```

use crate::shared::models::*;

pub trait InstructionVisitor {
    type Output;

    fn visit_integer_constant(&mut self, insn: &IntegerConstantInstruction) -> Self::Output;
    fn visit_long_constant(&mut self, insn: &LongConstantInstruction) -> Self::Output;
    fn visit_float_constant(&mut self, insn: &FloatConstantInstruction) -> Self::Output;
    fn visit_double_constant(&mut self, insn: &DoubleConstantInstruction) -> Self::Output;
    fn visit_string_constant(&mut self, insn: &StringConstantInstruction) -> Self::Output;
    fn visit_class_constant(&mut self, insn: &ClassConstantInstruction) -> Self::Output;
    fn visit_null_constant(&mut self, insn: &NullConstantInstruction) -> Self::Output;
    fn visit_assign(&mut self, insn: &AssignInstruction) -> Self::Output;
    fn visit_cast(&mut self, insn: &CastInstruction) -> Self::Output;
    fn visit_cast_number(&mut self, insn: &CastNumberInstruction) -> Self::Output;
    fn visit_cast_integer(&mut self, insn: &CastIntegerInstruction) -> Self::Output;
    fn visit_binary(&mut self, insn: &BinaryInstruction) -> Self::Output;
    fn visit_negate(&mut self, insn: &NegateInstruction) -> Self::Output;
    fn visit_branching(&mut self, insn: &BranchingInstruction) -> Self::Output;
    fn visit_binary_branching(&mut self, insn: &BinaryBranchingInstruction) -> Self::Output;
    fn visit_jump(&mut self, insn: &JumpInstruction) -> Self::Output;
    fn visit_switch(&mut self, insn: &SwitchInstruction) -> Self::Output;
    fn visit_exit(&mut self, insn: &ExitInstruction) -> Self::Output;
    fn visit_raise(&mut self, insn: &RaiseInstruction) -> Self::Output;
    fn visit_construct(&mut self, insn: &ConstructInstruction) -> Self::Output;
    fn visit_construct_array(&mut self, insn: &ConstructArrayInstruction) -> Self::Output;
    fn visit_construct_multi_array(&mut self, insn: &ConstructMultiArrayInstruction) -> Self::Output;
    fn visit_get_field(&mut self, insn: &GetFieldInstruction) -> Self::Output;
    fn visit_put_field(&mut self, insn: &PutFieldInstruction) -> Self::Output;
    fn visit_get_element(&mut self, insn: &GetElementInstruction) -> Self::Output;
    fn visit_put_element(&mut self, insn: &PutElementInstruction) -> Self::Output;
    fn visit_array_length(&mut self, insn: &ArrayLengthInstruction) -> Self::Output;
    fn visit_clone_array(&mut self, insn: &CloneArrayInstruction) -> Self::Output;
    fn visit_unwrap_array(&mut self, insn: &UnwrapArrayInstruction) -> Self::Output;
    fn visit_is_instance(&mut self, insn: &IsInstanceInstruction) -> Self::Output;
    fn visit_init_class(&mut self, insn: &InitClassInstruction) -> Self::Output;
    fn visit_invoke(&mut self, insn: &InvokeInstruction) -> Self::Output;
    fn visit_invoke_dynamic(&mut self, insn: &InvokeDynamicInstruction) -> Self::Output;
    fn visit_null_check(&mut self, insn: &NullCheckInstruction) -> Self::Output;
    fn visit_monitor_enter(&mut self, insn: &MonitorEnterInstruction) -> Self::Output;
    fn visit_monitor_exit(&mut self, insn: &MonitorExitInstruction) -> Self::Output;
}

impl Instruction {
    /// Route this instruction to exactly one handler of `visitor`
    pub fn accept<V: InstructionVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Instruction::IntegerConstant(insn) => visitor.visit_integer_constant(insn),
            Instruction::LongConstant(insn) => visitor.visit_long_constant(insn),
            Instruction::FloatConstant(insn) => visitor.visit_float_constant(insn),
            Instruction::DoubleConstant(insn) => visitor.visit_double_constant(insn),
            Instruction::StringConstant(insn) => visitor.visit_string_constant(insn),
            Instruction::ClassConstant(insn) => visitor.visit_class_constant(insn),
            Instruction::NullConstant(insn) => visitor.visit_null_constant(insn),
            Instruction::Assign(insn) => visitor.visit_assign(insn),
            Instruction::Cast(insn) => visitor.visit_cast(insn),
            Instruction::CastNumber(insn) => visitor.visit_cast_number(insn),
            Instruction::CastInteger(insn) => visitor.visit_cast_integer(insn),
            Instruction::Binary(insn) => visitor.visit_binary(insn),
            Instruction::Negate(insn) => visitor.visit_negate(insn),
            Instruction::Branching(insn) => visitor.visit_branching(insn),
            Instruction::BinaryBranching(insn) => visitor.visit_binary_branching(insn),
            Instruction::Jump(insn) => visitor.visit_jump(insn),
            Instruction::Switch(insn) => visitor.visit_switch(insn),
            Instruction::Exit(insn) => visitor.visit_exit(insn),
            Instruction::Raise(insn) => visitor.visit_raise(insn),
            Instruction::Construct(insn) => visitor.visit_construct(insn),
            Instruction::ConstructArray(insn) => visitor.visit_construct_array(insn),
            Instruction::ConstructMultiArray(insn) => visitor.visit_construct_multi_array(insn),
            Instruction::GetField(insn) => visitor.visit_get_field(insn),
            Instruction::PutField(insn) => visitor.visit_put_field(insn),
            Instruction::GetElement(insn) => visitor.visit_get_element(insn),
            Instruction::PutElement(insn) => visitor.visit_put_element(insn),
            Instruction::ArrayLength(insn) => visitor.visit_array_length(insn),
            Instruction::CloneArray(insn) => visitor.visit_clone_array(insn),
            Instruction::UnwrapArray(insn) => visitor.visit_unwrap_array(insn),
            Instruction::IsInstance(insn) => visitor.visit_is_instance(insn),
            Instruction::InitClass(insn) => visitor.visit_init_class(insn),
            Instruction::Invoke(insn) => visitor.visit_invoke(insn),
            Instruction::InvokeDynamic(insn) => visitor.visit_invoke_dynamic(insn),
            Instruction::NullCheck(insn) => visitor.visit_null_check(insn),
            Instruction::MonitorEnter(insn) => visitor.visit_monitor_enter(insn),
            Instruction::MonitorExit(insn) => visitor.visit_monitor_exit(insn),
        }
    }
}
