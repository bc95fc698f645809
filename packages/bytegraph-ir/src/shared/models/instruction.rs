//! Instruction variants
//!
//! The variant set is closed. Every analysis dispatches over it with an
//! exhaustive `match` (or through [`InstructionVisitor`], which has no
//! default methods), so adding a variant is a compile error at every site
//! that has to learn about it.
//!
//! Operands are [`Variable`] and [`BlockId`] indices into the owning
//! program; instructions own no graph structure themselves.
//!
//! [`InstructionVisitor`]: crate::shared::visitor::InstructionVisitor

use serde::{Deserialize, Serialize};

use super::basic_block::BlockId;
use super::types::{
    ArrayElementType, BinaryBranchingCondition, BinaryOperation, BranchingCondition,
    CastIntegerDirection, FieldReference, IntegerSubtype, InvocationType, MethodHandle,
    MethodReference, NumericOperandType, RuntimeConstant,
};
use super::variable::Variable;

// ═══════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegerConstantInstruction {
    pub receiver: Variable,
    pub constant: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongConstantInstruction {
    pub receiver: Variable,
    pub constant: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatConstantInstruction {
    pub receiver: Variable,
    pub constant: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoubleConstantInstruction {
    pub receiver: Variable,
    pub constant: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringConstantInstruction {
    pub receiver: Variable,
    pub constant: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassConstantInstruction {
    pub receiver: Variable,
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NullConstantInstruction {
    pub receiver: Variable,
}

// ═══════════════════════════════════════════════════════════════════════════
// Value operations
// ═══════════════════════════════════════════════════════════════════════════

/// `receiver = assignee`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignInstruction {
    pub receiver: Variable,
    pub assignee: Variable,
}

/// Reference cast; receiver and value denote the same object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastInstruction {
    pub receiver: Variable,
    pub value: Variable,
    pub target_type: String,
}

/// Conversion between numeric types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastNumberInstruction {
    pub receiver: Variable,
    pub value: Variable,
    pub source_type: NumericOperandType,
    pub target_type: NumericOperandType,
}

/// Narrowing to / widening from a sub-int integer type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastIntegerInstruction {
    pub receiver: Variable,
    pub value: Variable,
    pub target_type: IntegerSubtype,
    pub direction: CastIntegerDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryInstruction {
    pub receiver: Variable,
    pub operation: BinaryOperation,
    pub operand_type: NumericOperandType,
    pub first_operand: Variable,
    pub second_operand: Variable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegateInstruction {
    pub receiver: Variable,
    pub operand: Variable,
    pub operand_type: NumericOperandType,
}

// ═══════════════════════════════════════════════════════════════════════════
// Control transfer
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchingInstruction {
    pub condition: BranchingCondition,
    pub operand: Variable,
    pub consequent: BlockId,
    pub alternative: BlockId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryBranchingInstruction {
    pub condition: BinaryBranchingCondition,
    pub first_operand: Variable,
    pub second_operand: Variable,
    pub consequent: BlockId,
    pub alternative: BlockId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpInstruction {
    pub target: BlockId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchTableEntry {
    pub condition: i32,
    pub target: BlockId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchInstruction {
    pub condition: Variable,
    pub entries: Vec<SwitchTableEntry>,
    pub default_target: BlockId,
}

/// Return from the method, optionally with a value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitInstruction {
    pub value_to_return: Option<Variable>,
}

/// Throw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaiseInstruction {
    pub exception: Variable,
}

// ═══════════════════════════════════════════════════════════════════════════
// Object model
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructInstruction {
    pub receiver: Variable,
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructArrayInstruction {
    pub receiver: Variable,
    pub size: Variable,
    pub item_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructMultiArrayInstruction {
    pub receiver: Variable,
    pub dimensions: Vec<Variable>,
    pub item_type: String,
}

/// Field read; `instance` is `None` for static fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetFieldInstruction {
    pub receiver: Variable,
    pub instance: Option<Variable>,
    pub field: FieldReference,
    pub field_type: String,
}

/// Field write; `instance` is `None` for static fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PutFieldInstruction {
    pub instance: Option<Variable>,
    pub value: Variable,
    pub field: FieldReference,
    pub field_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetElementInstruction {
    pub receiver: Variable,
    pub array: Variable,
    pub index: Variable,
    pub element_type: ArrayElementType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PutElementInstruction {
    pub array: Variable,
    pub index: Variable,
    pub value: Variable,
    pub element_type: ArrayElementType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayLengthInstruction {
    pub receiver: Variable,
    pub array: Variable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloneArrayInstruction {
    pub receiver: Variable,
    pub array: Variable,
}

/// Reinterpret a typed array wrapper as its backing object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnwrapArrayInstruction {
    pub receiver: Variable,
    pub array: Variable,
    pub element_type: ArrayElementType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsInstanceInstruction {
    pub receiver: Variable,
    pub value: Variable,
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitClassInstruction {
    pub class_name: String,
}

// ═══════════════════════════════════════════════════════════════════════════
// Calls
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeInstruction {
    pub kind: InvocationType,
    pub method: MethodReference,
    pub instance: Option<Variable>,
    pub arguments: Vec<Variable>,
    pub receiver: Option<Variable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvokeDynamicInstruction {
    pub method_name: String,
    pub method_descriptor: String,
    pub bootstrap_method: MethodHandle,
    pub bootstrap_arguments: Vec<RuntimeConstant>,
    pub instance: Option<Variable>,
    pub arguments: Vec<Variable>,
    pub receiver: Option<Variable>,
}

/// `receiver = value`, trapping when value is null; both denote one object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NullCheckInstruction {
    pub receiver: Variable,
    pub value: Variable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorEnterInstruction {
    pub object_ref: Variable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorExitInstruction {
    pub object_ref: Variable,
}

// ═══════════════════════════════════════════════════════════════════════════
// Instruction
// ═══════════════════════════════════════════════════════════════════════════

/// One IR instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    IntegerConstant(IntegerConstantInstruction),
    LongConstant(LongConstantInstruction),
    FloatConstant(FloatConstantInstruction),
    DoubleConstant(DoubleConstantInstruction),
    StringConstant(StringConstantInstruction),
    ClassConstant(ClassConstantInstruction),
    NullConstant(NullConstantInstruction),
    Assign(AssignInstruction),
    Cast(CastInstruction),
    CastNumber(CastNumberInstruction),
    CastInteger(CastIntegerInstruction),
    Binary(BinaryInstruction),
    Negate(NegateInstruction),
    Branching(BranchingInstruction),
    BinaryBranching(BinaryBranchingInstruction),
    Jump(JumpInstruction),
    Switch(SwitchInstruction),
    Exit(ExitInstruction),
    Raise(RaiseInstruction),
    Construct(ConstructInstruction),
    ConstructArray(ConstructArrayInstruction),
    ConstructMultiArray(ConstructMultiArrayInstruction),
    GetField(GetFieldInstruction),
    PutField(PutFieldInstruction),
    GetElement(GetElementInstruction),
    PutElement(PutElementInstruction),
    ArrayLength(ArrayLengthInstruction),
    CloneArray(CloneArrayInstruction),
    UnwrapArray(UnwrapArrayInstruction),
    IsInstance(IsInstanceInstruction),
    InitClass(InitClassInstruction),
    Invoke(InvokeInstruction),
    InvokeDynamic(InvokeDynamicInstruction),
    NullCheck(NullCheckInstruction),
    MonitorEnter(MonitorEnterInstruction),
    MonitorExit(MonitorExitInstruction),
}

impl Instruction {
    /// Whether this instruction ends its block (branch, jump, switch, exit, raise)
    pub fn is_control_transfer(&self) -> bool {
        matches!(
            self,
            Instruction::Branching(_)
                | Instruction::BinaryBranching(_)
                | Instruction::Jump(_)
                | Instruction::Switch(_)
                | Instruction::Exit(_)
                | Instruction::Raise(_)
        )
    }

    /// Short variant name for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Instruction::IntegerConstant(_) => "int-constant",
            Instruction::LongConstant(_) => "long-constant",
            Instruction::FloatConstant(_) => "float-constant",
            Instruction::DoubleConstant(_) => "double-constant",
            Instruction::StringConstant(_) => "string-constant",
            Instruction::ClassConstant(_) => "class-constant",
            Instruction::NullConstant(_) => "null-constant",
            Instruction::Assign(_) => "assign",
            Instruction::Cast(_) => "cast",
            Instruction::CastNumber(_) => "cast-number",
            Instruction::CastInteger(_) => "cast-integer",
            Instruction::Binary(_) => "binary",
            Instruction::Negate(_) => "negate",
            Instruction::Branching(_) => "branch",
            Instruction::BinaryBranching(_) => "binary-branch",
            Instruction::Jump(_) => "jump",
            Instruction::Switch(_) => "switch",
            Instruction::Exit(_) => "exit",
            Instruction::Raise(_) => "raise",
            Instruction::Construct(_) => "construct",
            Instruction::ConstructArray(_) => "construct-array",
            Instruction::ConstructMultiArray(_) => "construct-multi-array",
            Instruction::GetField(_) => "get-field",
            Instruction::PutField(_) => "put-field",
            Instruction::GetElement(_) => "get-element",
            Instruction::PutElement(_) => "put-element",
            Instruction::ArrayLength(_) => "array-length",
            Instruction::CloneArray(_) => "clone-array",
            Instruction::UnwrapArray(_) => "unwrap-array",
            Instruction::IsInstance(_) => "is-instance",
            Instruction::InitClass(_) => "init-class",
            Instruction::Invoke(_) => "invoke",
            Instruction::InvokeDynamic(_) => "invoke-dynamic",
            Instruction::NullCheck(_) => "null-check",
            Instruction::MonitorEnter(_) => "monitor-enter",
            Instruction::MonitorExit(_) => "monitor-exit",
        }
    }
}
