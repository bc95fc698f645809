//! Operand types and symbolic references carried by instructions
//!
//! None of these affect def/use or control flow; they are carried so the
//! IR stays lossless for the backends that consume it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operand type of arithmetic instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericOperandType {
    Int,
    Long,
    Float,
    Double,
}

/// Sub-int integer types produced by narrowing casts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntegerSubtype {
    Byte,
    Short,
    Char,
}

/// Direction of an integer-narrowing cast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastIntegerDirection {
    FromInteger,
    ToInteger,
}

/// Element type of array access instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrayElementType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Compare,
    And,
    Or,
    Xor,
    ShiftLeft,
    ShiftRight,
    ShiftRightUnsigned,
}

/// Condition of a single-operand branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BranchingCondition {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    Null,
    NotNull,
}

/// Condition of a two-operand branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryBranchingCondition {
    Equal,
    NotEqual,
    ReferenceEqual,
    ReferenceNotEqual,
}

/// Dispatch kind of an invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvocationType {
    Static,
    Special,
    Virtual,
    Interface,
}

impl InvocationType {
    /// Whether this kind of call requires an instance operand
    pub fn requires_instance(self) -> bool {
        !matches!(self, InvocationType::Static)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvocationType::Static => "static",
            InvocationType::Special => "special",
            InvocationType::Virtual => "virtual",
            InvocationType::Interface => "interface",
        }
    }
}

/// Symbolic reference to a field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldReference {
    pub class_name: String,
    pub field_name: String,
}

impl FieldReference {
    pub fn new(class_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            field_name: field_name.into(),
        }
    }
}

impl fmt::Display for FieldReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.class_name, self.field_name)
    }
}

/// Symbolic reference to a method
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodReference {
    pub class_name: String,
    pub name: String,
    /// Parameter type descriptors, receiver excluded
    pub parameter_types: Vec<String>,
    pub return_type: String,
}

impl MethodReference {
    pub fn new(
        class_name: impl Into<String>,
        name: impl Into<String>,
        parameter_types: Vec<String>,
        return_type: impl Into<String>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            name: name.into(),
            parameter_types,
            return_type: return_type.into(),
        }
    }

    /// Number of declared parameters (the implicit receiver is not counted)
    pub fn parameter_count(&self) -> usize {
        self.parameter_types.len()
    }
}

impl fmt::Display for MethodReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}({}){}",
            self.class_name,
            self.name,
            self.parameter_types.join(""),
            self.return_type
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodHandleKind {
    GetField,
    GetStaticField,
    PutField,
    PutStaticField,
    InvokeVirtual,
    InvokeStatic,
    InvokeSpecial,
    InvokeConstructor,
    InvokeInterface,
}

/// Method handle constant (bootstrap methods and their arguments)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodHandle {
    pub kind: MethodHandleKind,
    pub class_name: String,
    pub name: String,
    pub descriptor: String,
}

/// Constant argument of an invoke-dynamic bootstrap method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuntimeConstant {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Type(String),
    MethodType(String),
    MethodHandle(MethodHandle),
}
