//! Error types for bytegraph-ir
//!
//! Every failure in this crate is an internal-consistency failure of the IR
//! handed in by the front end (or of the configuration). Analyses abort the
//! method being processed; nothing here is recoverable mid-pass.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for bytegraph-ir operations
#[derive(Debug, Error)]
pub enum IrError {
    /// An operand refers to a variable index the program never allocated
    #[error("Dangling variable v{index} in {context} (program has {variable_count} variables)")]
    DanglingVariable {
        index: usize,
        variable_count: usize,
        context: String,
    },

    /// An operand refers to a basic block index the program never allocated
    #[error("Dangling block #{index} in {context} (program has {block_count} blocks)")]
    DanglingBlock {
        index: usize,
        block_count: usize,
        context: String,
    },

    /// Operand shape does not match the instruction variant
    #[error("Malformed instruction at block #{block}, position {position}: {reason}")]
    MalformedInstruction {
        block: usize,
        position: usize,
        reason: String,
    },

    /// Phi incomings disagree with the derived control-flow graph
    #[error("Invalid phi in block #{block}: {reason}")]
    InvalidPhi { block: usize, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl IrError {
    pub fn dangling_variable(index: usize, variable_count: usize, context: impl Into<String>) -> Self {
        IrError::DanglingVariable {
            index,
            variable_count,
            context: context.into(),
        }
    }

    pub fn dangling_block(index: usize, block_count: usize, context: impl Into<String>) -> Self {
        IrError::DanglingBlock {
            index,
            block_count,
            context: context.into(),
        }
    }

    pub fn malformed(block: usize, position: usize, reason: impl Into<String>) -> Self {
        IrError::MalformedInstruction {
            block,
            position,
            reason: reason.into(),
        }
    }

    pub fn invalid_phi(block: usize, reason: impl Into<String>) -> Self {
        IrError::InvalidPhi {
            block,
            reason: reason.into(),
        }
    }

    /// True for errors caused by the IR itself rather than by configuration
    pub fn is_malformed_ir(&self) -> bool {
        !matches!(self, IrError::Config(_))
    }
}

/// Result type alias for bytegraph operations
pub type Result<T> = std::result::Result<T, IrError>;
