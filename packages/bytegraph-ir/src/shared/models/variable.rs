//! Program variables
//!
//! A variable is nothing but its index into the owning program's dense
//! variable table. Indices are handed out by [`Program::create_variable`]
//! and never reused, so analyses index flat arrays by them directly.
//!
//! [`Program::create_variable`]: super::program::Program::create_variable

use serde::{Deserialize, Serialize};
use std::fmt;

/// Variable reference (index into `Program::variables`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable(u32);

impl Variable {
    /// Wrap a raw index. Only the program and tests should need this.
    ///
    /// # Panics
    /// If `index` does not fit in `u32`.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        assert!(index <= u32::MAX as usize, "variable index does not fit in u32");
        Variable(index as u32)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Per-variable metadata stored in the program's variable table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableInfo {
    /// Source-level name, if the front end recovered one (debug only)
    pub debug_name: Option<String>,
}
