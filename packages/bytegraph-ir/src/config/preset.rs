//! Preset configurations
//!
//! Presets provide complete default configurations for common use cases.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// JIT-style: trust the front end
    ///
    /// - Verifier: operand range check only
    /// - Null checks: not inserted
    /// - Parallel: on
    Fast,

    /// Ahead-of-time builds
    ///
    /// - Verifier: full structural check
    /// - Null checks: virtual dispatch
    /// - Parallel: on
    #[default]
    Balanced,

    /// Debugging the compiler itself
    ///
    /// Balanced, but single-threaded so logs come out in method order.
    Thorough,
}

impl Preset {
    /// Parse preset from string (case-insensitive)
    pub fn from_str(s: &str) -> ConfigResult<Self> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "thorough" => Ok(Self::Thorough),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Thorough => "thorough",
        }
    }

    pub fn all() -> [Preset; 3] {
        [Self::Fast, Self::Balanced, Self::Thorough]
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
