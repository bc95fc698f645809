//! Per-stage configuration
//!
//! Each stage config can be built from a preset and validates itself.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use crate::shared::models::InvocationType;

// ═══════════════════════════════════════════════════════════════════════════
// Escape analysis
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EscapeConfig {
    /// Run the escape analysis at all
    pub enabled: bool,

    /// Run the full IR verifier first (operand range checks always run)
    pub verify_ir: bool,

    /// Treat variable 0 as the receiver slot and mark it escaping.
    /// Drivers turn this off for static methods.
    pub mark_receiver_slot: bool,
}

impl EscapeConfig {
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Fast => Self {
                enabled: true,
                verify_ir: false,
                mark_receiver_slot: true,
            },
            Preset::Balanced | Preset::Thorough => Self {
                enabled: true,
                verify_ir: true,
                mark_receiver_slot: true,
            },
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }
}

impl Default for EscapeConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Null-check insertion
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NullCheckConfig {
    pub enabled: bool,

    /// Dispatch kinds whose instance operand gets an explicit check
    pub invocation_kinds: Vec<InvocationType>,
}

impl NullCheckConfig {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            enabled: !matches!(preset, Preset::Fast),
            invocation_kinds: vec![InvocationType::Virtual],
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !self.enabled {
            return Ok(());
        }
        if self.invocation_kinds.is_empty() {
            return Err(ConfigError::validation(
                "null_check",
                "enabled with no invocation kinds; disable the stage instead",
            ));
        }
        if let Some(kind) = self
            .invocation_kinds
            .iter()
            .find(|kind| !kind.requires_instance())
        {
            return Err(ConfigError::validation(
                "null_check",
                format!("'{}' invocations have no instance to check", kind.as_str()),
            ));
        }
        Ok(())
    }
}

impl Default for NullCheckConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Parallel batch processing
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParallelConfig {
    /// Analyze methods of a batch on the rayon pool
    pub enabled: bool,

    /// Worker threads (0=rayon default, 1..=1024)
    pub num_threads: usize,
}

impl ParallelConfig {
    pub const MAX_THREADS: usize = 1024;

    pub fn from_preset(preset: Preset) -> Self {
        Self {
            enabled: !matches!(preset, Preset::Thorough),
            num_threads: 0,
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.num_threads > Self::MAX_THREADS {
            return Err(ConfigError::range_with_hint(
                "num_threads",
                self.num_threads,
                0,
                Self::MAX_THREADS,
                "Number of threads must be reasonable (0=auto)",
            ));
        }
        Ok(())
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}
