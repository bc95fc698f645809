//! Analysis configuration
//!
//! Two levels:
//! - Preset: `AnalysisConfig::from_preset(Preset::Fast)`
//! - YAML (v1 schema): preset plus whole-stage overrides
//!
//! ```yaml
//! version: 1
//! preset: balanced
//! null_check:
//!   enabled: true
//!   invocation_kinds: [virtual, interface]
//! ```

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::stage_configs::{EscapeConfig, NullCheckConfig, ParallelConfig};

pub const SUPPORTED_VERSIONS: &[u32] = &[1];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub preset: Preset,
    pub escape: EscapeConfig,
    pub null_check: NullCheckConfig,
    pub parallel: ParallelConfig,
}

/// YAML schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFileV1 {
    #[serde(default)]
    version: Option<u32>,

    preset: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    escape: Option<EscapeConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    null_check: Option<NullCheckConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    parallel: Option<ParallelConfig>,
}

impl AnalysisConfig {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            preset,
            escape: EscapeConfig::from_preset(preset),
            null_check: NullCheckConfig::from_preset(preset),
            parallel: ParallelConfig::from_preset(preset),
        }
    }

    /// Parse and validate a v1 YAML document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let mut config = Self::from_preset(Preset::from_str(&file.preset)?);
        if let Some(escape) = file.escape {
            config.escape = escape;
        }
        if let Some(null_check) = file.null_check {
            config.null_check = null_check;
        }
        if let Some(parallel) = file.parallel {
            config.parallel = parallel;
        }

        config.validate()?;
        tracing::debug!(preset = %config.preset, "analysis config loaded");
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Export every stage explicitly, so the document survives preset changes
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            preset: self.preset.as_str().to_string(),
            escape: Some(self.escape.clone()),
            null_check: Some(self.null_check.clone()),
            parallel: Some(self.parallel.clone()),
        };
        Ok(serde_yaml::to_string(&file)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.escape.validate()?;
        self.null_check.validate()?;
        self.parallel.validate()?;
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}
