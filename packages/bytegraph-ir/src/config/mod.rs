//! Analysis configuration
//!
//! - Level 1: Preset - `AnalysisConfig::from_preset(Preset::Fast)`
//! - Level 2: YAML - preset plus whole-stage overrides, versioned schema
//!
//! ```rust,ignore
//! use bytegraph_ir::config::{AnalysisConfig, Preset};
//!
//! let config = AnalysisConfig::from_preset(Preset::Balanced);
//! let config = AnalysisConfig::from_yaml_file("bytegraph.yaml")?;
//! ```

pub mod analysis_config;
pub mod error;
pub mod preset;
pub mod stage_configs;

pub use analysis_config::AnalysisConfig;
pub use error::{ConfigError, ConfigResult};
pub use preset::Preset;
pub use stage_configs::{EscapeConfig, NullCheckConfig, ParallelConfig};
