/*
 * Bytegraph IR - analysis core of a bytecode-to-target compiler
 *
 * Feature-First Architecture:
 * - shared/      : IR data model (Program, BasicBlock, Instruction) + visitor contract
 * - features/    : flow facts, graphs, validation, graph splitting,
 *                  escape analysis, null-check insertion
 * - config/      : presets + YAML configuration
 * - pipeline/    : per-method pipeline, rayon batch driver
 *
 * Every analysis is a pure function of one method's Program; methods are
 * analyzed independently and in parallel by the batch driver.
 */

#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::unnecessary_map_or)] // map_or style for compatibility

pub mod config;
pub mod errors;
pub mod features;
pub mod pipeline;
pub mod shared;

pub use config::{AnalysisConfig, Preset};
pub use errors::{IrError, Result};
pub use features::escape_analysis::{find_escaping_variables, EscapeAnalysis};
pub use pipeline::{MethodFacts, MethodOutcome, MethodPipeline, MethodUnit};
pub use shared::models::{BasicBlock, BlockId, Instruction, Phi, Program, Variable};
pub use shared::InstructionVisitor;
