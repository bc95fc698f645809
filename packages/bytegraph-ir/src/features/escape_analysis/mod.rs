//! Escape analysis
//!
//! - [`EscapeAnalysis`]: coalescing, reference-graph based whole-method analysis
//! - [`find_escaping_variables`]: instruction-local marking, no propagation

pub mod reference_escape;
pub mod variable_escape;

pub use reference_escape::{EscapeAnalysis, EscapeSummary};
pub use variable_escape::find_escaping_variables;
