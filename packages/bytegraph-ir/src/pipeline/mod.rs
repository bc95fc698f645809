//! Method pipeline and parallel batch driver

pub mod method_pipeline;

pub use method_pipeline::{
    BatchStats, MethodFacts, MethodOutcome, MethodPipeline, MethodReport, MethodUnit,
};
