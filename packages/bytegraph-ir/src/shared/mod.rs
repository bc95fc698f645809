//! Shared IR model and the dispatch contract every analysis builds on

pub mod models;
pub mod visitor;

pub use visitor::InstructionVisitor;
