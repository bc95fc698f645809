//! IR validation - fail fast on malformed input instead of computing wrong facts

pub mod verifier;

pub use verifier::{verify_operands, verify_program};
