//! Explicit null checks for dispatch receivers

pub mod insertion;

pub use insertion::NullCheckInsertion;
