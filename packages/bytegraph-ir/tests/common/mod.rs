//! Common test utilities for bytegraph-ir
//!
//! Builders for programs and one-line instruction constructors shared by
//! the integration tests.

#![allow(dead_code)]

mod builders;

pub use builders::*;
