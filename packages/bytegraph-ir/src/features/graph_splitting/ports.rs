//! Graph Splitting Port
//!
//! Consumers that make irreducible control flow reducible (node splitting)
//! depend on this trait, not on the program-backed implementation, so they
//! can run against a plain graph in tests.

use crate::errors::Result;
use crate::shared::models::BlockId;

/// Duplicates a region of nodes on behalf of `domain`
///
/// # Contract
/// - every node in `nodes` gets a freshly appended copy
/// - references from the copies and from `domain` into `nodes` are
///   redirected to the corresponding copies
/// - the returned ids are positionally aligned with `nodes`
/// - the originals are left in place (dead from `domain`'s point of view)
pub trait GraphSplittingBackend {
    fn split(&mut self, domain: &[BlockId], nodes: &[BlockId]) -> Result<Vec<BlockId>>;
}
