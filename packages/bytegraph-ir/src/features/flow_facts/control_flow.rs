//! Control-flow graph derivation
//!
//! CFG edges are never stored in the IR. They are recomputed from each
//! block's last instruction whenever a pass needs them:
//! - explicit transitions → those targets (an empty list means "no successor")
//! - fallthrough or empty block → the next block in program order, if any

use crate::errors::Result;
use crate::features::graph::{AdjacencyGraph, GraphBuilder};
use crate::shared::models::{BlockId, Program};

use super::transitions::transitions;

/// Successors of `block`, in transition order
pub fn block_successors(program: &Program, block: BlockId) -> Result<Vec<BlockId>> {
    let basic_block = program.basic_block_at(block)?;
    let explicit = basic_block.last_instruction().and_then(transitions);
    Ok(match explicit {
        Some(targets) => targets,
        None => {
            let next = block.index() + 1;
            if next < program.basic_block_count() {
                vec![BlockId::from_index(next)]
            } else {
                Vec::new()
            }
        }
    })
}

/// CFG over block indices; size equals the block count
pub fn build_control_flow_graph(program: &Program) -> Result<AdjacencyGraph> {
    let mut builder = GraphBuilder::with_size(program.basic_block_count());
    for block in program.basic_blocks() {
        for successor in block_successors(program, block.index())? {
            program.check_block(successor, || "control transfer target")?;
            builder.add_edge(block.index().index(), successor.index());
        }
    }
    Ok(builder.build())
}

/// Predecessor lists indexed by block
pub fn predecessors(program: &Program) -> Result<Vec<Vec<BlockId>>> {
    let cfg = build_control_flow_graph(program)?;
    Ok((0..program.basic_block_count())
        .map(|block| {
            cfg.predecessors(block)
                .iter()
                .map(|&pred| BlockId::from_index(pred))
                .collect()
        })
        .collect())
}
