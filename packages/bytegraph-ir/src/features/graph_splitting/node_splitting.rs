/*
 * Program-backed node splitting
 *
 * Copies each node block (phis and instructions) into a newly appended
 * block, then redirects every reference into the node set, from the copies
 * and from the domain, onto the copies. Original blocks stay where they are
 * so block indices held elsewhere remain valid.
 *
 * A copy is a new predecessor of every block it leaves the region for, so
 * phis in those exit blocks receive one incoming per copy, carrying the
 * value the original node supplied.
 */

use rustc_hash::FxHashMap;

use super::block_mapper::BasicBlockMapper;
use super::ports::GraphSplittingBackend;
use crate::errors::Result;
use crate::features::flow_facts::block_successors;
use crate::shared::models::{BlockId, Incoming, Program};

pub struct ProgramNodeSplittingBackend<'a> {
    program: &'a mut Program,
}

impl<'a> ProgramNodeSplittingBackend<'a> {
    pub fn new(program: &'a mut Program) -> Self {
        Self { program }
    }

    pub fn program(&self) -> &Program {
        self.program
    }

    /// Give exit-block phis an incoming from `copy` wherever they have one from `node`
    fn extend_exit_phis(
        &mut self,
        node: BlockId,
        copy: BlockId,
        remap: &FxHashMap<BlockId, BlockId>,
        domain: &[BlockId],
    ) -> Result<usize> {
        let mut exits = block_successors(self.program, copy)?;
        exits.sort_unstable();
        exits.dedup();

        let mut added = 0;
        for exit in exits {
            if remap.contains_key(&exit) || remap.values().any(|&c| c == exit) || domain.contains(&exit) {
                continue;
            }
            let block = self.program.basic_block_at_mut(exit)?;
            for phi in &mut block.phis {
                if phi.incomings.iter().any(|incoming| incoming.source == copy) {
                    continue;
                }
                let values: Vec<_> = phi
                    .incomings
                    .iter()
                    .filter(|incoming| incoming.source == node)
                    .map(|incoming| incoming.value)
                    .collect();
                for value in values {
                    phi.incomings.push(Incoming { source: copy, value });
                    added += 1;
                }
            }
        }
        Ok(added)
    }
}

impl GraphSplittingBackend for ProgramNodeSplittingBackend<'_> {
    fn split(&mut self, domain: &[BlockId], nodes: &[BlockId]) -> Result<Vec<BlockId>> {
        // Validate everything up front so a bad id leaves the program untouched
        for &node in nodes {
            self.program.check_block(node, || "split node")?;
        }
        for &block in domain {
            self.program.check_block(block, || "split domain")?;
        }

        let mut copies = Vec::with_capacity(nodes.len());
        let mut remap: FxHashMap<BlockId, BlockId> = FxHashMap::default();
        for &node in nodes {
            let original = self.program.basic_block_at(node)?;
            let phis = original.phis.clone();
            let instructions = original.instructions.clone();

            let copy = self.program.create_basic_block();
            let block = self.program.basic_block_at_mut(copy)?;
            block.phis = phis;
            block.instructions = instructions;

            copies.push(copy);
            remap.insert(node, copy);
        }

        let mapper = BasicBlockMapper::new(|block: BlockId| remap.get(&block).copied().unwrap_or(block));
        for &copy in &copies {
            mapper.transform(self.program.basic_block_at_mut(copy)?);
        }
        for &block in domain {
            mapper.transform(self.program.basic_block_at_mut(block)?);
        }

        let mut exit_incomings = 0;
        for (&node, &copy) in nodes.iter().zip(&copies) {
            exit_incomings += self.extend_exit_phis(node, copy, &remap, domain)?;
        }

        tracing::debug!(
            domain = domain.len(),
            nodes = nodes.len(),
            exit_incomings,
            blocks = self.program.basic_block_count(),
            "split node set"
        );
        Ok(copies)
    }
}
