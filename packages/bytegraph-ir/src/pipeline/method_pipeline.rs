//! Per-method analysis pipeline
//!
//! ```text
//! MethodUnit ──► verify (optional) ──► null-check insertion (optional)
//!            ──► escape analysis (optional) ──► MethodFacts
//! ```
//!
//! Each method is analyzed by exactly one worker, which owns its `Program`
//! for the whole run. A method with malformed IR fails on its own; the
//! rest of the batch is unaffected.

use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::errors::Result;
use crate::features::escape_analysis::{EscapeAnalysis, EscapeSummary};
use crate::features::null_check::NullCheckInsertion;
use crate::features::validation::verify_program;
use crate::shared::models::{MethodReference, Program};

/// One method body handed over by the front end
#[derive(Debug, Clone)]
pub struct MethodUnit {
    pub reference: MethodReference,
    pub program: Program,
    /// Static methods have no receiver in slot 0
    pub is_static: bool,
}

impl MethodUnit {
    pub fn new(reference: MethodReference, program: Program) -> Self {
        Self {
            reference,
            program,
            is_static: false,
        }
    }

    /// Builder: mark as static
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }
}

/// Everything the pipeline learned about one method
#[derive(Debug, Clone)]
pub struct MethodFacts {
    pub reference: MethodReference,
    pub null_checks_inserted: usize,
    pub escape: Option<EscapeAnalysis>,
    pub elapsed_us: u128,
}

/// Serializable view of [`MethodFacts`]
#[derive(Debug, Clone, Serialize)]
pub struct MethodReport {
    pub method: String,
    pub null_checks_inserted: usize,
    pub escape: Option<EscapeSummary>,
    pub elapsed_us: u128,
}

impl MethodFacts {
    pub fn report(&self) -> MethodReport {
        MethodReport {
            method: self.reference.to_string(),
            null_checks_inserted: self.null_checks_inserted,
            escape: self.escape.as_ref().map(EscapeAnalysis::summary),
            elapsed_us: self.elapsed_us,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.report())
    }
}

/// Result of one method in a batch; the unit is handed back either way
#[derive(Debug)]
pub struct MethodOutcome {
    pub unit: MethodUnit,
    pub result: Result<MethodFacts>,
}

impl MethodOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Batch totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchStats {
    pub methods: usize,
    pub failed: usize,
    pub null_checks_inserted: usize,
    pub escaping_classes: usize,
    pub local_allocations: usize,
}

impl BatchStats {
    pub fn from_outcomes(outcomes: &[MethodOutcome]) -> Self {
        let mut stats = Self {
            methods: outcomes.len(),
            ..Self::default()
        };
        for outcome in outcomes {
            match &outcome.result {
                Ok(facts) => {
                    stats.null_checks_inserted += facts.null_checks_inserted;
                    if let Some(escape) = &facts.escape {
                        let summary = escape.summary();
                        stats.escaping_classes += summary.escaping_class_count;
                        stats.local_allocations += summary.local_allocations.len();
                    }
                }
                Err(_) => stats.failed += 1,
            }
        }
        stats
    }
}

pub struct MethodPipeline {
    config: AnalysisConfig,
}

impl MethodPipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one method; null-check insertion rewrites `unit.program`
    pub fn run(&self, unit: &mut MethodUnit) -> Result<MethodFacts> {
        let start = Instant::now();

        if self.config.escape.verify_ir {
            verify_program(&unit.program)?;
        }

        let null_checks_inserted = if self.config.null_check.enabled {
            NullCheckInsertion::new(self.config.null_check.invocation_kinds.clone())
                .apply(&mut unit.program)?
        } else {
            0
        };

        let escape = if self.config.escape.enabled {
            let mut escape_config = self.config.escape.clone();
            escape_config.mark_receiver_slot &= !unit.is_static;
            // verified above, before the insertion pass touched the program
            escape_config.verify_ir = false;
            Some(EscapeAnalysis::analyze(
                &unit.program,
                &unit.reference,
                &escape_config,
            )?)
        } else {
            None
        };

        let facts = MethodFacts {
            reference: unit.reference.clone(),
            null_checks_inserted,
            escape,
            elapsed_us: start.elapsed().as_micros(),
        };
        tracing::trace!(method = %unit.reference, elapsed_us = facts.elapsed_us, "method analyzed");
        Ok(facts)
    }

    /// Analyze a batch; one outcome per unit, in input order
    pub fn run_batch(&self, units: Vec<MethodUnit>) -> Vec<MethodOutcome> {
        let start = Instant::now();
        let analyze = |mut unit: MethodUnit| {
            let result = self.run(&mut unit);
            if let Err(error) = &result {
                tracing::warn!(
                    method = %unit.reference,
                    malformed_ir = error.is_malformed_ir(),
                    %error,
                    "method analysis failed"
                );
            }
            MethodOutcome { unit, result }
        };

        let outcomes: Vec<MethodOutcome> = if cfg!(feature = "parallel") && self.config.parallel.enabled {
            match self.thread_pool() {
                Some(pool) => pool.install(|| units.into_par_iter().map(analyze).collect()),
                None => units.into_par_iter().map(analyze).collect(),
            }
        } else {
            units.into_iter().map(analyze).collect()
        };

        let stats = BatchStats::from_outcomes(&outcomes);
        tracing::info!(
            methods = stats.methods,
            failed = stats.failed,
            null_checks = stats.null_checks_inserted,
            local_allocations = stats.local_allocations,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "batch analyzed"
        );
        outcomes
    }

    /// Dedicated pool when a thread count is configured, else the global one
    fn thread_pool(&self) -> Option<rayon::ThreadPool> {
        let threads = self.config.parallel.num_threads;
        if threads == 0 {
            return None;
        }
        match rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("bytegraph-worker-{i}"))
            .build()
        {
            Ok(pool) => Some(pool),
            Err(error) => {
                tracing::warn!(%error, threads, "falling back to the global rayon pool");
                None
            }
        }
    }
}
