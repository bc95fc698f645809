//! Escape Analysis
//!
//! Decides, per value, whether it can be observed outside the method that
//! produced it (stored to the heap, passed to a call, returned, thrown,
//! locked on). Values that provably stay local are candidates for scalar
//! replacement.
//!
//! ## Algorithm
//!
//! ```text
//! A. build      union-find over variables (assign / cast / null-check / phi)
//!               + reference graph (instance → field value)
//!               + escape seeds (params, calls, returns, element access, ...)
//!               collapsed onto equivalence classes
//! B. cycles     explicit-stack DFS, back-edge target ⇒ escaping
//! C. propagate  BFS along reference edges from every escaping class
//! ```
//!
//! Not flow-sensitive: facts are instruction-local, so block order does not
//! matter. Every traversal uses an explicit stack or queue; reference graphs
//! come from machine-generated code and can be arbitrarily deep.
//!
//! Time: O(V α(V) + E) where V = variables, E = reference edges

use std::collections::VecDeque;

use serde::Serialize;

use crate::config::EscapeConfig;
use crate::errors::{IrError, Result};
use crate::features::graph::{AdjacencyGraph, DisjointSet, Graph, GraphBuilder};
use crate::features::validation::{verify_operands, verify_program};
use crate::shared::models::*;
use crate::shared::visitor::InstructionVisitor;

/// Escape facts for one method
#[derive(Debug, Clone)]
pub struct EscapeAnalysis {
    /// variable index → equivalence class
    definition_classes: Vec<usize>,
    /// class → escapes
    escaping: Vec<bool>,
    /// variable index → defined by `construct` (not coalesced)
    locally_constructed: Vec<bool>,
    reference_edges: usize,
}

/// Serializable digest of an [`EscapeAnalysis`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EscapeSummary {
    pub variable_count: usize,
    pub class_count: usize,
    pub escaping_class_count: usize,
    pub reference_edge_count: usize,
    pub escaping_variables: Vec<usize>,
    pub local_allocations: Vec<usize>,
}

impl EscapeAnalysis {
    /// Analyze `program`, the body of `method`
    ///
    /// Parameter slots are derived from the method's declared parameter
    /// count. Dangling operands are always rejected; the full structural
    /// verifier runs when `config.verify_ir` is set.
    pub fn analyze(program: &Program, method: &MethodReference, config: &EscapeConfig) -> Result<Self> {
        Self::analyze_with_parameter_count(program, method.parameter_count(), config)
    }

    pub fn analyze_with_parameter_count(
        program: &Program,
        parameter_count: usize,
        config: &EscapeConfig,
    ) -> Result<Self> {
        if config.verify_ir {
            verify_program(program)?;
        } else {
            verify_operands(program)?;
        }

        let variable_count = program.variable_count();

        // ── Phase A: build ────────────────────────────────────────────────
        let mut builder = FactBuilder::new(variable_count);
        let first_slot = if config.mark_receiver_slot { 0 } else { 1 };
        for slot in (first_slot..=parameter_count).filter(|&slot| slot < variable_count) {
            builder.escaping[slot] = true;
        }

        for block in program.basic_blocks() {
            for phi in &block.phis {
                for incoming in &phi.incomings {
                    builder.coalesce(phi.receiver, incoming.value);
                }
            }
            for insn in &block.instructions {
                insn.accept(&mut builder);
            }
        }

        let FactBuilder {
            mut classes,
            escaping: escaping_variables,
            locally_constructed,
            edges,
        } = builder;

        let definition_classes = classes.pack(variable_count);
        let class_count = definition_classes.iter().max().map_or(0, |max| max + 1);

        let mut escaping = vec![false; class_count];
        for (var, _) in escaping_variables.iter().enumerate().filter(|(_, escapes)| **escapes) {
            escaping[definition_classes[var]] = true;
        }

        let mut graph_builder = GraphBuilder::with_size(class_count);
        for &(from, to) in &edges {
            graph_builder.add_edge(definition_classes[from], definition_classes[to]);
        }
        let graph = graph_builder.build();

        tracing::debug!(
            variables = variable_count,
            classes = class_count,
            edges = graph.edge_count(),
            seeded = escaping.iter().filter(|e| **e).count(),
            "escape analysis: reference graph built"
        );

        // ── Phase B: cycle closure ────────────────────────────────────────
        let cyclic = mark_cycles(&graph, &mut escaping);
        tracing::debug!(cyclic, "escape analysis: cycles closed");

        // ── Phase C: propagation ──────────────────────────────────────────
        propagate(&graph, &mut escaping);
        tracing::debug!(
            escaping = escaping.iter().filter(|e| **e).count(),
            classes = class_count,
            "escape analysis: propagation done"
        );

        Ok(Self {
            definition_classes,
            escaping,
            locally_constructed,
            reference_edges: graph.edge_count(),
        })
    }

    /// Whether the value held by `var` can escape
    ///
    /// Unchecked: `var` must belong to the analyzed program. Debug builds
    /// assert it; release builds report an unknown variable as escaping.
    /// [`try_escapes`](Self::try_escapes) is the checked form.
    pub fn escapes(&self, var: Variable) -> bool {
        self.debug_assert_known(var);
        self.class_of(var).map_or(true, |class| self.escaping[class])
    }

    pub fn try_escapes(&self, var: Variable) -> Result<bool> {
        self.class_of(var)
            .map(|class| self.escaping[class])
            .ok_or_else(|| {
                IrError::dangling_variable(var.index(), self.variable_count(), "escape query")
            })
    }

    /// Raw per-variable flag; coalescing does not spread it
    ///
    /// Unchecked like [`escapes`](Self::escapes).
    pub fn is_locally_constructed(&self, var: Variable) -> bool {
        self.debug_assert_known(var);
        self.locally_constructed.get(var.index()).copied().unwrap_or(false)
    }

    #[inline]
    fn debug_assert_known(&self, var: Variable) {
        debug_assert!(
            var.index() < self.variable_count(),
            "{var} is not in this program ({} variables)",
            self.variable_count()
        );
    }

    /// Canonical equivalence class of `var`
    pub fn class_of(&self, var: Variable) -> Option<usize> {
        self.definition_classes.get(var.index()).copied()
    }

    pub fn class_count(&self) -> usize {
        self.escaping.len()
    }

    pub fn variable_count(&self) -> usize {
        self.definition_classes.len()
    }

    /// Allocation sites whose object never escapes
    pub fn scalar_replacement_candidates(&self) -> Vec<Variable> {
        (0..self.variable_count())
            .map(Variable::from_index)
            .filter(|&var| self.is_locally_constructed(var) && !self.escapes(var))
            .collect()
    }

    pub fn summary(&self) -> EscapeSummary {
        let escaping_variables: Vec<usize> = (0..self.variable_count())
            .filter(|&index| self.escaping[self.definition_classes[index]])
            .collect();
        EscapeSummary {
            variable_count: self.variable_count(),
            class_count: self.class_count(),
            escaping_class_count: self.escaping.iter().filter(|e| **e).count(),
            reference_edge_count: self.reference_edges,
            escaping_variables,
            local_allocations: self
                .scalar_replacement_candidates()
                .into_iter()
                .map(Variable::index)
                .collect(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Phase A
// ═══════════════════════════════════════════════════════════════════════════

/// Per-instruction fact collection, in variable space
struct FactBuilder {
    classes: DisjointSet,
    escaping: Vec<bool>,
    locally_constructed: Vec<bool>,
    /// instance → value reachable through one of its fields
    edges: Vec<(usize, usize)>,
}

impl FactBuilder {
    fn new(variable_count: usize) -> Self {
        Self {
            classes: DisjointSet::with_size(variable_count),
            escaping: vec![false; variable_count],
            locally_constructed: vec![false; variable_count],
            edges: Vec::new(),
        }
    }

    fn coalesce(&mut self, receiver: Variable, source: Variable) {
        self.classes.union(receiver.index(), source.index());
    }

    fn escape(&mut self, var: Variable) {
        #[cfg(feature = "trace")]
        tracing::trace!(%var, "escape seed");
        self.escaping[var.index()] = true;
    }

    fn escape_all(&mut self, vars: &[Variable]) {
        for &var in vars {
            self.escape(var);
        }
    }

    fn field_access(&mut self, instance: Option<Variable>, value: Variable) {
        match instance {
            Some(instance) => self.edges.push((instance.index(), value.index())),
            None => self.escape(value),
        }
    }

    fn call(&mut self, instance: Option<Variable>, arguments: &[Variable], receiver: Option<Variable>) {
        if let Some(instance) = instance {
            self.escape(instance);
        }
        self.escape_all(arguments);
        if let Some(receiver) = receiver {
            self.escape(receiver);
        }
    }
}

impl InstructionVisitor for FactBuilder {
    type Output = ();

    fn visit_integer_constant(&mut self, _: &IntegerConstantInstruction) {}
    fn visit_long_constant(&mut self, _: &LongConstantInstruction) {}
    fn visit_float_constant(&mut self, _: &FloatConstantInstruction) {}
    fn visit_double_constant(&mut self, _: &DoubleConstantInstruction) {}
    fn visit_string_constant(&mut self, _: &StringConstantInstruction) {}
    fn visit_class_constant(&mut self, _: &ClassConstantInstruction) {}
    fn visit_null_constant(&mut self, _: &NullConstantInstruction) {}

    fn visit_assign(&mut self, insn: &AssignInstruction) {
        self.coalesce(insn.receiver, insn.assignee);
    }

    fn visit_cast(&mut self, insn: &CastInstruction) {
        self.coalesce(insn.receiver, insn.value);
    }

    // numeric conversions produce fresh primitive values
    fn visit_cast_number(&mut self, _: &CastNumberInstruction) {}
    fn visit_cast_integer(&mut self, _: &CastIntegerInstruction) {}

    fn visit_binary(&mut self, _: &BinaryInstruction) {}
    fn visit_negate(&mut self, _: &NegateInstruction) {}
    fn visit_branching(&mut self, _: &BranchingInstruction) {}
    fn visit_binary_branching(&mut self, _: &BinaryBranchingInstruction) {}
    fn visit_jump(&mut self, _: &JumpInstruction) {}
    fn visit_switch(&mut self, _: &SwitchInstruction) {}

    fn visit_exit(&mut self, insn: &ExitInstruction) {
        if let Some(value) = insn.value_to_return {
            self.escape(value);
        }
    }

    fn visit_raise(&mut self, insn: &RaiseInstruction) {
        self.escape(insn.exception);
    }

    fn visit_construct(&mut self, insn: &ConstructInstruction) {
        self.locally_constructed[insn.receiver.index()] = true;
    }

    fn visit_construct_array(&mut self, _: &ConstructArrayInstruction) {}
    fn visit_construct_multi_array(&mut self, _: &ConstructMultiArrayInstruction) {}

    fn visit_get_field(&mut self, insn: &GetFieldInstruction) {
        self.field_access(insn.instance, insn.receiver);
    }

    fn visit_put_field(&mut self, insn: &PutFieldInstruction) {
        self.field_access(insn.instance, insn.value);
    }

    // Array aliasing is not modelled: everything touching an element escapes
    fn visit_get_element(&mut self, insn: &GetElementInstruction) {
        self.escape(insn.array);
        self.escape(insn.receiver);
    }

    fn visit_put_element(&mut self, insn: &PutElementInstruction) {
        self.escape(insn.array);
        self.escape(insn.index);
        self.escape(insn.value);
    }

    fn visit_array_length(&mut self, _: &ArrayLengthInstruction) {}
    fn visit_clone_array(&mut self, _: &CloneArrayInstruction) {}
    fn visit_unwrap_array(&mut self, _: &UnwrapArrayInstruction) {}

    fn visit_is_instance(&mut self, insn: &IsInstanceInstruction) {
        self.escape(insn.value);
    }

    fn visit_init_class(&mut self, _: &InitClassInstruction) {}

    fn visit_invoke(&mut self, insn: &InvokeInstruction) {
        self.call(insn.instance, &insn.arguments, insn.receiver);
    }

    fn visit_invoke_dynamic(&mut self, insn: &InvokeDynamicInstruction) {
        self.call(insn.instance, &insn.arguments, insn.receiver);
    }

    fn visit_null_check(&mut self, insn: &NullCheckInstruction) {
        self.coalesce(insn.receiver, insn.value);
    }

    fn visit_monitor_enter(&mut self, insn: &MonitorEnterInstruction) {
        self.escape(insn.object_ref);
    }

    fn visit_monitor_exit(&mut self, insn: &MonitorExitInstruction) {
        self.escape(insn.object_ref);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Phase B
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

/// Mark the target of every DFS back-edge as escaping; returns how many
/// classes were newly marked
///
/// Roots are the classes without incoming edges, then every class still
/// unvisited (cycles no root reaches).
fn mark_cycles(graph: &AdjacencyGraph, escaping: &mut [bool]) -> usize {
    let size = graph.size();
    let mut state = vec![VisitState::Unvisited; size];
    let mut stack: Vec<(usize, usize)> = Vec::new();
    let mut newly_marked = 0;

    let roots = (0..size).filter(|&node| graph.incoming_edges_count(node) == 0);
    let roots: Vec<usize> = roots.chain(0..size).collect();

    for root in roots {
        if state[root] != VisitState::Unvisited {
            continue;
        }
        state[root] = VisitState::InProgress;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let Some(&next) = graph.successors(node).get(frame.1) else {
                state[node] = VisitState::Done;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match state[next] {
                VisitState::Unvisited => {
                    state[next] = VisitState::InProgress;
                    stack.push((next, 0));
                }
                VisitState::InProgress => {
                    if !escaping[next] {
                        escaping[next] = true;
                        newly_marked += 1;
                    }
                }
                VisitState::Done => {}
            }
        }
    }
    newly_marked
}

// ═══════════════════════════════════════════════════════════════════════════
// Phase C
// ═══════════════════════════════════════════════════════════════════════════

/// Forward closure of the escaping set along reference edges
fn propagate(graph: &AdjacencyGraph, escaping: &mut [bool]) {
    let mut queue: VecDeque<usize> = (0..escaping.len()).filter(|&class| escaping[class]).collect();
    while let Some(class) = queue.pop_front() {
        for &next in graph.successors(class) {
            if !escaping[next] {
                escaping[next] = true;
                queue.push_back(next);
            }
        }
    }
}
