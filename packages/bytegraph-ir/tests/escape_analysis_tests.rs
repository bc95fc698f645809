//! Escape analysis integration tests
//!
//! Properties checked:
//! - transitive escape through a field hop
//! - local allocations stay local
//! - reference cycles escape even without external use
//! - parameters (receiver included) always escape
//! - assign / cast / null-check / phi chains form one class
//! - deep machine-generated chains do not exhaust the call stack

mod common;

use bytegraph_ir::config::EscapeConfig;
use bytegraph_ir::features::escape_analysis::{find_escaping_variables, EscapeAnalysis};
use bytegraph_ir::shared::models::*;
use bytegraph_ir::IrError;
use common::*;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;
use proptest::prelude::*;

fn analyze(program: &Program, parameters: usize) -> EscapeAnalysis {
    EscapeAnalysis::analyze(program, &method(parameters), &EscapeConfig::default()).unwrap()
}

fn static_config() -> EscapeConfig {
    EscapeConfig {
        mark_receiver_slot: false,
        ..EscapeConfig::default()
    }
}

// ============================================================================
// Field hops
// ============================================================================

#[test]
fn test_store_into_parameter_escapes() {
    // this.next = new Node
    let program = ProgramBuilder::new(2)
        .insns([construct(1), put_field(Some(0), 1), exit(None)])
        .build();
    let facts = analyze(&program, 0);

    assert!(facts.escapes(v(1)));
    assert!(facts.is_locally_constructed(v(1)));
}

#[test]
fn test_store_into_instance_escaping_later_escapes() {
    // a = new; b = new; a.next = b; sink(a)
    let program = ProgramBuilder::new(3)
        .insns([
            construct(1),
            construct(2),
            put_field(Some(1), 2),
            invoke(InvocationType::Static, None, &[1], None),
            exit(None),
        ])
        .build();
    let facts = analyze(&program, 0);

    assert!(facts.escapes(v(1)));
    assert!(facts.escapes(v(2)));
}

#[test]
fn test_load_from_escaping_instance_escapes() {
    // x = this.next
    let program = ProgramBuilder::new(2)
        .insns([get_field(1, Some(0)), exit(None)])
        .build();
    assert!(analyze(&program, 0).escapes(v(1)));
}

#[test]
fn test_escape_does_not_flow_backwards() {
    // a = new; b = new; a.next = b; sink(b): a stays local
    let program = ProgramBuilder::new(3)
        .insns([
            construct(1),
            construct(2),
            put_field(Some(1), 2),
            invoke(InvocationType::Static, None, &[2], None),
            exit(None),
        ])
        .build();
    let facts = analyze(&program, 0);

    assert!(!facts.escapes(v(1)));
    assert!(facts.escapes(v(2)));
}

#[test]
fn test_static_field_store_escapes() {
    let program = ProgramBuilder::new(2)
        .insns([construct(1), put_field(None, 1), exit(None)])
        .build();
    assert!(analyze(&program, 0).escapes(v(1)));
}

// ============================================================================
// Local allocations
// ============================================================================

#[test]
fn test_confined_allocation_is_local() {
    // n = new; m = new; n.next = m; x = n.next; exit
    let program = ProgramBuilder::new(4)
        .insns([
            construct(1),
            construct(2),
            put_field(Some(1), 2),
            get_field(3, Some(1)),
            exit(None),
        ])
        .build();
    let facts = analyze(&program, 0);

    for var in 1..=3 {
        assert!(!facts.escapes(v(var)), "v{var} should stay local");
    }
    assert!(facts.is_locally_constructed(v(1)));
    assert!(facts.is_locally_constructed(v(2)));
    assert!(!facts.is_locally_constructed(v(3)));
    assert_eq!(facts.scalar_replacement_candidates(), vec![v(1), v(2)]);
}

#[test]
fn test_every_sink_kind_escapes() {
    let sinks: Vec<Instruction> = vec![
        exit(Some(1)),
        Instruction::Raise(RaiseInstruction { exception: v(1) }),
        Instruction::MonitorEnter(MonitorEnterInstruction { object_ref: v(1) }),
        Instruction::MonitorExit(MonitorExitInstruction { object_ref: v(1) }),
        Instruction::IsInstance(IsInstanceInstruction {
            receiver: v(2),
            value: v(1),
            type_name: "LNode;".to_string(),
        }),
        invoke(InvocationType::Virtual, Some(1), &[], None),
        invoke(InvocationType::Static, None, &[1], None),
        Instruction::PutElement(PutElementInstruction {
            array: v(2),
            index: v(2),
            value: v(1),
            element_type: ArrayElementType::Object,
        }),
        Instruction::GetElement(GetElementInstruction {
            receiver: v(1),
            array: v(2),
            index: v(2),
            element_type: ArrayElementType::Object,
        }),
        Instruction::GetElement(GetElementInstruction {
            receiver: v(2),
            array: v(1),
            index: v(2),
            element_type: ArrayElementType::Object,
        }),
    ];

    for sink in sinks {
        let kind = sink.kind_name();
        let program = ProgramBuilder::new(3).insns([construct(1), sink]).build();
        assert!(analyze(&program, 0).escapes(v(1)), "{kind} must make v1 escape");
    }
}

#[test]
fn test_invoke_receiver_escapes() {
    let program = ProgramBuilder::new(2)
        .insn(invoke(InvocationType::Static, None, &[], Some(1)))
        .build();
    assert!(analyze(&program, 0).escapes(v(1)));
}

// ============================================================================
// Cycles
// ============================================================================

#[test]
fn test_two_node_cycle_escapes() {
    // a.next = b; b.next = a
    let program = ProgramBuilder::new(3)
        .insns([
            construct(1),
            construct(2),
            put_field(Some(1), 2),
            put_field(Some(2), 1),
            exit(None),
        ])
        .build();
    let facts = analyze(&program, 0);

    assert!(facts.escapes(v(1)));
    assert!(facts.escapes(v(2)));
    assert!(facts.is_locally_constructed(v(1)));
}

#[test]
fn test_cycle_through_get_field_escapes() {
    // b = a.next; a.next = b (a reaches b, b reaches a)
    let program = ProgramBuilder::new(3)
        .insns([
            construct(1),
            get_field(2, Some(1)),
            put_field(Some(2), 1),
            exit(None),
        ])
        .build();
    let facts = analyze(&program, 0);
    assert!(facts.escapes(v(1)));
    assert!(facts.escapes(v(2)));
}

#[test]
fn test_values_hanging_off_a_cycle_escape() {
    // a ⇄ b, b.next = c
    let program = ProgramBuilder::new(4)
        .insns([
            construct(1),
            construct(2),
            construct(3),
            put_field(Some(1), 2),
            put_field(Some(2), 1),
            put_field(Some(2), 3),
        ])
        .build();
    assert!(analyze(&program, 0).escapes(v(3)));
}

// ============================================================================
// Parameters
// ============================================================================

#[test]
fn test_parameters_and_receiver_escape() {
    // receiver v0, parameters v1..=v2, local v3
    let program = ProgramBuilder::new(4).insns([construct(3), exit(None)]).build();
    let facts = analyze(&program, 2);

    for slot in 0..=2 {
        assert!(facts.escapes(v(slot)), "slot {slot}");
    }
    assert!(!facts.escapes(v(3)));
}

#[test]
fn test_static_method_without_parameters_marks_nothing() {
    let program = ProgramBuilder::new(1).insns([construct(0), exit(None)]).build();

    let facts = EscapeAnalysis::analyze(&program, &method(0), &static_config()).unwrap();
    assert!(!facts.escapes(v(0)));
    assert!(facts.is_locally_constructed(v(0)));

    // with the receiver convention the same slot is a parameter
    assert!(analyze(&program, 0).escapes(v(0)));
}

#[test]
fn test_static_method_marks_declared_parameters_only() {
    let program = ProgramBuilder::new(3).insns([construct(0), exit(None)]).build();
    let facts = EscapeAnalysis::analyze(&program, &method(2), &static_config()).unwrap();

    assert!(!facts.escapes(v(0)));
    assert!(facts.escapes(v(1)));
    assert!(facts.escapes(v(2)));
}

#[test]
fn test_parameter_range_is_clamped_to_variable_count() {
    // descriptor says 3 parameters, front end allocated only 2 variables
    let program = ProgramBuilder::new(2).insn(exit(None)).build();
    let facts = analyze(&program, 3);
    assert!(facts.escapes(v(0)));
    assert!(facts.escapes(v(1)));
}

// ============================================================================
// Coalescing
// ============================================================================

#[test]
fn test_assign_cast_null_check_chain_is_one_class() {
    let chain = [construct(1), assign(2, 1), cast(3, 2), null_check(4, 3)];

    let local = ProgramBuilder::new(5).insns(chain.clone()).insn(exit(None)).build();
    let facts = analyze(&local, 0);
    let class = facts.class_of(v(1));
    assert!((2..=4).all(|var| facts.class_of(v(var)) == class));
    assert_eq!(facts.escapes(v(1)), facts.escapes(v(4)));
    assert!(!facts.escapes(v(1)));

    // escape at the end of the chain reaches its start
    let returned = ProgramBuilder::new(5).insns(chain).insn(exit(Some(4))).build();
    let facts = analyze(&returned, 0);
    assert!(facts.escapes(v(1)));
    assert_eq!(facts.escapes(v(1)), facts.escapes(v(4)));
    // the flag itself does not spread
    assert!(facts.is_locally_constructed(v(1)));
    assert!(!facts.is_locally_constructed(v(4)));
}

#[test]
fn test_phi_merges_incoming_values() {
    // b0: branch v0 → b1 | b2
    // b1: v1 = new; jump b3
    // b2: v2 = new; jump b3
    // b3: v3 = phi [b1: v1, b2: v2]; return v3
    let program = ProgramBuilder::new(4)
        .block()
        .insn(branch(0, 1, 2))
        .block()
        .insns([construct(1), jump(3)])
        .block()
        .insns([construct(2), jump(3)])
        .block()
        .phi(3, &[(1, 1), (2, 2)])
        .insn(exit(Some(3)))
        .build();
    let facts = analyze(&program, 0);

    assert_eq!(facts.class_of(v(1)), facts.class_of(v(3)));
    assert_eq!(facts.class_of(v(2)), facts.class_of(v(3)));
    assert!(facts.escapes(v(1)));
    assert!(facts.escapes(v(2)));
}

#[test]
fn test_numeric_casts_do_not_coalesce() {
    let program = ProgramBuilder::new(4)
        .insns([
            Instruction::IntegerConstant(IntegerConstantInstruction { receiver: v(1), constant: 3 }),
            Instruction::CastInteger(CastIntegerInstruction {
                receiver: v(2),
                value: v(1),
                target_type: IntegerSubtype::Byte,
                direction: CastIntegerDirection::FromInteger,
            }),
            exit(Some(2)),
        ])
        .build();
    let facts = analyze(&program, 0);
    assert_ne!(facts.class_of(v(1)), facts.class_of(v(2)));
    assert!(!facts.escapes(v(1)));
}

// ============================================================================
// Failure semantics
// ============================================================================

#[test]
fn test_dangling_variable_fails() {
    let program = ProgramBuilder::new(2).insn(put_field(Some(0), 7)).build();
    let result = EscapeAnalysis::analyze(&program, &method(0), &EscapeConfig::default());
    assert!(matches!(result, Err(IrError::DanglingVariable { index: 7, .. })));
}

#[test]
fn test_dangling_block_fails() {
    let program = ProgramBuilder::new(1).insn(jump(4)).build();
    let result = EscapeAnalysis::analyze(&program, &method(0), &EscapeConfig::default());
    assert!(matches!(result, Err(IrError::DanglingBlock { index: 4, .. })));
}

// ============================================================================
// Scale
// ============================================================================

#[test]
fn test_deep_field_chain_does_not_overflow() {
    const DEPTH: usize = 200_000;
    // v0 = this; v_i.next = v_{i+1}
    let program = ProgramBuilder::new(DEPTH + 1)
        .insns((0..DEPTH).map(|i| put_field(Some(i), i + 1)))
        .build();
    let facts = analyze(&program, 0);
    assert!(facts.escapes(v(DEPTH)));
    assert_eq!(facts.class_count(), DEPTH + 1);
}

#[test]
fn test_long_cycle_does_not_overflow() {
    const LENGTH: usize = 200_000;
    // v1 → v2 → ... → vN → v1, v0 (this) untouched
    let program = ProgramBuilder::new(LENGTH + 1)
        .insns((1..=LENGTH).map(|i| put_field(Some(i), if i == LENGTH { 1 } else { i + 1 })))
        .build();
    let facts = analyze(&program, 0);
    assert!((1..=LENGTH).all(|i| facts.escapes(v(i))));
}

// ============================================================================
// Instruction-local variant
// ============================================================================

#[test]
fn test_find_escaping_variables_does_not_propagate() {
    // this.next = a; b = a.next: only the store operands escape
    let program = ProgramBuilder::new(3)
        .insns([construct(1), put_field(Some(0), 1), get_field(2, Some(1))])
        .build();
    assert_eq!(
        find_escaping_variables(&program).unwrap(),
        vec![true, true, false]
    );
}

// ============================================================================
// Property: cycle closure + propagation match petgraph's SCCs
// ============================================================================

/// Classes that must escape when the only seeds are reference cycles:
/// everything reachable from a node that lies on a cycle
fn expected_escaping(nodes: usize, edges: &[(usize, usize)]) -> Vec<bool> {
    let mut graph = DiGraph::<(), ()>::new();
    let ids: Vec<NodeIndex> = (0..nodes).map(|_| graph.add_node(())).collect();
    for &(from, to) in edges {
        graph.update_edge(ids[from], ids[to], ());
    }

    let mut escaping = vec![false; nodes];
    for component in tarjan_scc(&graph) {
        let cyclic = component.len() > 1 || graph.contains_edge(component[0], component[0]);
        if !cyclic {
            continue;
        }
        for &start in &component {
            let mut bfs = Bfs::new(&graph, start);
            while let Some(node) = bfs.next(&graph) {
                escaping[node.index()] = true;
            }
        }
    }
    escaping
}

proptest! {
    #[test]
    fn prop_cycle_closure_matches_scc(
        nodes in 1usize..40,
        raw_edges in prop::collection::vec((0usize..40, 0usize..40), 0..80),
    ) {
        let edges: Vec<(usize, usize)> = raw_edges
            .into_iter()
            .map(|(from, to)| (from % nodes, to % nodes))
            .collect();

        let program = ProgramBuilder::new(nodes)
            .insns(edges.iter().map(|&(from, to)| put_field(Some(from), to)))
            .build();
        // no parameters, no receiver: reference cycles are the only seeds
        let facts = EscapeAnalysis::analyze(&program, &method(0), &static_config()).unwrap();

        let expected = expected_escaping(nodes, &edges);
        for (index, &escapes) in expected.iter().enumerate() {
            prop_assert_eq!(facts.escapes(v(index)), escapes, "v{}", index);
        }
    }
}
