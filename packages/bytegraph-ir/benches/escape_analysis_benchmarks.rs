//! Escape analysis benchmarks
//!
//! Shapes:
//! - assign chains (one big class, union-find dominated)
//! - field-store chains (long reference paths, propagation dominated)
//! - field-store rings (one long cycle, cycle closure dominated)
//! - batches of small methods through the pipeline

use bytegraph_ir::config::{AnalysisConfig, EscapeConfig, Preset};
use bytegraph_ir::features::escape_analysis::EscapeAnalysis;
use bytegraph_ir::shared::models::*;
use bytegraph_ir::{MethodPipeline, MethodUnit};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn v(index: usize) -> Variable {
    Variable::from_index(index)
}

fn put_next(instance: usize, value: usize) -> Instruction {
    Instruction::PutField(PutFieldInstruction {
        instance: Some(v(instance)),
        value: v(value),
        field: FieldReference::new("Node", "next"),
        field_type: "LNode;".to_string(),
    })
}

fn single_block(variables: usize, instructions: Vec<Instruction>) -> Program {
    let mut program = Program::with_variables(variables);
    let block = program.create_basic_block();
    let body = program.basic_block_at_mut(block).unwrap();
    body.add_all(instructions);
    body.add(Instruction::Exit(ExitInstruction { value_to_return: None }));
    program
}

/// v0 = new; v(i+1) = v(i)
fn assign_chain(length: usize) -> Program {
    let mut instructions = vec![Instruction::Construct(ConstructInstruction {
        receiver: v(0),
        class_name: "Node".to_string(),
    })];
    instructions.extend((1..length).map(|i| {
        Instruction::Assign(AssignInstruction {
            receiver: v(i),
            assignee: v(i - 1),
        })
    }));
    single_block(length, instructions)
}

/// v(i) = new; v(i).next = v(i+1); optionally closed into a ring
fn store_chain(length: usize, ring: bool) -> Program {
    let mut instructions: Vec<Instruction> = (0..length)
        .map(|i| {
            Instruction::Construct(ConstructInstruction {
                receiver: v(i),
                class_name: "Node".to_string(),
            })
        })
        .collect();
    instructions.extend((0..length - 1).map(|i| put_next(i, i + 1)));
    if ring {
        instructions.push(put_next(length - 1, 0));
    }
    single_block(length, instructions)
}

fn config() -> EscapeConfig {
    EscapeConfig {
        verify_ir: false,
        mark_receiver_slot: false,
        ..EscapeConfig::default()
    }
}

fn bench_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("escape_analysis");

    for size in [1_000usize, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        let chain = assign_chain(size);
        group.bench_with_input(BenchmarkId::new("assign_chain", size), &chain, |b, program| {
            b.iter(|| black_box(EscapeAnalysis::analyze_with_parameter_count(program, 0, &config())))
        });

        let stores = store_chain(size, false);
        group.bench_with_input(BenchmarkId::new("store_chain", size), &stores, |b, program| {
            b.iter(|| black_box(EscapeAnalysis::analyze_with_parameter_count(program, 0, &config())))
        });

        let ring = store_chain(size, true);
        group.bench_with_input(BenchmarkId::new("store_ring", size), &ring, |b, program| {
            b.iter(|| black_box(EscapeAnalysis::analyze_with_parameter_count(program, 0, &config())))
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let units: Vec<MethodUnit> = (0..512)
        .map(|i| {
            MethodUnit::new(
                MethodReference::new("Node", format!("m{i}"), vec![], "V"),
                store_chain(64, i % 2 == 0),
            )
        })
        .collect();

    let mut group = c.benchmark_group("pipeline_batch");
    group.throughput(Throughput::Elements(units.len() as u64));
    for preset in [Preset::Fast, Preset::Thorough] {
        let pipeline = MethodPipeline::new(AnalysisConfig::from_preset(preset));
        group.bench_with_input(BenchmarkId::from_parameter(preset), &units, |b, units| {
            b.iter(|| black_box(pipeline.run_batch(units.clone())))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_shapes, bench_batch);
criterion_main!(benches);
