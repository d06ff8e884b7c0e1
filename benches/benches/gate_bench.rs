//! # Gate Benchmarks
//!
//! Measures gate kernels and measurement over growing registers. Every gate
//! touches all 2^n amplitudes.
//!
//! Run: `cargo bench --bench gate_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qel_quantum::{GateKind, GateOp, QuantumRegister};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Benchmark single-qubit gates
fn bench_single_qubit(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_qubit");

    for qubits in [3usize, 10, 16] {
        for kind in [GateKind::H, GateKind::X, GateKind::Y, GateKind::Z] {
            let mut register = QuantumRegister::new(qubits).unwrap();
            let op = GateOp::single(kind, 0);

            group.bench_with_input(BenchmarkId::new(kind.name(), qubits), &op, |b, op| {
                b.iter(|| {
                    register.apply(black_box(*op)).unwrap();
                })
            });
        }
    }

    group.finish();
}

/// Benchmark CNOT
fn bench_cnot(c: &mut Criterion) {
    let mut group = c.benchmark_group("cnot");

    for qubits in [3usize, 10, 16] {
        let mut register = QuantumRegister::new(qubits).unwrap();
        register.apply(GateOp::single(GateKind::H, 0)).unwrap();
        let op = GateOp::cnot(0, qubits - 1);

        group.bench_with_input(BenchmarkId::from_parameter(qubits), &op, |b, op| {
            b.iter(|| {
                register.apply(black_box(*op)).unwrap();
            })
        });
    }

    group.finish();
}

/// Benchmark probabilities and measurement
fn bench_measure(c: &mut Criterion) {
    let mut group = c.benchmark_group("measure");

    let mut superposed = QuantumRegister::new(10).unwrap();
    for qubit in 0..10 {
        superposed.apply(GateOp::single(GateKind::H, qubit)).unwrap();
    }

    group.bench_function("probabilities_10q", |b| {
        b.iter(|| black_box(superposed.probabilities()))
    });

    let mut rng = StdRng::seed_from_u64(42);
    group.bench_function("measure_10q", |b| {
        b.iter(|| {
            let mut register = superposed.clone();
            black_box(register.measure_with(&mut rng))
        })
    });

    group.finish();
}

criterion_group!(benches, bench_single_qubit, bench_cnot, bench_measure);
criterion_main!(benches);
