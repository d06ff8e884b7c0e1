//! # Simulation Benchmarks
//!
//! Measures the cost of one simulation tick and of the dispatch policies
//! over a crowded registry.
//!
//! Run: `cargo bench --bench simulation_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qel_dispatch::{
    BuildingConfig, DispatchPolicy, FixedPresence, PresenceSource, RegistryConfig, RequestRegistry,
};
use qel_orchestration::{ElevatorSimulation, SimulationConfig};

/// Benchmark a full tick with the simulated presence feed
fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    let mut config = SimulationConfig::default();
    config.seed = Some(7);

    group.bench_function("idle", |b| {
        let mut sim = ElevatorSimulation::new(config.clone()).unwrap();
        b.iter(|| black_box(sim.tick()))
    });

    group.bench_function("busy", |b| {
        let mut sim = ElevatorSimulation::new(config.clone()).unwrap();
        let mut floor = 1;
        b.iter(|| {
            floor = floor % 5 + 1;
            let _ = sim.submit_request(floor);
            black_box(sim.tick())
        })
    });

    group.finish();
}

/// Benchmark policy selection over many waiting floors
fn bench_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy");

    for floors in [5, 50, 500] {
        let building = BuildingConfig { lowest_floor: 1, highest_floor: floors, home_floor: 1 };
        let mut presence = FixedPresence::new(building.clone());
        let mut registry = RequestRegistry::new(RegistryConfig::default(), building);
        for floor in 1..=floors {
            registry.submit(floor, floor as u64, &mut presence).unwrap();
        }
        let confidence = presence.confidence_map();

        for policy in [DispatchPolicy::Fcfs, DispatchPolicy::CostBased] {
            group.bench_with_input(
                BenchmarkId::new(policy.name(), floors),
                &policy,
                |b, policy| {
                    b.iter(|| {
                        black_box(policy.select(registry.active_requests(), floors / 2, &confidence))
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_tick, bench_policies);
criterion_main!(benches);
