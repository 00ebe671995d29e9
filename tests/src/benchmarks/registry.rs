//! # Registry Benchmarks
//!
//! Targets:
//! - Product registration: < 10μs in memory
//! - Transfer: < 10μs in memory, independent of how long the chain already is
//! - History read: linear in the number of entries
//! - Safety check: one product lookup

use crate::fixtures::*;
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use ft_registry::{NoopEventSink, SupplyChainApi};
use rand::seq::SliceRandom;
use shared_types::Identity;
use std::time::Duration;

const CHAIN: [Identity; 4] = [FARMER, PROCESSOR, DISTRIBUTOR, RETAILER];

pub fn bench_registration(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry/register_product");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("single", |b| {
        let registry = registry_with_sink(NoopEventSink);
        register_cast(&registry);

        b.iter(|| {
            black_box(
                registry
                    .register_product(FARMER, "Apples", "Orchard", T0 + WEEK, T0)
                    .unwrap(),
            )
        })
    });

    group.throughput(Throughput::Elements(1_000));
    group.bench_function("batch_1000", |b| {
        b.iter(|| {
            let registry = registry_with_sink(NoopEventSink);
            register_cast(&registry);
            for _ in 0..1_000 {
                registry
                    .register_product(FARMER, "Apples", "Orchard", T0 + WEEK, T0)
                    .unwrap();
            }
            black_box(registry.product_count().unwrap())
        })
    });

    group.finish();
}

/// Hand the product to a random other member of the chain.
fn hop<S: SupplyChainApi>(
    registry: &S,
    id: shared_types::ProductId,
    owner: &mut Identity,
    rng: &mut impl rand::Rng,
) {
    let candidates: Vec<Identity> = CHAIN.iter().copied().filter(|p| p != owner).collect();
    let next = *candidates.choose(rng).expect("chain has other members");
    registry
        .transfer_product(*owner, id, next, "Depot", T0)
        .unwrap();
    *owner = next;
}

pub fn bench_transfers(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry/transfer_product");
    group.measurement_time(Duration::from_secs(10));

    // Prior chain length must not change the cost of the next hop
    for prior_hops in [0usize, 100, 1_000] {
        let registry = registry_with_sink(NoopEventSink);
        register_cast(&registry);
        let id = registry
            .register_product(FARMER, "Pallet", "Farm", T0 + WEEK, T0)
            .unwrap();

        let mut rng = rand::thread_rng();
        let mut owner = FARMER;
        for _ in 0..prior_hops {
            hop(&registry, id, &mut owner, &mut rng);
        }

        group.bench_with_input(
            BenchmarkId::new("next_hop", prior_hops),
            &registry,
            |b, r| b.iter(|| hop(black_box(r), id, &mut owner, &mut rng)),
        );
    }

    group.finish();
}

pub fn bench_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry/reads");
    group.measurement_time(Duration::from_secs(10));

    for hops in [1usize, 10, 100, 1_000] {
        let registry = registry_with_sink(NoopEventSink);
        register_cast(&registry);
        let id = registry
            .register_product(FARMER, "Pallet", "Farm", T0 + WEEK, T0)
            .unwrap();
        for i in 0..hops {
            registry
                .transfer_product(CHAIN[i % 4], id, CHAIN[(i + 1) % 4], "Depot", T0)
                .unwrap();
        }

        group.throughput(Throughput::Elements(hops as u64 + 1));
        group.bench_with_input(BenchmarkId::new("history", hops), &registry, |b, r| {
            b.iter(|| black_box(r.get_product_history(id).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("owners", hops), &registry, |b, r| {
            b.iter(|| black_box(r.get_ownership_history(id).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("is_safe", hops), &registry, |b, r| {
            b.iter(|| black_box(r.is_product_safe(id, T0).unwrap()))
        });
    }

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_registration(c);
    bench_transfers(c);
    bench_reads(c);
}
