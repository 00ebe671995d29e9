//! # Storage Benchmarks
//!
//! Cost of one committed batch on each store. The file store rewrites its
//! whole snapshot per commit, so its cost grows with the number of keys.

use criterion::{black_box, BenchmarkId, Criterion};
use ft_registry::{BatchOperation, FileBackedKVStore, InMemoryKVStore, KeyValueStore};
use rand::Rng;
use std::time::Duration;

fn random_batch(rng: &mut impl Rng, size: usize) -> Vec<BatchOperation> {
    (0..size)
        .map(|_| {
            let key: [u8; 12] = rng.gen();
            let value: Vec<u8> = (0..96).map(|_| rng.gen()).collect();
            BatchOperation::put(key.to_vec(), value)
        })
        .collect()
}

pub fn bench_memory_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("storage/memory");
    let mut rng = rand::thread_rng();

    // A transfer commits four operations
    group.bench_function("batch_4", |b| {
        let mut store = InMemoryKVStore::new();
        b.iter(|| {
            let batch = random_batch(&mut rng, 4);
            store.atomic_batch_write(black_box(batch)).unwrap();
        })
    });

    group.finish();
}

pub fn bench_file_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("storage/file");
    group.measurement_time(Duration::from_secs(15));
    group.sample_size(20);
    let mut rng = rand::thread_rng();

    for existing in [100usize, 1_000, 10_000] {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileBackedKVStore::open(dir.path().join("bench.db")).unwrap();
        store
            .atomic_batch_write(random_batch(&mut rng, existing))
            .unwrap();

        group.bench_with_input(BenchmarkId::new("batch_4", existing), &existing, |b, _| {
            b.iter(|| {
                let batch = random_batch(&mut rng, 4);
                store.atomic_batch_write(black_box(batch)).unwrap();
            })
        });
    }

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_memory_batch(c);
    bench_file_batch(c);
}
