//! # FoodTrace Registry Benchmarks
//!
//! | Area | Target |
//! |------|--------|
//! | Product registration | < 10μs in memory |
//! | Transfer | flat in prior chain length |
//! | History read | linear in entries |
//! | File store commit | grows with snapshot size |

use criterion::{criterion_group, criterion_main, Criterion};
use ft_tests::benchmarks::{registry, storage};

fn registry_benches(c: &mut Criterion) {
    registry::register_benchmarks(c);
}

fn storage_benches(c: &mut Criterion) {
    storage::register_benchmarks(c);
}

criterion_group!(benches, registry_benches, storage_benches);
criterion_main!(benches);
