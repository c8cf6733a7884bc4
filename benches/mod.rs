use criterion::{criterion_group, criterion_main};


use matching::register_benchmarks as register_matching_benchmarks;
use snapshot::register_benchmarks as register_snapshot_benchmarks;

criterion_group!(benches, register_matching_benchmarks, register_snapshot_benchmarks);

criterion_main!(benches);
