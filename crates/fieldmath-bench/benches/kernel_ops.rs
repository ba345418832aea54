//! Criterion micro-benchmarks for the slice kernels without dispatch.

use criterion::{criterion_group, criterion_main, Criterion};
use fieldmath_bench::{missing_pattern, SENTINEL};
use fieldmath_core::{DomainPolicy, MissingValue};
use fieldmath_kernel::{map_binary, map_unary, KernelOptions};

const LEN: usize = 1 << 20;

fn bench_map_unary(c: &mut Criterion) {
    let src = missing_pattern(LEN, 20, 0);
    let mv = MissingValue::Sentinel(SENTINEL);
    let mut out = vec![0.0f64; LEN];

    let mut group = c.benchmark_group("map_unary_1m");
    for (label, opts) in [
        ("serial", KernelOptions::serial(DomainPolicy::PropagateMissing)),
        ("parallel", KernelOptions::default()),
    ] {
        group.bench_function(label, |b| {
            b.iter(|| {
                let r = map_unary(&src, mv, &mut out, mv, &opts, f64::sqrt).unwrap();
                std::hint::black_box(&r);
            });
        });
    }
    group.finish();
}

fn bench_map_binary(c: &mut Criterion) {
    let a = missing_pattern(LEN, 20, 0);
    let b_src = missing_pattern(LEN, 20, 10);
    let mv = MissingValue::Sentinel(SENTINEL);
    let mut out = vec![0.0f64; LEN];
    let opts = KernelOptions::default();

    c.bench_function("map_binary_1m", |b| {
        b.iter(|| {
            let r = map_binary(&a, mv, &b_src, mv, &mut out, mv, &opts, |x, y| x * y).unwrap();
            std::hint::black_box(&r);
        });
    });
}

criterion_group!(benches, bench_map_unary, bench_map_binary);
criterion_main!(benches);
