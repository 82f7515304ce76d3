//! Benchmarks for the structural-matrix sampler.
//!
//! Run with:
//! ```bash
//! cargo bench --bench draws
//!
//! # Sign search on rayon
//! cargo bench --bench draws --features parallel
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gennorm::{
    generate_draws, normalize_signs, reference_from_draw, Matrix, PrecisionStack, RestrictionSet,
};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

fn bench_sweeps(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweeps");
    group.sample_size(20);
    for n in [2usize, 4, 8] {
        let restrictions = RestrictionSet::unrestricted(n);
        let precision = PrecisionStack::identity(n);
        let initial = Matrix::identity(n, n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
            b.iter(|| {
                let draws = generate_draws(
                    100,
                    &initial,
                    &precision,
                    n as f64 + 5.0,
                    &restrictions,
                    false,
                    &mut rng,
                )
                .unwrap();
                black_box(draws.len())
            });
        });
    }
    group.finish();
}

fn bench_sign_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("sign_search");
    group.sample_size(10);
    for n in [4usize, 8, 12] {
        let restrictions = RestrictionSet::unrestricted(n);
        let precision = PrecisionStack::identity(n);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(2);
        let draws = generate_draws(
            200,
            &Matrix::identity(n, n),
            &precision,
            n as f64 + 5.0,
            &restrictions,
            false,
            &mut rng,
        )
        .unwrap();
        let reference = draws.last().map(reference_from_draw).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(n), &draws, |b, draws| {
            b.iter(|| {
                let mut batch = draws.clone().into_vec();
                black_box(normalize_signs(&mut batch, &reference).unwrap())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sweeps, bench_sign_search);
criterion_main!(benches);
