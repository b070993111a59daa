use arborescence::algo::{min_arborescence_cle, min_arborescence_frank};
use arborescence::generator::{generate, GeneratorConfig, GraphFamily};
use arborescence::VertexId;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

const SIZES: &[usize] = &[10, 100, 500, 1000];

fn cle(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("cle");

    for &n in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, &n| {
            bench.iter_batched(
                || {
                    generate(&GeneratorConfig {
                        vertex_count: n,
                        family: GraphFamily::Random,
                        cost_range: 1..=1000,
                        seed: n as u64,
                    })
                },
                |g| min_arborescence_cle(&g, VertexId::new(0), None).unwrap(),
                BatchSize::SmallInput,
            );
        });
    }
}

fn frank(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("frank");

    for &n in SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, &n| {
            bench.iter_batched(
                || {
                    generate(&GeneratorConfig {
                        vertex_count: n,
                        family: GraphFamily::Random,
                        cost_range: 1..=1000,
                        seed: n as u64,
                    })
                },
                |g| min_arborescence_frank(&g, VertexId::new(0), None).unwrap(),
                BatchSize::SmallInput,
            );
        });
    }
}

fn dense_cle(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("cle/dense");

    for &n in &[10usize, 100, 300] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, &n| {
            bench.iter_batched(
                || {
                    generate(&GeneratorConfig {
                        vertex_count: n,
                        family: GraphFamily::Dense,
                        cost_range: 1..=1000,
                        seed: n as u64,
                    })
                },
                |g| min_arborescence_cle(&g, VertexId::new(0), None).unwrap(),
                BatchSize::SmallInput,
            );
        });
    }
}

criterion_group!(benches, cle, frank, dense_cle);
criterion_main!(benches);
