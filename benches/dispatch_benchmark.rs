// ============================================================================
// Dispatch Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Storage Strategies - Exact-width vs fastest-width fixed-point arithmetic
// 2. Name Resolution - Exact and lenient lookups against the catalogue
// 3. Dispatch - Slot walk plus table lookup, excluding kernel work
// 4. Probe - The built-in kernel across representative type triples
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fluid_dispatch::numeric::{FastFixed, Fixed};
use fluid_dispatch::prelude::*;
use std::hint::black_box;

// ============================================================================
// Storage Strategy Benchmarks
// Same values, same results, different backing integer
// ============================================================================

fn benchmark_storage_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_point_mul_add");

    let exact: Vec<Fixed<32, 16>> = (1..=1024)
        .map(|i| Fixed::from_f64(i as f64 / 37.0))
        .collect();
    let fast: Vec<FastFixed<32, 16>> = exact.iter().map(|x| x.with_storage()).collect();

    group.bench_function("FIXED(32,16)", |b| {
        b.iter(|| {
            let mut acc = Fixed::<32, 16>::zero();
            for &x in &exact {
                acc = acc + x * x;
            }
            black_box(acc)
        });
    });

    group.bench_function("FAST_FIXED(32,16)", |b| {
        b.iter(|| {
            let mut acc = FastFixed::<32, 16>::zero();
            for &x in &fast {
                acc = acc + x * x;
            }
            black_box(acc)
        });
    });

    group.finish();
}

// ============================================================================
// Name Resolution Benchmarks
// ============================================================================

fn benchmark_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("name_resolution");
    let catalogue = default_catalogue();
    let resolver = NameResolver::new(&catalogue);

    for name in ["DOUBLE", "FAST_FIXED(64,32)", "fixed_fast( 64, 32 )"] {
        group.bench_with_input(BenchmarkId::from_parameter(name), name, |b, name| {
            b.iter(|| black_box(resolver.resolve(Role::Quantity, black_box(name))));
        });
    }

    group.finish();
}

// ============================================================================
// Dispatch Benchmarks
// Kernel does no work, so this measures slot walk and lookup only
// ============================================================================

struct Noop;

impl Simulation for Noop {
    type Output = ();

    fn run<P: Real, V: Real, VF: Real>(&self, _field: &Field) -> Self::Output {}
}

fn benchmark_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    let catalogue = default_catalogue();
    let table = default_table::<Noop>(&catalogue).unwrap();
    let dispatcher = Dispatcher::new(&catalogue, &table);
    let field = Field::blank(FieldDimensions::new(1, 1));

    let triples = [
        ("first", DispatchTriple::new(0, 0, 0)),
        ("last", DispatchTriple::new(5, 5, 5)),
        ("mixed", DispatchTriple::new(2, 0, 1)),
    ];

    for (label, triple) in triples {
        group.bench_with_input(BenchmarkId::new("built", label), &triple, |b, triple| {
            b.iter(|| black_box(dispatcher.dispatch(&Noop, *triple, &field)));
        });
    }

    group.bench_function("unbuilt", |b| {
        b.iter(|| black_box(dispatcher.dispatch(&Noop, DispatchTriple::new(0, 0, 1), &field)));
    });

    group.finish();
}

// ============================================================================
// Probe Benchmarks
// One pass over a default-sized field
// ============================================================================

fn benchmark_probe(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_probe");
    let session = DispatchSessionBuilder::<FieldProbe>::new().build().unwrap();
    let field = Field::blank(FieldDimensions::default());
    let resolver = NameResolver::new(session.catalogue());

    for names in [
        ["DOUBLE", "DOUBLE", "DOUBLE"],
        ["FIXED(32,16)", "FIXED(32,16)", "FIXED(32,16)"],
        ["FAST_FIXED(32,16)", "FAST_FIXED(32,16)", "FAST_FIXED(32,16)"],
        ["FIXED(32,16)", "FLOAT", "DOUBLE"],
    ] {
        let triple = resolver.resolve_triple(names[0], names[1], names[2]).unwrap();
        let dispatcher = session.dispatcher();
        group.bench_with_input(
            BenchmarkId::from_parameter(names.join(",")),
            &triple,
            |b, triple| {
                b.iter(|| black_box(dispatcher.dispatch(&FieldProbe, *triple, &field)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_storage_strategies,
    benchmark_resolution,
    benchmark_dispatch,
    benchmark_probe
);
criterion_main!(benches);
