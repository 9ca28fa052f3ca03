//! Benchmarks for placement and allocation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cartonize_core::{Container, Item};
use cartonize_engine::{Allocator, Placer, StrategyKind};

fn uniform_order(count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| Item::new(format!("B{}", i), 100.0, 100.0, 100.0).with_weight(500.0))
        .collect()
}

fn mixed_order(count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| {
            let l = 40.0 + (i % 7) as f64 * 20.0;
            let w = 40.0 + (i % 5) as f64 * 25.0;
            let h = 40.0 + (i % 3) as f64 * 30.0;
            Item::new(format!("M{}", i), l, w, h).with_weight(100.0 + i as f64)
        })
        .collect()
}

fn placer_benchmark(c: &mut Criterion) {
    let placer = Placer::default();
    let container = Container::new("bin", 500.0, 500.0, 500.0);

    let uniform = uniform_order(20);
    c.bench_function("place_20_uniform_boxes", |b| {
        b.iter(|| {
            let packed = placer.place(black_box(&uniform), black_box(&container));
            black_box(packed)
        })
    });

    let mixed = mixed_order(30);
    c.bench_function("place_30_mixed_boxes", |b| {
        b.iter(|| {
            let (packed, leftovers) =
                placer.place_best_effort(black_box(&mixed), black_box(&container));
            black_box((packed, leftovers))
        })
    });
}

fn allocator_benchmark(c: &mut Criterion) {
    let allocator = Allocator::new();
    let catalog = vec![
        Container::new("s", 200.0, 200.0, 200.0).with_price(0.8),
        Container::new("m", 350.0, 350.0, 350.0).with_price(1.5),
        Container::new("l", 500.0, 500.0, 500.0).with_price(2.6),
    ];
    let order = mixed_order(25);

    c.bench_function("allocate_25_intelligent", |b| {
        b.iter(|| {
            let result = allocator.allocate(
                StrategyKind::Intelligent,
                black_box(&order),
                black_box(&catalog),
            );
            black_box(result)
        })
    });

    c.bench_function("allocate_25_ensemble", |b| {
        b.iter(|| {
            let result = allocator.allocate(
                StrategyKind::Ensemble,
                black_box(&order),
                black_box(&catalog),
            );
            black_box(result)
        })
    });
}

criterion_group!(benches, placer_benchmark, allocator_benchmark);
criterion_main!(benches);
