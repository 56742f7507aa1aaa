//! Criterion benchmarks for the selector hot paths.
//!
//! Benchmarks:
//! 1. Variety picker over catalogs of increasing size
//! 2. Full battle selection with duplicate seeding
//! 3. Grouping a maximum-size selection

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use casebattle_core::selector::sort_by_distance;
use casebattle_core::{
    group_by_name, select_cases_for_battle, select_varied_cases, CatalogItem, MAX_CASES,
};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_catalog(n: usize) -> Vec<CatalogItem> {
    (0..n)
        .map(|i| {
            let price = 5.0 + (i as f64 * 0.37).sin().abs() * 4_000.0 + i as f64;
            CatalogItem::new(format!("Case {i}"), (price * 100.0).round() / 100.0, "")
        })
        .collect()
}

// ── 1. Variety picker ────────────────────────────────────────────────

fn bench_variety_picker(c: &mut Criterion) {
    let mut group = c.benchmark_group("variety_picker");
    for size in [50usize, 500, 5_000] {
        let catalog = make_catalog(size);
        let sorted = sort_by_distance(&catalog, 750.0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &sorted, |b, sorted| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| select_varied_cases(black_box(sorted), MAX_CASES, 750.0, &mut rng));
        });
    }
    group.finish();
}

// ── 2. Full selection ────────────────────────────────────────────────

fn bench_battle_selection(c: &mut Criterion) {
    let catalog = make_catalog(1_000);
    c.bench_function("select_cases_for_battle/duplicates", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| {
            select_cases_for_battle(
                black_box(&catalog),
                MAX_CASES,
                black_box(15_000.0),
                true,
                5,
                &mut rng,
            )
        });
    });
}

// ── 3. Grouping ──────────────────────────────────────────────────────

fn bench_grouping(c: &mut Criterion) {
    let catalog = make_catalog(1_000);
    let mut rng = StdRng::seed_from_u64(11);
    let selection = select_cases_for_battle(&catalog, MAX_CASES, 15_000.0, true, 8, &mut rng);
    c.bench_function("group_by_name/max_cases", |b| {
        b.iter(|| group_by_name(black_box(&selection)));
    });
}

criterion_group!(
    benches,
    bench_variety_picker,
    bench_battle_selection,
    bench_grouping
);
criterion_main!(benches);
