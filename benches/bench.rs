// Criterion benchmarks for Hoodmatch

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hoodmatch::core::{calculate_match_score, BrowseOptions, Matcher, SortOrder};
use hoodmatch::models::{BudgetRange, Neighborhood, Priority, ScoringWeights, UserPreferences};
use hoodmatch::services::Catalog;

fn create_preferences() -> UserPreferences {
    UserPreferences {
        budget_range: BudgetRange { min: 20_000, max: 40_000 },
        lifestyle: ["Nightlife", "Tech-savvy", "Foodie"].iter().map(|s| s.to_string()).collect(),
        amenities: ["Gym", "Parks", "Restaurants"].iter().map(|s| s.to_string()).collect(),
        safety_priority: Priority::new(9).unwrap(),
        nightlife_priority: Priority::new(8).unwrap(),
        ..UserPreferences::default()
    }
}

/// Catalog of `count` neighborhoods built by cycling the bundled dataset
fn create_catalog(count: usize) -> Vec<Neighborhood> {
    let builtin = Catalog::builtin().expect("builtin catalog");
    builtin
        .list()
        .iter()
        .cycle()
        .take(count)
        .enumerate()
        .map(|(i, neighborhood)| {
            let mut neighborhood = neighborhood.clone();
            neighborhood.id = i.to_string();
            neighborhood.avg_rent += (i % 7) as u32 * 1_000;
            neighborhood
        })
        .collect()
}

fn bench_match_score(c: &mut Criterion) {
    let preferences = create_preferences();
    let catalog = create_catalog(1);
    let weights = ScoringWeights::default();

    c.bench_function("calculate_match_score", |b| {
        b.iter(|| {
            calculate_match_score(
                black_box(&preferences),
                black_box(&catalog[0]),
                black_box(&weights),
            )
        });
    });
}

fn bench_browse(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let preferences = create_preferences();

    let mut group = c.benchmark_group("browse");

    for catalog_size in [15, 50, 100, 500].iter() {
        let catalog = create_catalog(*catalog_size);
        let options = BrowseOptions {
            sort: SortOrder::Match,
            ..BrowseOptions::default()
        };

        group.bench_with_input(
            BenchmarkId::new("browse_by_match", catalog_size),
            catalog_size,
            |b, _| {
                b.iter(|| {
                    matcher.browse(
                        black_box(&catalog),
                        black_box(Some(&preferences)),
                        black_box(&options),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_top_matches(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let preferences = create_preferences();
    let catalog = create_catalog(15);

    c.bench_function("top_matches_builtin_catalog", |b| {
        b.iter(|| matcher.top_matches(black_box(&catalog), black_box(&preferences), black_box(3)));
    });
}

criterion_group!(benches, bench_match_score, bench_browse, bench_top_matches);

criterion_main!(benches);
