//! Benchmarks for catalog ranking
//!
//! Run with: cargo bench --package pipeline
//!
//! Ranks a synthetic catalog sized like a mid-size movie database.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::CatalogItem;
use pipeline::{FeatureEncoder, RankOptions, SimilarityRanker};
use sources::InterestProfile;

const GENRES: [&str; 12] = [
    "action", "adventure", "animation", "comedy", "crime", "drama",
    "fantasy", "horror", "romance", "sci-fi", "thriller", "war",
];

fn synthetic_catalog(size: u32) -> Vec<CatalogItem> {
    (0..size)
        .map(|id| {
            let i = id as usize;
            let genres = format!("{},{}", GENRES[i % 12], GENRES[(i * 7 + 3) % 12]);
            let keywords = format!("kw{},kw{},kw{}", i % 500, (i * 13) % 500, (i * 31) % 500);
            CatalogItem::from_raw(id, format!("Movie {}", id), &genres, &keywords, (i % 100) as f32)
        })
        .collect()
}

fn bench_encode_catalog(c: &mut Criterion) {
    let catalog = synthetic_catalog(5000);
    let profile = InterestProfile::new(&["action", "thriller", "crime"], &["kw1", "kw42", "kw300"]);
    let encoder = FeatureEncoder::new();

    c.bench_function("encode_catalog_5000", |b| {
        b.iter(|| {
            let encoded = encoder.encode(black_box(&profile), black_box(&catalog));
            black_box(encoded)
        })
    });
}

fn bench_rank_catalog(c: &mut Criterion) {
    let catalog = synthetic_catalog(5000);
    let profile = InterestProfile::new(&["action", "thriller", "crime"], &["kw1", "kw42", "kw300"]);
    let ranker = SimilarityRanker::new();
    let options = RankOptions { rank_by_popularity: true, limit: 50, ..RankOptions::default() };

    c.bench_function("rank_catalog_5000", |b| {
        b.iter(|| {
            let results = ranker.rank(black_box(catalog.clone()), &profile, None, options);
            black_box(results)
        })
    });
}

criterion_group!(benches, bench_encode_catalog, bench_rank_catalog);
criterion_main!(benches);
