//! Benchmarks for fuzzy matching and relevance ranking.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pharmafinder_search::{
    filter_and_sort_by_relevance, fuzzy_search_with, levenshtein_distance, ByFields, FuzzyOptions,
    Product, SearchConfig, SpellingSuggester,
};

const NAMES: [&str; 8] = [
    "Doliprane", "Efferalgan", "Advil", "Amoxicilline", "Augmentin", "Voltarène", "Ciprofloxacine",
    "Oméprazole",
];

fn create_products(count: usize) -> Vec<Product> {
    (0..count)
        .map(|i| Product {
            id: format!("00000000-0000-4000-8000-{i:012}"),
            name: format!("{} {}mg", NAMES[i % NAMES.len()], 100 * (i % 10 + 1)),
            generic_name: Some(NAMES[(i + 3) % NAMES.len()].to_lowercase()),
            manufacturer: Some("Sanofi".to_string()),
            active_ingredient: None,
            is_sponsored: i % 17 == 0,
        })
        .collect()
}

fn bench_levenshtein(c: &mut Criterion) {
    c.bench_function("levenshtein_medication_names", |b| {
        b.iter(|| levenshtein_distance(black_box("ciprofloxacine"), black_box("cyprofoxacine")))
    });
}

fn bench_fuzzy_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuzzy_search");
    let options = FuzzyOptions::default();

    for size in [10, 100, 1000].iter() {
        let products = create_products(*size);

        group.bench_with_input(BenchmarkId::new("sequential", size), size, |b, _| {
            b.iter(|| {
                fuzzy_search_with(
                    black_box(&products),
                    black_box("amoxiciline"),
                    ByFields,
                    &options,
                )
            })
        });

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("parallel", size), size, |b, _| {
            b.iter(|| {
                pharmafinder_search::par_fuzzy_search_with(
                    black_box(&products),
                    black_box("amoxiciline"),
                    ByFields,
                    &options,
                )
            })
        });
    }

    group.finish();
}

fn bench_relevance(c: &mut Criterion) {
    let products = create_products(1000);

    c.bench_function("relevance_1000", |b| {
        b.iter(|| filter_and_sort_by_relevance(black_box(&products), black_box("doli"), ByFields))
    });
}

fn bench_suggestions(c: &mut Criterion) {
    let config = SearchConfig::default();
    let suggester = SpellingSuggester::new(config.suggest.dictionary);

    c.bench_function("suggest_default_dictionary", |b| {
        b.iter(|| suggester.suggest(black_box("amoxicilinne"), 3))
    });
}

criterion_group!(
    benches,
    bench_levenshtein,
    bench_fuzzy_search,
    bench_relevance,
    bench_suggestions
);
criterion_main!(benches);
