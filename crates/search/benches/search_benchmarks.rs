//! Search Performance Benchmarks
//!
//! Measures the pieces of the search that dominate interactive latency:
//! - Annotating and filtering a vocabulary against a target
//! - Time to the first phrase
//! - Throughput of the first hundred phrases

use anagram_search::{search, AnnotatedDictionary, LetterMultiset};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const NO_INCLUDES: [&str; 0] = [];
const INPUT: &str = "Mitch Patenaude";

/// Every word of up to five letters drawn from the input's letters
fn synthetic_vocabulary() -> Vec<String> {
    let letters: Vec<char> = "mitchpaenud".chars().collect();
    let mut words = Vec::new();
    for &a in &letters {
        for &b in &letters {
            for &c in &letters {
                words.push([a, b, c].iter().collect::<String>());
            }
        }
    }
    words.extend(
        ["pneumatic", "death", "hated", "match", "inept", "tuna", "acumen", "dentaium"]
            .iter()
            .map(|w| w.to_string()),
    );
    words.sort();
    words.dedup();
    words
}

fn bench_annotate(c: &mut Criterion) {
    let vocabulary = synthetic_vocabulary();
    let target = LetterMultiset::from_text(INPUT);

    let mut group = c.benchmark_group("dictionary");
    group.throughput(Throughput::Elements(vocabulary.len() as u64));
    group.bench_function("candidates_for", |b| {
        b.iter(|| {
            AnnotatedDictionary::candidates_for(vocabulary.iter().map(String::as_str), black_box(&target))
        })
    });
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let vocabulary = synthetic_vocabulary();

    let mut group = c.benchmark_group("search");
    group.bench_function("first_phrase", |b| {
        b.iter(|| search(black_box(INPUT), &NO_INCLUDES, &vocabulary).next())
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("first_100_phrases", |b| {
        b.iter(|| search(black_box(INPUT), &NO_INCLUDES, &vocabulary).take(100).count())
    });
    group.finish();
}

criterion_group!(benches, bench_annotate, bench_search);
criterion_main!(benches);
