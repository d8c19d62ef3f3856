// Criterion benchmarks for the pairing engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lunch_roulette::core::{RoundMatcher, ScoreIndex};
use lunch_roulette::models::{Frequency, Person};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

fn synthetic_roster(size: usize) -> Vec<Person> {
    (0..size)
        .map(|i| {
            let mut history = HashSet::new();
            if i >= 2 {
                history.insert(format!("p{}@example.com", i - 2));
            }
            Person {
                email: format!("p{i}@example.com"),
                friendly_name: format!("P{i}"),
                full_name: format!("Person {i}"),
                gender: "".to_string(),
                cluster: ["eng", "sales", "ops", "hr"][i % 4].to_string(),
                year: "2020".to_string(),
                new_to_cluster: i % 8 == 0,
                frequency: Frequency::Normal,
                history,
            }
        })
        .collect()
}

fn bench_score_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_index_build");
    for size in [20usize, 60, 150] {
        let roster = synthetic_roster(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &roster, |b, roster| {
            b.iter(|| ScoreIndex::build(black_box(roster)));
        });
    }
    group.finish();
}

fn bench_round_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_matching");
    for size in [20usize, 60, 150] {
        let roster = synthetic_roster(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &roster, |b, roster| {
            b.iter(|| {
                let mut rng = ChaCha8Rng::seed_from_u64(42);
                RoundMatcher::new().match_round(black_box(roster), &mut rng)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_score_index_build, bench_round_matching);
criterion_main!(benches);
