//! Benchmarks for endclean cleaning performance.
//!
//! Run with: cargo bench
//!
//! Inputs are synthetic lessons with the usual extraction damage injected at
//! random (seeded, so runs are comparable).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use endclean::{clean_lessons, cleanup, detect_problems, CleanupOptions};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

const WORDS: &[&str] = &[
    "white", "black", "king", "rook", "pawn", "bishop", "knight", "queen", "opposition",
    "promotes", "the", "and", "square", "distance", "zugzwang", "draw", "wins", "because",
    "immediately", "position", "triangulation", "shoulder", "cuts", "off", "file", "rank",
];

/// Builds a damaged lesson text of roughly `word_count` words.
fn create_noisy_text(rng: &mut StdRng, word_count: usize) -> String {
    let mut text = String::new();

    for i in 0..word_count {
        let word = WORDS[rng.gen_range(0..WORDS.len())];

        match rng.gen_range(0..20) {
            // Split inside the word
            0 | 1 if word.len() > 4 => {
                let at = rng.gen_range(1..word.len() - 1);
                text.push_str(&word[..at]);
                text.push(' ');
                text.push_str(&word[at..]);
            }
            // Hyphenated line break
            2 if word.len() > 4 => {
                text.push_str(&word[..2]);
                text.push_str("-\n");
                text.push_str(&word[2..]);
            }
            // Lone coordinate label
            3 => {
                text.push_str(word);
                text.push('\n');
                text.push(char::from(b'a' + rng.gen_range(0..8)));
                text.push('\n');
            }
            _ => text.push_str(word),
        }

        text.push(if i % 12 == 11 { '\n' } else { ' ' });
    }

    text.push_str(" 3 1 4 1 5 __");
    text
}

/// Benchmark the full pipeline on single texts.
fn bench_cleanup(c: &mut Criterion) {
    let mut group = c.benchmark_group("cleanup");
    let mut rng = StdRng::seed_from_u64(7);
    let options = CleanupOptions::default();

    for word_count in [50, 500, 5000].iter() {
        let text = create_noisy_text(&mut rng, *word_count);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("words", word_count), &text, |b, text| {
            b.iter(|| cleanup(black_box(text), &options));
        });
    }

    group.finish();
}

/// Benchmark the suspicion detector.
fn bench_detect(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(11);
    let text = cleanup(&create_noisy_text(&mut rng, 500), &CleanupOptions::default());

    c.bench_function("detect_problems", |b| {
        b.iter(|| detect_problems(black_box(&text)));
    });
}

/// Benchmark whole collections, parallel against sequential.
fn bench_collection(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection");
    let mut rng = StdRng::seed_from_u64(23);

    let lessons: Vec<Value> = (0..500)
        .map(|i| {
            json!({
                "id": i,
                "title": format!("Lesson {i}"),
                "solutionText": create_noisy_text(&mut rng, 120),
            })
        })
        .collect();

    for (name, options) in [
        ("parallel", CleanupOptions::default()),
        ("sequential", CleanupOptions::default().sequential()),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut batch = lessons.clone();
                clean_lessons(black_box(&mut batch), &options)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cleanup, bench_detect, bench_collection);
criterion_main!(benches);
