//! Benchmark suite for adaptive-quiz-engine
//!
//! Run with: cargo bench

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use adaptive_quiz_engine::adaptive::{AdaptiveEngine, Attempt, AttemptWindow, QuestionType};

fn sample_history(len: usize) -> AttemptWindow {
    let start = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
    AttemptWindow::from_unordered((0..len).map(|i| Attempt {
        learner_id: 1,
        subject_id: 1,
        score: (i % 11) as u32,
        max_score: 10,
        time_taken_seconds: 300 + (i % 7) as u32 * 40,
        difficulty: (i % 4) as i32 + 1,
        submitted_at: start + Duration::hours(i as i64),
        item_count: None,
    }))
}

fn bench_recommend(c: &mut Criterion) {
    let engine = AdaptiveEngine::default();
    let history = sample_history(200);
    c.bench_function("AdaptiveEngine::recommend", |b| {
        b.iter(|| engine.recommend(black_box(&history)))
    });
}

fn bench_breakdown(c: &mut Criterion) {
    let engine = AdaptiveEngine::default();
    let history = sample_history(200);
    c.bench_function("AdaptiveEngine::breakdown", |b| {
        b.iter(|| engine.breakdown(black_box(history.oldest_first())))
    });
}

fn bench_time_limits(c: &mut Criterion) {
    let engine = AdaptiveEngine::default();
    let types: Vec<QuestionType> = (0..30)
        .map(|i| match i % 3 {
            0 => QuestionType::Essay,
            1 => QuestionType::TrueFalse,
            _ => QuestionType::MultipleChoice,
        })
        .collect();
    c.bench_function("AdaptiveEngine::time_limits", |b| {
        b.iter(|| engine.time_limits(30, black_box(45), 3, Some(types.as_slice())))
    });
}

criterion_group!(benches, bench_recommend, bench_breakdown, bench_time_limits);
criterion_main!(benches);
