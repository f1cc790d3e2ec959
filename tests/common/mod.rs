#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};

use adaptive_quiz_engine::adaptive::Attempt;
use adaptive_quiz_engine::config::Config;
use adaptive_quiz_engine::logging;

pub const LEARNER: i64 = 42;
pub const SUBJECT: i64 = 7;

pub fn init_logging() {
    let level = Config::load()
        .map(|c| c.log_level)
        .unwrap_or_else(|_| "info".to_string());
    let _ = logging::init_tracing(&level);
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 15, 0, 0).unwrap()
}

pub fn attempt(score: u32, max_score: u32, time: u32, level: i32) -> Attempt {
    Attempt {
        learner_id: LEARNER,
        subject_id: SUBJECT,
        score,
        max_score,
        time_taken_seconds: time,
        difficulty: level,
        submitted_at: base_time(),
        item_count: None,
    }
}

/// Attempts one day apart, in the given order, oldest first.
pub fn daily(attempts: Vec<Attempt>) -> Vec<Attempt> {
    attempts
        .into_iter()
        .enumerate()
        .map(|(i, mut a)| {
            a.submitted_at = base_time() + Duration::days(i as i64);
            a
        })
        .collect()
}
