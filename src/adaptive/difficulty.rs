use serde::{Deserialize, Serialize};

use crate::adaptive::config::RecommendationParams;
use crate::adaptive::types::{Attempt, DifficultyLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Fast,
    #[default]
    Normal,
    Slow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationReason {
    InsufficientData,
    FastAndAccurate,
    HighScore,
    Struggling,
    Steady,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDetail {
    pub level: DifficultyLevel,
    pub current_level: Option<DifficultyLevel>,
    pub avg_score_percent: f64,
    pub avg_time_per_item: f64,
    pub pace: Pace,
    pub reason: RecommendationReason,
    pub attempts_considered: usize,
    pub attempts_skipped: usize,
}

pub fn classify_pace(
    avg_time_per_item: f64,
    level: DifficultyLevel,
    params: &RecommendationParams,
) -> Pace {
    let expected = level.expected_seconds_per_item() as f64;
    if avg_time_per_item < expected * params.fast_time_multiplier {
        Pace::Fast
    } else if avg_time_per_item > expected * params.slow_time_multiplier {
        Pace::Slow
    } else {
        Pace::Normal
    }
}

/// Recommends the next difficulty from a most-recent-first window.
pub fn recommend_difficulty<'a, I>(window: I, params: &RecommendationParams) -> DifficultyLevel
where
    I: IntoIterator<Item = &'a Attempt>,
{
    recommend_detailed(window, params).level
}

/// Same as [`recommend_difficulty`] but keeps the intermediate figures.
///
/// Attempts with a zero max score are skipped. The first well-formed attempt
/// in the window fixes the current level, so the window must be ordered
/// most recent first.
pub fn recommend_detailed<'a, I>(window: I, params: &RecommendationParams) -> RecommendationDetail
where
    I: IntoIterator<Item = &'a Attempt>,
{
    let mut considered = 0usize;
    let mut skipped = 0usize;
    let mut total_score = 0u64;
    let mut total_max = 0u64;
    let mut total_time = 0u64;
    let mut total_items = 0u64;
    let mut current: Option<DifficultyLevel> = None;

    for attempt in window {
        if !attempt.is_well_formed() {
            skipped += 1;
            continue;
        }
        if current.is_none() {
            current = Some(attempt.level());
        }
        considered += 1;
        total_score += attempt.score as u64;
        total_max += attempt.max_score as u64;
        total_time += attempt.time_taken_seconds as u64;
        total_items += attempt.items_or(params.fallback_items_per_attempt) as u64;
    }

    if skipped > 0 {
        tracing::warn!(skipped, "skipping attempts with zero max score");
    }

    let current_level = match current {
        Some(level) if considered >= params.min_attempts => level,
        _ => {
            tracing::debug!(
                considered,
                min_attempts = params.min_attempts,
                "not enough attempts, using default difficulty"
            );
            return RecommendationDetail {
                level: params.default_level,
                current_level: current,
                avg_score_percent: 0.0,
                avg_time_per_item: 0.0,
                pace: Pace::Normal,
                reason: RecommendationReason::InsufficientData,
                attempts_considered: considered,
                attempts_skipped: skipped,
            };
        }
    };

    let avg_score_percent = total_score as f64 / total_max as f64 * 100.0;
    let avg_time_per_item = if total_items > 0 {
        total_time as f64 / total_items as f64
    } else {
        0.0
    };
    let pace = classify_pace(avg_time_per_item, current_level, params);

    let (level, reason) = if avg_score_percent >= params.high_score_threshold
        && pace == Pace::Fast
    {
        (current_level.harder(), RecommendationReason::FastAndAccurate)
    } else if avg_score_percent >= params.excellent_score_threshold && pace != Pace::Slow {
        (current_level.harder(), RecommendationReason::HighScore)
    } else if avg_score_percent < params.low_score_threshold || pace == Pace::Slow {
        (current_level.easier(), RecommendationReason::Struggling)
    } else {
        (current_level, RecommendationReason::Steady)
    };

    tracing::debug!(
        current = current_level.level(),
        recommended = level.level(),
        avg_score_percent,
        avg_time_per_item,
        ?pace,
        ?reason,
        "difficulty recommendation"
    );

    RecommendationDetail {
        level,
        current_level: Some(current_level),
        avg_score_percent,
        avg_time_per_item,
        pace,
        reason,
        attempts_considered: considered,
        attempts_skipped: skipped,
    }
}
