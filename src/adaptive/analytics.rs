use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::adaptive::breakdown::{difficulty_breakdown, round2};
use crate::adaptive::config::AdaptiveConfig;
use crate::adaptive::difficulty::recommend_difficulty;
use crate::adaptive::trend::classify_trend;
use crate::adaptive::types::{Attempt, PerformanceAnalytics};
use crate::adaptive::window::AttemptWindow;

/// Average seconds per item across attempts, whole seconds (truncated).
pub fn average_time_per_item<'a, I>(attempts: I, fallback_items: u32) -> u32
where
    I: IntoIterator<Item = &'a Attempt>,
{
    let (time, items) = attempts.into_iter().fold((0u64, 0u64), |(time, items), a| {
        (
            time + a.time_taken_seconds as u64,
            items + a.items_or(fallback_items) as u64,
        )
    });
    if items == 0 {
        0
    } else {
        (time / items) as u32
    }
}

/// Overall score percentage, two decimals. Zero when no attempt has points.
pub fn average_score_percent<'a, I>(attempts: I) -> f64
where
    I: IntoIterator<Item = &'a Attempt>,
{
    let (score, max) = attempts.into_iter().fold((0u64, 0u64), |(score, max), a| {
        (score + a.score as u64, max + a.max_score as u64)
    });
    if max == 0 {
        0.0
    } else {
        round2(score as f64 / max as f64 * 100.0)
    }
}

/// First day of the analysis period ending at `today`. Periods reaching
/// past the calendar range start at `NaiveDate::MIN`.
pub fn period_start(today: NaiveDate, period_days: i64) -> NaiveDate {
    Duration::try_days(period_days)
        .and_then(|period| today.checked_sub_signed(period))
        .unwrap_or(NaiveDate::MIN)
}

/// Builds the analytics snapshot for one learner and subject.
///
/// `history` must already be narrowed to the pair. The period covers
/// `analysis_period_days` up to `today`; the recommendation looks at the
/// newest `lookback_attempts` of the whole history. Returns `None` when
/// nothing was submitted inside the period.
pub fn build_analytics(
    learner_id: i64,
    subject_id: i64,
    history: &AttemptWindow,
    today: NaiveDate,
    config: &AdaptiveConfig,
) -> Option<PerformanceAnalytics> {
    let start = period_start(today, config.analysis_period_days);
    let start_at = Utc.from_utc_datetime(&start.and_time(NaiveTime::MIN));
    let period = history.since(start_at);

    let current = period.last()?;
    let fallback_items = config.recommendation.fallback_items_per_attempt;

    let recommended = recommend_difficulty(
        history.most_recent_first(config.recommendation.lookback_attempts),
        &config.recommendation,
    );

    let analytics = PerformanceAnalytics {
        learner_id,
        subject_id,
        total_attempts: period.len() as u32,
        average_score_percent: average_score_percent(period),
        average_time_per_item: average_time_per_item(period, fallback_items),
        current_difficulty_level: current.level(),
        recommended_difficulty_level: recommended,
        trend: classify_trend(period, &config.trend),
        period_start: start,
        period_end: today,
        breakdown: difficulty_breakdown(period, fallback_items),
    };

    tracing::debug!(
        learner_id,
        subject_id,
        total_attempts = analytics.total_attempts,
        average_score_percent = analytics.average_score_percent,
        trend = analytics.trend.as_str(),
        "performance analytics built"
    );

    Some(analytics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adaptive::types::{DifficultyLevel, Trend};

    fn attempt(day: u32, score: u32, time: u32, level: i32) -> Attempt {
        Attempt {
            learner_id: 7,
            subject_id: 3,
            score,
            max_score: 10,
            time_taken_seconds: time,
            difficulty: level,
            submitted_at: Utc.with_ymd_and_hms(2026, 6, day, 16, 0, 0).unwrap(),
            item_count: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
    }

    #[test]
    fn test_empty_period_returns_none() {
        let history = AttemptWindow::default();
        assert!(build_analytics(7, 3, &history, today(), &AdaptiveConfig::default()).is_none());
    }

    #[test]
    fn test_snapshot_fields() {
        let history = AttemptWindow::from_unordered(vec![
            attempt(10, 6, 600, 1),
            attempt(12, 7, 500, 1),
            attempt(20, 9, 300, 2),
            attempt(25, 9, 280, 2),
        ]);
        let analytics =
            build_analytics(7, 3, &history, today(), &AdaptiveConfig::default()).unwrap();

        assert_eq!(analytics.total_attempts, 4);
        assert_eq!(analytics.average_score_percent, 77.5);
        // 1680s over 40 items
        assert_eq!(analytics.average_time_per_item, 42);
        assert_eq!(analytics.current_difficulty_level, DifficultyLevel::Intermediate);
        assert_eq!(analytics.trend, Trend::Improving);
        assert_eq!(analytics.breakdown.len(), 2);
        assert_eq!(analytics.period_start, NaiveDate::from_ymd_opt(2026, 5, 31).unwrap());
        assert_eq!(analytics.period_end, today());
    }

    #[test]
    fn test_attempts_before_period_excluded() {
        let mut old = attempt(1, 1, 900, 4);
        old.submitted_at = Utc.with_ymd_and_hms(2026, 4, 1, 10, 0, 0).unwrap();
        let history = AttemptWindow::from_unordered(vec![old, attempt(28, 8, 450, 2)]);
        let analytics =
            build_analytics(7, 3, &history, today(), &AdaptiveConfig::default()).unwrap();
        assert_eq!(analytics.total_attempts, 1);
        assert!(!analytics.breakdown.contains_key(&4));
        // only two attempts overall, below the recommendation minimum
        assert_eq!(analytics.recommended_difficulty_level, DifficultyLevel::Intermediate);
    }

    #[test]
    fn test_oversized_period_covers_whole_history() {
        let config = AdaptiveConfig {
            analysis_period_days: i64::MAX / 2,
            ..AdaptiveConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(period_start(today(), config.analysis_period_days), NaiveDate::MIN);
        assert_eq!(period_start(today(), i64::MAX), NaiveDate::MIN);

        let mut old = attempt(1, 6, 500, 1);
        old.submitted_at = Utc.with_ymd_and_hms(1990, 3, 1, 10, 0, 0).unwrap();
        let history = AttemptWindow::from_unordered(vec![old, attempt(28, 8, 450, 2)]);
        let analytics = build_analytics(7, 3, &history, today(), &config).unwrap();
        assert_eq!(analytics.total_attempts, 2);
        assert_eq!(analytics.period_start, NaiveDate::MIN);
    }

    #[test]
    fn test_average_helpers() {
        let attempts = vec![attempt(1, 5, 100, 2), attempt(2, 10, 200, 2)];
        assert_eq!(average_score_percent(&attempts), 75.0);
        assert_eq!(average_time_per_item(&attempts, 10), 15);
        assert_eq!(average_time_per_item(&Vec::<Attempt>::new(), 10), 0);
    }
}
