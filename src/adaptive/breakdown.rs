use std::collections::BTreeMap;

use crate::adaptive::types::{Attempt, BreakdownEntry, PerformanceBreakdown};

#[derive(Debug, Default)]
struct LevelTotals {
    attempts: u32,
    score: u64,
    max_score: u64,
    time: u64,
    items: u64,
}

impl LevelTotals {
    fn add(&mut self, attempt: &Attempt, fallback_items: u32) {
        self.attempts += 1;
        self.score += attempt.score as u64;
        self.max_score += attempt.max_score as u64;
        self.time += attempt.time_taken_seconds as u64;
        self.items += attempt.items_or(fallback_items) as u64;
    }

    fn finish(self) -> BreakdownEntry {
        let avg_score_percent = if self.max_score > 0 {
            round2(self.score as f64 / self.max_score as f64 * 100.0)
        } else {
            0.0
        };
        let avg_time_per_item = if self.items > 0 {
            round2(self.time as f64 / self.items as f64)
        } else {
            0.0
        };
        BreakdownEntry {
            attempt_count: self.attempts,
            avg_score_percent,
            avg_time_per_item,
        }
    }
}

/// Groups attempts by their raw difficulty level. Levels that never occur
/// are absent from the result.
pub fn difficulty_breakdown<'a, I>(attempts: I, fallback_items: u32) -> PerformanceBreakdown
where
    I: IntoIterator<Item = &'a Attempt>,
{
    let mut totals: BTreeMap<i32, LevelTotals> = BTreeMap::new();
    for attempt in attempts {
        totals
            .entry(attempt.difficulty)
            .or_default()
            .add(attempt, fallback_items);
    }

    totals
        .into_iter()
        .map(|(level, totals)| (level, totals.finish()))
        .collect()
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn attempt(score: u32, max_score: u32, time: u32, level: i32) -> Attempt {
        Attempt {
            learner_id: 3,
            subject_id: 4,
            score,
            max_score,
            time_taken_seconds: time,
            difficulty: level,
            submitted_at: Utc.with_ymd_and_hms(2026, 2, 10, 8, 30, 0).unwrap(),
            item_count: None,
        }
    }

    #[test]
    fn test_groups_by_level() {
        let attempts = vec![
            attempt(80, 100, 600, 1),
            attempt(85, 100, 720, 2),
            attempt(90, 100, 840, 2),
            attempt(75, 100, 900, 3),
        ];
        let breakdown = difficulty_breakdown(&attempts, 10);

        assert_eq!(breakdown.len(), 3);
        assert!(!breakdown.contains_key(&4));

        let level2 = &breakdown[&2];
        assert_eq!(level2.attempt_count, 2);
        assert_eq!(level2.avg_score_percent, 87.5);
        assert_eq!(level2.avg_time_per_item, 78.0);

        assert_eq!(breakdown[&1].avg_time_per_item, 60.0);
        assert_eq!(breakdown[&3].avg_score_percent, 75.0);
    }

    #[test]
    fn test_rounds_to_two_places() {
        let attempts = vec![attempt(2, 3, 100, 2), attempt(0, 3, 0, 2), attempt(0, 3, 0, 2)];
        let breakdown = difficulty_breakdown(&attempts, 10);
        assert_eq!(breakdown[&2].avg_score_percent, 22.22);
        assert_eq!(breakdown[&2].avg_time_per_item, 3.33);
    }

    #[test]
    fn test_zero_max_score_gives_zero_percent() {
        let attempts = vec![attempt(0, 0, 100, 4)];
        let breakdown = difficulty_breakdown(&attempts, 10);
        assert_eq!(breakdown[&4].attempt_count, 1);
        assert_eq!(breakdown[&4].avg_score_percent, 0.0);
    }

    #[test]
    fn test_empty_input() {
        let breakdown = difficulty_breakdown(&Vec::<Attempt>::new(), 10);
        assert!(breakdown.is_empty());
    }

    #[test]
    fn test_serializes_with_string_keys() {
        let attempts = vec![attempt(9, 10, 300, 2)];
        let json = serde_json::to_value(difficulty_breakdown(&attempts, 10)).unwrap();
        assert_eq!(json["2"]["attemptCount"], 1);
        assert_eq!(json["2"]["avgScorePercent"], 90.0);
    }
}
