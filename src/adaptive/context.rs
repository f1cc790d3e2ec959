use std::fmt;

use crate::adaptive::types::{Attempt, PerformanceAnalytics};

/// Performance block handed to the question-generation prompt.
///
/// Only figures are rendered here; the prompt wording around them belongs
/// to the caller.
pub struct PerformanceSummary<'a> {
    analytics: Option<&'a PerformanceAnalytics>,
    recent: Vec<&'a Attempt>,
}

impl<'a> PerformanceSummary<'a> {
    pub fn new(analytics: Option<&'a PerformanceAnalytics>) -> Self {
        Self {
            analytics,
            recent: Vec::new(),
        }
    }

    /// Adds recent attempts, expected most recent first.
    pub fn with_recent<I>(mut self, attempts: I) -> Self
    where
        I: IntoIterator<Item = &'a Attempt>,
    {
        self.recent.extend(attempts);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.analytics.is_none() && self.recent.is_empty()
    }
}

impl fmt::Display for PerformanceSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(analytics) = self.analytics {
            writeln!(f, "=== PERFORMANCE ANALYTICS ===")?;
            writeln!(f, "Total Attempts: {}", analytics.total_attempts)?;
            if analytics.average_score_percent > 0.0 {
                writeln!(f, "Average Score: {:.2}%", analytics.average_score_percent)?;
            }
            writeln!(
                f,
                "Current Difficulty Level: {}/4 ({})",
                analytics.current_difficulty_level.level(),
                analytics.current_difficulty_level
            )?;
            writeln!(
                f,
                "Recommended Difficulty: {}/4 ({})",
                analytics.recommended_difficulty_level.level(),
                analytics.recommended_difficulty_level
            )?;
            writeln!(f, "Trend: {}", analytics.trend)?;
            writeln!(f)?;
        }

        if !self.recent.is_empty() {
            writeln!(f, "=== RECENT ATTEMPTS (Last {}) ===", self.recent.len())?;
            for (i, attempt) in self.recent.iter().enumerate() {
                let percent = attempt.ratio().unwrap_or(0.0) * 100.0;
                writeln!(
                    f,
                    "{}. Score: {}/{} ({:.0}%), Difficulty: {}/4, Time: {}s",
                    i + 1,
                    attempt.score,
                    attempt.max_score,
                    percent,
                    attempt.level().level(),
                    attempt.time_taken_seconds
                )?;
            }
        }

        Ok(())
    }
}
