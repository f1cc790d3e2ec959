use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::adaptive::types::DifficultyLevel;
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationParams {
    pub lookback_attempts: usize,
    pub min_attempts: usize,
    pub high_score_threshold: f64,
    pub excellent_score_threshold: f64,
    pub low_score_threshold: f64,
    pub fast_time_multiplier: f64,
    pub slow_time_multiplier: f64,
    /// Items assumed per attempt when the attempt carries no item count.
    pub fallback_items_per_attempt: u32,
    pub default_level: DifficultyLevel,
}

impl Default for RecommendationParams {
    fn default() -> Self {
        Self {
            lookback_attempts: 5,
            min_attempts: 3,
            high_score_threshold: 85.0,
            excellent_score_threshold: 90.0,
            low_score_threshold: 70.0,
            fast_time_multiplier: 0.8,
            slow_time_multiplier: 1.2,
            fallback_items_per_attempt: 10,
            default_level: DifficultyLevel::Intermediate,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendParams {
    pub min_attempts: usize,
    pub improving_threshold: f64,
    pub declining_threshold: f64,
}

impl Default for TrendParams {
    fn default() -> Self {
        Self {
            min_attempts: 3,
            improving_threshold: 0.05,
            declining_threshold: -0.05,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingParams {
    /// Share of the session kept for answering; the rest covers transitions and review.
    pub buffer_ratio: f64,
    pub history_weight: f64,
    pub min_questions: u32,
    pub max_questions: u32,
}

impl Default for PacingParams {
    fn default() -> Self {
        Self {
            buffer_ratio: 0.9,
            history_weight: 0.7,
            min_questions: 5,
            max_questions: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationParams {
    pub min_seconds_per_question: u32,
}

impl Default for AllocationParams {
    fn default() -> Self {
        Self {
            min_seconds_per_question: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptiveConfig {
    pub recommendation: RecommendationParams,
    pub trend: TrendParams,
    pub pacing: PacingParams,
    pub allocation: AllocationParams,
    pub analysis_period_days: i64,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            recommendation: RecommendationParams::default(),
            trend: TrendParams::default(),
            pacing: PacingParams::default(),
            allocation: AllocationParams::default(),
            analysis_period_days: 30,
        }
    }
}

impl AdaptiveConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Applies `ADAPTIVE_*` overrides from an arbitrary key lookup.
    /// Values that fail to parse leave the default in place.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = parse_var(&lookup, "ADAPTIVE_LOOKBACK_ATTEMPTS") {
            config.recommendation.lookback_attempts = val;
        }
        if let Some(val) = parse_var(&lookup, "ADAPTIVE_MIN_ATTEMPTS") {
            config.recommendation.min_attempts = val;
            config.trend.min_attempts = val;
        }
        if let Some(val) = parse_var(&lookup, "ADAPTIVE_HIGH_SCORE_THRESHOLD") {
            config.recommendation.high_score_threshold = val;
        }
        if let Some(val) = parse_var(&lookup, "ADAPTIVE_LOW_SCORE_THRESHOLD") {
            config.recommendation.low_score_threshold = val;
        }
        if let Some(val) = parse_var(&lookup, "ADAPTIVE_BUFFER_RATIO") {
            config.pacing.buffer_ratio = val;
        }
        if let Some(val) = parse_var(&lookup, "ADAPTIVE_ANALYSIS_PERIOD_DAYS") {
            config.analysis_period_days = val;
        }

        config
    }

    pub fn validate(&self) -> Result<()> {
        let rec = &self.recommendation;
        if rec.lookback_attempts == 0 {
            return Err(EngineError::config("lookback_attempts must be positive"));
        }
        if rec.min_attempts == 0 || rec.min_attempts > rec.lookback_attempts {
            return Err(EngineError::config(format!(
                "min_attempts must be within 1..={}, got {}",
                rec.lookback_attempts, rec.min_attempts
            )));
        }
        if rec.low_score_threshold >= rec.high_score_threshold {
            return Err(EngineError::config(
                "low_score_threshold must be below high_score_threshold",
            ));
        }
        if rec.fast_time_multiplier >= rec.slow_time_multiplier {
            return Err(EngineError::config(
                "fast_time_multiplier must be below slow_time_multiplier",
            ));
        }
        if rec.fallback_items_per_attempt == 0 {
            return Err(EngineError::config("fallback_items_per_attempt must be positive"));
        }
        if self.trend.declining_threshold > self.trend.improving_threshold {
            return Err(EngineError::config(
                "declining_threshold must not exceed improving_threshold",
            ));
        }
        let pacing = &self.pacing;
        if !(pacing.buffer_ratio > 0.0 && pacing.buffer_ratio <= 1.0) {
            return Err(EngineError::config(format!(
                "buffer_ratio must be within (0, 1], got {}",
                pacing.buffer_ratio
            )));
        }
        if !(0.0..=1.0).contains(&pacing.history_weight) {
            return Err(EngineError::config("history_weight must be within [0, 1]"));
        }
        if pacing.min_questions == 0 || pacing.min_questions > pacing.max_questions {
            return Err(EngineError::config(format!(
                "question bounds invalid: min {} max {}",
                pacing.min_questions, pacing.max_questions
            )));
        }
        if self.analysis_period_days <= 0 {
            return Err(EngineError::config("analysis_period_days must be positive"));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(val) => Some(val),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable config override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = AdaptiveConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.recommendation.min_attempts, 3);
        assert_eq!(config.recommendation.high_score_threshold, 85.0);
        assert_eq!(config.recommendation.low_score_threshold, 70.0);
        assert_eq!(config.pacing.max_questions, 30);
    }

    #[test]
    fn test_overrides_applied() {
        let config = AdaptiveConfig::from_lookup(lookup_from(&[
            ("ADAPTIVE_LOOKBACK_ATTEMPTS", "8"),
            ("ADAPTIVE_MIN_ATTEMPTS", "4"),
            ("ADAPTIVE_BUFFER_RATIO", "0.85"),
        ]));
        assert_eq!(config.recommendation.lookback_attempts, 8);
        assert_eq!(config.recommendation.min_attempts, 4);
        assert_eq!(config.trend.min_attempts, 4);
        assert!((config.pacing.buffer_ratio - 0.85).abs() < 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unparsable_override_keeps_default() {
        let config =
            AdaptiveConfig::from_lookup(lookup_from(&[("ADAPTIVE_HIGH_SCORE_THRESHOLD", "high")]));
        assert_eq!(config.recommendation.high_score_threshold, 85.0);
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let mut config = AdaptiveConfig::default();
        config.recommendation.low_score_threshold = 90.0;
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_buffer() {
        let mut config = AdaptiveConfig::default();
        config.pacing.buffer_ratio = 1.5;
        assert!(config.validate().is_err());
        config.pacing.buffer_ratio = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_deserializes_from_json() {
        let json = serde_json::to_string(&AdaptiveConfig::default()).unwrap();
        let parsed: AdaptiveConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.recommendation.default_level, DifficultyLevel::Intermediate);
        assert_eq!(parsed.analysis_period_days, 30);
    }
}
