use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::adaptive::analytics::{average_time_per_item, build_analytics, period_start};
use crate::adaptive::breakdown::difficulty_breakdown;
use crate::adaptive::config::AdaptiveConfig;
use crate::adaptive::difficulty::{recommend_detailed, RecommendationDetail};
use crate::adaptive::pacing::{allocate_time_limits, dynamic_question_count};
use crate::adaptive::trend::classify_trend;
use crate::adaptive::types::*;
use crate::adaptive::window::AttemptWindow;
use crate::error::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub budget_minutes: i64,
    /// Explicit level chosen by the caller; the recommendation is used when absent.
    #[serde(default)]
    pub difficulty: Option<i32>,
    #[serde(default)]
    pub question_types: Option<Vec<QuestionType>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPlan {
    pub difficulty: DifficultyLevel,
    pub question_count: u32,
    pub time_limits: TimeAllocationPlan,
    pub trend: Trend,
}

/// Stateless façade over the adaptive heuristics.
///
/// Holds only its configuration, so one instance can be cloned or shared
/// across threads freely.
#[derive(Debug, Clone, Default)]
pub struct AdaptiveEngine {
    config: AdaptiveConfig,
}

impl AdaptiveEngine {
    pub fn new(config: AdaptiveConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AdaptiveConfig {
        &self.config
    }

    pub fn recommend(&self, history: &AttemptWindow) -> DifficultyLevel {
        self.recommend_detailed(history).level
    }

    pub fn recommend_detailed(&self, history: &AttemptWindow) -> RecommendationDetail {
        let params = &self.config.recommendation;
        recommend_detailed(history.most_recent_first(params.lookback_attempts), params)
    }

    /// Trend over the same lookback window the recommendation uses.
    pub fn trend(&self, history: &AttemptWindow) -> Trend {
        let window = history.latest(self.config.recommendation.lookback_attempts);
        classify_trend(window, &self.config.trend)
    }

    pub fn breakdown(&self, attempts: &[Attempt]) -> PerformanceBreakdown {
        difficulty_breakdown(
            attempts,
            self.config.recommendation.fallback_items_per_attempt,
        )
    }

    pub fn question_count(
        &self,
        budget_minutes: i64,
        level: i32,
        historical_avg: Option<f64>,
    ) -> u32 {
        dynamic_question_count(budget_minutes, level, historical_avg, &self.config.pacing)
    }

    pub fn time_limits(
        &self,
        count: u32,
        budget_minutes: i64,
        level: i32,
        question_types: Option<&[QuestionType]>,
    ) -> Result<TimeAllocationPlan> {
        allocate_time_limits(
            count,
            budget_minutes,
            level,
            question_types,
            &self.config.pacing,
            &self.config.allocation,
        )
    }

    pub fn analytics(
        &self,
        learner_id: i64,
        subject_id: i64,
        history: &AttemptWindow,
        today: NaiveDate,
    ) -> Option<PerformanceAnalytics> {
        build_analytics(learner_id, subject_id, history, today, &self.config)
    }

    /// Resolves level, question count and time limits for a new quiz.
    ///
    /// The question count uses the learner's average time per item over the
    /// analysis period when one exists.
    pub fn plan_session(
        &self,
        request: &SessionRequest,
        history: &AttemptWindow,
        today: NaiveDate,
    ) -> Result<SessionPlan> {
        let difficulty = match request.difficulty {
            Some(level) => DifficultyLevel::clamped(level),
            None => self.recommend(history),
        };

        let start = period_start(today, self.config.analysis_period_days);
        let period = history.since(Utc.from_utc_datetime(&start.and_time(NaiveTime::MIN)));
        let avg_time = average_time_per_item(
            period,
            self.config.recommendation.fallback_items_per_attempt,
        );
        let historical_avg = (avg_time > 0).then_some(avg_time as f64);

        let question_count =
            self.question_count(request.budget_minutes, difficulty.level(), historical_avg);
        let time_limits = self.time_limits(
            question_count,
            request.budget_minutes,
            difficulty.level(),
            request.question_types.as_deref(),
        )?;

        let plan = SessionPlan {
            difficulty,
            question_count,
            time_limits,
            trend: self.trend(history),
        };

        tracing::info!(
            difficulty = plan.difficulty.level(),
            question_count = plan.question_count,
            trend = plan.trend.as_str(),
            "session planned"
        );

        Ok(plan)
    }
}
