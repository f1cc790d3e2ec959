use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Base seconds per item used when a level falls outside 1..=4.
pub const DEFAULT_BASE_SECONDS: u32 = 45;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(into = "i32", try_from = "i32")]
pub enum DifficultyLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl DifficultyLevel {
    pub const ALL: [DifficultyLevel; 4] = [
        Self::Beginner,
        Self::Intermediate,
        Self::Advanced,
        Self::Expert,
    ];

    pub fn from_level(level: i32) -> Option<Self> {
        match level {
            1 => Some(Self::Beginner),
            2 => Some(Self::Intermediate),
            3 => Some(Self::Advanced),
            4 => Some(Self::Expert),
            _ => None,
        }
    }

    /// Maps any integer into the closed 1..=4 range.
    pub fn clamped(level: i32) -> Self {
        Self::from_level(level.clamp(1, 4)).unwrap_or_default()
    }

    pub fn level(&self) -> i32 {
        match self {
            Self::Beginner => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
            Self::Expert => 4,
        }
    }

    pub fn harder(&self) -> Self {
        Self::clamped(self.level() + 1)
    }

    pub fn easier(&self) -> Self {
        Self::clamped(self.level() - 1)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }

    pub fn expected_seconds_per_item(&self) -> u32 {
        match self {
            Self::Beginner => 30,
            Self::Intermediate => 45,
            Self::Advanced => 60,
            Self::Expert => 90,
        }
    }
}

impl From<DifficultyLevel> for i32 {
    fn from(level: DifficultyLevel) -> Self {
        level.level()
    }
}

impl TryFrom<i32> for DifficultyLevel {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_level(value).ok_or_else(|| format!("difficulty level out of range: {value}"))
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected seconds per item for a raw level, falling back to 45s.
pub fn base_seconds_for(level: i32) -> u32 {
    DifficultyLevel::from_level(level)
        .map(|l| l.expected_seconds_per_item())
        .unwrap_or(DEFAULT_BASE_SECONDS)
}

/// One completed quiz submission. Read-only input owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub learner_id: i64,
    pub subject_id: i64,
    pub score: u32,
    pub max_score: u32,
    pub time_taken_seconds: u32,
    pub difficulty: i32,
    pub submitted_at: DateTime<Utc>,
    /// Actual number of questions, when the caller knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u32>,
}

impl Attempt {
    pub fn is_well_formed(&self) -> bool {
        self.max_score > 0
    }

    pub fn ratio(&self) -> Option<f64> {
        if self.is_well_formed() {
            Some(self.score as f64 / self.max_score as f64)
        } else {
            None
        }
    }

    pub fn level(&self) -> DifficultyLevel {
        DifficultyLevel::clamped(self.difficulty)
    }

    pub fn items_or(&self, fallback: u32) -> u32 {
        self.item_count.filter(|&n| n > 0).unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    #[default]
    Stable,
    Declining,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Stable => "stable",
            Self::Declining => "declining",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "improving" => Self::Improving,
            "declining" => Self::Declining,
            _ => Self::Stable,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
    Essay,
    ProblemSolving,
    FillBlank,
    Other(String),
}

impl QuestionType {
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "multiple_choice" => Self::MultipleChoice,
            "true_false" => Self::TrueFalse,
            "short_answer" => Self::ShortAnswer,
            "essay" => Self::Essay,
            "problem_solving" => Self::ProblemSolving,
            "fill_blank" => Self::FillBlank,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::MultipleChoice => "multiple_choice",
            Self::TrueFalse => "true_false",
            Self::ShortAnswer => "short_answer",
            Self::Essay => "essay",
            Self::ProblemSolving => "problem_solving",
            Self::FillBlank => "fill_blank",
            Self::Other(tag) => tag,
        }
    }

    /// Relative time weight; unknown tags count as multiple choice.
    pub fn weight(&self) -> f64 {
        match self {
            Self::MultipleChoice => 1.0,
            Self::TrueFalse => 0.7,
            Self::ShortAnswer => 1.3,
            Self::Essay => 2.0,
            Self::ProblemSolving => 1.5,
            Self::FillBlank => 0.9,
            Self::Other(_) => 1.0,
        }
    }
}

impl From<String> for QuestionType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for QuestionType {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<QuestionType> for String {
    fn from(value: QuestionType) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    pub attempt_count: u32,
    pub avg_score_percent: f64,
    pub avg_time_per_item: f64,
}

/// Per-level summary keyed by observed difficulty level only.
pub type PerformanceBreakdown = BTreeMap<i32, BreakdownEntry>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceAnalytics {
    pub learner_id: i64,
    pub subject_id: i64,
    pub total_attempts: u32,
    pub average_score_percent: f64,
    pub average_time_per_item: u32,
    pub current_difficulty_level: DifficultyLevel,
    pub recommended_difficulty_level: DifficultyLevel,
    pub trend: Trend,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub breakdown: PerformanceBreakdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeAllocationPlan {
    pub limits: Vec<u32>,
    pub usable_seconds: u32,
}

impl TimeAllocationPlan {
    pub fn len(&self) -> usize {
        self.limits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.limits.iter().map(|&t| t as u64).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &u32> {
        self.limits.iter()
    }
}
