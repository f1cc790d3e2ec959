pub mod analytics;
pub mod breakdown;
pub mod config;
pub mod context;
pub mod difficulty;
pub mod engine;
pub mod pacing;
pub mod trend;
pub mod types;
pub mod window;

pub use analytics::build_analytics;
pub use breakdown::difficulty_breakdown;
pub use config::AdaptiveConfig;
pub use context::PerformanceSummary;
pub use difficulty::{recommend_detailed, recommend_difficulty, Pace, RecommendationDetail};
pub use engine::{AdaptiveEngine, SessionPlan, SessionRequest};
pub use pacing::{allocate_time_limits, dynamic_question_count};
pub use trend::classify_trend;
pub use types::*;
pub use window::AttemptWindow;
