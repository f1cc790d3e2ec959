//! Adaptive difficulty and pacing heuristics for quiz generation.
//!
//! The engine is pure computation over a learner's attempt history:
//!
//! - [`adaptive::difficulty`] recommends the next difficulty level
//! - [`adaptive::trend`] classifies the score trajectory
//! - [`adaptive::breakdown`] summarises performance per difficulty level
//! - [`adaptive::pacing`] sizes a quiz and splits its time budget
//! - [`adaptive::analytics`] assembles the per-subject snapshot
//!
//! Persistence, HTTP and AI generation stay with the caller.
//!
//! ```rust
//! use adaptive_quiz_engine::adaptive::{AdaptiveEngine, AttemptWindow, DifficultyLevel};
//!
//! let engine = AdaptiveEngine::default();
//! let history = AttemptWindow::default();
//! assert_eq!(engine.recommend(&history), DifficultyLevel::Intermediate);
//! assert_eq!(engine.question_count(30, 2, None), 30);
//! ```

pub mod adaptive;
pub mod config;
pub mod error;
pub mod logging;

pub use adaptive::{AdaptiveConfig, AdaptiveEngine};
pub use error::{EngineError, Result};
