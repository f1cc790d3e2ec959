use crate::adaptive::config::{AllocationParams, PacingParams};
use crate::adaptive::types::{base_seconds_for, QuestionType, TimeAllocationPlan};
use crate::error::{EngineError, Result};

/// Seconds of a session left for answering once the buffer is reserved.
/// Non-positive budgets yield zero.
pub fn usable_seconds(budget_minutes: i64, params: &PacingParams) -> f64 {
    budget_minutes.max(0) as f64 * 60.0 * params.buffer_ratio
}

/// Blends the learner's historical seconds per item with the level baseline.
pub fn estimated_seconds_per_item(
    level: i32,
    historical_avg: Option<f64>,
    params: &PacingParams,
) -> f64 {
    let base = base_seconds_for(level) as f64;
    let estimated = match historical_avg.filter(|avg| avg.is_finite() && *avg > 0.0) {
        Some(avg) => (params.history_weight * avg + (1.0 - params.history_weight) * base).round(),
        None => base,
    };
    estimated.max(1.0)
}

/// Number of questions that fit the session, always within
/// `[min_questions, max_questions]`.
pub fn dynamic_question_count(
    budget_minutes: i64,
    level: i32,
    historical_avg: Option<f64>,
    params: &PacingParams,
) -> u32 {
    let estimated = estimated_seconds_per_item(level, historical_avg, params);
    let usable = usable_seconds(budget_minutes, params);
    let raw = (usable / estimated).floor();
    let count = raw.clamp(params.min_questions as f64, params.max_questions as f64) as u32;

    tracing::debug!(
        budget_minutes,
        level,
        estimated,
        usable,
        raw,
        count,
        "question count sized"
    );
    count
}

/// Splits the usable session time across questions.
///
/// Without a type list matching `count` the split is uniform, floored at
/// `min_seconds_per_question` like the weighted shares. With one,
/// each question gets a share proportional to its type weight, never less
/// than `min_seconds_per_question`; the shares are then rescaled to the
/// usable total and the minimum applied again, so the per-question minimum
/// holds even when the total drifts slightly above the usable time.
pub fn allocate_time_limits(
    count: u32,
    budget_minutes: i64,
    level: i32,
    question_types: Option<&[QuestionType]>,
    pacing: &PacingParams,
    allocation: &AllocationParams,
) -> Result<TimeAllocationPlan> {
    if count == 0 {
        return Err(EngineError::unsupported("question count must be positive"));
    }
    if budget_minutes <= 0 {
        return Err(EngineError::unsupported(format!(
            "session budget must be positive, got {budget_minutes} minutes"
        )));
    }

    let total = usable_seconds(budget_minutes, pacing);
    let usable = whole_seconds(total)?;
    let minimum = allocation.min_seconds_per_question;

    // Every share below is bounded by `total`, which fits in u32.
    let types = match question_types {
        Some(types) if types.len() == count as usize => types,
        _ => {
            let per_question = ((total / count as f64).floor() as u32).max(minimum);
            tracing::debug!(count, per_question, "uniform time allocation");
            return Ok(TimeAllocationPlan {
                limits: vec![per_question; count as usize],
                usable_seconds: usable,
            });
        }
    };

    let weights: Vec<f64> = types.iter().map(QuestionType::weight).collect();
    let total_weight: f64 = weights.iter().sum();

    let mut limits: Vec<u32> = weights
        .iter()
        .map(|w| ((w / total_weight) * total).floor() as u32)
        .map(|t| t.max(minimum))
        .collect();

    let allocated: u64 = limits.iter().map(|&t| t as u64).sum();
    if allocated as f64 != total && allocated > 0 {
        let factor = total / allocated as f64;
        for limit in &mut limits {
            *limit = ((*limit as f64 * factor).floor() as u32).max(minimum);
        }
    }

    tracing::debug!(
        count,
        level,
        usable,
        allocated = limits.iter().map(|&t| t as u64).sum::<u64>(),
        "weighted time allocation"
    );

    Ok(TimeAllocationPlan {
        limits,
        usable_seconds: usable,
    })
}

fn whole_seconds(seconds: f64) -> Result<u32> {
    if seconds > u32::MAX as f64 {
        return Err(EngineError::unsupported(format!(
            "usable session time of {seconds} seconds is too large"
        )));
    }
    Ok(seconds.floor() as u32)
}
