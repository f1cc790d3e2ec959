use crate::adaptive::config::TrendParams;
use crate::adaptive::types::{Attempt, Trend};

/// Classifies the trajectory of a chronological (oldest first) window by
/// comparing the mean score ratio of its later half against its earlier half.
///
/// The window is split before malformed attempts are skipped, so a skipped
/// attempt never shifts a neighbour into the other half. A half without any
/// well-formed attempt averages to zero.
pub fn classify_trend<'a, I>(window: I, params: &TrendParams) -> Trend
where
    I: IntoIterator<Item = &'a Attempt>,
{
    let window: Vec<&Attempt> = window.into_iter().collect();

    if window.len() < params.min_attempts.max(2) {
        return Trend::Stable;
    }

    let (first, second) = window.split_at(window.len() / 2);
    let (first_mean, first_n) = half_mean(first);
    let (second_mean, second_n) = half_mean(second);
    if first_n == 0 && second_n == 0 {
        tracing::warn!(attempts = window.len(), "no well-formed attempt in trend window");
        return Trend::Stable;
    }

    let diff = second_mean - first_mean;
    let trend = if diff > params.improving_threshold {
        Trend::Improving
    } else if diff < params.declining_threshold {
        Trend::Declining
    } else {
        Trend::Stable
    };

    tracing::debug!(
        samples = window.len(),
        skipped = window.len() - first_n - second_n,
        diff,
        trend = trend.as_str(),
        "trend classified"
    );
    trend
}

/// Mean score ratio over the well-formed attempts of one half, with the
/// number of attempts that contributed.
fn half_mean(half: &[&Attempt]) -> (f64, usize) {
    let (sum, n) = half
        .iter()
        .filter_map(|a| a.ratio())
        .fold((0.0, 0usize), |(sum, n), r| (sum + r, n + 1));
    if n == 0 {
        (0.0, 0)
    } else {
        (sum / n as f64, n)
    }
}
