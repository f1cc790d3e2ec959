use chrono::{DateTime, Utc};

use crate::adaptive::types::Attempt;

/// Attempt history kept in chronological order.
///
/// Difficulty recommendation reads the newest attempts first while trend
/// classification reads oldest first; both orders are served from here so
/// callers never hand the wrong direction to either.
#[derive(Debug, Clone, Default)]
pub struct AttemptWindow {
    attempts: Vec<Attempt>,
}

impl AttemptWindow {
    pub fn from_unordered<I>(attempts: I) -> Self
    where
        I: IntoIterator<Item = Attempt>,
    {
        let mut attempts: Vec<Attempt> = attempts.into_iter().collect();
        attempts.sort_by_key(|a| a.submitted_at);
        Self { attempts }
    }

    /// Keeps only the attempts of one learner in one subject.
    pub fn for_pair<I>(attempts: I, learner_id: i64, subject_id: i64) -> Self
    where
        I: IntoIterator<Item = Attempt>,
    {
        Self::from_unordered(
            attempts
                .into_iter()
                .filter(|a| a.learner_id == learner_id && a.subject_id == subject_id),
        )
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    pub fn oldest_first(&self) -> &[Attempt] {
        &self.attempts
    }

    /// The newest `limit` attempts, still oldest first.
    pub fn latest(&self, limit: usize) -> &[Attempt] {
        let start = self.attempts.len().saturating_sub(limit);
        &self.attempts[start..]
    }

    pub fn most_recent_first(&self, limit: usize) -> impl Iterator<Item = &Attempt> + '_ {
        self.attempts.iter().rev().take(limit)
    }

    pub fn most_recent(&self) -> Option<&Attempt> {
        self.attempts.last()
    }

    /// Attempts submitted at or after `start`, oldest first.
    pub fn since(&self, start: DateTime<Utc>) -> &[Attempt] {
        let idx = self.attempts.partition_point(|a| a.submitted_at < start);
        &self.attempts[idx..]
    }
}

impl From<Vec<Attempt>> for AttemptWindow {
    fn from(attempts: Vec<Attempt>) -> Self {
        Self::from_unordered(attempts)
    }
}
