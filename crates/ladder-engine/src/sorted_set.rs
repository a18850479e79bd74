//! The ordered set behind a single leaderboard.
//!
//! Uses a `BTreeSet` for rank ordering:
//! - **Entries**: `BTreeSet<(Reverse<i64>, Reverse<String>)>` -- highest
//!   score first, equal scores in reverse-lexicographic member order
//!
//! An auxiliary `HashMap<String, i64>` gives O(1) score lookup and lets an
//! upsert find the entry it replaces.
//!
//! `BTreeSet` keeps no subtree counts, so [`SortedSet::rank`] and
//! [`SortedSet::range`] walk from the top: O(rank) and O(stop).
//! Boards needing logarithmic deep ranks need a store backed by an
//! order-statistics index (e.g. a Redis skiplist).

use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};

type Entry = (Reverse<i64>, Reverse<String>);

/// One leaderboard's members in descending score order.
#[derive(Debug, Default, Clone)]
pub struct SortedSet {
    /// Descending order: first element is rank 0.
    entries: BTreeSet<Entry>,
    /// Fast lookup: `member -> score`.
    scores: HashMap<String, i64>,
    /// Eviction instant, if one has been scheduled.
    expire_at: Option<DateTime<Utc>>,
}

impl SortedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =================================================================
    // Mutation
    // =================================================================

    /// Insert `member` or move it to `score`. Returns the previous score.
    pub fn upsert(&mut self, member: &str, score: i64) -> Option<i64> {
        let previous = self.scores.insert(member.to_string(), score);
        if let Some(old) = previous {
            self.entries
                .remove(&(Reverse(old), Reverse(member.to_string())));
        }
        self.entries.insert((Reverse(score), Reverse(member.to_string())));
        previous
    }

    /// Remove `member`. Returns its score if it was present.
    pub fn remove(&mut self, member: &str) -> Option<i64> {
        let score = self.scores.remove(member)?;
        self.entries
            .remove(&(Reverse(score), Reverse(member.to_string())));
        Some(score)
    }

    pub fn set_expire_at(&mut self, at: DateTime<Utc>) {
        self.expire_at = Some(at);
    }

    // =================================================================
    // Queries
    // =================================================================

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    #[must_use]
    pub fn score(&self, member: &str) -> Option<i64> {
        self.scores.get(member).copied()
    }

    /// Zero-based position of `member` from the top. O(rank).
    #[must_use]
    pub fn rank(&self, member: &str) -> Option<usize> {
        let score = self.score(member)?;
        let key = (Reverse(score), Reverse(member.to_string()));
        Some(self.entries.range(..key).count())
    }

    /// Members at positions `start..=stop`, best first, clipped to the set.
    /// O(stop).
    #[must_use]
    pub fn range(&self, start: usize, stop: usize) -> Vec<(String, i64)> {
        if start > stop {
            return Vec::new();
        }
        self.entries
            .iter()
            .skip(start)
            .take(stop - start + 1)
            .map(|(Reverse(score), Reverse(member))| (member.clone(), *score))
            .collect()
    }

    #[must_use]
    pub fn expire_at(&self) -> Option<DateTime<Utc>> {
        self.expire_at
    }

    /// Whether the set's eviction instant has been reached at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expire_at.is_some_and(|at| at <= now)
    }
}
