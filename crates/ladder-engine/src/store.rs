//! The ordered-set store the ranking engine runs against.
//!
//! The engine never talks to a concrete backend: it issues these primitives
//! against whatever handle the caller passes in. Each primitive must be
//! linearizable per key; the engine adds no coordination of its own.

use chrono::{DateTime, Utc};
use ladder_types::Result;

/// Ordered-set primitives, keyed by leaderboard ID.
///
/// Ranks and range indices are zero-based positions in descending score
/// order. Ties between equal scores are broken by the store.
pub trait SortedSetStore: Send + Sync {
    /// Insert `member` with `score`, or replace its current score.
    fn upsert_score(&self, key: &str, member: &str, score: i64) -> Result<()>;

    /// Remove `member`. Returns `false` if it was not present.
    fn remove(&self, key: &str, member: &str) -> Result<bool>;

    /// Number of members; 0 for a missing key.
    fn cardinality(&self, key: &str) -> Result<usize>;

    /// Current score of `member`, if present.
    fn score(&self, key: &str, member: &str) -> Result<Option<i64>>;

    /// Zero-based descending rank of `member`, if present.
    fn descending_rank(&self, key: &str, member: &str) -> Result<Option<usize>>;

    /// Members at descending positions `start..=stop`, best first. Indices
    /// past the end are clipped; `start > stop` yields nothing.
    fn descending_range(&self, key: &str, start: usize, stop: usize)
    -> Result<Vec<(String, i64)>>;

    /// Schedule eviction of `key` at `at`. A past instant evicts it now.
    fn set_expire_at(&self, key: &str, at: DateTime<Utc>) -> Result<()>;

    /// Scheduled eviction instant of `key`, if any.
    fn expires_at(&self, key: &str) -> Result<Option<DateTime<Utc>>>;
}
