//! In-process [`SortedSetStore`] backed by a lock-protected map of
//! [`SortedSet`]s.
//!
//! Expiry is lazy: a key past its eviction instant reads as absent and is
//! dropped by the next write that touches it, or by [`InMemoryStore::purge_expired`].

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use ladder_types::{LadderError, Result};

use crate::{SortedSet, SortedSetStore};

/// Thread-safe in-memory sorted-set store.
///
/// Every primitive takes the map lock once, so each one is linearizable
/// across all keys. Rank and range reads cost O(position) on the set; see
/// [`SortedSet`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    sets: RwLock<HashMap<String, SortedSet>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every key whose eviction instant has passed. Returns how many
    /// keys were removed.
    pub fn purge_expired(&self) -> Result<usize> {
        let now = Utc::now();
        let mut sets = self.write()?;
        let before = sets.len();
        sets.retain(|_, set| !set.is_expired(now));
        let purged = before - sets.len();
        if purged > 0 {
            tracing::debug!(purged, "Purged expired leaderboards");
        }
        Ok(purged)
    }

    /// Number of live keys.
    pub fn key_count(&self) -> Result<usize> {
        let now = Utc::now();
        Ok(self.read()?.values().filter(|s| !s.is_expired(now)).count())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, SortedSet>>> {
        self.sets
            .read()
            .map_err(|_| LadderError::Store("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, SortedSet>>> {
        self.sets
            .write()
            .map_err(|_| LadderError::Store("in-memory store lock poisoned".to_string()))
    }

    /// Run `f` against the live set at `key`, or return `default` if the key
    /// is missing or expired.
    fn with_live<T>(&self, key: &str, default: T, f: impl FnOnce(&SortedSet) -> T) -> Result<T> {
        let sets = self.read()?;
        Ok(match sets.get(key) {
            Some(set) if !set.is_expired(Utc::now()) => f(set),
            _ => default,
        })
    }
}

/// Remove `key` from `sets` if it has expired.
fn evict_if_expired(sets: &mut HashMap<String, SortedSet>, key: &str) {
    if sets.get(key).is_some_and(|s| s.is_expired(Utc::now())) {
        sets.remove(key);
        tracing::debug!(leaderboard = key, "Evicted expired leaderboard");
    }
}

impl SortedSetStore for InMemoryStore {
    fn upsert_score(&self, key: &str, member: &str, score: i64) -> Result<()> {
        let mut sets = self.write()?;
        evict_if_expired(&mut sets, key);
        sets.entry(key.to_string())
            .or_default()
            .upsert(member, score);
        Ok(())
    }

    fn remove(&self, key: &str, member: &str) -> Result<bool> {
        let mut sets = self.write()?;
        evict_if_expired(&mut sets, key);
        let Some(set) = sets.get_mut(key) else {
            return Ok(false);
        };
        let removed = set.remove(member).is_some();
        if set.is_empty() {
            sets.remove(key);
        }
        Ok(removed)
    }

    fn cardinality(&self, key: &str) -> Result<usize> {
        self.with_live(key, 0, SortedSet::len)
    }

    fn score(&self, key: &str, member: &str) -> Result<Option<i64>> {
        self.with_live(key, None, |set| set.score(member))
    }

    fn descending_rank(&self, key: &str, member: &str) -> Result<Option<usize>> {
        self.with_live(key, None, |set| set.rank(member))
    }

    fn descending_range(
        &self,
        key: &str,
        start: usize,
        stop: usize,
    ) -> Result<Vec<(String, i64)>> {
        self.with_live(key, Vec::new(), |set| set.range(start, stop))
    }

    fn set_expire_at(&self, key: &str, at: DateTime<Utc>) -> Result<()> {
        let mut sets = self.write()?;
        evict_if_expired(&mut sets, key);
        if at <= Utc::now() {
            // Same as an expiry that has already fired.
            sets.remove(key);
            return Ok(());
        }
        if let Some(set) = sets.get_mut(key) {
            set.set_expire_at(at);
        }
        Ok(())
    }

    fn expires_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        self.with_live(key, None, SortedSet::expire_at)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    #[test]
    fn missing_key_reads_as_empty() {
        let store = InMemoryStore::new();
        assert_eq!(store.cardinality("nope").unwrap(), 0);
        assert_eq!(store.score("nope", "a").unwrap(), None);
        assert_eq!(store.descending_rank("nope", "a").unwrap(), None);
        assert!(store.descending_range("nope", 0, 10).unwrap().is_empty());
        assert_eq!(store.expires_at("nope").unwrap(), None);
        assert!(!store.remove("nope", "a").unwrap());
    }

    #[test]
    fn keys_are_independent() {
        let store = InMemoryStore::new();
        store.upsert_score("a", "x", 1).unwrap();
        store.upsert_score("b", "x", 2).unwrap();
        assert_eq!(store.score("a", "x").unwrap(), Some(1));
        assert_eq!(store.score("b", "x").unwrap(), Some(2));
        assert_eq!(store.key_count().unwrap(), 2);
    }

    #[test]
    fn removing_last_member_drops_key() {
        let store = InMemoryStore::new();
        store.upsert_score("a", "x", 1).unwrap();
        assert!(store.remove("a", "x").unwrap());
        assert_eq!(store.key_count().unwrap(), 0);
    }

    #[test]
    fn future_expiry_is_recorded() {
        let store = InMemoryStore::new();
        let at = Utc::now() + TimeDelta::days(1);
        store.upsert_score("a", "x", 1).unwrap();
        store.set_expire_at("a", at).unwrap();
        assert_eq!(store.expires_at("a").unwrap(), Some(at));
        assert_eq!(store.purge_expired().unwrap(), 0);
    }

    #[test]
    fn past_expiry_evicts_immediately() {
        let store = InMemoryStore::new();
        store.upsert_score("a", "x", 1).unwrap();
        store
            .set_expire_at("a", Utc::now() - TimeDelta::seconds(1))
            .unwrap();
        assert_eq!(store.cardinality("a").unwrap(), 0);
        assert_eq!(store.key_count().unwrap(), 0);
    }

    #[test]
    fn lapsed_key_reads_absent_until_purged() {
        let store = InMemoryStore::new();
        store.upsert_score("a", "x", 1).unwrap();
        store
            .set_expire_at("a", Utc::now() + TimeDelta::milliseconds(20))
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(50));

        assert_eq!(store.cardinality("a").unwrap(), 0);
        assert_eq!(store.score("a", "x").unwrap(), None);
        assert_eq!(store.purge_expired().unwrap(), 1);
        assert_eq!(store.purge_expired().unwrap(), 0);
    }

    #[test]
    fn write_after_lapse_starts_fresh() {
        let store = InMemoryStore::new();
        store.upsert_score("a", "old", 1).unwrap();
        store
            .set_expire_at("a", Utc::now() + TimeDelta::milliseconds(20))
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(50));

        store.upsert_score("a", "new", 2).unwrap();
        assert_eq!(store.cardinality("a").unwrap(), 1);
        assert_eq!(store.expires_at("a").unwrap(), None);
    }

    #[test]
    fn expiry_on_missing_key_is_a_no_op() {
        let store = InMemoryStore::new();
        store
            .set_expire_at("ghost", Utc::now() + TimeDelta::days(1))
            .unwrap();
        assert_eq!(store.expires_at("ghost").unwrap(), None);
        assert_eq!(store.key_count().unwrap(), 0);
    }
}
