//! The leaderboard ranking engine.
//!
//! Stateless apart from its page size: every operation takes the store
//! handle explicitly and issues a short sequence of store primitives.
//! Ranks are never cached; they are re-derived from the store on every call.

use chrono::{DateTime, Utc};
use ladder_types::{EngineConfig, LadderError, Member, Result};

use crate::SortedSetStore;
use crate::window;

/// Ranking operations over leaderboards held in a [`SortedSetStore`].
///
/// `Copy` and lock-free: share it freely across threads. Concurrency
/// control is entirely the store's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingEngine {
    page_size: usize,
}

impl RankingEngine {
    /// Create an engine returning `page_size` members per page.
    ///
    /// # Errors
    /// [`LadderError::InvalidPageSize`] if `page_size` is zero.
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(LadderError::InvalidPageSize(page_size));
        }
        Ok(Self { page_size })
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.page_size)
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    // =================================================================
    // Mutation
    // =================================================================

    /// Set `member_id`'s score, creating the member (and the leaderboard)
    /// if needed, then refresh the leaderboard's expiration.
    ///
    /// Not atomic: if the expiration step fails, the new score has already
    /// been stored. [`RankingEngine::apply_expiration`] can be re-run on its
    /// own.
    pub fn set_score<S: SortedSetStore + ?Sized>(
        &self,
        store: &S,
        leaderboard_id: &str,
        member_id: &str,
        score: i64,
    ) -> Result<Member> {
        store.upsert_score(leaderboard_id, member_id, score)?;
        let rank = store
            .descending_rank(leaderboard_id, member_id)?
            .ok_or_else(|| LadderError::member_not_found(leaderboard_id, member_id))?;

        tracing::debug!(
            leaderboard = leaderboard_id,
            member = member_id,
            score,
            rank = rank + 1,
            "Score set"
        );

        if let Err(err) = self.apply_expiration(store, leaderboard_id) {
            tracing::warn!(
                leaderboard = leaderboard_id,
                member = member_id,
                error = %err,
                "Score stored but expiration not applied"
            );
            return Err(err);
        }

        Ok(Member::new(member_id, score, rank + 1))
    }

    /// Derive the leaderboard's expire-at instant from its ID and apply it
    /// to the store. Returns the instant, or `None` for leaderboards that
    /// never expire.
    ///
    /// Idempotent: the instant depends only on the ID.
    pub fn apply_expiration<S: SortedSetStore + ?Sized>(
        &self,
        store: &S,
        leaderboard_id: &str,
    ) -> Result<Option<DateTime<Utc>>> {
        let Some(at) = ladder_expiry::expire_at(leaderboard_id)? else {
            return Ok(None);
        };
        store.set_expire_at(leaderboard_id, at)?;
        tracing::debug!(leaderboard = leaderboard_id, expire_at = %at, "Expiration applied");
        Ok(Some(at))
    }

    /// Remove a member. Returns `false` if it was not present; that is not
    /// an error.
    pub fn remove_member<S: SortedSetStore + ?Sized>(
        &self,
        store: &S,
        leaderboard_id: &str,
        member_id: &str,
    ) -> Result<bool> {
        let removed = store.remove(leaderboard_id, member_id)?;
        tracing::debug!(
            leaderboard = leaderboard_id,
            member = member_id,
            removed,
            "Member removed"
        );
        Ok(removed)
    }

    // =================================================================
    // Point lookups
    // =================================================================

    /// Score and rank of one member.
    pub fn get_member<S: SortedSetStore + ?Sized>(
        &self,
        store: &S,
        leaderboard_id: &str,
        member_id: &str,
    ) -> Result<Member> {
        let score = store
            .score(leaderboard_id, member_id)?
            .ok_or_else(|| LadderError::member_not_found(leaderboard_id, member_id))?;
        let rank = self.get_rank(store, leaderboard_id, member_id)?;
        Ok(Member::new(member_id, score, rank))
    }

    /// 1-based rank of one member.
    pub fn get_rank<S: SortedSetStore + ?Sized>(
        &self,
        store: &S,
        leaderboard_id: &str,
        member_id: &str,
    ) -> Result<usize> {
        store
            .descending_rank(leaderboard_id, member_id)?
            .map(|rank| rank + 1)
            .ok_or_else(|| LadderError::member_not_found(leaderboard_id, member_id))
    }

    // =================================================================
    // Counts
    // =================================================================

    /// Number of members; 0 for an empty or unknown leaderboard.
    pub fn total_members<S: SortedSetStore + ?Sized>(
        &self,
        store: &S,
        leaderboard_id: &str,
    ) -> Result<usize> {
        store.cardinality(leaderboard_id)
    }

    pub fn total_pages<S: SortedSetStore + ?Sized>(
        &self,
        store: &S,
        leaderboard_id: &str,
    ) -> Result<usize> {
        let total = self.total_members(store, leaderboard_id)?;
        Ok(window::total_pages(total, self.page_size))
    }

    // =================================================================
    // Ranged queries
    // =================================================================

    /// One page of the leaderboard, best first. `page` is 1-based; 0 is
    /// treated as 1. Pages past the end come back short or empty.
    pub fn get_leaders<S: SortedSetStore + ?Sized>(
        &self,
        store: &S,
        leaderboard_id: &str,
        page: usize,
    ) -> Result<Vec<Member>> {
        let (start, stop) = window::page_bounds(page, self.page_size);
        Self::ranked_range(store, leaderboard_id, start, stop)
    }

    /// Up to `page_size` members around `member_id`, best first.
    ///
    /// See [`window::around_me_bounds`] for the exact window.
    pub fn get_around_me<S: SortedSetStore + ?Sized>(
        &self,
        store: &S,
        leaderboard_id: &str,
        member_id: &str,
    ) -> Result<Vec<Member>> {
        let rank = store
            .descending_rank(leaderboard_id, member_id)?
            .ok_or_else(|| LadderError::member_not_found(leaderboard_id, member_id))?;
        let (start, stop) = window::around_me_bounds(rank, self.page_size);
        Self::ranked_range(store, leaderboard_id, start, stop)
    }

    fn ranked_range<S: SortedSetStore + ?Sized>(
        store: &S,
        leaderboard_id: &str,
        start: usize,
        stop: usize,
    ) -> Result<Vec<Member>> {
        let entries = store.descending_range(leaderboard_id, start, stop)?;
        Ok(entries
            .into_iter()
            .enumerate()
            .map(|(offset, (member, score))| Member::new(member, score, start + offset + 1))
            .collect())
    }
}
