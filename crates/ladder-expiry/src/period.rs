//! Calendar periods and the grace-period rule shared by every qualifier.
//!
//! A leaderboard stays valid for its nominal period and then for one more
//! period of the same length before the store may evict it:
//!
//! ```text
//! start ──period──▶ end ──period──▶ expire_at
//! ```
//!
//! Month-based periods are added in calendar months, so `year2020` expires
//! on 2022-01-01 and `year2016month01` on 2016-03-01, regardless of leap
//! days or month lengths.

use chrono::{DateTime, Months, TimeDelta, Utc};
use ladder_types::{LadderError, Result};

use crate::Qualifier;

/// Length of a leaderboard's validity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Whole calendar months (quarters, months, years).
    Months(u32),
    /// An exact span (explicit ranges, ISO weeks).
    Exact(TimeDelta),
}

impl Period {
    /// `at + self`, or `None` if the result is not representable.
    #[must_use]
    pub fn add_to(self, at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Months(n) => at.checked_add_months(Months::new(n)),
            Self::Exact(span) => at.checked_add_signed(span),
        }
    }
}

/// The parsed expiration policy of one leaderboard ID.
///
/// Ephemeral: recomputed from the ID string whenever it is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationRule {
    /// Which qualifier grammar matched.
    pub qualifier: Qualifier,
    /// Start of the nominal period.
    pub start: DateTime<Utc>,
    /// End of the nominal period.
    pub end: DateTime<Utc>,
    /// `end` plus one more period: the instant the store may evict the key.
    pub expire_at: DateTime<Utc>,
}

impl ExpirationRule {
    /// Build a rule from a period start, applying the grace-period rule.
    ///
    /// # Errors
    /// [`LadderError::InvalidDuration`] if the period is empty or reversed,
    /// [`LadderError::InvalidNumber`] if an instant overflows.
    pub fn new(
        leaderboard_id: &str,
        qualifier: Qualifier,
        start: DateTime<Utc>,
        period: Period,
    ) -> Result<Self> {
        let end = period
            .add_to(start)
            .ok_or_else(|| out_of_range(leaderboard_id))?;

        let seconds = (end - start).num_seconds();
        if seconds <= 0 {
            return Err(LadderError::InvalidDuration {
                leaderboard: leaderboard_id.to_string(),
                seconds,
            });
        }

        let expire_at = period
            .add_to(end)
            .ok_or_else(|| out_of_range(leaderboard_id))?;

        Ok(Self {
            qualifier,
            start,
            end,
            expire_at,
        })
    }

    /// Length of the nominal period.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

fn out_of_range(leaderboard_id: &str) -> LadderError {
    LadderError::InvalidNumber {
        value: leaderboard_id.to_string(),
        reason: "expiration instant out of range".to_string(),
    }
}
