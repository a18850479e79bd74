//! System-wide constants for the Ladder leaderboard engine.

/// Default number of members returned per page of ranked results.
pub const DEFAULT_PAGE_SIZE: usize = 25;
