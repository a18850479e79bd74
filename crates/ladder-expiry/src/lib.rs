//! # ladder-expiry
//!
//! **Expiration policy for time-bounded leaderboards.**
//!
//! A leaderboard's lifetime is encoded in its ID: `weekly_year2016week01`,
//! `cup_from20201010to20201011`, `season_year2020`. This crate maps an ID
//! to the instant after which the store may evict it, or to "never".
//!
//! - **Pure**: the result depends only on the ID, never on the wall clock,
//!   so re-applying it on every score update always converges.
//! - **Ordered matchers**: each [`Qualifier`] is tried in priority order,
//!   first structural match wins.
//! - **Grace period**: every qualifier shares one rule, the board outlives
//!   its nominal period by one more period of the same length.

pub mod parser;
pub mod period;
pub mod qualifier;

pub use parser::{expire_at, parse_rule};
pub use period::{ExpirationRule, Period};
pub use qualifier::Qualifier;
