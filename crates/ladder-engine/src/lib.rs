//! # ladder-engine
//!
//! **Leaderboard ranking engine for Ladder.**
//!
//! Ranks, pages and around-me windows over leaderboards held in an
//! ordered-set store. The engine:
//!
//! - **Holds no state** beyond its page size; the store handle is passed
//!   into every operation
//! - **Derives ranks on demand** from the store's descending order
//! - **Refreshes expiration** on every score write, from the qualifier
//!   embedded in the leaderboard ID (see `ladder-expiry`)
//!
//! ## Request Flow
//!
//! ```text
//! caller → RankingEngine op → SortedSetStore primitives
//!        → (on write) ladder_expiry::expire_at(id) → set_expire_at
//!        → Member
//! ```
//!
//! [`InMemoryStore`] is a complete in-process store, used by the test
//! suites and by embedders that do not need a remote backend.

pub mod engine;
pub mod memory_store;
pub mod sorted_set;
pub mod store;
pub mod window;

pub use engine::RankingEngine;
pub use memory_store::InMemoryStore;
pub use sorted_set::SortedSet;
pub use store::SortedSetStore;
