//! # ladder-types
//!
//! Shared types, errors, and configuration for the **Ladder** leaderboard
//! engine.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Member model**: [`Member`]
//! - **Configuration**: [`EngineConfig`]
//! - **Errors**: [`LadderError`] with `LB_ERR_` prefix codes, classified by [`ErrorKind`]
//! - **Constants**: system-wide defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod member;

pub use config::*;
pub use error::*;
pub use member::*;

// Constants are accessed via `ladder_types::constants::FOO`.
