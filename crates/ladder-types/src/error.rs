//! Error types for the Ladder leaderboard engine.
//!
//! All errors use the `LB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Store errors
//! - 2xx: Not-found outcomes
//! - 3xx: Expiration / validation errors
//! - 9xx: General / configuration errors

use std::fmt;

use thiserror::Error;

/// Central error enum for all Ladder operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LadderError {
    // =================================================================
    // Store Errors (1xx)
    // =================================================================
    /// The backing store rejected a command or returned a protocol failure.
    #[error("LB_ERR_100: Store error: {0}")]
    Store(String),

    /// The backing store could not be reached.
    #[error("LB_ERR_101: Store unavailable: {0}")]
    StoreUnavailable(String),

    // =================================================================
    // Not Found (2xx)
    // =================================================================
    /// The member has no score in the given leaderboard.
    #[error("LB_ERR_200: Member {member} not found in leaderboard {leaderboard}")]
    MemberNotFound { leaderboard: String, member: String },

    // =================================================================
    // Validation Errors (3xx)
    // =================================================================
    /// The qualifier in a leaderboard ID describes an empty or reversed period.
    #[error("LB_ERR_300: Leaderboard {leaderboard} has invalid duration {seconds}")]
    InvalidDuration { leaderboard: String, seconds: i64 },

    /// A calendar component embedded in a leaderboard ID is out of range.
    #[error("LB_ERR_301: parsing time \"{value}\": {reason}")]
    InvalidDateComponent { value: String, reason: String },

    /// A numeric component embedded in a leaderboard ID is not representable.
    #[error("LB_ERR_302: Invalid number \"{value}\": {reason}")]
    InvalidNumber { value: String, reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Page size must be strictly positive.
    #[error("LB_ERR_900: Invalid page size: {0}")]
    InvalidPageSize(usize),

    /// Serialization / deserialization error.
    #[error("LB_ERR_901: Serialization error: {0}")]
    Serialization(String),
}

/// Coarse classification of a [`LadderError`], for callers that only need
/// to decide how to respond (retry the store, 404, 422, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Backing store unreachable or failed.
    Store,
    /// A required member is absent. An expected outcome, not a fault.
    NotFound,
    /// A leaderboard ID carries a malformed or empty expiration qualifier.
    Validation,
    /// Engine misconfiguration.
    Configuration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store => write!(f, "STORE"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
        }
    }
}

impl LadderError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Store(_) | Self::StoreUnavailable(_) => ErrorKind::Store,
            Self::MemberNotFound { .. } => ErrorKind::NotFound,
            Self::InvalidDuration { .. }
            | Self::InvalidDateComponent { .. }
            | Self::InvalidNumber { .. } => ErrorKind::Validation,
            Self::InvalidPageSize(_) | Self::Serialization(_) => ErrorKind::Configuration,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    #[must_use]
    pub fn member_not_found(leaderboard: &str, member: &str) -> Self {
        Self::MemberNotFound {
            leaderboard: leaderboard.to_string(),
            member: member.to_string(),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, LadderError>;

impl From<serde_json::Error> for LadderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = LadderError::member_not_found("weekly", "dayvson");
        let msg = format!("{err}");
        assert!(msg.starts_with("LB_ERR_200"), "Got: {msg}");
        assert!(msg.contains("dayvson"));
        assert!(msg.contains("weekly"));
    }

    #[test]
    fn invalid_duration_display() {
        let err = LadderError::InvalidDuration {
            leaderboard: "league_from20201011to20201010".into(),
            seconds: -86_400,
        };
        let msg = format!("{err}");
        assert!(msg.contains("has invalid duration -86400"), "Got: {msg}");
    }

    #[test]
    fn date_component_display() {
        let err = LadderError::InvalidDateComponent {
            value: "20201039".into(),
            reason: "day out of range".into(),
        };
        assert_eq!(
            err.to_string(),
            "LB_ERR_301: parsing time \"20201039\": day out of range"
        );
    }

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(LadderError::Store("x".into()).kind(), ErrorKind::Store);
        assert_eq!(
            LadderError::StoreUnavailable("x".into()).kind(),
            ErrorKind::Store
        );
        assert!(LadderError::member_not_found("a", "b").is_not_found());
        assert_eq!(
            LadderError::InvalidNumber {
                value: "9".into(),
                reason: "overflow".into()
            }
            .kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            LadderError::InvalidPageSize(0).kind(),
            ErrorKind::Configuration
        );
    }

    #[test]
    fn all_errors_have_lb_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(LadderError::Store("down".into())),
            Box::new(LadderError::InvalidPageSize(0)),
            Box::new(LadderError::Serialization("bad".into())),
            Box::new(LadderError::InvalidDuration {
                leaderboard: "a".into(),
                seconds: 0,
            }),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("LB_ERR_"),
                "Error missing LB_ERR_ prefix: {msg}"
            );
        }
    }
}
