//! The ranked member record returned by every leaderboard query.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A participant in one leaderboard.
///
/// `rank` is 1-based and always derived from the member's current position
/// in the ordered set at query time; it is never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Member {
    /// The member's public identifier, unique within its leaderboard.
    #[serde(rename = "publicID")]
    pub public_id: String,
    /// Current score. Any value is accepted, including zero and negatives.
    pub score: i64,
    /// 1-based position by descending score.
    pub rank: usize,
}

impl Member {
    #[must_use]
    pub fn new(public_id: impl Into<String>, score: i64, rank: usize) -> Self {
        Self {
            public_id: public_id.into(),
            score,
            rank,
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} ({})", self.rank, self.public_id, self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_rank_first() {
        let m = Member::new("dayvson", 481_516, 1);
        assert_eq!(m.to_string(), "#1 dayvson (481516)");
    }

    #[test]
    fn json_uses_public_id_field_name() {
        let m = Member::new("arthur", -5, 2);
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["publicID"], "arthur");
        assert_eq!(json["score"], -5);
        assert_eq!(json["rank"], 2);
    }
}
