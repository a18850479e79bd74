//! Entry points: leaderboard ID in, expiration rule or instant out.

use chrono::{DateTime, Utc};
use ladder_types::Result;

use crate::{ExpirationRule, Qualifier};

/// Parse the expiration rule embedded in a leaderboard ID.
///
/// Returns `Ok(None)` when the ID carries no recognisable qualifier: such
/// leaderboards never expire. Qualifiers are tried in
/// [`Qualifier::PRIORITY`] order and the first one whose shape appears in
/// the ID decides the outcome, including its error.
pub fn parse_rule(leaderboard_id: &str) -> Result<Option<ExpirationRule>> {
    let rule = Qualifier::PRIORITY
        .iter()
        .find_map(|q| q.try_match(leaderboard_id))
        .transpose()?;

    match &rule {
        Some(r) => tracing::trace!(
            leaderboard = leaderboard_id,
            qualifier = %r.qualifier,
            start = %r.start,
            expire_at = %r.expire_at,
            "Expiration qualifier matched"
        ),
        None => tracing::trace!(leaderboard = leaderboard_id, "No expiration qualifier"),
    }
    Ok(rule)
}

/// The instant after which the leaderboard may be evicted, or `None` if it
/// never expires.
pub fn expire_at(leaderboard_id: &str) -> Result<Option<DateTime<Utc>>> {
    Ok(parse_rule(leaderboard_id)?.map(|rule| rule.expire_at))
}
