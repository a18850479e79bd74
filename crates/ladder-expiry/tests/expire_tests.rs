//! Expiration instants for every qualifier form, computed from real
//! leaderboard IDs.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use ladder_expiry::{Qualifier, expire_at, parse_rule};
use ladder_types::{ErrorKind, LadderError};

fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

// =============================================================================
// No qualifier
// =============================================================================

#[test]
fn no_qualifier_never_expires() {
    assert_eq!(expire_at("my_league").unwrap(), None);
    assert!(parse_rule("my_league").unwrap().is_none());
}

// =============================================================================
// Yearly
// =============================================================================

#[test]
fn yearly_expiration_for_2020() {
    assert_eq!(expire_at("league_year2020").unwrap(), Some(utc(2022, 1, 1)));
}

// =============================================================================
// Day ranges
// =============================================================================

#[test]
fn custom_day_expiration() {
    assert_eq!(
        expire_at("league_from20201010to20201011").unwrap(),
        Some(utc(2020, 10, 12))
    );
}

#[test]
fn custom_day_invalid_timestamp() {
    let err = expire_at("league_from20201039to20201011").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(
        err.to_string()
            .ends_with("parsing time \"20201039\": day out of range"),
        "Got: {err}"
    );

    let err = expire_at("league_from20201010to20201139").unwrap_err();
    assert!(
        err.to_string()
            .ends_with("parsing time \"20201139\": day out of range"),
        "Got: {err}"
    );
}

#[test]
fn custom_day_negative_duration() {
    let err = expire_at("league_from20201011to20201010").unwrap_err();
    assert!(
        matches!(err, LadderError::InvalidDuration { seconds: -86_400, .. }),
        "Got: {err:?}"
    );
    assert!(err.to_string().contains("has invalid duration -86400"));
}

#[test]
fn custom_day_same_day_is_empty() {
    let err = expire_at("league_from20201010to20201010").unwrap_err();
    assert!(matches!(err, LadderError::InvalidDuration { seconds: 0, .. }));
}

// =============================================================================
// Unix timestamp ranges
// =============================================================================

#[test]
fn unix_timestamp_expiration() {
    let start = utc(2021, 6, 1) + TimeDelta::seconds(12_345);
    let end = start + TimeDelta::hours(24);
    let id = format!("league_from{}to{}", start.timestamp(), end.timestamp());

    let rule = parse_rule(&id).unwrap().unwrap();
    assert_eq!(rule.qualifier, Qualifier::TimestampRange);
    assert_eq!(rule.expire_at, end + (end - start));
}

#[test]
fn unix_timestamps_reversed() {
    let start = utc(2021, 6, 1);
    let end = start + TimeDelta::hours(24);
    let id = format!("league_from{}to{}", end.timestamp(), start.timestamp());

    let err = expire_at(&id).unwrap_err();
    assert!(
        err.to_string().contains("has invalid duration -86400"),
        "Got: {err}"
    );
}

// =============================================================================
// Monthly
// =============================================================================

#[test]
fn monthly_expiration() {
    assert_eq!(
        expire_at("league_year2016month01").unwrap(),
        Some(utc(2016, 3, 1))
    );
}

#[test]
fn monthly_invalid_month() {
    let err = expire_at("league_year2016month99").unwrap_err();
    assert!(
        err.to_string()
            .ends_with("parsing time \"201699\": month out of range"),
        "Got: {err}"
    );
}

// =============================================================================
// Weekly
// =============================================================================

#[test]
fn weekly_expiration() {
    assert_eq!(
        expire_at("league_year2016week01").unwrap(),
        Some(utc(2016, 1, 18))
    );
}

// =============================================================================
// Quarterly
// =============================================================================

#[test]
fn quarter_expiration() {
    // Q2 2016 starts in April; doubled, it runs out at the start of October.
    assert_eq!(
        expire_at("league_year2016quarter02").unwrap(),
        Some(utc(2016, 10, 1))
    );
}

// =============================================================================
// Non-ASCII digits
// =============================================================================

#[test]
fn non_ascii_digit_ranges_never_expire() {
    // Devanagari digits are not qualifier digits.
    assert_eq!(expire_at("lb_from२०२०१०१०to२०२०१०११").unwrap(), None);
    assert_eq!(expire_at("lb_year२०१६").unwrap(), None);
}

#[test]
fn non_ascii_month_falls_through_to_year() {
    // Arabic-Indic month digits: the month form does not match, the year does.
    let rule = parse_rule("lb_year2016month١٢").unwrap().unwrap();
    assert_eq!(rule.qualifier, Qualifier::Year);
    assert_eq!(rule.expire_at, utc(2018, 1, 1));
}

// =============================================================================
// Referential transparency
// =============================================================================

#[test]
fn every_qualifier_is_time_independent() {
    let ids = [
        "a_from20201010to20201011",
        "b_from1602288000to1602374400",
        "c_year2016quarter03",
        "d_year2016month07",
        "e_year2016week20",
        "f_year2016",
    ];
    for id in ids {
        let first = expire_at(id).unwrap();
        assert!(first.is_some(), "{id} should expire");
        assert_eq!(expire_at(id).unwrap(), first, "{id} must be stable");
    }
}
