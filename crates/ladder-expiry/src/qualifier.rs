//! Qualifier grammars recognised inside leaderboard IDs.
//!
//! Each [`Qualifier`] is an independent matcher. Matching yields:
//! - `None` when the ID does not contain the qualifier's shape at all,
//! - `Some(Err(_))` when the shape is present but a component is invalid,
//! - `Some(Ok(rule))` otherwise.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc, Weekday};
use ladder_types::{LadderError, Result};
use regex::{Captures, Regex};

use crate::{ExpirationRule, Period};

// Digits are ASCII only. Every pattern must be followed by a non-digit or
// the end of the ID so that `year20161` is not read as `year2016`.
static DAY_RANGE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"from([0-9]{8})to([0-9]{8})(?:[^0-9]|$)"));
static TIMESTAMP_RANGE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"from([0-9]+)to([0-9]+)(?:[^0-9]|$)"));
static QUARTER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"year([0-9]{4})quarter([0-9]{2})(?:[^0-9]|$)"));
static MONTH: LazyLock<Regex> =
    LazyLock::new(|| compile(r"year([0-9]{4})month([0-9]{2})(?:[^0-9]|$)"));
static WEEK: LazyLock<Regex> =
    LazyLock::new(|| compile(r"year([0-9]{4})week([0-9]{2})(?:[^0-9]|$)"));
static YEAR: LazyLock<Regex> = LazyLock::new(|| compile(r"year([0-9]{4})(?:[^0-9]|$)"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("qualifier patterns are static and valid")
}

/// The kinds of temporal qualifier a leaderboard ID may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualifier {
    /// `from<YYYYMMDD>to<YYYYMMDD>`
    DayRange,
    /// `from<unix seconds>to<unix seconds>`
    TimestampRange,
    /// `year<YYYY>quarter<QQ>`
    Quarter,
    /// `year<YYYY>month<MM>`
    Month,
    /// `year<YYYY>week<WW>` (ISO-8601 weeks)
    Week,
    /// `year<YYYY>`
    Year,
}

impl Qualifier {
    /// All qualifiers in matching priority order. The first structural
    /// match wins.
    pub const PRIORITY: [Self; 6] = [
        Self::DayRange,
        Self::TimestampRange,
        Self::Quarter,
        Self::Month,
        Self::Week,
        Self::Year,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            Self::DayRange => &*DAY_RANGE,
            Self::TimestampRange => &*TIMESTAMP_RANGE,
            Self::Quarter => &*QUARTER,
            Self::Month => &*MONTH,
            Self::Week => &*WEEK,
            Self::Year => &*YEAR,
        }
    }

    /// Try this qualifier against a leaderboard ID.
    #[must_use]
    pub fn try_match(self, leaderboard_id: &str) -> Option<Result<ExpirationRule>> {
        let caps = self.pattern().captures(leaderboard_id)?;
        Some(self.build(leaderboard_id, &caps))
    }

    fn build(self, leaderboard_id: &str, caps: &Captures<'_>) -> Result<ExpirationRule> {
        let (start, period) = match self {
            Self::DayRange => {
                let start = parse_day(&caps[1])?;
                let end = parse_day(&caps[2])?;
                (start, Period::Exact(end - start))
            }
            Self::TimestampRange => {
                let start = parse_unix(&caps[1])?;
                let end = parse_unix(&caps[2])?;
                (start, Period::Exact(end - start))
            }
            Self::Quarter => {
                let year = parse_year(&caps[1])?;
                let quarter = parse_two_digits(&caps[2]);
                if !(1..=4).contains(&quarter) {
                    return Err(date_error(
                        format!("{}Q{}", &caps[1], &caps[2]),
                        "quarter out of range",
                    ));
                }
                let start = first_of_month(year, 3 * (quarter - 1) + 1, &caps[1])?;
                (start, Period::Months(3))
            }
            Self::Month => {
                let year = parse_year(&caps[1])?;
                let month = parse_two_digits(&caps[2]);
                let start = first_of_month(year, month, &format!("{}{}", &caps[1], &caps[2]))?;
                (start, Period::Months(1))
            }
            Self::Week => {
                let year = parse_year(&caps[1])?;
                let week = parse_two_digits(&caps[2]);
                let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon).ok_or_else(
                    || date_error(format!("{}W{}", &caps[1], &caps[2]), "week out of range"),
                )?;
                (midnight(monday), Period::Exact(TimeDelta::days(7)))
            }
            Self::Year => {
                let year = parse_year(&caps[1])?;
                (first_of_month(year, 1, &caps[1])?, Period::Months(12))
            }
        };
        ExpirationRule::new(leaderboard_id, self, start, period)
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DayRange => write!(f, "DAY_RANGE"),
            Self::TimestampRange => write!(f, "TIMESTAMP_RANGE"),
            Self::Quarter => write!(f, "QUARTER"),
            Self::Month => write!(f, "MONTH"),
            Self::Week => write!(f, "WEEK"),
            Self::Year => write!(f, "YEAR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Component parsing
// ---------------------------------------------------------------------------

fn date_error(value: impl Into<String>, reason: &str) -> LadderError {
    LadderError::InvalidDateComponent {
        value: value.into(),
        reason: reason.to_string(),
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Two ASCII digits, already guaranteed by the pattern.
fn parse_two_digits(raw: &str) -> u32 {
    raw.bytes().fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

fn parse_year(raw: &str) -> Result<i32> {
    raw.parse::<i32>()
        .map_err(|e| date_error(raw, &e.to_string()))
}

fn first_of_month(year: i32, month: u32, raw: &str) -> Result<DateTime<Utc>> {
    if !(1..=12).contains(&month) {
        return Err(date_error(raw, "month out of range"));
    }
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(midnight)
        .ok_or_else(|| date_error(raw, "year out of range"))
}

/// `YYYYMMDD` at midnight UTC.
fn parse_day(raw: &str) -> Result<DateTime<Utc>> {
    let year = parse_year(&raw[..4])?;
    let month = parse_two_digits(&raw[4..6]);
    let day = parse_two_digits(&raw[6..8]);
    if !(1..=12).contains(&month) {
        return Err(date_error(raw, "month out of range"));
    }
    NaiveDate::from_ymd_opt(year, month, day)
        .map(midnight)
        .ok_or_else(|| date_error(raw, "day out of range"))
}

/// Whole seconds since the Unix epoch.
fn parse_unix(raw: &str) -> Result<DateTime<Utc>> {
    let secs = raw.parse::<i64>().map_err(|e| LadderError::InvalidNumber {
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    DateTime::from_timestamp(secs, 0).ok_or_else(|| LadderError::InvalidNumber {
        value: raw.to_string(),
        reason: "timestamp out of range".to_string(),
    })
}
