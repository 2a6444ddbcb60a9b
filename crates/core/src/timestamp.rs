//! Timestamp handling for entity `created_at` / `updated_at`.
//!
//! Timestamps are naive UTC instants kept at microsecond precision so that
//! the textual form round-trips exactly.

use chrono::{Duration, NaiveDateTime, SubsecRound as _, Utc};

use crate::error::ModelError;

/// Serialized form: `YYYY-MM-DDTHH:MM:SS.ffffff`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Accepts any fractional precision, or none.
const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Current instant truncated to microseconds.
#[must_use]
pub fn now_timestamp() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

/// Current instant, or one microsecond past `previous` if the clock has not
/// advanced beyond it.
#[must_use]
pub fn next_timestamp(previous: NaiveDateTime) -> NaiveDateTime {
    let now = now_timestamp();
    if now > previous { now } else { previous + Duration::microseconds(1) }
}

#[must_use]
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a timestamp in the serialized form.
///
/// # Errors
/// Returns `ModelError::InvalidTimestamp` if the string does not match.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, ModelError> {
    NaiveDateTime::parse_from_str(s, PARSE_FORMAT)
        .map(|ts| ts.trunc_subsecs(6))
        .map_err(|_| ModelError::InvalidTimestamp(s.to_owned()))
}
