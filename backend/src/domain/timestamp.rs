//! RFC 3339 rendering shared by error envelopes and issue reports.
//!
//! Timestamps are UTC with millisecond precision and a `Z` suffix, for
//! example `2026-10-19T08:30:00.000Z`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// Render `at` as RFC 3339 with millisecond precision.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use user_registry::domain::timestamp::format_millis;
///
/// let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
/// assert_eq!(format_millis(&at), "2026-01-02T03:04:05.000Z");
/// ```
#[must_use]
pub fn format_millis(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `serialize_with` adapter for [`format_millis`].
///
/// # Errors
/// Propagates the serializer's error.
pub fn serialize_millis<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_millis(at))
}
