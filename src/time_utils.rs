// SPDX-License-Identifier: MIT

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The current time as an RFC3339 string with a `Z` suffix.
///
/// All persisted `createdAt`/`startedAt` fields use this format, so
/// lexicographic comparison matches chronological order.
pub fn now_rfc3339() -> String {
    format_utc_rfc3339(Utc::now())
}
