use chrono::{DateTime, FixedOffset, SecondsFormat};

use crate::error::TypeError;

/// A point in time together with the UTC offset it was written with.
///
/// Stored in configuration files as RFC 3339 text, e.g.
/// `2024-05-01T12:30:00Z` or `2024-05-01T14:30:00.250+02:00`.
pub type Timestamp = DateTime<FixedOffset>;

/// Parse RFC 3339 text into a [`Timestamp`].
pub fn parse_timestamp(input: &str) -> Result<Timestamp, TypeError> {
    DateTime::parse_from_rfc3339(input).map_err(|e| TypeError::InvalidTimestamp {
        input: input.to_owned(),
        reason: e.to_string(),
    })
}

/// Render a [`Timestamp`] as RFC 3339 text.
///
/// Sub-second digits are only emitted when present, and a zero offset is
/// written as `Z`.
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
