//! Cache age policy.
//!
//! Pure arithmetic on its inputs; never reads the system clock.

use jiff::tz::TimeZone;
use jiff::{Timestamp, ToSpan};

/// Days a snapshot stays valid after it was saved.
pub const MAX_CACHE_AGE_IN_DAYS: i64 = 7;

/// Whether a snapshot saved at `timestamp` is still valid at `now`.
///
/// Valid only while `now < timestamp + 7 days`. Returns `false` when the
/// expiry date cannot be computed.
pub fn is_valid(timestamp: Timestamp, now: Timestamp) -> bool {
    match timestamp
        .to_zoned(TimeZone::UTC)
        .checked_add(MAX_CACHE_AGE_IN_DAYS.days())
    {
        Ok(max_age) => now < max_age.timestamp(),
        Err(_) => false,
    }
}
