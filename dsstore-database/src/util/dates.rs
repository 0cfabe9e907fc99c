/*!
 Contains date parsing functions for Mac epoch timestamps.

 Several `.DS_Store` values count time from the classic Mac OS epoch, `1904-01-01 00:00:00 UTC`,
 in units of 1/65536 of a second.
*/

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Number of timestamp ticks in one second
pub const TICKS_PER_SECOND: i64 = 65536;

/// The classic Mac OS epoch
pub fn mac_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1904, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Convert a count of 1/65536 second ticks since the Mac epoch into a UTC date.
///
/// Fractions of a second are truncated toward zero. Returns `None` if the result does not fit in a date.
pub fn from_ticks(ticks: i64) -> Option<DateTime<Utc>> {
    let seconds = ticks / TICKS_PER_SECOND;
    let date = mac_epoch().checked_add_signed(Duration::try_seconds(seconds)?)?;
    Some(Utc.from_utc_datetime(&date))
}

/// Format a date like `January 2, 1904 at 3:04 PM`
pub fn format(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y at %-I:%M %p").to_string()
}
