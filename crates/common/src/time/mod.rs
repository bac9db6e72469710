//! Time utilities
//!
//! Conversions between `chrono` instants and epoch milliseconds, plus the
//! duration helpers:
//! - **[`duration`]**: duration parsing (`"1h 30m"`, `"250ms"`)
//! - **[`format`]**: human-readable duration formatting
//!
//! ```rust
//! use cornerstone_common::time::{format_duration, from_millis, parse_duration, to_millis};
//!
//! let instant = from_millis(1_700_000_000_000).unwrap();
//! assert_eq!(to_millis(&instant), 1_700_000_000_000);
//!
//! let d = parse_duration("2h 30m").unwrap();
//! assert_eq!(format_duration(d), "2h 30m 0s");
//! ```

pub mod duration;
pub mod format;

use std::time::Duration;

use chrono::{DateTime, NaiveTime, TimeZone, Utc};

pub use duration::{parse_duration, parse_duration_ms, DurationParseError};
pub use format::{format_duration, format_duration_compact, format_duration_ms};

use crate::error::{CommonError, CommonResult};

/// Current time as epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Epoch milliseconds of the given instant
pub fn to_millis(instant: &DateTime<Utc>) -> i64 {
    instant.timestamp_millis()
}

/// Instant for epoch milliseconds; fails when outside chrono's range
pub fn from_millis(millis: i64) -> CommonResult<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single().ok_or_else(|| {
        CommonError::invalid_argument_with_value(
            "millis",
            "outside the representable date range",
            millis.to_string(),
        )
    })
}

/// Milliseconds elapsed since `instant`, clamped at zero for future instants
pub fn millis_since(instant: &DateTime<Utc>) -> u64 {
    let elapsed = Utc::now().signed_duration_since(*instant).num_milliseconds();
    u64::try_from(elapsed).unwrap_or(0)
}

/// Elapsed time since `instant` as a std duration
pub fn elapsed_since(instant: &DateTime<Utc>) -> Duration {
    Duration::from_millis(millis_since(instant))
}

/// Whether more than `age` has passed since `instant`
pub fn is_older_than(instant: &DateTime<Utc>, age: Duration) -> bool {
    elapsed_since(instant) > age
}

/// Midnight (UTC) of the day containing `instant`
pub fn start_of_day(instant: &DateTime<Utc>) -> DateTime<Utc> {
    instant.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// The instant `age` before now; saturates at chrono's minimum
pub fn ago(age: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(age)
        .ok()
        .and_then(|delta| Utc::now().checked_sub_signed(delta))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    //! Unit tests for time.
    use chrono::Timelike;

    use super::*;

    #[test]
    fn test_millis_round_trip() {
        let instant = from_millis(1_234_567_890_123).unwrap();
        assert_eq!(to_millis(&instant), 1_234_567_890_123);
    }

    #[test]
    fn test_from_millis_out_of_range() {
        let err = from_millis(i64::MAX).unwrap_err();
        assert!(matches!(err, CommonError::InvalidArgument { .. }));
    }

    #[test]
    fn test_millis_since_future_is_zero() {
        let future = Utc::now() + chrono::Duration::hours(1);
        assert_eq!(millis_since(&future), 0);
    }

    #[test]
    fn test_is_older_than() {
        let past = Utc::now() - chrono::Duration::minutes(10);
        assert!(is_older_than(&past, Duration::from_secs(60)));
        assert!(!is_older_than(&past, Duration::from_secs(3600)));
    }

    #[test]
    fn test_start_of_day() {
        let instant = from_millis(1_700_000_123_456).unwrap();
        let midnight = start_of_day(&instant);
        assert_eq!(midnight.hour(), 0);
        assert_eq!(midnight.minute(), 0);
        assert_eq!(midnight.date_naive(), instant.date_naive());
    }

    #[test]
    fn test_ago() {
        let then = ago(Duration::from_secs(120));
        let elapsed = millis_since(&then);
        assert!((120_000..130_000).contains(&elapsed));
    }

    #[test]
    fn test_now_millis_is_recent() {
        let before = Utc::now().timestamp_millis();
        let now = now_millis();
        assert!(now >= before);
    }
}
