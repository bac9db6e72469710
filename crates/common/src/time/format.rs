//! Human-readable duration formatting

use std::time::Duration;

const UNITS: [(u64, &str, &str); 4] =
    [(86_400, "d", "day"), (3_600, "h", "hour"), (60, "m", "minute"), (1, "s", "second")];

/// Splits whole seconds into (value, short, long) parts, largest unit first.
fn components(total_secs: u64) -> Vec<(u64, &'static str, &'static str)> {
    let mut remaining = total_secs;
    UNITS
        .iter()
        .map(|&(size, short, long)| {
            let value = remaining / size;
            remaining %= size;
            (value, short, long)
        })
        .collect()
}

fn plural(value: u128, word: &str) -> String {
    if value == 1 {
        format!("{value} {word}")
    } else {
        format!("{value} {word}s")
    }
}

/// Format a duration into a human-readable string
///
/// Leading zero units are dropped, inner ones are kept so columns line up.
/// Sub-second durations fall back to `ms` or `us`.
///
/// ```
/// use std::time::Duration;
///
/// use cornerstone_common::time::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(5)), "5s");
/// assert_eq!(format_duration(Duration::from_secs(3665)), "1h 1m 5s");
/// assert_eq!(format_duration(Duration::from_millis(20)), "20ms");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    if total_secs == 0 {
        return match duration.as_millis() {
            0 => format!("{}us", duration.as_micros()),
            millis => format!("{millis}ms"),
        };
    }

    components(total_secs)
        .into_iter()
        .skip_while(|(value, _, _)| *value == 0)
        .map(|(value, short, _)| format!("{value}{short}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a duration keeping the millisecond remainder (`"1s 500ms"`)
pub fn format_duration_ms(duration: Duration) -> String {
    let millis = duration.subsec_millis();
    if duration.as_secs() == 0 {
        return format!("{millis}ms");
    }

    let whole = format_duration(Duration::from_secs(duration.as_secs()));
    if millis == 0 {
        whole
    } else {
        format!("{whole} {millis}ms")
    }
}

/// Format a duration without separators (`"1h30m0s"`)
pub fn format_duration_compact(duration: Duration) -> String {
    format_duration(duration).replace(' ', "")
}

/// Format a duration with spelled-out units, skipping zero parts
///
/// ```
/// use std::time::Duration;
///
/// use cornerstone_common::time::format::format_duration_verbose;
///
/// assert_eq!(format_duration_verbose(Duration::from_secs(3605)), "1 hour 5 seconds");
/// ```
pub fn format_duration_verbose(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    if total_secs == 0 {
        return match duration.as_millis() {
            0 => plural(duration.as_micros(), "microsecond"),
            millis => plural(millis, "millisecond"),
        };
    }

    components(total_secs)
        .into_iter()
        .filter(|(value, _, _)| *value > 0)
        .map(|(value, _, long)| plural(u128::from(value), long))
        .collect::<Vec<_>>()
        .join(" ")
}
