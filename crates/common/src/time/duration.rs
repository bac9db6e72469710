//! Duration parsing from strings
//!
//! Accepts one or more `<number><unit>` groups separated by optional
//! whitespace, e.g. `"1h 30m"`, `"2m15s"`, `"1.5s"` or `"250ms"`.

use std::time::Duration;

use thiserror::Error;

/// Error type for duration parsing
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DurationParseError {
    #[error("Empty duration string")]
    EmptyString,

    #[error("Invalid number '{number}' in '{input}'")]
    InvalidNumber { input: String, number: String },

    #[error("Unknown unit '{unit}' in '{input}'")]
    UnknownUnit { input: String, unit: String },

    #[error("Missing unit after '{number}' in '{input}'")]
    MissingUnit { input: String, number: String },

    #[error("Expected number before unit '{unit}' in '{input}'")]
    MissingNumber { input: String, unit: String },

    #[error("Duration '{input}' is out of range")]
    OutOfRange { input: String },
}

impl DurationParseError {
    /// The text that failed to parse
    pub fn input(&self) -> &str {
        match self {
            Self::EmptyString => "",
            Self::InvalidNumber { input, .. }
            | Self::UnknownUnit { input, .. }
            | Self::MissingUnit { input, .. }
            | Self::MissingNumber { input, .. }
            | Self::OutOfRange { input } => input,
        }
    }
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

fn unit_nanos(unit: &str) -> Option<f64> {
    const SECOND: f64 = 1_000_000_000.0;
    match unit {
        "us" => Some(1_000.0),
        "ms" => Some(1_000_000.0),
        "s" | "sec" => Some(SECOND),
        "m" | "min" => Some(60.0 * SECOND),
        "h" => Some(3_600.0 * SECOND),
        "d" => Some(86_400.0 * SECOND),
        "w" => Some(604_800.0 * SECOND),
        _ => None,
    }
}

/// Parse a duration string into a Duration
///
/// Supported units: `us`, `ms`, `s`/`sec`, `m`/`min`, `h`, `d`, `w`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use cornerstone_common::time::parse_duration;
///
/// assert_eq!(parse_duration("5s").unwrap(), Duration::from_secs(5));
/// assert_eq!(parse_duration("1h 30m").unwrap(), Duration::from_secs(5400));
/// assert_eq!(parse_duration("1s 500ms").unwrap(), Duration::from_millis(1500));
/// ```
pub fn parse_duration(s: &str) -> Result<Duration, DurationParseError> {
    let input = s.trim();
    if input.is_empty() {
        return Err(DurationParseError::EmptyString);
    }

    let mut total = Duration::ZERO;
    let mut chars = input.chars().peekable();

    while chars.peek().is_some() {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let mut number = String::new();
        while let Some(c) = chars.next_if(|c| c.is_ascii_digit() || *c == '.') {
            number.push(c);
        }

        let mut unit = String::new();
        while let Some(c) = chars.next_if(|c| c.is_ascii_alphabetic()) {
            unit.push(c);
        }

        if number.is_empty() && unit.is_empty() {
            match chars.next() {
                // trailing whitespace was consumed above
                None => break,
                Some(other) => {
                    return Err(DurationParseError::UnknownUnit {
                        input: input.to_string(),
                        unit: other.to_string(),
                    })
                }
            }
        }
        if number.is_empty() {
            return Err(DurationParseError::MissingNumber { input: input.to_string(), unit });
        }
        if unit.is_empty() {
            return Err(DurationParseError::MissingUnit { input: input.to_string(), number });
        }

        let value: f64 = number.parse().map_err(|_| DurationParseError::InvalidNumber {
            input: input.to_string(),
            number: number.clone(),
        })?;
        let factor = unit_nanos(&unit.to_ascii_lowercase()).ok_or_else(|| {
            DurationParseError::UnknownUnit { input: input.to_string(), unit: unit.clone() }
        })?;

        let out_of_range = || DurationParseError::OutOfRange { input: input.to_string() };
        let nanos = (value * factor).round();
        if !nanos.is_finite() || nanos >= u128::MAX as f64 {
            return Err(out_of_range());
        }
        let nanos = nanos as u128;
        let secs = u64::try_from(nanos / NANOS_PER_SEC).map_err(|_| out_of_range())?;
        let part = Duration::new(secs, (nanos % NANOS_PER_SEC) as u32);
        total = total.checked_add(part).ok_or_else(out_of_range)?;
    }

    Ok(total)
}

/// Parse a duration string into whole milliseconds
///
/// Sub-millisecond remainders are truncated.
///
/// # Errors
/// As [`parse_duration`], plus [`DurationParseError::OutOfRange`] when the
/// result does not fit in `u64` milliseconds.
pub fn parse_duration_ms(s: &str) -> Result<u64, DurationParseError> {
    let duration = parse_duration(s)?;
    u64::try_from(duration.as_millis())
        .map_err(|_| DurationParseError::OutOfRange { input: s.trim().to_string() })
}
