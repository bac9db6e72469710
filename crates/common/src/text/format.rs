//! Number, size, percentage and date formatting
//!
//! The free functions use [`FormatSettings::default`]; build a
//! [`Formatter`] to use other date patterns or precision.
//!
//! ```rust
//! use cornerstone_common::text::format::{format_bytes, format_number, format_percent};
//!
//! assert_eq!(format_number(12345), "12.3k");
//! assert_eq!(format_bytes(1536), "1.5 KB");
//! assert_eq!(format_percent(0.123), "12.3%");
//! ```

use std::time::Duration;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CommonError, CommonResult};
use crate::time;

const NUMBER_SUFFIXES: [&str; 7] = ["", "k", "M", "G", "T", "P", "E"];
const BYTE_UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Patterns and precision used by [`Formatter`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatSettings {
    /// Decimal places for scaled numbers, sizes and percentages
    pub decimals: usize,
    /// `strftime` pattern for dates
    pub date_pattern: String,
    /// `strftime` pattern for times of day
    pub time_pattern: String,
    /// `strftime` pattern for full timestamps
    pub date_time_pattern: String,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            decimals: 1,
            date_pattern: "%Y-%m-%d".to_string(),
            time_pattern: "%H:%M:%S".to_string(),
            date_time_pattern: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}

impl FormatSettings {
    /// Rejects unparseable patterns and absurd precision
    pub fn validate(&self) -> CommonResult<()> {
        if self.decimals > 9 {
            return Err(CommonError::config_field("format.decimals", "must be at most 9"));
        }
        for (field, pattern) in [
            ("format.date_pattern", &self.date_pattern),
            ("format.time_pattern", &self.time_pattern),
            ("format.date_time_pattern", &self.date_time_pattern),
        ] {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(CommonError::config_field(
                    field,
                    format!("invalid strftime pattern '{pattern}'"),
                ));
            }
        }
        Ok(())
    }
}

/// Formats `value` with `decimals` places, dropping an all-zero fraction.
fn trim_decimals(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Scales `magnitude` by `base` until it drops below `base`, rounding to
/// `decimals` and carrying into the next unit when rounding reaches `base`.
fn scale(magnitude: f64, base: f64, units: usize, decimals: usize) -> (f64, usize) {
    let factor = 10_f64.powi(i32::try_from(decimals).unwrap_or(9));
    let mut scaled = magnitude;
    let mut unit = 0;
    while scaled >= base && unit < units - 1 {
        scaled /= base;
        unit += 1;
    }
    let mut rounded = (scaled * factor).round() / factor;
    if rounded >= base && unit < units - 1 {
        rounded = (rounded / base * factor).round() / factor;
        unit += 1;
    }
    (rounded, unit)
}

/// Formatter bound to a validated set of [`FormatSettings`]
#[derive(Debug, Clone)]
pub struct Formatter {
    settings: FormatSettings,
}

impl Default for Formatter {
    fn default() -> Self {
        Self { settings: FormatSettings::default() }
    }
}

impl Formatter {
    /// Create a formatter, validating the settings first
    pub fn new(settings: FormatSettings) -> CommonResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Settings in use
    pub fn settings(&self) -> &FormatSettings {
        &self.settings
    }

    /// Compact count: `999`, `1.5k`, `12.3k`, `4M`
    pub fn format_number(&self, value: i64) -> String {
        let magnitude = value.unsigned_abs();
        if magnitude < 1_000 {
            return value.to_string();
        }
        let (scaled, unit) =
            scale(magnitude as f64, 1_000.0, NUMBER_SUFFIXES.len(), self.settings.decimals);
        let sign = if value < 0 { "-" } else { "" };
        format!("{sign}{}{}", trim_decimals(scaled, self.settings.decimals), NUMBER_SUFFIXES[unit])
    }

    /// Size in binary units: `512 B`, `1.5 KB`, `3 MB`
    pub fn format_bytes(&self, bytes: u64) -> String {
        if bytes < 1_024 {
            return format!("{bytes} B");
        }
        let (scaled, unit) = scale(bytes as f64, 1_024.0, BYTE_UNITS.len(), self.settings.decimals);
        format!("{} {}", trim_decimals(scaled, self.settings.decimals), BYTE_UNITS[unit])
    }

    /// Ratio as a percentage: `0.123` -> `12.3%`
    pub fn format_percent(&self, ratio: f64) -> String {
        format!("{}%", trim_decimals(ratio * 100.0, self.settings.decimals))
    }

    /// Date part of `instant`
    pub fn format_date(&self, instant: &DateTime<Utc>) -> String {
        instant.format(&self.settings.date_pattern).to_string()
    }

    /// Time-of-day part of `instant`
    pub fn format_time(&self, instant: &DateTime<Utc>) -> String {
        instant.format(&self.settings.time_pattern).to_string()
    }

    /// Full timestamp
    pub fn format_date_time(&self, instant: &DateTime<Utc>) -> String {
        instant.format(&self.settings.date_time_pattern).to_string()
    }

    /// Parses a timestamp written with the date-time pattern (read as UTC)
    pub fn parse_date_time(&self, text: &str) -> CommonResult<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(text.trim(), &self.settings.date_time_pattern)
            .map(|naive| naive.and_utc())
            .map_err(|e| CommonError::parse("date time", text, e.to_string()))
    }
}

/// Compact count with default settings
pub fn format_number(value: i64) -> String {
    Formatter::default().format_number(value)
}

/// Fixed-precision decimal
pub fn format_number_f64(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Size in binary units with default settings
pub fn format_bytes(bytes: u64) -> String {
    Formatter::default().format_bytes(bytes)
}

/// Ratio as a percentage with default settings
pub fn format_percent(ratio: f64) -> String {
    Formatter::default().format_percent(ratio)
}

/// `YYYY-MM-DD`
pub fn format_date(instant: &DateTime<Utc>) -> String {
    Formatter::default().format_date(instant)
}

/// `HH:MM:SS`
pub fn format_time(instant: &DateTime<Utc>) -> String {
    Formatter::default().format_time(instant)
}

/// `YYYY-MM-DD HH:MM:SS`
pub fn format_date_time(instant: &DateTime<Utc>) -> String {
    Formatter::default().format_date_time(instant)
}

/// Human-readable duration (`"1h 1m 5s"`)
pub fn format_duration(duration: Duration) -> String {
    time::format_duration(duration)
}

/// Time elapsed since `since` (`"3m 12s"`); future instants read as `"0us"`
pub fn format_elapsed(since: &DateTime<Utc>) -> String {
    time::format_duration(time::elapsed_since(since))
}
