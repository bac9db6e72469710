//! Text helpers
//!
//! - **[`strings`]**: casing, identifier conversion, trimming and joining
//! - **[`format`]**: compact numbers, byte sizes, percentages and dates

pub mod format;
pub mod strings;

pub use format::{format_bytes, format_number, format_percent, FormatSettings, Formatter};
pub use strings::{abbreviate, beautify, capitalize, is_blank, join_non_empty, to_identifier};
