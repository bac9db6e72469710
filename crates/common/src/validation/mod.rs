//! Fail-fast argument checks
//!
//! Every check returns the (possibly unwrapped) value on success so it can
//! sit inline in a constructor, and a [`CommonError::InvalidArgument`] or
//! [`CommonError::IllegalState`] naming the offending argument otherwise.
//!
//! ```rust
//! use cornerstone_common::validation::{require_bounded, require_not_blank};
//!
//! fn connect(host: &str, port: u32) -> cornerstone_common::CommonResult<String> {
//!     let host = require_not_blank(host, "host")?;
//!     let port = require_bounded(port, 1, 65_535, "port")?;
//!     Ok(format!("{host}:{port}"))
//! }
//!
//! assert_eq!(connect("localhost", 8080).unwrap(), "localhost:8080");
//! assert!(connect("  ", 8080).is_err());
//! assert!(connect("localhost", 0).is_err());
//! ```

use std::fmt::Display;

use regex::Regex;

use crate::error::{CommonError, CommonResult};
use crate::objects::IsEmpty;

/// Rejects empty strings, collections and `None`
pub fn require_non_empty<'a, T: IsEmpty + ?Sized>(value: &'a T, name: &str) -> CommonResult<&'a T> {
    if value.is_empty_value() {
        return Err(CommonError::invalid_argument(name, "must not be empty"));
    }
    Ok(value)
}

/// Rejects empty and whitespace-only strings
pub fn require_not_blank<'a>(value: &'a str, name: &str) -> CommonResult<&'a str> {
    if value.trim().is_empty() {
        return Err(CommonError::invalid_argument(name, "must not be blank"));
    }
    Ok(value)
}

/// Unwraps `Some`, rejects `None`
pub fn require_some<T>(value: Option<T>, name: &str) -> CommonResult<T> {
    value.ok_or_else(|| CommonError::invalid_argument(name, "is required"))
}

/// Requires `min <= value <= max`
pub fn require_bounded<T>(value: T, min: T, max: T, name: &str) -> CommonResult<T>
where
    T: PartialOrd + Display,
{
    if value < min || value > max {
        return Err(CommonError::invalid_argument_with_value(
            name,
            format!("must be between {min} and {max}"),
            value.to_string(),
        ));
    }
    Ok(value)
}

/// Requires `value` to be strictly greater than the type's default (zero)
pub fn require_positive<T>(value: T, name: &str) -> CommonResult<T>
where
    T: PartialOrd + Default + Display,
{
    if value <= T::default() {
        return Err(CommonError::invalid_argument_with_value(
            name,
            "must be positive",
            value.to_string(),
        ));
    }
    Ok(value)
}

/// Requires the whole of `value` to match `pattern`
///
/// An invalid pattern is reported against `pattern` itself.
pub fn require_matches<'a>(value: &'a str, pattern: &str, name: &str) -> CommonResult<&'a str> {
    let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
        CommonError::invalid_argument_with_value("pattern", e.to_string(), pattern)
    })?;
    if !regex.is_match(value) {
        return Err(CommonError::invalid_argument_with_value(
            name,
            format!("must match '{pattern}'"),
            value,
        ));
    }
    Ok(value)
}

/// Requires a state precondition to hold
pub fn require_state<M: Into<String>>(condition: bool, message: M) -> CommonResult<()> {
    if !condition {
        return Err(CommonError::illegal_state(message));
    }
    Ok(())
}
