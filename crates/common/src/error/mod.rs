//! Common error type shared by every helper in the crate
//!
//! The helpers in this crate follow a single, pass-through error policy:
//!
//! 1. **Invalid arguments fail fast.** Argument checks in
//!    [`crate::validation`] return [`CommonError::InvalidArgument`] (or
//!    [`CommonError::IllegalState`]) before any work happens.
//!
//! 2. **Foreign failures are wrapped, not recovered.** Errors raised by the
//!    underlying libraries (I/O, TOML/JSON, cipher, number parsing) are
//!    converted into a [`CommonError`] variant and propagated with `?`.
//!    [`ErrorContext`] does the wrapping for arbitrary `std::error::Error`
//!    types that have no dedicated conversion.
//!
//! There is no retry or partial-failure recovery anywhere in the crate.
//! [`ErrorClassification`] still reports whether a caller *could* retry,
//! which only holds for I/O failures.
//!
//! ## Examples
//!
//! ```rust
//! use cornerstone_common::error::{CommonError, CommonResult, ErrorContext};
//!
//! fn parse_port(raw: &str) -> CommonResult<u16> {
//!     raw.trim().parse::<u16>().context("parse port")
//! }
//!
//! assert_eq!(parse_port(" 8080 ").unwrap(), 8080);
//! assert!(matches!(parse_port("http"), Err(CommonError::Internal { .. })));
//! ```

use std::fmt;

/// Standard result type using CommonError
pub type CommonResult<T> = Result<T, CommonError>;

/// Error variants produced by the helpers in this crate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    /// An argument failed a precondition check
    InvalidArgument { name: String, message: String, value: Option<String> },

    /// An operation was invoked while the receiver was in the wrong state
    IllegalState { message: String },

    /// A lookup (enum name, ordinal, field, file) found nothing
    NotFound { resource_type: String, identifier: Option<String> },

    /// Text could not be parsed into the requested value
    Parse { kind: String, input: String, message: String },

    /// Encryption, decryption or key derivation failed
    Crypto { operation: String, message: String },

    /// File or stream I/O failed
    Io { operation: Option<String>, message: String },

    /// Serialization or deserialization errors
    Serialization { format: Option<String>, message: String },

    /// Configuration-related errors
    Config { field: Option<String>, message: String },

    /// Wrapped foreign error or invariant violation
    Internal { message: String, context: Option<String> },
}

impl fmt::Display for CommonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { name, message, value } => {
                if let Some(value) = value {
                    write!(f, "Invalid argument '{}' (value: '{}'): {}", name, value, message)
                } else {
                    write!(f, "Invalid argument '{}': {}", name, message)
                }
            }
            Self::IllegalState { message } => write!(f, "Illegal state: {}", message),
            Self::NotFound { resource_type, identifier } => {
                if let Some(id) = identifier {
                    write!(f, "{} not found: '{}'", resource_type, id)
                } else {
                    write!(f, "{} not found", resource_type)
                }
            }
            Self::Parse { kind, input, message } => {
                write!(f, "Cannot parse '{}' as {}: {}", input, kind, message)
            }
            Self::Crypto { operation, message } => {
                write!(f, "Crypto error during '{}': {}", operation, message)
            }
            Self::Io { operation, message } => {
                if let Some(op) = operation {
                    write!(f, "I/O error during '{}': {}", op, message)
                } else {
                    write!(f, "I/O error: {}", message)
                }
            }
            Self::Serialization { format, message } => {
                if let Some(format) = format {
                    write!(f, "Serialization error ({}): {}", format, message)
                } else {
                    write!(f, "Serialization error: {}", message)
                }
            }
            Self::Config { field, message } => {
                if let Some(field) = field {
                    write!(f, "Configuration error in field '{}': {}", field, message)
                } else {
                    write!(f, "Configuration error: {}", message)
                }
            }
            Self::Internal { message, context } => {
                if let Some(ctx) = context {
                    write!(f, "Internal error in '{}': {}", ctx, message)
                } else {
                    write!(f, "Internal error: {}", message)
                }
            }
        }
    }
}

impl std::error::Error for CommonError {}

impl ErrorClassification for CommonError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidArgument { .. } => ErrorSeverity::Error,
            Self::IllegalState { .. } => ErrorSeverity::Error,
            Self::NotFound { .. } => ErrorSeverity::Info,
            Self::Parse { .. } => ErrorSeverity::Error,
            Self::Crypto { .. } => ErrorSeverity::Critical,
            Self::Io { .. } => ErrorSeverity::Error,
            Self::Serialization { .. } => ErrorSeverity::Error,
            Self::Config { .. } => ErrorSeverity::Error,
            Self::Internal { .. } => ErrorSeverity::Critical,
        }
    }

    fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }
}

impl CommonError {
    /// Create an invalid argument error
    pub fn invalid_argument<N: Into<String>, M: Into<String>>(name: N, message: M) -> Self {
        Self::InvalidArgument { name: name.into(), message: message.into(), value: None }
    }

    /// Create an invalid argument error carrying the rejected value
    pub fn invalid_argument_with_value<N: Into<String>, M: Into<String>, V: Into<String>>(
        name: N,
        message: M,
        value: V,
    ) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
            value: Some(value.into()),
        }
    }

    /// Create an illegal state error
    pub fn illegal_state<S: Into<String>>(message: S) -> Self {
        Self::IllegalState { message: message.into() }
    }

    /// Create a not found error
    pub fn not_found<T: Into<String>>(resource_type: T) -> Self {
        Self::NotFound { resource_type: resource_type.into(), identifier: None }
    }

    /// Create a not found error with the identifier that missed
    pub fn not_found_with_id<T: Into<String>, I: Into<String>>(
        resource_type: T,
        identifier: I,
    ) -> Self {
        Self::NotFound { resource_type: resource_type.into(), identifier: Some(identifier.into()) }
    }

    /// Create a parse error
    pub fn parse<K: Into<String>, I: Into<String>, M: Into<String>>(
        kind: K,
        input: I,
        message: M,
    ) -> Self {
        Self::Parse { kind: kind.into(), input: input.into(), message: message.into() }
    }

    /// Create a crypto error
    pub fn crypto<O: Into<String>, M: Into<String>>(operation: O, message: M) -> Self {
        Self::Crypto { operation: operation.into(), message: message.into() }
    }

    /// Create a simple I/O error
    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io { operation: None, message: message.into() }
    }

    /// Create an I/O error for a specific operation
    pub fn io_op<O: Into<String>, M: Into<String>>(operation: O, message: M) -> Self {
        Self::Io { operation: Some(operation.into()), message: message.into() }
    }

    /// Create a serialization error with format information
    pub fn serialization_format<F: Into<String>, M: Into<String>>(format: F, message: M) -> Self {
        Self::Serialization { format: Some(format.into()), message: message.into() }
    }

    /// Create a configuration error for a specific field
    pub fn config_field<F: Into<String>, S: Into<String>>(field: F, message: S) -> Self {
        Self::Config { field: Some(field.into()), message: message.into() }
    }

    /// Create an internal error with context
    pub fn internal_with_context<S: Into<String>, C: Into<String>>(message: S, context: C) -> Self {
        Self::Internal { message: message.into(), context: Some(context.into()) }
    }

    /// Convert error to structured logging fields
    ///
    /// ```rust,ignore
    /// let err = CommonError::not_found_with_id("Color", "purple");
    /// for (key, value) in err.as_tracing_fields() {
    ///     tracing::debug!(key, value = %value, "lookup failed");
    /// }
    /// ```
    pub fn as_tracing_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("error_type", self.error_type_name().to_string())];

        match self {
            Self::InvalidArgument { name, message, value } => {
                fields.push(("name", name.clone()));
                fields.push(("message", message.clone()));
                if let Some(value) = value {
                    fields.push(("value", value.clone()));
                }
            }
            Self::IllegalState { message } => fields.push(("message", message.clone())),
            Self::NotFound { resource_type, identifier } => {
                fields.push(("resource_type", resource_type.clone()));
                if let Some(id) = identifier {
                    fields.push(("identifier", id.clone()));
                }
            }
            Self::Parse { kind, input, message } => {
                fields.push(("kind", kind.clone()));
                fields.push(("input", input.clone()));
                fields.push(("message", message.clone()));
            }
            Self::Crypto { operation, message } => {
                fields.push(("operation", operation.clone()));
                fields.push(("message", message.clone()));
            }
            Self::Io { operation, message } => {
                fields.push(("message", message.clone()));
                if let Some(op) = operation {
                    fields.push(("operation", op.clone()));
                }
            }
            Self::Serialization { format, message } => {
                fields.push(("message", message.clone()));
                if let Some(format) = format {
                    fields.push(("format", format.clone()));
                }
            }
            Self::Config { field, message } => {
                fields.push(("message", message.clone()));
                if let Some(field) = field {
                    fields.push(("field", field.clone()));
                }
            }
            Self::Internal { message, context } => {
                fields.push(("message", message.clone()));
                if let Some(ctx) = context {
                    fields.push(("context", ctx.clone()));
                }
            }
        }

        fields
    }

    fn error_type_name(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::IllegalState { .. } => "illegal_state",
            Self::NotFound { .. } => "not_found",
            Self::Parse { .. } => "parse",
            Self::Crypto { .. } => "crypto",
            Self::Io { .. } => "io",
            Self::Serialization { .. } => "serialization",
            Self::Config { .. } => "config",
            Self::Internal { .. } => "internal",
        }
    }
}

/// Error classification trait for consistent handling across modules
pub trait ErrorClassification {
    /// Check if this error is retryable
    ///
    /// Only transient conditions qualify, which here means I/O failures. An
    /// invalid argument stays invalid no matter how often it is retried.
    fn is_retryable(&self) -> bool;

    /// Get the error severity level
    fn severity(&self) -> ErrorSeverity;

    /// Check if this is a critical error requiring immediate attention
    fn is_critical(&self) -> bool;
}

/// Error severity levels for monitoring and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Warning, should be monitored but not critical
    Warning,
    /// Error, requires attention and action
    Error,
    /// Critical, immediate action required
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

// Standard conversions from common error types
impl From<serde_json::Error> for CommonError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization_format("JSON", err.to_string())
    }
}

impl From<std::io::Error> for CommonError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<toml::de::Error> for CommonError {
    fn from(err: toml::de::Error) -> Self {
        Self::serialization_format("TOML", err.to_string())
    }
}

impl From<toml::ser::Error> for CommonError {
    fn from(err: toml::ser::Error) -> Self {
        Self::serialization_format("TOML", err.to_string())
    }
}

impl From<crate::time::DurationParseError> for CommonError {
    fn from(err: crate::time::DurationParseError) -> Self {
        Self::parse("duration", err.input().to_string(), err.to_string())
    }
}

/// Wraps foreign errors into [`CommonError`] with an operation label
///
/// Implemented for every `Result<T, E>` whose error type is a
/// `std::error::Error`, so any library call can be lifted into the crate's
/// error type with `.context("what was being done")?`.
pub trait ErrorContext<T> {
    /// Wrap the error as [`CommonError::Internal`] with the given context
    fn context<C: Into<String>>(self, context: C) -> CommonResult<T>;

    /// Wrap the error lazily; the closure runs only on failure
    fn with_context<C: Into<String>, F: FnOnce() -> C>(self, f: F) -> CommonResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error,
{
    fn context<C: Into<String>>(self, context: C) -> CommonResult<T> {
        self.map_err(|e| CommonError::internal_with_context(e.to_string(), context))
    }

    fn with_context<C: Into<String>, F: FnOnce() -> C>(self, f: F) -> CommonResult<T> {
        self.map_err(|e| CommonError::internal_with_context(e.to_string(), f()))
    }
}
