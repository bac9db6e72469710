//! Foundational helpers shared by Cornerstone crates.
//!
//! # Modules
//!
//! - [`text`], [`collections`], [`objects`], [`time`], [`validation`]:
//!   small free functions over std types
//! - [`reflect`]: type names, enum lookup by name or alias, and per-type
//!   field metadata declared with [`impl_described!`]
//! - [`identity`]: identifier-carrying traits and value types
//! - [`version`]: `major.minor.patch[-pre][+build]` versions with snapshot
//!   support
//! - [`crypto`]: content hashing, plus AES-256-GCM behind the `crypto`
//!   feature (default)
//! - [`sync`]: countdown latch with a timed wait helper
//! - [`config`]: TOML and environment configuration of the above
//!
//! # Logging
//!
//! Cache builds, latch timeouts and crypto failures are reported through
//! `tracing`. The crate never installs a subscriber.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Macros first so every later module can use them
#[macro_use]
pub mod utils;

pub mod collections;
pub mod config;
pub mod crypto;
pub mod error;
pub mod identity;
pub mod objects;
pub mod reflect;
pub mod sync;
pub mod text;
pub mod time;
pub mod validation;
pub mod version;

// Re-export commonly used types and traits for convenience
// ------------------------
pub use config::CommonConfig;
#[cfg(feature = "crypto")]
pub use crypto::{EncryptionConfig, Encryptor};
pub use crypto::{hash_of, Hashing};
pub use error::{CommonError, CommonResult, ErrorClassification, ErrorContext, ErrorSeverity};
pub use identity::{
    Identifier, Identity, IdentityAware, NamedIdentity, NamedIdentityAware, TaggedIdentity,
    TaggedIdentityAware,
};
pub use reflect::{Described, Enumerated, FieldDescriptor, Marker, Provider, TypeDescriptor};
pub use sync::{await_latch, CountDownLatch};
pub use utils::serde::duration_millis;
pub use version::Version;
