//! Compile-time stand-ins for runtime reflection
//!
//! - [`types`]: type names derived from [`std::any::type_name`]
//! - [`enums`]: name/alias/ordinal lookup for [`Enumerated`] enums
//! - [`metadata`]: field markers and descriptors for [`Described`] types
//!
//! Both lookup caches live for the whole process and are safe to use
//! from any thread.

pub mod enums;
pub mod metadata;
pub mod types;

pub use enums::Enumerated;
pub use metadata::{Described, FieldDescriptor, Marker, Provider, TypeDescriptor};
