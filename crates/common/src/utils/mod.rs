//! Helper macros and serde adapters
//!
//! - **[`macros`]**: `impl_enumerated!`, `impl_described!`,
//!   `impl_status_conversions!`
//! - **[`serde`]**: serde `with` modules for configuration types

#[macro_use]
pub mod macros;
pub mod serde;

pub use self::serde::duration_millis;
