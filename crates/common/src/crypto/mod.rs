//! Encryption and content hashing
//!
//! [`hashing`] is always available; [`encryption`] needs the `crypto`
//! feature (on by default).

#[cfg(feature = "crypto")]
pub mod encryption;
pub mod hashing;

#[cfg(feature = "crypto")]
pub use encryption::{EncryptionConfig, Encryptor};
pub use hashing::{hash_of, Hashing};
