//! Incremental content hashing
//!
//! [`Hashing`] feeds typed parts into SHA-256. Every part is written with
//! its length in front, so `("ab", "c")` and `("a", "bc")` hash
//! differently.
//!
//! ```rust
//! use cornerstone_common::crypto::hashing::{hash_of, Hashing};
//!
//! let digest = Hashing::new().update_str("user").update_u64(42).finish();
//! assert_eq!(digest.len(), 64);
//! assert_ne!(hash_of(["ab", "c"]), hash_of(["a", "bc"]));
//! ```

use sha2::{Digest, Sha256};

use crate::reflect::types::type_name;

/// SHA-256 builder over length-framed parts
#[derive(Debug, Clone, Default)]
pub struct Hashing {
    hasher: Sha256,
    parts: usize,
}

impl Hashing {
    pub fn new() -> Self {
        Self::default()
    }

    fn frame(mut self, tag: u8, bytes: &[u8]) -> Self {
        self.hasher.update([tag]);
        self.hasher.update((bytes.len() as u64).to_le_bytes());
        self.hasher.update(bytes);
        self.parts += 1;
        self
    }

    /// Raw bytes
    pub fn update(self, bytes: impl AsRef<[u8]>) -> Self {
        self.frame(b'b', bytes.as_ref())
    }

    pub fn update_str(self, value: &str) -> Self {
        self.frame(b's', value.as_bytes())
    }

    pub fn update_u64(self, value: u64) -> Self {
        self.frame(b'u', &value.to_le_bytes())
    }

    pub fn update_i64(self, value: i64) -> Self {
        self.frame(b'i', &value.to_le_bytes())
    }

    pub fn update_bool(self, value: bool) -> Self {
        self.frame(b'?', &[u8::from(value)])
    }

    /// Optional part; `None` hashes differently from every `Some`
    pub fn update_opt_str(self, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.update_str(value),
            None => self.frame(b'n', &[]),
        }
    }

    /// Fully qualified name of `T`
    pub fn update_type<T: ?Sized>(self) -> Self {
        self.frame(b't', type_name::<T>().as_bytes())
    }

    /// Number of parts fed so far
    pub fn parts(&self) -> usize {
        self.parts
    }

    /// Lower-case hex SHA-256
    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }

    /// First eight digest bytes as a big-endian integer
    pub fn finish_u64(self) -> u64 {
        let digest = self.hasher.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        u64::from_be_bytes(head)
    }
}

/// Hex SHA-256 of the parts, each framed as raw bytes
pub fn hash_of<I, P>(parts: I) -> String
where
    I: IntoIterator<Item = P>,
    P: AsRef<[u8]>,
{
    parts.into_iter().fold(Hashing::new(), Hashing::update).finish()
}
