//! Symmetric encryption with an explicit key and seed
//!
//! [`Encryptor`] derives a 256-bit key from an [`EncryptionConfig`] with
//! Argon2 (the seed is the salt) and encrypts with AES-256-GCM. Nothing is
//! process-wide: two encryptors built from different configs never affect
//! each other.
//!
//! Payload layout: `nonce (12 bytes) || ciphertext || tag (16 bytes)`.
//! The string forms are the same bytes in standard base64.
//!
//! ```rust
//! use cornerstone_common::crypto::{EncryptionConfig, Encryptor};
//!
//! let config = EncryptionConfig::new("correct horse battery staple", "per-app-seed");
//! let encryptor = Encryptor::new(&config)?;
//!
//! let token = encryptor.encrypt_to_string(b"sensitive data")?;
//! assert_eq!(encryptor.decrypt_from_string(&token)?, b"sensitive data");
//! # Ok::<(), cornerstone_common::error::CommonError>(())
//! ```

use std::fmt;

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::Argon2;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{CommonError, CommonResult};
use crate::text::strings::is_blank;

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Minimum seed length accepted by Argon2 as a salt
pub const MIN_SEED_LEN: usize = 8;

/// Key material for an [`Encryptor`]
///
/// Both values are wiped from memory when the config is dropped.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionConfig {
    /// Secret the encryption key is derived from
    #[serde(default)]
    pub key: String,
    /// Salt for the derivation, at least [`MIN_SEED_LEN`] bytes
    #[serde(default)]
    pub seed: String,
}

impl fmt::Debug for EncryptionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionConfig")
            .field("key", &"[REDACTED]")
            .field("seed", &"[REDACTED]")
            .finish()
    }
}

impl EncryptionConfig {
    pub fn new(key: impl Into<String>, seed: impl Into<String>) -> Self {
        Self { key: key.into(), seed: seed.into() }
    }

    /// Random key and seed, hex encoded
    pub fn generate() -> Self {
        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        let mut seed = [0u8; 16];
        OsRng.fill_bytes(&mut *key);
        OsRng.fill_bytes(&mut seed);
        Self { key: hex::encode(&*key), seed: hex::encode(seed) }
    }

    /// Rejects a blank key or a seed shorter than [`MIN_SEED_LEN`] bytes
    pub fn validate(&self) -> CommonResult<()> {
        if is_blank(&self.key) {
            return Err(CommonError::config_field("encryption.key", "must not be blank"));
        }
        if self.seed.len() < MIN_SEED_LEN {
            return Err(CommonError::config_field(
                "encryption.seed",
                format!("must be at least {MIN_SEED_LEN} bytes"),
            ));
        }
        Ok(())
    }
}

/// AES-256-GCM encryptor bound to one derived key
pub struct Encryptor {
    cipher: Aes256Gcm,
    key: Zeroizing<[u8; KEY_LEN]>,
}

impl fmt::Debug for Encryptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encryptor").field("fingerprint", &self.fingerprint()).finish()
    }
}

impl Encryptor {
    /// Derives the key from `config`
    ///
    /// # Errors
    ///
    /// [`CommonError::Config`] when the config is invalid,
    /// [`CommonError::Crypto`] when key derivation fails.
    pub fn new(config: &EncryptionConfig) -> CommonResult<Self> {
        config.validate()?;

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        Argon2::default()
            .hash_password_into(config.key.as_bytes(), config.seed.as_bytes(), &mut *key)
            .map_err(|e| CommonError::crypto("derive_key", e.to_string()))?;

        Self::from_key(key)
    }

    /// Uses a raw 256-bit key as is
    pub fn from_key_bytes(bytes: &[u8]) -> CommonResult<Self> {
        let key: [u8; KEY_LEN] = bytes.try_into().map_err(|_| {
            CommonError::invalid_argument("key", format!("must be exactly {KEY_LEN} bytes"))
        })?;
        Self::from_key(Zeroizing::new(key))
    }

    fn from_key(key: Zeroizing<[u8; KEY_LEN]>) -> CommonResult<Self> {
        let cipher = Aes256Gcm::new_from_slice(&*key)
            .map_err(|e| CommonError::crypto("init_cipher", e.to_string()))?;
        Ok(Self { cipher, key })
    }

    /// Encrypts `plaintext` under a fresh random nonce
    pub fn encrypt(&self, plaintext: &[u8]) -> CommonResult<Vec<u8>> {
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);

        let ciphertext = self.cipher.encrypt(&Nonce::from(nonce), plaintext).map_err(|e| {
            warn!(error = %e, "Encryption failed");
            CommonError::crypto("encrypt", e.to_string())
        })?;

        let mut payload = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        payload.extend_from_slice(&nonce);
        payload.extend_from_slice(&ciphertext);
        Ok(payload)
    }

    /// Decrypts a payload produced by [`encrypt`](Self::encrypt)
    ///
    /// # Errors
    ///
    /// [`CommonError::Crypto`] when the payload is truncated, was encrypted
    /// under another key, or has been tampered with.
    pub fn decrypt(&self, payload: &[u8]) -> CommonResult<Vec<u8>> {
        if payload.len() < NONCE_LEN + TAG_LEN {
            return Err(CommonError::crypto(
                "decrypt",
                format!("payload too short ({} bytes)", payload.len()),
            ));
        }

        let (nonce, ciphertext) = payload.split_at(NONCE_LEN);
        let nonce: [u8; NONCE_LEN] = nonce
            .try_into()
            .map_err(|_| CommonError::crypto("decrypt", "malformed nonce"))?;

        self.cipher.decrypt(&Nonce::from(nonce), ciphertext).map_err(|_| {
            warn!(payload_len = payload.len(), "Decryption failed: authentication tag mismatch");
            CommonError::crypto("decrypt", "authentication failed")
        })
    }

    /// Encrypts and base64-encodes
    pub fn encrypt_to_string(&self, plaintext: &[u8]) -> CommonResult<String> {
        Ok(BASE64.encode(self.encrypt(plaintext)?))
    }

    /// Base64-decodes and decrypts
    pub fn decrypt_from_string(&self, encoded: &str) -> CommonResult<Vec<u8>> {
        let payload = BASE64
            .decode(encoded.trim())
            .map_err(|e| CommonError::crypto("decode", format!("invalid base64: {e}")))?;
        self.decrypt(&payload)
    }

    /// Encrypts UTF-8 text into a base64 token
    pub fn encrypt_str(&self, plaintext: &str) -> CommonResult<String> {
        self.encrypt_to_string(plaintext.as_bytes())
    }

    /// Decrypts a base64 token back into UTF-8 text
    pub fn decrypt_str(&self, encoded: &str) -> CommonResult<String> {
        let bytes = self.decrypt_from_string(encoded)?;
        String::from_utf8(bytes)
            .map_err(|e| CommonError::crypto("decrypt", format!("plaintext is not UTF-8: {e}")))
    }

    /// Decrypts with this encryptor and encrypts again with `target`
    pub fn reencrypt(&self, payload: &[u8], target: &Encryptor) -> CommonResult<Vec<u8>> {
        let plaintext = Zeroizing::new(self.decrypt(payload)?);
        target.encrypt(&plaintext)
    }

    /// Short, non-reversible identifier of the derived key
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(&*self.key);
        hex::encode(&digest[..8])
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for crypto::encryption.
    use super::*;

    fn encryptor() -> Encryptor {
        Encryptor::from_key_bytes(&[7u8; KEY_LEN]).unwrap()
    }

    #[test]
    fn test_config_validation() {
        assert!(EncryptionConfig::new("secret", "12345678").validate().is_ok());

        let err = EncryptionConfig::new("  ", "12345678").validate().unwrap_err();
        assert!(matches!(err, CommonError::Config { field: Some(ref f), .. } if f == "encryption.key"));

        let err = EncryptionConfig::new("secret", "short").validate().unwrap_err();
        assert!(matches!(err, CommonError::Config { field: Some(ref f), .. } if f == "encryption.seed"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", EncryptionConfig::new("hunter2", "12345678"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn test_generated_config_is_valid() {
        let config = EncryptionConfig::generate();
        assert!(config.validate().is_ok());
        assert_eq!(config.key.len(), KEY_LEN * 2);
        assert_ne!(config, EncryptionConfig::generate());
    }

    #[test]
    fn test_config_deserializes_with_missing_fields() {
        let config: EncryptionConfig = serde_json::from_str(r#"{"key":"secret"}"#).unwrap();
        assert_eq!(config.key, "secret");
        assert!(config.seed.is_empty());
        assert!(config.validate().is_err());

        let full: EncryptionConfig =
            serde_json::from_str(r#"{"key":"secret","seed":"12345678"}"#).unwrap();
        assert_eq!(full, EncryptionConfig::new("secret", "12345678"));
    }

    #[test]
    fn test_raw_key_length_checked() {
        assert!(matches!(
            Encryptor::from_key_bytes(&[0u8; 16]),
            Err(CommonError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_encrypt_decrypt() {
        let encryptor = encryptor();
        let payload = encryptor.encrypt(b"hello world").unwrap();
        assert_eq!(payload.len(), NONCE_LEN + 11 + TAG_LEN);
        assert_eq!(encryptor.decrypt(&payload).unwrap(), b"hello world");
    }

    #[test]
    fn test_nonce_is_fresh_per_call() {
        let encryptor = encryptor();
        assert_ne!(encryptor.encrypt(b"same").unwrap(), encryptor.encrypt(b"same").unwrap());
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let encryptor = encryptor();
        let mut payload = encryptor.encrypt(b"integrity").unwrap();
        let last = payload.len() - 1;
        payload[last] ^= 0x01;
        assert!(matches!(encryptor.decrypt(&payload), Err(CommonError::Crypto { .. })));
    }

    #[test]
    fn test_short_payload_rejected() {
        let err = encryptor().decrypt(&[0u8; 10]).unwrap_err();
        assert!(err.to_string().contains("too short"));
    }

    #[test]
    fn test_string_forms() {
        let encryptor = encryptor();
        let token = encryptor.encrypt_str("grüße").unwrap();
        assert_eq!(encryptor.decrypt_str(&token).unwrap(), "grüße");
        assert!(matches!(
            encryptor.decrypt_from_string("not base64!"),
            Err(CommonError::Crypto { .. })
        ));
    }

    #[test]
    fn test_reencrypt() {
        let source = encryptor();
        let target = Encryptor::from_key_bytes(&[9u8; KEY_LEN]).unwrap();
        let payload = source.encrypt(b"rotate me").unwrap();
        let moved = source.reencrypt(&payload, &target).unwrap();
        assert_eq!(target.decrypt(&moved).unwrap(), b"rotate me");
        assert!(source.decrypt(&moved).is_err());
    }

    #[test]
    fn test_fingerprint() {
        let fingerprint = encryptor().fingerprint();
        assert_eq!(fingerprint.len(), 16);
        assert_eq!(fingerprint, encryptor().fingerprint());
        assert_ne!(
            fingerprint,
            Encryptor::from_key_bytes(&[8u8; KEY_LEN]).unwrap().fingerprint()
        );
    }
}
