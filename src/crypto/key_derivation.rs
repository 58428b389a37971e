//! Key derivation using PBKDF2-HMAC-SHA256
//!
//! Derives the AES-256 key from the dashboard password. The round count is a
//! brute-force cost multiplier and must match the browser-side decoder in the
//! page template exactly.

use std::fmt;

use aes_gcm::aead::{rand_core::RngCore, OsRng};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{WheelboardError, WheelboardResult};

use super::secure_memory::Password;

/// Size of the key derivation salt in bytes
pub const SALT_SIZE: usize = 16;

/// Size of the derived key in bytes (AES-256)
pub const KEY_SIZE: usize = 32;

/// PBKDF2 rounds. Changing this breaks every previously built page.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Random salt mixed into key derivation, fresh for every build
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Salt([u8; SALT_SIZE]);

impl Salt {
    /// Draw a new salt from the OS CSPRNG
    pub fn generate() -> Self {
        let mut bytes = [0u8; SALT_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Build a salt from decoded envelope bytes
    ///
    /// # Errors
    ///
    /// Returns a format error if `bytes` is not exactly [`SALT_SIZE`] long.
    pub fn from_slice(bytes: &[u8]) -> WheelboardResult<Self> {
        let array: [u8; SALT_SIZE] = bytes.try_into().map_err(|_| {
            WheelboardError::Format(format!(
                "Invalid salt size: expected {}, got {}",
                SALT_SIZE,
                bytes.len()
            ))
        })?;
        Ok(Self(array))
    }

    /// Get the salt bytes
    pub fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.0
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Salt").field("len", &SALT_SIZE).finish()
    }
}

/// A derived encryption key, wiped from memory on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive the AES-256 key for `password` and `salt`
pub fn derive_key(password: &Password, salt: &Salt) -> DerivedKey {
    derive_raw(password.as_bytes(), salt.as_bytes(), PBKDF2_ITERATIONS)
}

fn derive_raw(password: &[u8], salt: &[u8], rounds: u32) -> DerivedKey {
    let mut key = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(password, salt, rounds, &mut key);
    DerivedKey { key }
}
