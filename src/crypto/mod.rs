//! Cryptographic functions for Wheelboard
//!
//! Provides AES-256-GCM encryption with PBKDF2-HMAC-SHA256 key derivation
//! and the base64 envelope that carries the result into the page.

pub mod encryption;
pub mod envelope;
pub mod key_derivation;
pub mod secure_memory;

pub use encryption::{decrypt, encrypt, SealedData, NONCE_SIZE, TAG_SIZE};
pub use envelope::{Envelope, EnvelopeBytes, EnvelopeInfo};
pub use key_derivation::{derive_key, DerivedKey, Salt, PBKDF2_ITERATIONS, SALT_SIZE};
pub use secure_memory::Password;
