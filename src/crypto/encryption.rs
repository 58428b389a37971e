//! AES-256-GCM encryption/decryption
//!
//! Encrypts with a detached 128-bit tag so the envelope can carry the tag and
//! the ciphertext as separate fields. The ciphertext is exactly as long as the
//! plaintext. No associated data is bound.

use aes_gcm::{
    aead::{rand_core::RngCore, AeadInPlace, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce, Tag,
};
use zeroize::Zeroizing;

use crate::error::{WheelboardError, WheelboardResult};

use super::DerivedKey;

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bytes (128 bits)
pub const TAG_SIZE: usize = 16;

/// Output of a single encryption
#[derive(Debug, Clone)]
pub struct SealedData {
    pub iv: [u8; NONCE_SIZE],
    pub tag: [u8; TAG_SIZE],
    pub ciphertext: Vec<u8>,
}

fn cipher_for(key: &DerivedKey) -> Aes256Gcm {
    let key: &Key<Aes256Gcm> = key.as_bytes().into();
    Aes256Gcm::new(key)
}

/// Encrypt plaintext data using AES-256-GCM
///
/// Generates a random nonce for each encryption operation.
pub fn encrypt(plaintext: &[u8], key: &DerivedKey) -> WheelboardResult<SealedData> {
    let mut iv = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut iv);

    let mut ciphertext = plaintext.to_vec();
    let tag = cipher_for(key)
        .encrypt_in_place_detached(Nonce::from_slice(&iv), b"", &mut ciphertext)
        .map_err(|_| {
            WheelboardError::Serialization(format!(
                "payload of {} bytes is too large to encrypt",
                plaintext.len()
            ))
        })?;

    let mut tag_bytes = [0u8; TAG_SIZE];
    tag_bytes.copy_from_slice(tag.as_slice());

    Ok(SealedData {
        iv,
        tag: tag_bytes,
        ciphertext,
    })
}

/// Decrypt and verify ciphertext using AES-256-GCM
///
/// The plaintext is only returned once the tag has verified; on failure the
/// working buffer is wiped and dropped.
pub fn decrypt(
    ciphertext: &[u8],
    tag: &[u8; TAG_SIZE],
    iv: &[u8; NONCE_SIZE],
    key: &DerivedKey,
) -> WheelboardResult<Zeroizing<Vec<u8>>> {
    let mut buffer = Zeroizing::new(ciphertext.to_vec());

    cipher_for(key)
        .decrypt_in_place_detached(
            Nonce::from_slice(iv),
            b"",
            buffer.as_mut_slice(),
            Tag::from_slice(tag),
        )
        .map_err(|_| WheelboardError::Authentication)?;

    Ok(buffer)
}
