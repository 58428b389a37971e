//! The encrypted envelope embedded into the dashboard page
//!
//! Four base64 text fields: `salt`, `iv`, `tag` and `ciphertext`. Pages built
//! by the older JavaScript build script named the ciphertext field `data`;
//! that name is still accepted when reading.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::{WheelboardError, WheelboardResult};

use super::encryption::{SealedData, NONCE_SIZE, TAG_SIZE};
use super::key_derivation::{Salt, SALT_SIZE};

/// Encrypted payload with everything needed to re-derive the key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub(crate) salt: String,
    pub(crate) iv: String,
    pub(crate) tag: String,
    #[serde(alias = "data")]
    pub(crate) ciphertext: String,
}

/// Envelope fields after base64 decoding and length validation
#[derive(Debug, Clone)]
pub struct EnvelopeBytes {
    pub salt: Salt,
    pub iv: [u8; NONCE_SIZE],
    pub tag: [u8; TAG_SIZE],
    pub ciphertext: Vec<u8>,
}

/// Field sizes of an envelope, readable without the password
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeInfo {
    pub salt_len: usize,
    pub iv_len: usize,
    pub tag_len: usize,
    pub ciphertext_len: usize,
}

impl EnvelopeInfo {
    /// Whether every fixed-size field has its expected length
    pub fn is_well_formed(&self) -> bool {
        self.salt_len == SALT_SIZE && self.iv_len == NONCE_SIZE && self.tag_len == TAG_SIZE
    }
}

impl Envelope {
    /// Package a fresh encryption result
    pub(crate) fn new(salt: &Salt, sealed: &SealedData) -> Self {
        Self {
            salt: STANDARD.encode(salt.as_bytes()),
            iv: STANDARD.encode(sealed.iv),
            tag: STANDARD.encode(sealed.tag),
            ciphertext: STANDARD.encode(&sealed.ciphertext),
        }
    }

    /// Base64 salt
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Base64 nonce
    pub fn iv(&self) -> &str {
        &self.iv
    }

    /// Base64 authentication tag
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Base64 ciphertext
    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }

    /// Decode all four fields and check their lengths
    ///
    /// # Errors
    ///
    /// Returns a format error for undecodable base64 or a fixed-size field
    /// of the wrong length.
    pub fn decode_fields(&self) -> WheelboardResult<EnvelopeBytes> {
        let salt = Salt::from_slice(&decode_field("salt", &self.salt)?)?;
        let iv = fixed_field::<NONCE_SIZE>("iv", &self.iv)?;
        let tag = fixed_field::<TAG_SIZE>("tag", &self.tag)?;
        let ciphertext = decode_field("ciphertext", &self.ciphertext)?;

        Ok(EnvelopeBytes {
            salt,
            iv,
            tag,
            ciphertext,
        })
    }

    /// Report decoded field lengths without validating them
    pub fn info(&self) -> WheelboardResult<EnvelopeInfo> {
        Ok(EnvelopeInfo {
            salt_len: decode_field("salt", &self.salt)?.len(),
            iv_len: decode_field("iv", &self.iv)?.len(),
            tag_len: decode_field("tag", &self.tag)?.len(),
            ciphertext_len: decode_field("ciphertext", &self.ciphertext)?.len(),
        })
    }

    /// Serialize to compact JSON
    pub fn to_json(&self) -> WheelboardResult<String> {
        serde_json::to_string(self)
            .map_err(|e| WheelboardError::Json(format!("Failed to serialize envelope: {}", e)))
    }

    /// Parse an envelope from JSON text
    pub fn from_json(text: &str) -> WheelboardResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| WheelboardError::Format(format!("Invalid envelope JSON: {}", e)))
    }
}

fn decode_field(name: &str, value: &str) -> WheelboardResult<Vec<u8>> {
    STANDARD
        .decode(value)
        .map_err(|e| WheelboardError::Format(format!("Invalid {} encoding: {}", name, e)))
}

fn fixed_field<const N: usize>(name: &str, value: &str) -> WheelboardResult<[u8; N]> {
    let bytes = decode_field(name, value)?;
    bytes.as_slice().try_into().map_err(|_| {
        WheelboardError::Format(format!(
            "Invalid {} size: expected {}, got {}",
            name,
            N,
            bytes.len()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Envelope {
        Envelope {
            salt: STANDARD.encode([1u8; SALT_SIZE]),
            iv: STANDARD.encode([2u8; NONCE_SIZE]),
            tag: STANDARD.encode([3u8; TAG_SIZE]),
            ciphertext: STANDARD.encode(b"opaque"),
        }
    }

    #[test]
    fn test_decode_fields() {
        let bytes = sample().decode_fields().unwrap();
        assert_eq!(bytes.salt.as_bytes(), &[1u8; SALT_SIZE]);
        assert_eq!(bytes.iv, [2u8; NONCE_SIZE]);
        assert_eq!(bytes.tag, [3u8; TAG_SIZE]);
        assert_eq!(bytes.ciphertext, b"opaque");
    }

    #[test]
    fn test_wrong_iv_length_is_format_error() {
        let mut env = sample();
        env.iv = STANDARD.encode([2u8; 16]);
        let err = env.decode_fields().unwrap_err();
        assert!(err.is_format());
        assert!(err.to_string().contains("iv"));
    }

    #[test]
    fn test_wrong_tag_length_is_format_error() {
        let mut env = sample();
        env.tag = STANDARD.encode([3u8; 12]);
        assert!(env.decode_fields().unwrap_err().is_format());
    }

    #[test]
    fn test_bad_base64_is_format_error() {
        let mut env = sample();
        env.ciphertext = "not*base64".to_string();
        assert!(env.decode_fields().unwrap_err().is_format());
    }

    #[test]
    fn test_empty_ciphertext_is_allowed() {
        let mut env = sample();
        env.ciphertext = String::new();
        assert!(env.decode_fields().unwrap().ciphertext.is_empty());
    }

    #[test]
    fn test_json_field_names() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["salt", "iv", "tag", "ciphertext"]);
    }

    #[test]
    fn test_legacy_data_field_accepted() {
        let json = r#"{"salt":"AQEBAQEBAQEBAQEBAQEBAQ==","iv":"AgICAgICAgICAgIC","tag":"AwMDAwMDAwMDAwMDAwMDAw==","data":"b3BhcXVl"}"#;
        let env = Envelope::from_json(json).unwrap();
        assert_eq!(env, sample());
    }

    #[test]
    fn test_missing_field_is_format_error() {
        let err = Envelope::from_json(r#"{"salt":"","iv":"","tag":""}"#).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_info() {
        let info = sample().info().unwrap();
        assert!(info.is_well_formed());
        assert_eq!(info.ciphertext_len, 6);

        let mut env = sample();
        env.salt = STANDARD.encode([0u8; 8]);
        assert!(!env.info().unwrap().is_well_formed());
    }
}
