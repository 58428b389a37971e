//! Encoder and decoder for the dashboard payload
//!
//! `encode` turns a payload and a password into an [`Envelope`]; `decode` is
//! its exact mirror. Every call draws a fresh salt and nonce, so two encodes
//! of the same payload never produce the same envelope.

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::{decrypt, derive_key, encrypt, Envelope, Password, Salt};
use crate::error::{WheelboardError, WheelboardResult};

/// Opaque portfolio data as loaded from the data source
pub type PlaintextPayload = serde_json::Value;

/// Serialize a payload to the exact bytes that get encrypted
pub fn serialize_payload<T: Serialize + ?Sized>(payload: &T) -> WheelboardResult<Zeroizing<Vec<u8>>> {
    serde_json::to_vec(payload)
        .map(Zeroizing::new)
        .map_err(|e| WheelboardError::Serialization(e.to_string()))
}

/// Encrypt a payload under `password`
///
/// # Errors
///
/// Returns [`WheelboardError::Serialization`] if the payload cannot be
/// represented as JSON.
pub fn encode<T: Serialize + ?Sized>(payload: &T, password: &Password) -> WheelboardResult<Envelope> {
    let plaintext = serialize_payload(payload)?;
    encode_bytes(&plaintext, password)
}

/// Encrypt already-serialized bytes under `password`
pub fn encode_bytes(plaintext: &[u8], password: &Password) -> WheelboardResult<Envelope> {
    let salt = Salt::generate();
    let key = derive_key(password, &salt);
    let sealed = encrypt(plaintext, &key)?;

    debug!(
        plaintext_len = plaintext.len(),
        ciphertext_len = sealed.ciphertext.len(),
        "payload encrypted"
    );

    Ok(Envelope::new(&salt, &sealed))
}

/// Decrypt an envelope back into the payload
///
/// # Errors
///
/// - [`WheelboardError::Format`] if the envelope is malformed or the
///   decrypted bytes are not a valid payload
/// - [`WheelboardError::Authentication`] if the password is wrong or any
///   field was altered
pub fn decode(envelope: &Envelope, password: &Password) -> WheelboardResult<PlaintextPayload> {
    decode_as(envelope, password)
}

/// Decrypt an envelope into any deserializable type
pub fn decode_as<T: DeserializeOwned>(envelope: &Envelope, password: &Password) -> WheelboardResult<T> {
    let plaintext = decode_bytes(envelope, password)?;
    serde_json::from_slice(&plaintext)
        .map_err(|e| WheelboardError::Format(format!("Decrypted payload is not valid: {}", e)))
}

/// Decrypt an envelope into the raw serialized payload bytes
pub fn decode_bytes(envelope: &Envelope, password: &Password) -> WheelboardResult<Zeroizing<Vec<u8>>> {
    let fields = envelope.decode_fields()?;
    let key = derive_key(password, &fields.salt);
    let plaintext = decrypt(&fields.ciphertext, &fields.tag, &fields.iv, &key)?;

    debug!(plaintext_len = plaintext.len(), "payload decrypted");

    Ok(plaintext)
}

/// Check a password against an envelope without keeping the plaintext
pub fn verify(envelope: &Envelope, password: &Password) -> WheelboardResult<()> {
    decode_bytes(envelope, password).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn password(s: &str) -> Password {
        Password::new(s).unwrap()
    }

    fn sample_payload() -> PlaintextPayload {
        json!({
            "updatedAt": "2026-02-23",
            "ccPositions": [
                { "ticker": "PDD", "strike": 108, "expiry": "2026-02-27", "premium": 58,
                  "costPerShare": 107.66, "sellDate": "2026-02-14", "shares": 100 },
                { "ticker": "LI", "strike": 19.5, "expiry": "2026-02-27", "premium": 39,
                  "costPerShare": 23.01, "sellDate": "2026-02-14", "shares": 100 }
            ],
            "idlePositions": [
                { "ticker": "NEOV", "shares": 100, "cost": 4.41, "canCC": true, "note": "低价股" }
            ]
        })
    }

    // Envelope from Node's crypto.pbkdf2Sync(pw, salt, 100000, 32, 'sha256') and
    // createCipheriv('aes-256-gcm', key, iv), as written by the old build script.
    const NODE_ENVELOPE: &str = r#"{"salt":"C7CKuRpy7B134n1MSc6cqw==","iv":"tw8L1W8RItbJrZOc","tag":"SUHlHpodSxOF7N5n5zS/lA==","data":"0MdkSO9EtrSJckekTlNxthvghnTrBF5i43TStq8rGvu/+KxKXemcjJCS0teuaT5sWzCN0DQpMwzJmWmMcl/qqWI/uhSzNwbxLR1u/HuGEVKqDXcHQQ=="}"#;
    const NODE_PLAINTEXT: &str =
        r#"{"updatedAt":"2026-02-23","ccPositions":[{"ticker":"PDD","strike":108,"premium":58}]}"#;

    fn flip_bit(field: &str, bit: usize) -> String {
        let mut bytes = STANDARD.decode(field).unwrap();
        bytes[bit / 8] ^= 1 << (bit % 8);
        STANDARD.encode(bytes)
    }

    #[test]
    fn test_example_scenario() {
        let payload = sample_payload();
        let envelope = encode(&payload, &password("1029")).unwrap();

        let bytes = envelope.decode_fields().unwrap();
        assert_eq!(bytes.salt.as_bytes().len(), 16);
        assert_eq!(bytes.iv.len(), 12);
        assert_eq!(bytes.tag.len(), 16);
        assert_eq!(
            bytes.ciphertext.len(),
            serde_json::to_vec(&payload).unwrap().len()
        );

        assert_eq!(decode(&envelope, &password("1029")).unwrap(), payload);

        let err = decode(&envelope, &password("0000")).unwrap_err();
        assert!(err.is_authentication());
    }

    #[test]
    fn test_round_trip_is_byte_identical() {
        let payload = sample_payload();
        let serialized = serialize_payload(&payload).unwrap();
        let envelope = encode(&payload, &password("1029")).unwrap();

        let first = decode_bytes(&envelope, &password("1029")).unwrap();
        let second = decode_bytes(&envelope, &password("1029")).unwrap();
        assert_eq!(first.as_slice(), serialized.as_slice());
        assert_eq!(first.as_slice(), second.as_slice());
    }

    #[test]
    fn test_encode_is_not_deterministic() {
        let payload = sample_payload();
        let e1 = encode(&payload, &password("1029")).unwrap();
        let e2 = encode(&payload, &password("1029")).unwrap();

        assert_ne!(e1.salt(), e2.salt());
        assert_ne!(e1.iv(), e2.iv());
        assert_eq!(decode(&e1, &password("1029")).unwrap(), payload);
        assert_eq!(decode(&e2, &password("1029")).unwrap(), payload);
    }

    #[test]
    fn test_tampering_any_field_fails_authentication() {
        let envelope = encode(&sample_payload(), &password("1029")).unwrap();

        let mut salt = envelope.clone();
        salt.salt = flip_bit(&envelope.salt, 5);
        let mut iv = envelope.clone();
        iv.iv = flip_bit(&envelope.iv, 90);
        let mut tag = envelope.clone();
        tag.tag = flip_bit(&envelope.tag, 127);
        let mut ciphertext = envelope.clone();
        ciphertext.ciphertext = flip_bit(&envelope.ciphertext, 0);

        for tampered in [salt, iv, tag, ciphertext] {
            let err = decode(&tampered, &password("1029")).unwrap_err();
            assert!(err.is_authentication(), "unexpected error: {}", err);
        }
    }

    #[test]
    fn test_malformed_envelope_is_format_error() {
        let mut envelope = encode(&sample_payload(), &password("1029")).unwrap();
        envelope.salt = STANDARD.encode([0u8; 12]);

        let err = decode(&envelope, &password("1029")).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_non_json_plaintext_is_format_error() {
        let envelope = encode_bytes(b"\xff\xfe not json", &password("1029")).unwrap();
        let err = decode(&envelope, &password("1029")).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_unrepresentable_payload_is_serialization_error() {
        let mut payload = BTreeMap::new();
        payload.insert((1u8, 2u8), "tuple keys are not JSON");

        let err = encode(&payload, &password("1029")).unwrap_err();
        assert!(matches!(err, WheelboardError::Serialization(_)));
    }

    #[test]
    fn test_decodes_node_envelope() {
        let envelope = Envelope::from_json(NODE_ENVELOPE).unwrap();

        let plaintext = decode_bytes(&envelope, &password("1029")).unwrap();
        assert_eq!(std::str::from_utf8(&plaintext).unwrap(), NODE_PLAINTEXT);

        let payload = decode(&envelope, &password("1029")).unwrap();
        assert_eq!(payload["ccPositions"][0]["ticker"], "PDD");

        assert!(decode(&envelope, &password("0000")).unwrap_err().is_authentication());
    }

    #[test]
    fn test_node_envelope_inside_page() {
        let page = format!(
            "<script>const ENC = {};</script>",
            NODE_ENVELOPE
        );
        let envelope = crate::page::read_artifact(&page).unwrap();
        let plaintext = decode_bytes(&envelope, &password("1029")).unwrap();
        assert_eq!(std::str::from_utf8(&plaintext).unwrap(), NODE_PLAINTEXT);
    }

    #[test]
    fn test_verify() {
        let envelope = encode(&sample_payload(), &password("1029")).unwrap();
        assert!(verify(&envelope, &password("1029")).is_ok());
        assert!(verify(&envelope, &password("1028")).unwrap_err().is_authentication());
    }

    #[test]
    fn test_key_order_preserved() {
        let payload: PlaintextPayload =
            serde_json::from_str(r#"{"zeta":1,"alpha":2,"mid":{"b":1,"a":2}}"#).unwrap();
        let envelope = encode(&payload, &password("pw")).unwrap();
        let plaintext = decode_bytes(&envelope, &password("pw")).unwrap();
        assert_eq!(
            std::str::from_utf8(&plaintext).unwrap(),
            r#"{"zeta":1,"alpha":2,"mid":{"b":1,"a":2}}"#
        );
    }
}
