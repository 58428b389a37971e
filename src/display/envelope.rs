//! Envelope display formatting

use crate::crypto::{EnvelopeInfo, NONCE_SIZE, PBKDF2_ITERATIONS, SALT_SIZE, TAG_SIZE};

fn field_line(name: &str, actual: usize, expected: Option<usize>) -> String {
    let status = match expected {
        Some(expected) if expected == actual => "ok".to_string(),
        Some(expected) => format!("INVALID, expected {}", expected),
        None => String::new(),
    };
    let line = format!("  {:<12}{:>8} bytes  {}", name, actual, status);
    format!("{}\n", line.trim_end())
}

/// Format decoded field sizes of an envelope
pub fn format_envelope_info(info: &EnvelopeInfo) -> String {
    let mut output = String::new();
    output.push_str("Envelope\n");
    output.push_str(&field_line("salt", info.salt_len, Some(SALT_SIZE)));
    output.push_str(&field_line("iv", info.iv_len, Some(NONCE_SIZE)));
    output.push_str(&field_line("tag", info.tag_len, Some(TAG_SIZE)));
    output.push_str(&field_line("ciphertext", info.ciphertext_len, None));
    output.push_str(&format!(
        "Cipher: AES-256-GCM, key: PBKDF2-HMAC-SHA256 ({} rounds)\n",
        PBKDF2_ITERATIONS
    ));
    output.push_str(if info.is_well_formed() {
        "Status: well-formed\n"
    } else {
        "Status: MALFORMED\n"
    });
    output
}
