//! Embedding the envelope into the static dashboard page
//!
//! The template contains the placeholder [`PLACEHOLDER`] exactly once, inside
//! a `<script>` element. The envelope JSON replaces it after being escaped so
//! it cannot terminate the script or be read as markup.

use serde::Deserialize;

use crate::crypto::Envelope;
use crate::error::{WheelboardError, WheelboardResult};

/// Marker replaced by the envelope JSON
pub const PLACEHOLDER: &str = "__ENCRYPTED_DATA__";

/// Dashboard page shipped with the binary
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/dashboard.html");

/// Escape JSON text for a script context
///
/// The replacements are JSON `\u` escapes, so the result still parses to the
/// same value.
pub fn escape_for_script(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}

/// Check that a template can receive an envelope
pub fn validate_template(template: &str) -> WheelboardResult<()> {
    match template.matches(PLACEHOLDER).count() {
        1 => Ok(()),
        0 => Err(WheelboardError::Template(format!(
            "template does not contain {}",
            PLACEHOLDER
        ))),
        n => Err(WheelboardError::Template(format!(
            "template contains {} {} markers, expected exactly one",
            n, PLACEHOLDER
        ))),
    }
}

/// Render the page with the envelope in place of the placeholder
pub fn embed(template: &str, envelope: &Envelope) -> WheelboardResult<String> {
    validate_template(template)?;
    let json = escape_for_script(&envelope.to_json()?);
    Ok(template.replacen(PLACEHOLDER, &json, 1))
}

/// Recover the envelope from a built page
///
/// Scans every `{` for a JSON object carrying the envelope fields.
pub fn extract_envelope(page: &str) -> WheelboardResult<Envelope> {
    for (start, _) in page.match_indices('{') {
        let mut de = serde_json::Deserializer::from_str(&page[start..]);
        if let Ok(envelope) = Envelope::deserialize(&mut de) {
            return Ok(envelope);
        }
    }

    Err(WheelboardError::Format(
        "no encrypted payload found in page".to_string(),
    ))
}

/// Read an envelope from either a bare envelope JSON file or a built page
pub fn read_artifact(text: &str) -> WheelboardResult<Envelope> {
    Envelope::from_json(text.trim()).or_else(|_| extract_envelope(text))
}
