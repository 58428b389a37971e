//! Open commands
//!
//! Decrypt a built page or a bare envelope file back to the portfolio data.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use tracing::info;

use crate::config::Settings;
use crate::crypto::Envelope;
use crate::error::{WheelboardError, WheelboardResult};
use crate::page;
use crate::storage::{read_text, write_atomic};
use crate::vault::{self, PlaintextPayload};

use super::password::resolve_password;

/// Output format for decrypted data
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Arguments for `open`
#[derive(Args, Debug, Clone)]
pub struct OpenArgs {
    /// Built page or envelope JSON file
    pub artifact: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Write decrypted data to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Read an envelope from a built page or a bare envelope file
pub fn load_envelope(path: &Path) -> WheelboardResult<Envelope> {
    let text = read_text(path)?;
    page::read_artifact(&text)
}

/// Render decrypted data in the requested format
pub fn render_payload(
    payload: &PlaintextPayload,
    format: OutputFormat,
    pretty: bool,
) -> WheelboardResult<String> {
    match format {
        OutputFormat::Json => {
            let mut text = if pretty {
                serde_json::to_string_pretty(payload)?
            } else {
                serde_json::to_string(payload)?
            };
            text.push('\n');
            Ok(text)
        }
        OutputFormat::Yaml => serde_yaml::to_string(payload)
            .map_err(|e| WheelboardError::Serialization(format!("YAML output failed: {}", e))),
    }
}

/// Handle `open`
pub fn handle_open(settings: &Settings, args: OpenArgs) -> WheelboardResult<()> {
    let envelope = load_envelope(&args.artifact)?;
    let password = resolve_password(&settings.password_env, false)?;
    let payload = vault::decode(&envelope, &password)?;
    let text = render_payload(&payload, args.format, args.pretty)?;

    match args.output {
        Some(path) => {
            write_atomic(&path, text.as_bytes())?;
            info!(output = %path.display(), "decrypted data written");
            eprintln!("Decrypted data written to {}", path.display());
        }
        None => print!("{}", text),
    }

    Ok(())
}

/// Handle `verify`
pub fn handle_verify(settings: &Settings, artifact: &Path) -> WheelboardResult<()> {
    let envelope = load_envelope(artifact)?;
    let password = resolve_password(&settings.password_env, false)?;
    vault::verify(&envelope, &password)?;

    println!("Password is correct.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Password;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_envelope_from_page_and_file() {
        let dir = TempDir::new().unwrap();
        let password = Password::new("0000").unwrap();
        let envelope = vault::encode(&json!({"cash": 1}), &password).unwrap();

        let page_path = dir.path().join("index.html");
        let html = page::embed(page::DEFAULT_TEMPLATE, &envelope).unwrap();
        fs::write(&page_path, html).unwrap();
        assert_eq!(load_envelope(&page_path).unwrap(), envelope);

        let json_path = dir.path().join("envelope.json");
        fs::write(&json_path, envelope.to_json().unwrap()).unwrap();
        assert_eq!(load_envelope(&json_path).unwrap(), envelope);
    }

    #[test]
    fn test_load_envelope_without_envelope() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "<html>nothing here</html>").unwrap();

        assert!(load_envelope(&path).unwrap_err().is_format());
    }

    #[test]
    fn test_render_json() {
        let payload = json!({"updatedAt": "2026-02-23", "cash": 17000});

        let compact = render_payload(&payload, OutputFormat::Json, false).unwrap();
        assert_eq!(compact, "{\"updatedAt\":\"2026-02-23\",\"cash\":17000}\n");

        let pretty = render_payload(&payload, OutputFormat::Json, true).unwrap();
        assert!(pretty.contains("\n  \"cash\": 17000"));
    }

    #[test]
    fn test_render_yaml() {
        let payload = json!({"ccPositions": [{"ticker": "PDD"}]});
        let yaml = render_payload(&payload, OutputFormat::Yaml, false).unwrap();
        assert!(yaml.contains("ccPositions:"));
        assert!(yaml.contains("ticker: PDD"));
    }
}
