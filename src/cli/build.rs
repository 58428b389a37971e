//! Build commands
//!
//! `build` encrypts the portfolio data into the dashboard page; `seal` writes
//! the bare envelope instead.

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{info, warn};

use crate::config::Settings;
use crate::crypto::{Envelope, Password};
use crate::error::WheelboardResult;
use crate::models::{Portfolio, PortfolioSummary};
use crate::page::{self, DEFAULT_TEMPLATE};
use crate::storage::{read_json_required, read_text, write_atomic, write_json_atomic};
use crate::vault::{self, PlaintextPayload};

use super::password::resolve_password;

/// Arguments for `build`
#[derive(Args, Debug, Default, Clone)]
pub struct BuildArgs {
    /// Portfolio data file (JSON)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Page template containing __ENCRYPTED_DATA__
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Where to write the built page
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `seal`
#[derive(Args, Debug, Clone)]
pub struct SealArgs {
    /// Portfolio data file (JSON)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Where to write the envelope JSON
    #[arg(short, long, default_value = "envelope.json")]
    pub output: PathBuf,
}

/// Outcome of a successful build
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub output: PathBuf,
    pub plaintext_len: usize,
    pub ciphertext_chars: usize,
}

/// Load the portfolio payload and log what it contains
pub fn load_payload(path: &Path) -> WheelboardResult<PlaintextPayload> {
    let payload: PlaintextPayload = read_json_required(path)?;

    match Portfolio::from_payload(&payload) {
        Ok(portfolio) => {
            let summary = PortfolioSummary::from_portfolio(&portfolio);
            info!(
                path = %path.display(),
                cc = summary.cc_count,
                csp = summary.csp_count,
                idle = summary.idle_count,
                closed = summary.closed_count,
                "portfolio loaded"
            );
        }
        Err(e) => warn!(path = %path.display(), error = %e, "data does not match the dashboard layout"),
    }

    Ok(payload)
}

/// Encrypt the data file into the page template and write the page
pub fn build_dashboard(
    settings: &Settings,
    args: &BuildArgs,
    password: &Password,
) -> WheelboardResult<BuildReport> {
    let data_path = args.data.as_ref().unwrap_or(&settings.data_file);
    let output = args.output.clone().unwrap_or_else(|| settings.output_file.clone());

    let template = match args.template.as_ref().or(settings.template_file.as_ref()) {
        Some(path) => read_text(path)?,
        None => DEFAULT_TEMPLATE.to_string(),
    };
    page::validate_template(&template)?;

    let payload = load_payload(data_path)?;
    let plaintext = vault::serialize_payload(&payload)?;
    let envelope = vault::encode_bytes(&plaintext, password)?;
    let html = page::embed(&template, &envelope)?;

    write_atomic(&output, html.as_bytes())?;
    info!(output = %output.display(), "dashboard built");

    Ok(BuildReport {
        output,
        plaintext_len: plaintext.len(),
        ciphertext_chars: envelope.ciphertext().len(),
    })
}

/// Encrypt the data file and return the envelope
pub fn seal_data(data_path: &Path, password: &Password) -> WheelboardResult<Envelope> {
    let payload = load_payload(data_path)?;
    vault::encode(&payload, password)
}

/// Handle `build`
pub fn handle_build(settings: &Settings, args: BuildArgs) -> WheelboardResult<()> {
    let password = resolve_password(&settings.password_env, true)?;
    let report = build_dashboard(settings, &args, &password)?;

    println!("Dashboard built: {}", report.output.display());
    println!("Data size: {} bytes", report.plaintext_len);
    println!("Encrypted size: {} chars", report.ciphertext_chars);

    Ok(())
}

/// Handle `seal`
pub fn handle_seal(settings: &Settings, args: SealArgs) -> WheelboardResult<()> {
    let data_path = args.data.as_ref().unwrap_or(&settings.data_file);
    let password = resolve_password(&settings.password_env, true)?;

    let envelope = seal_data(data_path, &password)?;
    write_json_atomic(&args.output, &envelope, false)?;

    println!("Envelope written: {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn password() -> Password {
        Password::new("1029").unwrap()
    }

    fn write_data(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("portfolio.json");
        let data = json!({
            "updatedAt": "2026-02-23",
            "ccPositions": [{ "ticker": "PDD", "strike": 108, "premium": 58 }]
        });
        fs::write(&path, data.to_string()).unwrap();
        path
    }

    #[test]
    fn test_build_dashboard() {
        let dir = TempDir::new().unwrap();
        let data = write_data(&dir);
        let output = dir.path().join("site").join("index.html");

        let args = BuildArgs {
            data: Some(data.clone()),
            template: None,
            output: Some(output.clone()),
        };
        let report = build_dashboard(&Settings::default(), &args, &password()).unwrap();

        assert_eq!(report.output, output);
        assert_eq!(report.plaintext_len, fs::read_to_string(&data).unwrap().len());

        let html = fs::read_to_string(&output).unwrap();
        assert!(!html.contains(page::PLACEHOLDER));
        assert!(!html.contains("PDD"));

        let envelope = page::extract_envelope(&html).unwrap();
        let payload = vault::decode(&envelope, &password()).unwrap();
        assert_eq!(payload["ccPositions"][0]["ticker"], "PDD");
    }

    #[test]
    fn test_custom_template_from_settings() {
        let dir = TempDir::new().unwrap();
        let data = write_data(&dir);
        let template = dir.path().join("template.html");
        fs::write(&template, "<p>x</p><script>var E = __ENCRYPTED_DATA__;</script>").unwrap();

        let settings = Settings {
            template_file: Some(template),
            output_file: dir.path().join("out.html"),
            data_file: data,
            ..Settings::default()
        };
        build_dashboard(&settings, &BuildArgs::default(), &password()).unwrap();

        let html = fs::read_to_string(dir.path().join("out.html")).unwrap();
        assert!(html.starts_with("<p>x</p><script>var E = {\"salt\":"));
    }

    #[test]
    fn test_bad_template_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let data = write_data(&dir);
        let template = dir.path().join("template.html");
        fs::write(&template, "<html></html>").unwrap();
        let output = dir.path().join("index.html");

        let args = BuildArgs {
            data: Some(data),
            template: Some(template),
            output: Some(output.clone()),
        };
        let err = build_dashboard(&Settings::default(), &args, &password()).unwrap_err();

        assert!(matches!(err, crate::error::WheelboardError::Template(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_data_file() {
        let dir = TempDir::new().unwrap();
        let args = BuildArgs {
            data: Some(dir.path().join("missing.json")),
            template: None,
            output: Some(dir.path().join("index.html")),
        };
        assert!(build_dashboard(&Settings::default(), &args, &password()).is_err());
    }

    #[test]
    fn test_seal_data() {
        let dir = TempDir::new().unwrap();
        let data = write_data(&dir);

        let envelope = seal_data(&data, &password()).unwrap();
        let payload = vault::decode(&envelope, &password()).unwrap();
        assert_eq!(payload["updatedAt"], "2026-02-23");
    }
}
