//! Inspection commands that need no password

use std::path::Path;

use crate::display::{format_envelope_info, format_summary};
use crate::error::WheelboardResult;
use crate::models::{Portfolio, PortfolioSummary};
use crate::storage::read_json_required;
use crate::vault::PlaintextPayload;

use super::open::load_envelope;

/// Handle `inspect`: show envelope field sizes of a page or envelope file
pub fn handle_inspect(artifact: &Path) -> WheelboardResult<()> {
    let envelope = load_envelope(artifact)?;
    let info = envelope.info()?;

    print!("{}", format_envelope_info(&info));
    Ok(())
}

/// Summarize a plaintext portfolio data file
pub fn summarize_file(path: &Path) -> WheelboardResult<PortfolioSummary> {
    let payload: PlaintextPayload = read_json_required(path)?;
    let portfolio = Portfolio::from_payload(&payload)?;
    Ok(PortfolioSummary::from_portfolio(&portfolio))
}

/// Handle `summary`
pub fn handle_summary(data_path: &Path) -> WheelboardResult<()> {
    let summary = summarize_file(data_path)?;
    print!("{}", format_summary(&summary));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_summarize_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("portfolio.json");
        fs::write(
            &path,
            r#"{"updatedAt":"2026-02-23","ccPositions":[{"ticker":"PDD","premium":58}],
                "cspPositions":[{"ticker":"NVDA","collateral":17000}]}"#,
        )
        .unwrap();

        let summary = summarize_file(&path).unwrap();
        assert_eq!(summary.cc_count, 1);
        assert_eq!(summary.csp_count, 1);
        assert_eq!(summary.csp_collateral, 17000.0);
    }

    #[test]
    fn test_summarize_rejects_wrong_shape() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("portfolio.json");
        fs::write(&path, r#"{"ccPositions": "none"}"#).unwrap();

        assert!(summarize_file(&path).unwrap_err().is_validation());
    }
}
