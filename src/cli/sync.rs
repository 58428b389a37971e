//! Sync command
//!
//! Pulls the portfolio object out of an old build script and writes it as the
//! data file used by `build`.

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use crate::config::Settings;
use crate::error::WheelboardResult;
use crate::import::extract_data;
use crate::models::{Portfolio, PortfolioSummary};
use crate::storage::{read_text, write_json_atomic};

/// Arguments for `sync`
#[derive(Args, Debug, Clone)]
pub struct SyncArgs {
    /// Build script containing `const DATA = {...}`
    pub script: PathBuf,

    /// Data file to write (defaults to the configured data file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Extract the data object from `script` and write it to `output`
pub fn sync_from_script(script: &Path, output: &Path) -> WheelboardResult<Option<PortfolioSummary>> {
    let source = read_text(script)?;
    let payload = extract_data(&source)?;
    write_json_atomic(output, &payload, true)?;
    info!(script = %script.display(), output = %output.display(), "portfolio synced");

    Ok(Portfolio::from_payload(&payload)
        .ok()
        .map(|p| PortfolioSummary::from_portfolio(&p)))
}

/// Handle `sync`
pub fn handle_sync(settings: &Settings, args: SyncArgs) -> WheelboardResult<()> {
    let output = args.output.as_ref().unwrap_or(&settings.data_file);
    let summary = sync_from_script(&args.script, output)?;

    println!("Portfolio synced: {}", output.display());
    if let Some(summary) = summary {
        if let Some(updated) = summary.updated_at {
            println!("  Updated:  {}", updated);
        }
        println!("  CC:       {} positions", summary.cc_count);
        println!("  CSP:      {} positions", summary.csp_count);
        println!("  Idle:     {} positions", summary.idle_count);
        println!("  Closed:   {} trades", summary.closed_count);
    }

    Ok(())
}
