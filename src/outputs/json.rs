//! JSON report output.
//!
//! Serializes the per-URL extraction reports to JSON, either to stdout
//! (the default) or to a file. Parent directories of the output path are
//! created as needed.

use crate::models::DateReport;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write the report rows as JSON.
///
/// # Arguments
///
/// * `reports` - One row per processed URL
/// * `output` - Target file path; `None` prints to stdout
/// * `pretty` - Pretty-print instead of compact JSON
///
/// # Returns
///
/// `Ok(())` on success, or an error if serialization or file writing fails.
#[instrument(level = "info", skip_all, fields(rows = reports.len()))]
pub async fn write_report(
    reports: &[DateReport],
    output: Option<&str>,
    pretty: bool,
) -> Result<(), Box<dyn Error>> {
    let json = if pretty {
        serde_json::to_string_pretty(reports)?
    } else {
        serde_json::to_string(reports)?
    };

    match output {
        Some(path) => {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    if let Err(e) = fs::create_dir_all(parent).await {
                        error!(path, error = %e, "Failed to create output dir");
                        return Err(e.into());
                    }
                }
            }
            fs::write(path, json).await?;
            info!(path, "Wrote JSON report");
        }
        None => {
            println!("{json}");
        }
    }

    Ok(())
}
