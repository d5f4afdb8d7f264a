//! Plain-text redirect report.
//!
//! ```text
//! Google News URL Redirects
//! ==================================================
//!
//! 1. Original Google News URL:
//!    https://news.google.com/articles/CBMi...
//!
//!    Redirect URL:
//!    https://news.google.com/url?q=https%3A%2F%2Fsite.com%2Fpage
//!
//!    Final URL:
//!    https://site.com/page
//!
//! --------------------------------------------------
//!
//! ```
//!
//! Entries whose resolution failed carry an `Error:` section in place of the
//! redirect and final URLs, so the report has one block per input URL.

use crate::error::Result;
use crate::models::{Resolution, ResolutionRecord};
use std::fmt::Write;
use tokio::fs;
use tracing::{info, instrument};

const RULE_WIDTH: usize = 50;

/// Render the full report text.
pub fn render_report(records: &[ResolutionRecord]) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "Google News URL Redirects")?;
    writeln!(out, "{}\n", "=".repeat(RULE_WIDTH))?;

    for (i, record) in records.iter().enumerate() {
        writeln!(out, "{}. Original Google News URL:", i + 1)?;
        writeln!(out, "   {}\n", record.original)?;
        match &record.outcome {
            Resolution::Failed { reason } => {
                writeln!(out, "   Error:")?;
                writeln!(out, "   {}\n", reason)?;
            }
            _ => {
                writeln!(out, "   Redirect URL:")?;
                writeln!(out, "   {}\n", record.redirect().unwrap_or_default())?;
                writeln!(out, "   Final URL:")?;
                writeln!(out, "   {}\n", record.final_url().unwrap_or_default())?;
            }
        }
        writeln!(out, "{}\n", "-".repeat(RULE_WIDTH))?;
    }
    Ok(out)
}

/// Render the short console listing of final URLs.
pub fn render_summary(records: &[ResolutionRecord]) -> Result<String> {
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        match &record.outcome {
            Resolution::Failed { reason } => {
                writeln!(out, "{}. Unresolved: {} ({})", i + 1, record.original, reason)?
            }
            _ => writeln!(
                out,
                "{}. Final URL: {}",
                i + 1,
                record.final_url().unwrap_or_default()
            )?,
        }
    }
    Ok(out)
}

/// Write the report to `path`, replacing any previous report.
#[instrument(level = "info", skip(records), fields(count = records.len()))]
pub async fn write_report(records: &[ResolutionRecord], path: &str) -> Result<()> {
    let text = render_report(records)?;
    fs::write(path, text).await?;
    info!(path, "Wrote redirect report");
    Ok(())
}
