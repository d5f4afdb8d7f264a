//! Content fetcher: dump the visible text of a list of pages to files.
//!
//! For every URL in the input list the fetcher downloads the page, extracts
//! its visible text, and writes it to `<output_dir>/<derived name>.txt`.
//! Any failure along the way (bad URL, network error, non-success status,
//! undecodable body, write error) puts the URL on the unreadable list and the
//! run moves on.

use crate::config::Settings;
use crate::error::{Result, ScrapeError};
use crate::models::{FetchOutcome, FetchSummary};
use crate::outputs::text_dump;
use crate::pacing::Pacer;
use reqwest::Client;
use scraper::Html;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument, warn};
use url::Url;

/// Elements whose text is never rendered. `noscript` text is kept.
const HIDDEN_ELEMENTS: [&str; 3] = ["script", "style", "template"];

/// Read a line-delimited URL list. Lines are trimmed and blank lines skipped.
#[instrument(level = "info")]
pub async fn load_urls(path: &str) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).await?;
    let urls: Vec<String> = parse_url_list(&text);
    info!(count = urls.len(), "Loaded URL list");
    Ok(urls)
}

pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// All visible text nodes of `html`, each trimmed, joined by newlines.
pub fn extract_visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document
        .tree
        .root()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|a| {
                a.value()
                    .as_element()
                    .is_some_and(|e| HIDDEN_ELEMENTS.contains(&e.name()))
            });
            if hidden {
                return None;
            }
            let trimmed = text.trim();
            (!trimmed.is_empty()).then_some(trimmed)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Download `url` and return its visible text.
#[instrument(level = "info", skip(client))]
pub async fn fetch_page_text(client: &Client, url: &Url) -> Result<String> {
    let response = client.get(url.as_str()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let body = response.text().await?;
    Ok(extract_visible_text(&body))
}

async fn process_url(
    client: &Client,
    settings: &Settings,
    output_dir: &Path,
    url: &str,
    position: usize,
) -> Result<(PathBuf, usize)> {
    let parsed = Url::parse(url)?;
    if parsed.host_str().is_none() {
        return Err(ScrapeError::Parse(format!("no host in {url}")));
    }
    let name = text_dump::file_name(url, position, settings.unique_filenames);
    let text = fetch_page_text(client, &parsed).await?;
    text_dump::write_text_file(output_dir, &name, url, &text).await
}

/// Fetch every URL in order and write one text file per readable page.
///
/// # Arguments
///
/// * `client` - A client built with [`crate::http::fetch_client`] (carries the timeout)
/// * `settings` - Supplies `unique_filenames`
/// * `pacer` - Gate awaited before every URL
/// * `output_dir` - Existing, writable directory for the text files
/// * `urls` - URLs in input order; blank lines already removed
///
/// # Returns
///
/// A [`FetchSummary`] with one [`FetchOutcome`] per input URL, in input order.
/// Parse, network, status and write failures are recorded as
/// [`FetchOutcome::Unreadable`] and never stop the run, so there is no error
/// path.
#[instrument(level = "info", skip_all, fields(total = urls.len(), output_dir = %output_dir.display()))]
pub async fn run(
    client: &Client,
    settings: &Settings,
    pacer: &mut Pacer,
    output_dir: &Path,
    urls: &[String],
) -> FetchSummary {
    let mut summary = FetchSummary::default();

    for (i, url) in urls.iter().enumerate() {
        pacer.wait().await;
        info!(index = i + 1, total = urls.len(), %url, "Processing");

        let outcome = match process_url(client, settings, output_dir, url, i + 1).await {
            Ok((path, bytes)) => {
                info!(%url, path = %path.display(), bytes, "Saved page text");
                FetchOutcome::Written {
                    url: url.clone(),
                    path,
                    bytes,
                }
            }
            Err(e) => {
                warn!(%url, error = %e, "Failed to read URL");
                FetchOutcome::Unreadable {
                    url: url.clone(),
                    reason: e.to_string(),
                }
            }
        };
        summary.outcomes.push(outcome);
    }

    info!(
        written = summary.written().len(),
        unreadable = summary.unreadable().len(),
        "Fetch run finished"
    );
    summary
}
