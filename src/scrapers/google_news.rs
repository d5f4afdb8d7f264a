//! Google News search scraper.
//!
//! Searches [Google News](https://news.google.com/search) for a term and keeps
//! every hyperlink whose target contains the article marker (`/articles/` by
//! default). Hrefs on the results page are relative (`./articles/CBMi...`) and
//! are resolved against the aggregator origin.
//!
//! # Pagination
//!
//! The first page sends only `q=<term>`. Page `n` (zero-based) adds
//! `<page_param>=<n * page_size>` so each request asks for the next slice of
//! results.
//!
//! # Repeated links
//!
//! Every matching anchor is kept by default, so a link that appears twice on
//! a page is resolved twice. Set `dedupe_links` to keep only the first
//! occurrence of each link across all pages.

use crate::config::Settings;
use crate::error::{Result, ScrapeError};
use crate::pacing::Pacer;
use crate::utils::truncate_for_log;
use itertools::Itertools;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector"));

/// Query parameters for one results page.
pub fn page_query(settings: &Settings, term: &str, page: usize) -> Vec<(String, String)> {
    let mut query = vec![("q".to_string(), term.to_string())];
    if page > 0 {
        query.push((
            settings.page_param.clone(),
            (page * settings.page_size).to_string(),
        ));
    }
    query
}

/// Pull absolute article URLs out of a results page, in document order.
pub fn extract_article_links(html: &str, base: &Url, marker: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();
    for element in document.select(&LINK_SELECTOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !href.contains(marker) {
            continue;
        }
        match base.join(href) {
            Ok(resolved) => links.push(resolved.to_string()),
            Err(e) => debug!(%href, error = %e, "Skipping unresolvable href"),
        }
    }
    links
}

/// Fetch one results page and return its article links.
#[instrument(level = "info", skip(client, settings, base))]
async fn fetch_page(
    client: &Client,
    settings: &Settings,
    base: &Url,
    term: &str,
    page: usize,
) -> Result<Vec<String>> {
    let response = client
        .get(&settings.search_url)
        .query(&page_query(settings, term, page))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }

    let html = response.text().await?;
    debug!(body = %truncate_for_log(&html, 300), "Fetched results page");
    Ok(extract_article_links(&html, base, &settings.article_marker))
}

/// Search the aggregator for `term` and collect article links from `pages`
/// result pages.
///
/// Failed pages are logged and skipped, so the result may be partial.
///
/// # Arguments
///
/// * `client` - Client used for the search requests
/// * `settings` - Search endpoint, base origin, marker, pagination and dedup options
/// * `pacer` - Gate applied before every page request
/// * `term` - The search term, sent as `q`
/// * `pages` - Number of result pages to request
///
/// # Returns
///
/// Absolute article URLs in page order. With `dedupe_links` set, repeated
/// links are kept at their first position only.
///
/// # Errors
///
/// Returns [`ScrapeError::InvalidUrl`] if the `base_url` setting cannot be
/// parsed. Network and status failures never surface here.
#[instrument(level = "info", skip(client, settings, pacer))]
pub async fn collect_links(
    client: &Client,
    settings: &Settings,
    pacer: &mut Pacer,
    term: &str,
    pages: usize,
) -> Result<Vec<String>> {
    let base = Url::parse(&settings.base_url)?;
    let mut links = Vec::new();

    for page in 0..pages {
        pacer.wait().await;
        match fetch_page(client, settings, &base, term, page).await {
            Ok(found) => {
                info!(page = page + 1, count = found.len(), "Collected article links");
                links.extend(found);
            }
            Err(e) if e.is_network() => {
                warn!(page = page + 1, error = %e, "Error fetching results page; skipping");
            }
            Err(e) => {
                error!(page = page + 1, error = %e, "Unexpected error on results page; skipping");
            }
        }
    }

    let links: Vec<String> = if settings.dedupe_links {
        links.into_iter().unique().collect()
    } else {
        links
    };
    info!(count = links.len(), %term, "Link collection finished");
    Ok(links)
}
