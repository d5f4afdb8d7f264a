//! Runtime settings.
//!
//! Settings come from built-in defaults, optionally overlaid by a YAML file
//! (`--config` / `NEWS_REDIRECTS_CONFIG`), and finally by individual CLI flags.
//! Every field is optional in the file:
//!
//! ```yaml
//! user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
//! page_delay_ms: 1000
//! url_delay_ms: 500
//! fetch_timeout_secs: 10
//! unique_filenames: false
//! dedupe_links: false
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument};

/// Desktop browser identity sent with every request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// `User-Agent` header for all requests.
    pub user_agent: String,
    /// Aggregator origin that relative article links are resolved against.
    pub base_url: String,
    /// Search endpoint of the aggregator.
    pub search_url: String,
    /// Substring an href must contain to count as an article link.
    pub article_marker: String,
    /// Drop repeated article links from search results (first position wins).
    pub dedupe_links: bool,
    /// Query parameter carrying the result offset for pages after the first.
    pub page_param: String,
    /// Results per page, used to compute the offset.
    pub page_size: usize,
    /// Minimum gap between search result pages.
    pub page_delay_ms: u64,
    /// Minimum gap between URLs handed to the redirect resolver.
    pub url_delay_ms: u64,
    /// Minimum gap between pages fetched by the content fetcher.
    pub fetch_delay_ms: u64,
    /// Whole-request timeout for the content fetcher.
    pub fetch_timeout_secs: u64,
    /// Where the resolver writes its report.
    pub report_path: String,
    /// Prefix fetched filenames with their input position.
    pub unique_filenames: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            base_url: "https://news.google.com".to_string(),
            search_url: "https://news.google.com/search".to_string(),
            article_marker: "/articles/".to_string(),
            dedupe_links: false,
            page_param: "start".to_string(),
            page_size: 10,
            page_delay_ms: 1000,
            url_delay_ms: 500,
            fetch_delay_ms: 0,
            fetch_timeout_secs: 10,
            report_path: "google_news_redirects.txt".to_string(),
            unique_filenames: false,
        }
    }
}

impl Settings {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn url_delay(&self) -> Duration {
        Duration::from_millis(self.url_delay_ms)
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Parse settings from YAML text; missing keys keep their defaults.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load settings from a YAML file, or the defaults when no path is given.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).await?;
        let settings = Self::from_yaml(&text)?;
        info!(path, "Loaded configuration");
        Ok(settings)
    }
}
