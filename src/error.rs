//! Error kinds shared by both pipelines.
//!
//! Each pipeline decides per operation which kinds it recovers from:
//!
//! | Operation | Recovered (logged, item skipped or recorded) | Propagated |
//! |-----------|-----------------------------------------------|------------|
//! | Link collection | `Network`, `Status` | none |
//! | Redirect resolution | `Network` (recorded as a failed entry) | none |
//! | Content fetch | every kind, per URL | none |
//! | Setup and report writing | none | `Io`, `Config`, `Format` |

use thiserror::Error;

/// Failure of a single scraping step.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Connection failure, timeout, or body read error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// A response could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("formatting error: {0}")]
    Format(#[from] std::fmt::Error),
}

impl ScrapeError {
    /// True for failures that happened on the wire rather than in local processing.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Status { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
