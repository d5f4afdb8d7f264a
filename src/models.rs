//! Data models produced by the two pipelines.
//!
//! - [`ResolutionRecord`]: one per URL handed to the redirect resolver
//! - [`Resolution`]: how that URL was resolved (redirect, identity, or failure)
//! - [`FetchOutcome`]: one per URL handed to the content fetcher
//! - [`FetchSummary`]: the ordered outcomes of a fetch run
//!
//! Records are built once and never mutated afterwards.

use std::path::PathBuf;

/// Outcome of resolving a single aggregator URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The server answered with a redirect status and a `Location` header.
    Redirected {
        /// The exact `Location` header value.
        redirect: String,
        /// The unwrapped destination (or `redirect` if nothing was wrapped).
        final_url: String,
    },
    /// No redirect was offered; the original URL stands in for the redirect.
    IdentityFallback {
        /// Final-URL extraction applied to the original URL.
        final_url: String,
    },
    /// The request failed before any response arrived.
    Failed {
        /// Human-readable failure description.
        reason: String,
    },
}

/// The per-URL record written to the redirect report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRecord {
    /// The URL as supplied by the user or the link collector.
    pub original: String,
    pub outcome: Resolution,
}

impl ResolutionRecord {
    /// The immediate redirect target, or the original URL when none was offered.
    ///
    /// `None` for failed resolutions.
    pub fn redirect(&self) -> Option<&str> {
        match &self.outcome {
            Resolution::Redirected { redirect, .. } => Some(redirect),
            Resolution::IdentityFallback { .. } => Some(&self.original),
            Resolution::Failed { .. } => None,
        }
    }

    /// The decoded destination. `None` for failed resolutions.
    pub fn final_url(&self) -> Option<&str> {
        match &self.outcome {
            Resolution::Redirected { final_url, .. }
            | Resolution::IdentityFallback { final_url } => Some(final_url),
            Resolution::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Resolution::Failed { .. })
    }
}

/// What happened to one URL in the content fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Text was extracted and written to `path`.
    Written {
        url: String,
        path: PathBuf,
        /// Size of the written file.
        bytes: usize,
    },
    /// The URL could not be fetched, parsed, or written.
    Unreadable { url: String, reason: String },
}

/// Ordered outcomes of a content fetch run, one per input URL.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchSummary {
    pub outcomes: Vec<FetchOutcome>,
}

impl FetchSummary {
    /// Paths of the files that were written, in input order.
    pub fn written(&self) -> Vec<&PathBuf> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                FetchOutcome::Written { path, .. } => Some(path),
                FetchOutcome::Unreadable { .. } => None,
            })
            .collect()
    }

    /// URLs that could not be read, in input order.
    pub fn unreadable(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                FetchOutcome::Unreadable { url, .. } => Some(url.as_str()),
                FetchOutcome::Written { .. } => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_fallback_redirect_is_original() {
        let record = ResolutionRecord {
            original: "https://news.google.com/articles/abc".to_string(),
            outcome: Resolution::IdentityFallback {
                final_url: "https://news.google.com/articles/abc".to_string(),
            },
        };
        assert_eq!(record.redirect(), Some("https://news.google.com/articles/abc"));
        assert_eq!(record.final_url(), Some("https://news.google.com/articles/abc"));
        assert!(!record.is_failed());
    }

    #[test]
    fn test_failed_record_has_no_urls() {
        let record = ResolutionRecord {
            original: "https://news.google.com/articles/abc".to_string(),
            outcome: Resolution::Failed {
                reason: "connection refused".to_string(),
            },
        };
        assert_eq!(record.redirect(), None);
        assert_eq!(record.final_url(), None);
        assert!(record.is_failed());
    }

    #[test]
    fn test_summary_views_keep_order() {
        let summary = FetchSummary {
            outcomes: vec![
                FetchOutcome::Unreadable {
                    url: "http://a".to_string(),
                    reason: "timeout".to_string(),
                },
                FetchOutcome::Written {
                    url: "http://b".to_string(),
                    path: PathBuf::from("out/b.txt"),
                    bytes: 10,
                },
                FetchOutcome::Unreadable {
                    url: "http://c".to_string(),
                    reason: "HTTP 404".to_string(),
                },
            ],
        };
        assert_eq!(summary.unreadable(), vec!["http://a", "http://c"]);
        assert_eq!(summary.written(), vec![&PathBuf::from("out/b.txt")]);
    }
}
