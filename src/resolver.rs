//! Redirect resolution for aggregator links.
//!
//! Resolution happens in two steps:
//!
//! 1. [`resolve_redirect`] sends one request with redirects disabled and reads
//!    the `Location` header of a redirect response.
//! 2. [`extract_final_url`] unwraps a destination carried in a `q=` query
//!    parameter, e.g. `https://news.google.com/url?q=https%3A%2F%2Fsite.com%2Fpage`.
//!
//! The second step is pure so it can be applied to any string.

use crate::error::Result;
use crate::models::Resolution;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, StatusCode, header::LOCATION};
use tracing::{debug, info, instrument};

/// Statuses whose `Location` header is taken as the redirect target.
const REDIRECT_STATUSES: [StatusCode; 5] = [
    StatusCode::MOVED_PERMANENTLY,
    StatusCode::FOUND,
    StatusCode::SEE_OTHER,
    StatusCode::TEMPORARY_REDIRECT,
    StatusCode::PERMANENT_REDIRECT,
];

static WRAPPED_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[?&]q=([^&]+)").expect("static regex"));

/// The immediate answer to a non-following request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectTarget {
    /// Redirect status with a `Location` header.
    Location(String),
    /// Anything else: the input URL stands.
    Unchanged(String),
}

impl RedirectTarget {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Location(s) | Self::Unchanged(s) => s,
        }
    }
}

/// Ask the aggregator where `url` points, without following the redirect.
///
/// # Arguments
///
/// * `client` - A client that does not follow redirects ([`crate::http::resolver_client`])
/// * `url` - The candidate URL to request
///
/// # Returns
///
/// [`RedirectTarget::Location`] with the exact header value when the status is
/// 301, 302, 303, 307 or 308 and a `Location` header is present. Any other
/// response, including a redirect without a usable `Location`, gives
/// [`RedirectTarget::Unchanged`] holding `url`.
///
/// # Errors
///
/// Returns [`crate::error::ScrapeError::Network`] when the request cannot be
/// sent or no response arrives. Status codes are never errors here.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn resolve_redirect(client: &Client, url: &str) -> Result<RedirectTarget> {
    let response = client.get(url).send().await?;
    let status = response.status();

    if REDIRECT_STATUSES.contains(&status) {
        if let Some(location) = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
        {
            info!(%status, %location, "Found redirect");
            return Ok(RedirectTarget::Location(location.to_string()));
        }
        debug!(%status, "Redirect status without Location header");
    } else {
        debug!(%status, "No redirect; keeping original URL");
    }

    Ok(RedirectTarget::Unchanged(url.to_string()))
}

/// Unwrap the destination embedded as `?q=` or `&q=` in `redirect`.
///
/// Only the first occurrence is honored. The value is percent-decoded
/// (invalid UTF-8 is replaced, `+` is left alone). Strings without a wrapped
/// value are returned unchanged.
pub fn extract_final_url(redirect: &str) -> String {
    match WRAPPED_URL.captures(redirect).and_then(|c| c.get(1)) {
        Some(m) => {
            let decoded = urlencoding::decode_binary(m.as_str().as_bytes());
            String::from_utf8_lossy(&decoded).into_owned()
        }
        None => redirect.to_string(),
    }
}

/// Run both resolution steps for one URL.
pub async fn resolve(client: &Client, url: &str) -> Result<Resolution> {
    let target = resolve_redirect(client, url).await?;
    debug!(redirect = target.as_str(), "Resolved redirect target");
    let resolution = match target {
        RedirectTarget::Location(redirect) => {
            let final_url = extract_final_url(&redirect);
            Resolution::Redirected {
                redirect,
                final_url,
            }
        }
        RedirectTarget::Unchanged(original) => Resolution::IdentityFallback {
            final_url: extract_final_url(&original),
        },
    };
    Ok(resolution)
}
