//! Per-URL text files written by the content fetcher.
//!
//! Each file is named after the page's host and path, for example
//! `https://www.example.com/news/today` becomes `www_example_com_news_today.txt`,
//! and contains:
//!
//! ```text
//! URL: https://www.example.com/news/today
//!
//! <extracted text>
//! ```
//!
//! Two URLs that map to the same name overwrite each other unless
//! `unique_filenames` is enabled, which prefixes the input position.

use crate::error::Result;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, instrument};

/// Split a raw URL into its authority (`netloc`) and path, exactly as written.
///
/// The `url` crate normalizes a missing path to `/` and drops default ports,
/// which would change the derived name, so the input string is sliced instead.
fn split_netloc_path(raw: &str) -> (&str, &str) {
    let rest = raw.split_once("://").map_or(raw, |(_, rest)| rest);
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (netloc, tail) = rest.split_at(end);
    let path_end = tail.find(['?', '#']).unwrap_or(tail.len());
    (netloc, &tail[..path_end])
}

/// Derive the file stem for `url`. Pure and deterministic.
///
/// # Arguments
///
/// * `url` - The URL as it appeared in the input list
///
/// # Returns
///
/// The authority with `.` and `:` replaced by `_`, followed by the path with
/// `/` replaced by `_`. Query and fragment are ignored.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(derive_file_stem("https://example.com"), "example_com");
/// assert_eq!(derive_file_stem("http://a.com:80/x"), "a_com_80_x");
/// ```
pub fn derive_file_stem(url: &str) -> String {
    let (netloc, path) = split_netloc_path(url);
    let host = netloc.replace(['.', ':'], "_");
    let stem = format!("{}{}", host, path.replace('/', "_"));
    if stem.is_empty() { host } else { stem }
}

/// Full file name for the URL at 1-based `position` in the input list.
pub fn file_name(url: &str, position: usize, unique: bool) -> String {
    let stem = derive_file_stem(url);
    if unique {
        format!("{position:04}_{stem}.txt")
    } else {
        format!("{stem}.txt")
    }
}

/// The file body: source URL, blank line, extracted text.
pub fn render_text_file(url: &str, text: &str) -> String {
    format!("URL: {url}\n\n{text}")
}

/// Write one page's text into `dir`. Returns the path and byte count written.
#[instrument(level = "debug", skip(text))]
pub async fn write_text_file(dir: &Path, name: &str, url: &str, text: &str) -> Result<(PathBuf, usize)> {
    let path = dir.join(name);
    let body = render_text_file(url, text);
    fs::write(&path, &body).await?;
    debug!(path = %path.display(), bytes = body.len(), "Wrote page text");
    Ok((path, body.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_from_host_and_path() {
        assert_eq!(derive_file_stem("https://www.example.com/news/today"), "www_example_com_news_today");
        assert_eq!(derive_file_stem("https://example.com/"), "example_com_");
    }

    #[test]
    fn test_host_only_url_has_no_trailing_underscore() {
        assert_eq!(derive_file_stem("https://example.com"), "example_com");
        assert_eq!(derive_file_stem("https://example.com?x=1"), "example_com");
        assert_eq!(file_name("https://example.com", 1, false), "example_com.txt");
    }

    #[test]
    fn test_stem_ignores_query_and_fragment() {
        assert_eq!(derive_file_stem("https://example.com/a/b?x=1#top"), "example_com_a_b");
    }

    #[test]
    fn test_stem_keeps_written_port() {
        assert_eq!(derive_file_stem("http://127.0.0.1:8080/page"), "127_0_0_1_8080_page");
        assert_eq!(derive_file_stem("http://a.com:80/x"), "a_com_80_x");
    }

    #[test]
    fn test_stem_is_deterministic() {
        let url = "https://news.example.org/2025/05/06/story";
        assert_eq!(derive_file_stem(url), derive_file_stem(url));
    }

    #[test]
    fn test_colliding_urls_share_a_stem() {
        assert_eq!(derive_file_stem("https://a.b/c"), derive_file_stem("https://a.b/c?page=2"));
    }

    #[test]
    fn test_file_name_unique_prefix() {
        assert_eq!(file_name("https://a.b/c", 7, false), "a_b_c.txt");
        assert_eq!(file_name("https://a.b/c", 7, true), "0007_a_b_c.txt");
    }

    #[tokio::test]
    async fn test_write_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let (path, bytes) = write_text_file(dir.path(), "a_b_c.txt", "https://a.b/c", "Hello\nWorld")
            .await
            .unwrap();

        let body = std::fs::read_to_string(&path).unwrap();
        assert_eq!(body, "URL: https://a.b/c\n\nHello\nWorld");
        assert_eq!(bytes, body.len());
        assert_eq!(path, dir.path().join("a_b_c.txt"));
    }
}
