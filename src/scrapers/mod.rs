//! Link discovery from news aggregators.
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Google News | [`google_news`] | HTML scraping of search results | Keeps `/articles/` links only |
//!
//! A collector returns absolute candidate URLs and never fails on a bad
//! page: network errors are logged and the page is skipped.

pub mod google_news;
