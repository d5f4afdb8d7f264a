//! File outputs of the two pipelines.
//!
//! - [`report`]: the redirect report written by `resolve`
//! - [`text_dump`]: one text file per page written by `fetch`
//!
//! # Output Structure
//!
//! ```text
//! ./google_news_redirects.txt     # resolve
//!
//! url_contents/                   # fetch
//! ├── www_example_com_news_today.txt
//! └── example_org.txt
//! ```

pub mod report;
pub mod text_dump;
