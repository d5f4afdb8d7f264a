//! Command-line interface definitions.
//!
//! Global options choose the settings file and user agent; each subcommand
//! can override the settings that concern it. Flags beat the settings file,
//! which beats the built-in defaults.

use crate::config::Settings;
use clap::{Args, Parser, Subcommand};

/// Resolve Google News redirect links and dump web page text.
///
/// # Examples
///
/// ```sh
/// # Prompt for URLs and a search term
/// news_redirects resolve
///
/// # Non-interactive: two URLs plus two pages of search results
/// news_redirects resolve --url https://news.google.com/articles/CBMi... --search "rust" --pages 2
///
/// # Dump the text of every page listed in urls.txt
/// news_redirects fetch --input urls.txt --output-dir url_contents
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML settings file
    #[arg(short, long, global = true, env = "NEWS_REDIRECTS_CONFIG")]
    pub config: Option<String>,

    /// User-Agent header sent with every request
    #[arg(long, global = true, env = "NEWS_REDIRECTS_USER_AGENT")]
    pub user_agent: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve aggregator links to their final destinations
    Resolve(ResolveArgs),
    /// Fetch pages and write their visible text to files
    Fetch(FetchArgs),
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Aggregator URL to resolve (repeatable)
    #[arg(short, long = "url")]
    pub urls: Vec<String>,

    /// Search term for collecting article links
    #[arg(short, long)]
    pub search: Option<String>,

    /// Number of search result pages to collect
    #[arg(short, long, default_value_t = 1)]
    pub pages: usize,

    /// Always prompt for URLs and a search term on stdin
    #[arg(long)]
    pub prompt: bool,

    /// Keep only the first occurrence of each collected article link
    #[arg(long)]
    pub dedupe_links: bool,

    /// Report file path
    #[arg(short, long)]
    pub report: Option<String>,

    /// Minimum delay between resolved URLs, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Minimum delay between search result pages, in milliseconds
    #[arg(long)]
    pub page_delay_ms: Option<u64>,
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// File with one URL per line
    #[arg(short, long, default_value = "urls.txt")]
    pub input: String,

    /// Directory for the extracted text files
    #[arg(short, long, default_value = "url_contents")]
    pub output_dir: String,

    /// Prefix file names with the URL's position to avoid overwrites
    #[arg(long)]
    pub unique_filenames: bool,

    /// Per-request timeout, in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Minimum delay between fetched pages, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

impl Cli {
    /// Apply flag overrides on top of loaded settings.
    pub fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if let Some(ua) = &self.user_agent {
            settings.user_agent = ua.clone();
        }
        match &self.command {
            Command::Resolve(args) => {
                if let Some(report) = &args.report {
                    settings.report_path = report.clone();
                }
                if let Some(ms) = args.delay_ms {
                    settings.url_delay_ms = ms;
                }
                if let Some(ms) = args.page_delay_ms {
                    settings.page_delay_ms = ms;
                }
                if args.dedupe_links {
                    settings.dedupe_links = true;
                }
            }
            Command::Fetch(args) => {
                if args.unique_filenames {
                    settings.unique_filenames = true;
                }
                if let Some(secs) = args.timeout_secs {
                    settings.fetch_timeout_secs = secs;
                }
                if let Some(ms) = args.delay_ms {
                    settings.fetch_delay_ms = ms;
                }
            }
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_parsing() {
        let cli = Cli::parse_from([
            "news_redirects",
            "resolve",
            "--url",
            "https://news.google.com/articles/A",
            "-u",
            "https://news.google.com/articles/B",
            "--search",
            "rust",
            "--pages",
            "3",
        ]);

        let Command::Resolve(args) = &cli.command else {
            panic!("expected resolve");
        };
        assert_eq!(args.urls.len(), 2);
        assert_eq!(args.search.as_deref(), Some("rust"));
        assert_eq!(args.pages, 3);
        assert!(!args.prompt);
    }

    #[test]
    fn test_fetch_defaults() {
        let cli = Cli::parse_from(["news_redirects", "fetch"]);
        let Command::Fetch(args) = &cli.command else {
            panic!("expected fetch");
        };
        assert_eq!(args.input, "urls.txt");
        assert_eq!(args.output_dir, "url_contents");
        assert!(!args.unique_filenames);
    }

    #[test]
    fn test_overrides_beat_settings() {
        let cli = Cli::parse_from([
            "news_redirects",
            "--user-agent",
            "agent/2",
            "resolve",
            "--report",
            "out.txt",
            "--delay-ms",
            "0",
        ]);
        let settings = cli.apply_overrides(Settings::default());
        assert_eq!(settings.user_agent, "agent/2");
        assert_eq!(settings.report_path, "out.txt");
        assert_eq!(settings.url_delay_ms, 0);
        assert_eq!(settings.page_delay_ms, 1000);
        assert!(!settings.dedupe_links);
    }

    #[test]
    fn test_dedupe_links_flag() {
        let cli = Cli::parse_from(["news_redirects", "resolve", "--dedupe-links"]);
        let settings = cli.apply_overrides(Settings::default());
        assert!(settings.dedupe_links);
    }

    #[test]
    fn test_fetch_overrides() {
        let cli = Cli::parse_from([
            "news_redirects",
            "fetch",
            "--unique-filenames",
            "--timeout-secs",
            "3",
        ]);
        let settings = cli.apply_overrides(Settings::default());
        assert!(settings.unique_filenames);
        assert_eq!(settings.fetch_timeout_secs, 3);
    }
}
