//! # News Redirects
//!
//! Two small scraping pipelines sharing one binary:
//!
//! - `resolve`: find where Google News article links really point. URLs come
//!   from the command line, an interactive prompt, or a Google News search;
//!   each one is requested without following redirects, the `Location`
//!   header is read, and a destination wrapped in `?q=` is decoded. Results
//!   go to stdout and to `google_news_redirects.txt`.
//! - `fetch`: download every page listed in `urls.txt` and write its visible
//!   text to `url_contents/<host>_<path>.txt`, then list the pages that could
//!   not be read.
//!
//! ## Usage
//!
//! ```sh
//! news_redirects resolve --search "climate" --pages 2
//! news_redirects fetch --input urls.txt --output-dir url_contents
//! ```
//!
//! ## Architecture
//!
//! Both pipelines run one request at a time:
//! 1. **Collecting**: gather candidate URLs (flags, prompt, search results)
//! 2. **Resolving / Fetching**: process each URL with pacing in between
//! 3. **Output**: write the report or the per-page text files

use clap::Parser;
use std::error::Error;
use std::io::IsTerminal;
use std::path::Path;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod batch;
mod cli;
mod config;
mod error;
mod fetcher;
mod http;
mod models;
mod outputs;
mod pacing;
mod prompt;
mod resolver;
mod scrapers;
mod utils;

use cli::{Cli, Command, FetchArgs, ResolveArgs};
use config::Settings;
use outputs::report;
use pacing::Pacer;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_redirects starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let settings = args.apply_overrides(Settings::load(args.config.as_deref()).await?);
    debug!(?settings, "Effective settings");

    match &args.command {
        Command::Resolve(resolve_args) => run_resolve(resolve_args, &settings).await?,
        Command::Fetch(fetch_args) => run_fetch(fetch_args, &settings).await?,
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

/// Gather URLs, resolve them, print the summary and write the report.
#[instrument(level = "info", skip_all)]
async fn run_resolve(args: &ResolveArgs, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let mut manual_urls = args.urls.clone();
    let mut search_term = args.search.clone().filter(|t| !t.trim().is_empty());

    let interactive =
        args.prompt || (manual_urls.is_empty() && search_term.is_none() && std::io::stdin().is_terminal());
    if interactive {
        let typed = tokio::task::spawn_blocking(|| {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut out = std::io::stdout();
            prompt::interactive(&mut input, &mut out)
        })
        .await??;
        manual_urls.extend(typed.urls);
        if search_term.is_none() {
            search_term = typed.search_term;
        }
    }

    let mut search_urls = Vec::new();
    if let Some(term) = &search_term {
        println!("Searching for '{term}'...");
        let client = http::search_client(settings)?;
        let mut pacer = Pacer::new(settings.page_delay());
        search_urls =
            scrapers::google_news::collect_links(&client, settings, &mut pacer, term, args.pages).await?;
        println!("Found {} URLs", search_urls.len());
    }

    let all_urls: Vec<String> = manual_urls.into_iter().chain(search_urls).collect();
    if all_urls.is_empty() {
        println!("No URLs to process.");
        return Ok(());
    }

    println!("\nProcessing {} URLs...", all_urls.len());
    let client = http::resolver_client(settings)?;
    let mut pacer = Pacer::new(settings.url_delay());
    let records = batch::run_batch(&client, &mut pacer, &all_urls).await;

    println!("\nResults:");
    println!("{}", "=".repeat(40));
    print!("{}", report::render_summary(&records)?);

    report::write_report(&records, &settings.report_path).await?;
    println!("\nDetailed results saved to '{}'", settings.report_path);
    Ok(())
}

/// Fetch every listed page and report the ones that could not be read.
#[instrument(level = "info", skip_all, fields(input = %args.input, output_dir = %args.output_dir))]
async fn run_fetch(args: &FetchArgs, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let output_dir = Path::new(&args.output_dir);
    ensure_writable_dir(output_dir).await?;

    let urls = fetcher::load_urls(&args.input).await?;
    let client = http::fetch_client(settings)?;
    let mut pacer = Pacer::new(settings.fetch_delay());
    let summary = fetcher::run(&client, settings, &mut pacer, output_dir, &urls).await;

    let unreadable = summary.unreadable();
    if unreadable.is_empty() {
        println!("\nAll URLs were processed successfully.");
    } else {
        println!("\n--- URLs that could not be read ---");
        for url in unreadable {
            println!("{url}");
        }
    }
    Ok(())
}
