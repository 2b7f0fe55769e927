//! # dateline
//!
//! A command-line tool that determines the most probable "published" and
//! "last updated" dates for news article pages. No single authoritative
//! date field exists in the wild, so the extractor harvests every plausible
//! signal - URL path segments, JSON-LD structured data, `<time>` elements,
//! and a long tail of `<meta>` tag variants - scores each candidate, and
//! picks a winner per axis.
//!
//! ## Usage
//!
//! ```sh
//! dateline https://lite.cnn.com/2025/05/06/article-slug
//! dateline --html-file page.html https://example.com/2023/04/15/headline
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Fetching**: Download article HTML (concurrent, with retry/backoff),
//!    or read a local file
//! 2. **Extraction**: Harvest and score date candidates per document
//! 3. **Output**: Write a JSON report per URL to stdout or a file

use clap::Parser;
use itertools::Itertools;
use scraper::Html;
use std::error::Error;
use std::time::Duration as StdDuration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod dates;
mod defines;
mod extractors;
mod fetch;
mod models;
mod outputs;
mod parsers;
mod utils;

use cli::Cli;
use extractors::pubdate::PubdateExtractor;
use fetch::{HttpFetcher, RetryFetch, fetch_documents};
use models::{DateReport, FetchedPage};

#[tokio::main]
#[instrument]
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
    info!("dateline starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.urls, ?args.html_file, ?args.output, "Parsed CLI arguments");

    let urls: Vec<String> = args.urls.iter().unique().cloned().collect();
    if urls.len() < args.urls.len() {
        warn!(
            dropped = args.urls.len() - urls.len(),
            "Dropped duplicate URLs"
        );
    }

    // ---- Gather pages ----
    let pages: Vec<FetchedPage> = if let Some(ref path) = args.html_file {
        if urls.len() != 1 {
            error!(
                count = urls.len(),
                "--html-file requires exactly one URL (used for the URL-date check)"
            );
            return Err("--html-file requires exactly one URL".into());
        }
        let html = tokio::fs::read_to_string(path).await?;
        info!(path = %path, bytes = html.len(), "Read local HTML file");
        vec![FetchedPage {
            source: urls[0].clone(),
            html,
        }]
    } else {
        let fetcher = RetryFetch::new(
            HttpFetcher::new(&args.user_agent)?,
            5,
            StdDuration::from_secs(1),
        );
        fetch_documents(&fetcher, urls).await
    };

    // ---- Extract dates per page ----
    let mut reports = Vec::with_capacity(pages.len());
    for page in &pages {
        let doc = Html::parse_document(&page.html);
        let mut extractor = PubdateExtractor::new();
        let dates = extractor.parse(&page.source, &doc);
        info!(
            source = %page.source,
            updated = ?extractor.updatedate,
            published = ?extractor.pubdate,
            "Extracted dates"
        );
        reports.push(DateReport::new(&page.source, &dates));
    }

    let with_dates = reports.iter().filter(|r| r.best.is_some()).count();
    info!(
        total = reports.len(),
        with_dates,
        without_dates = reports.len() - with_dates,
        "Extraction complete"
    );

    // ---- Write report ----
    outputs::json::write_report(&reports, args.output.as_deref(), args.pretty).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
