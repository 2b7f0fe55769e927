//! Article page fetching with exponential backoff retry logic.
//!
//! This module downloads article HTML so the extractor has something to
//! work on. It includes automatic retry logic with exponential backoff and
//! jitter to handle transient failures gracefully.
//!
//! # Architecture
//!
//! The module uses a trait-based design for flexibility:
//! - [`FetchAsync`]: Core trait defining async page retrieval
//! - [`HttpFetcher`]: A `reqwest`-backed implementation
//! - [`RetryFetch`]: Decorator that adds retry logic to any `FetchAsync` implementation
//!
//! # Retry Strategy
//!
//! - Configurable maximum retry attempts (5 used by the CLI)
//! - Exponential backoff starting at 1 second
//! - Maximum delay capped at 30 seconds
//! - Random jitter (0-250ms) added to prevent thundering herd

use crate::models::FetchedPage;
use crate::utils::truncate_for_log;
use futures::stream::{self, StreamExt};
use rand::{Rng, rng};
use std::error::Error;
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

/// Trait for async page retrieval.
///
/// Implementors of this trait can download the body of a URL. The
/// abstraction allows different transports or decorators (like retry logic).
pub trait FetchAsync {
    /// Download the body of a URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to fetch
    ///
    /// # Returns
    ///
    /// The response body as text, or an error if the request failed.
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// A `reqwest`-backed [`FetchAsync`] implementation.
///
/// Non-success HTTP statuses are reported as errors so the retry decorator
/// can react to them.
#[derive(Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with the given User-Agent header.
    pub fn new(user_agent: &str) -> Result<Self, Box<dyn Error>> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(HttpFetcher { client })
    }
}

impl FetchAsync for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let t0 = Instant::now();
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(
            elapsed_ms = t0.elapsed().as_millis() as u128,
            bytes = body.len(),
            "Fetched page"
        );
        Ok(body)
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`FetchAsync`]
/// implementation.
///
/// # Backoff Strategy
///
/// The delay between retries follows this formula:
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryFetch<T> {
    /// The underlying fetcher to wrap.
    inner: T,
    /// Maximum number of retry attempts before giving up.
    max_retries: usize,
    /// Initial delay between retries (doubles with each attempt).
    base_delay: StdDuration,
    /// Maximum delay cap to prevent excessive waiting.
    max_delay: StdDuration,
}

impl<T> RetryFetch<T>
where
    T: FetchAsync,
{
    /// Create a new retry wrapper around an existing [`FetchAsync`]
    /// implementation.
    ///
    /// # Arguments
    ///
    /// * `inner` - The underlying fetcher to wrap
    /// * `max_retries` - Maximum number of retry attempts (5 recommended)
    /// * `base_delay` - Initial delay between retries (1 second recommended)
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> FetchAsync for RetryFetch<T>
where
    T: FetchAsync + fmt::Debug,
{
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            let attempt_t0 = Instant::now();
            match self.inner.fetch(url).await {
                Ok(body) => {
                    return Ok(body);
                }
                Err(e) => {
                    attempt += 1;
                    let attempt_dt = attempt_t0.elapsed();
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_attempt = attempt_dt.as_millis() as u128,
                            elapsed_ms_total = total_dt.as_millis() as u128,
                            error = %e,
                            "fetch() exhausted retries"
                        );
                        return Err(e);
                    }

                    // backoff calc
                    let mut delay = self.base_delay.saturating_mul(1 << (attempt - 1));
                    if delay > self.max_delay {
                        delay = self.max_delay;
                    }
                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = delay + StdDuration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_attempt = attempt_dt.as_millis() as u128,
                        elapsed_ms_total = total_dt.as_millis() as u128,
                        ?delay,
                        error = %e,
                        "fetch() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Fetch all article pages concurrently.
///
/// Downloads the HTML of each URL. Failed fetches are logged and skipped
/// without failing the entire batch.
///
/// # Arguments
///
/// * `fetcher` - The fetcher to download with (typically a [`RetryFetch`])
/// * `urls` - Article URLs to fetch
///
/// # Returns
///
/// A vector of successfully fetched [`FetchedPage`] objects.
#[instrument(level = "info", skip_all)]
pub async fn fetch_documents<F>(fetcher: &F, urls: Vec<String>) -> Vec<FetchedPage>
where
    F: FetchAsync + fmt::Debug,
{
    let pages: Vec<FetchedPage> = stream::iter(urls)
        .then(|url: String| async move {
            match fetcher.fetch(&url).await {
                Ok(html) => {
                    debug!(
                        %url,
                        bytes = html.len(),
                        preview = %truncate_for_log(&html, 120),
                        "Fetched article page"
                    );
                    Some(FetchedPage { source: url, html })
                }
                Err(e) => {
                    error!(error = %e, %url, "Fetch failed; skipping page");
                    None
                }
            }
        })
        .filter(|opt| std::future::ready(opt.is_some()))
        .map(|opt| opt.unwrap())
        .collect()
        .await;

    info!(count = pages.len(), "Fetched article pages");
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Fails a fixed number of times before succeeding.
    #[derive(Debug)]
    struct FlakyFetcher {
        failures_left: Mutex<usize>,
    }

    impl FlakyFetcher {
        fn new(failures: usize) -> Self {
            FlakyFetcher {
                failures_left: Mutex::new(failures),
            }
        }
    }

    impl FetchAsync for FlakyFetcher {
        async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
            let mut left = self.failures_left.lock().unwrap();
            if *left > 0 {
                *left -= 1;
                return Err("transient failure".into());
            }
            Ok(format!("<html>{url}</html>"))
        }
    }

    #[derive(Debug)]
    struct SelectiveFetcher;

    impl FetchAsync for SelectiveFetcher {
        async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
            if url.contains("bad") {
                Err("404".into())
            } else {
                Ok("<html>ok</html>".to_string())
            }
        }
    }

    #[tokio::test]
    async fn test_retry_succeeds_after_transient_failures() {
        let fetcher = RetryFetch::new(FlakyFetcher::new(2), 5, StdDuration::from_millis(1));
        let body = fetcher.fetch("https://example.com").await.unwrap();
        assert!(body.contains("example.com"));
    }

    #[tokio::test]
    async fn test_retry_exhausts_and_fails() {
        let fetcher = RetryFetch::new(FlakyFetcher::new(10), 2, StdDuration::from_millis(1));
        assert!(fetcher.fetch("https://example.com").await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_documents_skips_failures() {
        let urls = vec![
            "https://example.com/good".to_string(),
            "https://example.com/bad".to_string(),
            "https://example.com/also-good".to_string(),
        ];
        let pages = fetch_documents(&SelectiveFetcher, urls).await;
        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| p.html == "<html>ok</html>"));
        assert!(pages.iter().any(|p| p.source.ends_with("good")));
    }
}
