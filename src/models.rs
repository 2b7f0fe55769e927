//! Data models for date evidence and extraction results.
//!
//! This module defines the core data structures used throughout the application:
//! - [`FetchedPage`]: Raw article HTML as downloaded (or read from disk)
//! - [`DateKind`]: The semantic axis a date belongs to
//! - [`DateCandidate`]: A single scored piece of date evidence
//! - [`ArticleDates`]: The two-axis result of one extraction run
//! - [`DateReport`]: The serializable per-URL report emitted by the CLI
//!
//! Candidates are only ever constructed from strings that parsed successfully;
//! a failed parse never becomes a candidate.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A raw article page as fetched from a news source.
///
/// This struct holds the unprocessed HTML before it is handed to the
/// date extractor.
///
/// # Fields
///
/// * `source` - The URL the page was fetched from (also feeds the URL-date harvester)
/// * `html` - The raw HTML body
#[derive(Debug)]
pub struct FetchedPage {
    /// The source URL of the page.
    pub source: String,
    /// The raw HTML downloaded from the page.
    pub html: String,
}

/// The semantic axis a harvested date belongs to.
///
/// Every piece of date evidence is classified as publication time,
/// modification time, or undetermined. `Unknown` candidates participate in
/// ranking but are never selected as a final result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateKind {
    /// The date the content was last modified.
    Updated,
    /// The date the content was first published.
    Published,
    /// Evidence whose axis could not be determined.
    Unknown,
}

/// A single parsed date value with its confidence score and axis.
///
/// Candidates are accumulated into one append-only list per extraction run.
/// Duplicates (the same timestamp found via multiple heuristics) are
/// intentionally kept; repetition across independent signals is itself
/// evidence, and higher-scored duplicates simply win.
#[derive(Debug, Clone, Copy)]
pub struct DateCandidate {
    /// The successfully parsed calendar timestamp.
    pub timestamp: DateTime<FixedOffset>,
    /// Signed confidence weight; higher is more trustworthy.
    pub score: i32,
    /// Which axis this evidence speaks to.
    pub kind: DateKind,
}

/// The result of one extraction run: both date axes, each independently
/// nullable.
///
/// Created fresh per document and never mutated after return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArticleDates {
    /// The most probable last-modified timestamp, if any evidence was found.
    pub updated: Option<DateTime<FixedOffset>>,
    /// The most probable publication timestamp, if any evidence was found.
    pub published: Option<DateTime<FixedOffset>>,
}

impl ArticleDates {
    /// The single best-available timestamp: the updated date when present,
    /// otherwise the published date.
    pub fn best(&self) -> Option<DateTime<FixedOffset>> {
        self.updated.or(self.published)
    }
}

/// The per-URL report serialized to JSON output.
///
/// Timestamps are rendered as RFC 3339 strings so the report is readable
/// without a schema and round-trips through other tooling.
#[derive(Debug, Deserialize, Serialize)]
pub struct DateReport {
    /// The article URL the dates were extracted from.
    pub source: String,
    /// Short site tag derived from the URL host (e.g. "cnn" for lite.cnn.com).
    pub site: Option<String>,
    /// The selected last-modified timestamp, RFC 3339.
    pub updated: Option<String>,
    /// The selected publication timestamp, RFC 3339.
    pub published: Option<String>,
    /// The best-available timestamp (updated, falling back to published).
    pub best: Option<String>,
}

impl DateReport {
    /// Build a report row from an extraction result.
    pub fn new(source: &str, dates: &ArticleDates) -> Self {
        DateReport {
            source: source.to_string(),
            site: source_tag(source),
            updated: dates.updated.map(|d| d.to_rfc3339()),
            published: dates.published.map(|d| d.to_rfc3339()),
            best: dates.best().map(|d| d.to_rfc3339()),
        }
    }
}

/// Extract the domain name (before .com/.org/etc) from a URL.
/// For example: "https://lite.cnn.com/article" -> "cnn"
pub fn source_tag(source: &str) -> Option<String> {
    // Parse the URL and extract the host
    if let Ok(parsed) = url::Url::parse(source) {
        if let Some(host) = parsed.host_str() {
            // Split by dots and get the domain before the TLD
            let parts: Vec<&str> = host.split('.').collect();
            // Handle cases like "lite.cnn.com" -> "cnn" or "cnn.com" -> "cnn"
            if parts.len() >= 2 {
                return Some(parts[parts.len() - 2].to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_fetched_page_creation() {
        let page = FetchedPage {
            source: "https://example.com".to_string(),
            html: "<html></html>".to_string(),
        };
        assert_eq!(page.source, "https://example.com");
        assert_eq!(page.html, "<html></html>");
    }

    #[test]
    fn test_best_prefers_updated() {
        let dates = ArticleDates {
            updated: Some(ts("2024-01-02T00:00:00+00:00")),
            published: Some(ts("2023-12-01T00:00:00+00:00")),
        };
        assert_eq!(dates.best(), dates.updated);
    }

    #[test]
    fn test_best_falls_back_to_published() {
        let dates = ArticleDates {
            updated: None,
            published: Some(ts("2023-12-01T00:00:00+00:00")),
        };
        assert_eq!(dates.best(), dates.published);
    }

    #[test]
    fn test_best_empty() {
        assert_eq!(ArticleDates::default().best(), None);
    }

    #[test]
    fn test_report_serialization() {
        let dates = ArticleDates {
            updated: Some(ts("2024-01-02T08:30:00+00:00")),
            published: Some(ts("2023-12-01T00:00:00+00:00")),
        };
        let report = DateReport::new("https://lite.cnn.com/2023/12/01/article", &dates);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("2024-01-02T08:30:00"));
        assert!(json.contains("2023-12-01T00:00:00"));
        assert!(json.contains("\"site\":\"cnn\""));

        let back: DateReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.best, report.updated);
    }

    #[test]
    fn test_report_absent_dates() {
        let report = DateReport::new("https://example.com/article", &ArticleDates::default());
        assert_eq!(report.updated, None);
        assert_eq!(report.published, None);
        assert_eq!(report.best, None);
    }

    #[test]
    fn test_source_tag_subdomain() {
        assert_eq!(
            source_tag("https://lite.cnn.com/2025/05/06/article"),
            Some("cnn".to_string())
        );
        assert_eq!(
            source_tag("https://text.npr.org/article"),
            Some("npr".to_string())
        );
    }

    #[test]
    fn test_source_tag_simple_domain() {
        assert_eq!(
            source_tag("https://example.com/article"),
            Some("example".to_string())
        );
    }

    #[test]
    fn test_source_tag_invalid_url() {
        assert_eq!(source_tag("not a url"), None);
    }

    #[test]
    fn test_timestamps_keep_offset() {
        let east = FixedOffset::east_opt(2 * 3600).unwrap();
        let dt = east.with_ymd_and_hms(2024, 5, 6, 12, 0, 0).unwrap();
        let dates = ArticleDates {
            updated: None,
            published: Some(dt),
        };
        let report = DateReport::new("https://example.com/a", &dates);
        assert_eq!(
            report.published.as_deref(),
            Some("2024-05-06T12:00:00+02:00")
        );
    }
}
