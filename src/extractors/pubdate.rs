//! Publish/update date extraction.
//!
//! Articles rarely carry one authoritative date field. This extractor
//! harvests every plausible signal in a single pass over the document and
//! lets a scoring pass decide:
//!
//! 1. **URL path** - a strict `YYYY/MM/DD` pattern in the article URL
//! 2. **Structured data** - JSON-LD `dateModified`/`datePublished`/`dateCreated`,
//!    both `@graph` and flat forms
//! 3. **`<time>` elements** - machine-readable `datetime` attributes,
//!    classified by the element's visible text
//! 4. **Meta/attribute conventions** - the lookup tables in [`crate::defines`]
//!
//! Every harvested candidate lands in one list; candidates are then ranked
//! by `(score, kind == Updated)` descending and the first candidate of each
//! kind wins its axis. Duplicate timestamps from independent signals are
//! kept on purpose - the higher-scored copy simply wins.
//!
//! Extraction is best-effort throughout: pattern misses, unparseable date
//! strings, and missing attributes produce no candidate and no error.

use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::dates::{match_strict_date, parse_date_string};
use crate::defines::DateTables;
use crate::models::{ArticleDates, DateCandidate, DateKind};
use crate::parsers;

/// Base confidence for meta/attribute evidence before adjustments.
const META_BASE_SCORE: i32 = 6;
/// Dates older than this many days are down-weighted as likely boilerplate.
const VERY_OLD_DAYS: i64 = 25 * 365;

static UPDATED_TEXT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)updated|modified").unwrap());
static PUBLISHED_TEXT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)published|\bon:").unwrap());

/// Determines the most probable published and last-updated timestamps for
/// an article.
///
/// The extractor holds the lookup tables driving the meta/attribute
/// harvester and retains the last computed result, so both axes stay
/// readable after [`parse`](PubdateExtractor::parse) returns.
///
/// # Example
///
/// ```ignore
/// let doc = Html::parse_document(&html);
/// let mut extractor = PubdateExtractor::new();
/// let dates = extractor.parse(url, &doc);
/// println!("published: {:?}, updated: {:?}", dates.published, dates.updated);
/// ```
#[derive(Debug)]
pub struct PubdateExtractor {
    tables: DateTables,
    /// The publication date selected by the last `parse` call.
    pub pubdate: Option<DateTime<FixedOffset>>,
    /// The last-modified date selected by the last `parse` call.
    pub updatedate: Option<DateTime<FixedOffset>>,
}

impl Default for PubdateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PubdateExtractor {
    /// Create an extractor using the built-in lookup tables.
    pub fn new() -> Self {
        Self::with_tables(DateTables::default())
    }

    /// Create an extractor with substitute lookup tables.
    pub fn with_tables(tables: DateTables) -> Self {
        PubdateExtractor {
            tables,
            pubdate: None,
            updatedate: None,
        }
    }

    /// Harvest every date signal from the URL and document, rank the
    /// candidates, and select the best timestamp per axis.
    ///
    /// # Arguments
    ///
    /// * `article_url` - The article URL (scanned for an embedded date)
    /// * `doc` - The parsed document
    ///
    /// # Returns
    ///
    /// Both axes, each independently absent when no evidence of that kind
    /// was found. The same values remain readable on `pubdate` and
    /// `updatedate` after the call.
    #[instrument(level = "debug", skip_all, fields(url = %article_url))]
    pub fn parse(&mut self, article_url: &str, doc: &Html) -> ArticleDates {
        let mut matches: Vec<DateCandidate> = Vec::new();

        self.harvest_url_date(article_url, &mut matches);
        self.harvest_structured_data(doc, &mut matches);
        self.harvest_time_elements(doc, &mut matches);
        self.harvest_meta_tags(doc, Local::now().date_naive(), &mut matches);

        debug!(candidates = matches.len(), "Harvest complete");
        let dates = select_dates(&mut matches);
        debug!(updated = ?dates.updated, published = ?dates.published, "Dates selected");

        self.updatedate = dates.updated;
        self.pubdate = dates.published;
        dates
    }

    /// URL dates are set once at publication and rarely altered, so a match
    /// gets the highest fixed score in the system.
    fn harvest_url_date(&self, article_url: &str, matches: &mut Vec<DateCandidate>) {
        if let Some(date_str) = match_strict_date(article_url) {
            if let Some(timestamp) = parse_date_string(date_str) {
                matches.push(DateCandidate {
                    timestamp,
                    score: 10,
                    kind: DateKind::Published,
                });
            }
        }
    }

    /// JSON-LD blocks, both `@graph` and flat. Graph entries score 10; flat
    /// keys score 9, reflecting slightly higher ambiguity in flat form.
    fn harvest_structured_data(&self, doc: &Html, matches: &mut Vec<DateCandidate>) {
        for object in parsers::get_ld_json_objects(doc) {
            if let Some(Value::Array(graph)) = object.get("@graph") {
                for item in graph {
                    let Some(item) = item.as_object() else {
                        continue;
                    };
                    for (key, kind) in [
                        ("dateModified", DateKind::Updated),
                        ("datePublished", DateKind::Published),
                    ] {
                        let parsed = item
                            .get(key)
                            .and_then(Value::as_str)
                            .and_then(parse_date_string);
                        if let Some(timestamp) = parsed {
                            matches.push(DateCandidate {
                                timestamp,
                                score: 10,
                                kind,
                            });
                        }
                    }
                }
            } else {
                for (key, kind) in [
                    ("dateModified", DateKind::Updated),
                    ("datePublished", DateKind::Published),
                    ("dateCreated", DateKind::Published),
                ] {
                    let parsed = object
                        .get(key)
                        .and_then(Value::as_str)
                        .and_then(parse_date_string);
                    if let Some(timestamp) = parsed {
                        matches.push(DateCandidate {
                            timestamp,
                            score: 9,
                            kind,
                        });
                    }
                }
            }
        }
    }

    /// `<time>` elements with a machine-readable `datetime` attribute,
    /// classified by their visible text.
    fn harvest_time_elements(&self, doc: &Html, matches: &mut Vec<DateCandidate>) {
        for element in parsers::get_tags(doc, "time") {
            let Some(raw) = parsers::get_attribute(&element, "datetime") else {
                continue;
            };
            let Some(timestamp) = parse_date_string(raw) else {
                continue;
            };
            let (kind, score) = classify_time_text(&parsers::text_content(&element));
            matches.push(DateCandidate {
                timestamp,
                score,
                kind,
            });
        }
    }

    /// Known metadata names and attribute patterns from the lookup tables.
    fn harvest_meta_tags(&self, doc: &Html, today: NaiveDate, matches: &mut Vec<DateCandidate>) {
        let mut candidates = Vec::new();

        for name in &self.tables.updated_meta {
            for element in parsers::get_metatags(doc, name) {
                candidates.push((element, "content", DateKind::Updated));
            }
        }
        for name in &self.tables.published_meta {
            for element in parsers::get_metatags(doc, name) {
                candidates.push((element, "content", DateKind::Published));
            }
        }
        for pattern in &self.tables.attr_patterns {
            for element in parsers::get_elements_by_attrib(doc, &pattern.attribute, &pattern.value)
            {
                candidates.push((element, pattern.content.as_str(), DateKind::Unknown));
            }
        }

        for (element, content_attr, kind) in candidates {
            let Some(raw) = parsers::get_attribute(&element, content_attr) else {
                continue;
            };
            let Some(timestamp) = parse_date_string(raw) else {
                continue;
            };
            let is_meta_tag = element.value().name().eq_ignore_ascii_case("meta");
            let score = score_meta_candidate(&timestamp, kind, is_meta_tag, today);
            matches.push(DateCandidate {
                timestamp,
                score,
                kind,
            });
        }
    }
}

/// Classify a `<time>` element by its visible text.
///
/// Locale- and phrasing-fragile by nature; isolated here so the heuristic
/// can be replaced without touching the harvester.
fn classify_time_text(text: &str) -> (DateKind, i32) {
    if UPDATED_TEXT_RE.is_match(text) {
        (DateKind::Updated, 8)
    } else if PUBLISHED_TEXT_RE.is_match(text) {
        (DateKind::Published, 7)
    } else {
        (DateKind::Unknown, 5)
    }
}

/// Score one meta/attribute candidate.
///
/// Base 6, adjusted additively: +1 for a `<meta>` tag (the more standardized
/// convention), +2 for updated-axis evidence (explicit modification markers
/// are rarer and more deliberate), -2 for dates strictly in the future
/// (scheduling/template artifacts), -1 for dates more than 25 years past
/// (likely boilerplate defaults).
fn score_meta_candidate(
    timestamp: &DateTime<FixedOffset>,
    kind: DateKind,
    is_meta_tag: bool,
    today: NaiveDate,
) -> i32 {
    let mut score = META_BASE_SCORE;
    if is_meta_tag {
        score += 1;
    }
    if kind == DateKind::Updated {
        score += 2;
    }
    let days_diff = (today - timestamp.date_naive()).num_days();
    if days_diff < 0 {
        score -= 2;
    } else if days_diff > VERY_OLD_DAYS {
        score -= 1;
    }
    score
}

/// Rank the candidate list and pick a winner per axis.
///
/// The comparator is explicit: score is the primary key; among equal scores
/// an `Updated` candidate outranks a non-`Updated` one, favoring the
/// last-modified axis when evidence is otherwise equivalent. The sort is
/// stable, so harvest order breaks any remaining ties. `Unknown` candidates
/// take part in the ordering but are never selected.
fn select_dates(matches: &mut [DateCandidate]) -> ArticleDates {
    matches.sort_by(|a, b| {
        (b.score, b.kind == DateKind::Updated).cmp(&(a.score, a.kind == DateKind::Updated))
    });

    ArticleDates {
        updated: matches
            .iter()
            .find(|c| c.kind == DateKind::Updated)
            .map(|c| c.timestamp),
        published: matches
            .iter()
            .find(|c| c.kind == DateKind::Published)
            .map(|c| c.timestamp),
    }
}
