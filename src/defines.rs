//! Known metadata conventions that carry article dates.
//!
//! Publishers expose dates through a long tail of competing `<meta>` names
//! and attribute patterns. These tables enumerate the conventions the
//! extractor recognizes. The published list is derived by excluding the
//! updated names from the combined superset, so the two are disjoint by
//! construction.

use once_cell::sync::Lazy;

/// Metadata names that denote a last-modified timestamp.
pub const UPDATED_DATE_META_INFO: [&str; 12] = [
    "updated_time",
    "og:updated_time",
    "datemodified",
    "last-modified",
    "Last-Modified",
    "DC.date.modified",
    "article:modified_time",
    "modified_time",
    "modifiedDateTime",
    "dc.dcterms.modified",
    "lastmod",
    "eomportal-lastUpdate",
];

/// Every metadata name known to carry an article date, either axis.
pub const DATE_META_INFO: [&str; 34] = [
    "rnews:datePublished",
    "article:published_time",
    "OriginalPublicationDate",
    "datePublished",
    "og:published_time",
    "article_date_original",
    "publication_date",
    "sailthru.date",
    "PublishDate",
    "pubdate",
    "publish_date",
    "pub_date",
    "publish-date",
    "published-date",
    "publication-date",
    "article.published",
    "date_published",
    "parsely-pub-date",
    "dc.date",
    "DC.date.issued",
    "dcterms.created",
    "datecreated",
    "date",
    // modification-time variants
    "updated_time",
    "og:updated_time",
    "datemodified",
    "last-modified",
    "Last-Modified",
    "DC.date.modified",
    "article:modified_time",
    "modified_time",
    "modifiedDateTime",
    "dc.dcterms.modified",
    "lastmod",
];

/// Metadata names that denote a publication timestamp: the combined list
/// minus the updated names.
pub static PUBLISHED_DATE_META_INFO: Lazy<Vec<&'static str>> = Lazy::new(|| {
    DATE_META_INFO
        .iter()
        .filter(|name| !UPDATED_DATE_META_INFO.contains(name))
        .copied()
        .collect()
});

/// An `(attribute, value)` pattern marking a publish-date-bearing element,
/// plus the attribute holding the actual date string.
#[derive(Debug, Clone)]
pub struct AttrPattern {
    /// Attribute name to match on (e.g. `itemprop`).
    pub attribute: String,
    /// Attribute value to match (e.g. `datePublished`).
    pub value: String,
    /// Attribute the date string is read from (e.g. `content` or `datetime`).
    pub content: String,
}

impl AttrPattern {
    fn new(attribute: &str, value: &str, content: &str) -> Self {
        AttrPattern {
            attribute: attribute.to_string(),
            value: value.to_string(),
            content: content.to_string(),
        }
    }
}

/// Attribute patterns known to mark publish-date-bearing elements.
pub const PUBLISH_DATE_TAGS: [(&str, &str, &str); 12] = [
    ("property", "rnews:datePublished", "content"),
    ("property", "article:published_time", "content"),
    ("name", "OriginalPublicationDate", "content"),
    ("itemprop", "datePublished", "datetime"),
    ("property", "og:published_time", "content"),
    ("name", "article_date_original", "content"),
    ("name", "publication_date", "content"),
    ("name", "sailthru.date", "content"),
    ("name", "PublishDate", "content"),
    ("pubdate", "pubdate", "datetime"),
    ("name", "publish_date", "content"),
    ("class", "entry-date", "datetime"),
];

/// The lookup tables driving the meta/attribute harvester, bundled so tests
/// can substitute their own.
#[derive(Debug, Clone)]
pub struct DateTables {
    /// Metadata names contributing updated-date evidence.
    pub updated_meta: Vec<String>,
    /// Metadata names contributing published-date evidence.
    pub published_meta: Vec<String>,
    /// Attribute patterns contributing unknown-axis evidence.
    pub attr_patterns: Vec<AttrPattern>,
}

impl Default for DateTables {
    fn default() -> Self {
        DateTables {
            updated_meta: UPDATED_DATE_META_INFO
                .iter()
                .map(|s| s.to_string())
                .collect(),
            published_meta: PUBLISHED_DATE_META_INFO
                .iter()
                .map(|s| s.to_string())
                .collect(),
            attr_patterns: PUBLISH_DATE_TAGS
                .iter()
                .map(|(attribute, value, content)| AttrPattern::new(attribute, value, content))
                .collect(),
        }
    }
}
