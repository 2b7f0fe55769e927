//! DOM query helpers over a parsed HTML document.
//!
//! The extractor never walks the tree itself; it goes through this narrow
//! interface:
//!
//! - [`get_tags`]: elements by tag name
//! - [`get_metatags`]: `<meta>` elements matching a metadata name convention
//! - [`get_elements_by_attrib`]: elements carrying an exact attribute/value pair
//! - [`get_attribute`]: a single attribute value
//! - [`get_ld_json_objects`]: embedded JSON-LD blocks as JSON mappings
//! - [`text_content`]: an element's visible text
//!
//! Missing elements and malformed embedded JSON are treated as absence,
//! never as failure.

use scraper::{ElementRef, Html, Selector};
use serde_json::{Map, Value};
use tracing::debug;

/// Collect all elements with the given tag name.
pub fn get_tags<'a>(doc: &'a Html, tag: &str) -> Vec<ElementRef<'a>> {
    let Ok(selector) = Selector::parse(tag) else {
        return Vec::new();
    };
    doc.select(&selector).collect()
}

/// Collect `<meta>` elements whose `name`, `property`, `itemprop`, or
/// `http-equiv` attribute equals the given metadata name.
///
/// Matching is exact: conventions like `Last-Modified` vs `last-modified`
/// are listed separately in the lookup tables.
pub fn get_metatags<'a>(doc: &'a Html, name: &str) -> Vec<ElementRef<'a>> {
    let selector = Selector::parse("meta").unwrap();
    doc.select(&selector)
        .filter(|el| {
            ["name", "property", "itemprop", "http-equiv"]
                .into_iter()
                .any(|attr| el.value().attr(attr) == Some(name))
        })
        .collect()
}

/// Collect elements (any tag) whose `attribute` equals `value` exactly.
pub fn get_elements_by_attrib<'a>(
    doc: &'a Html,
    attribute: &str,
    value: &str,
) -> Vec<ElementRef<'a>> {
    let selector = Selector::parse("*").unwrap();
    doc.select(&selector)
        .filter(|el| el.value().attr(attribute) == Some(value))
        .collect()
}

/// Read a single attribute value from an element.
pub fn get_attribute<'a>(el: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

/// The visible text of an element, descendants included.
pub fn text_content(el: &ElementRef<'_>) -> String {
    el.text().collect::<Vec<_>>().join(" ")
}

/// Extract every embedded JSON-LD object from the document.
///
/// Each `<script type="application/ld+json">` block is parsed with
/// `serde_json`. Top-level arrays are flattened into their object elements;
/// blocks that fail to parse are logged at debug level and skipped.
///
/// # Returns
///
/// Zero or more JSON mappings, each either graph-shaped (`"@graph"` array)
/// or flat.
pub fn get_ld_json_objects(doc: &Html) -> Vec<Map<String, Value>> {
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).unwrap();
    let mut objects = Vec::new();

    for script in doc.select(&selector) {
        let raw = script.text().collect::<String>();
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => objects.push(map),
            Ok(Value::Array(items)) => {
                for item in items {
                    if let Value::Object(map) = item {
                        objects.push(map);
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                debug!(error = %e, "Skipping malformed JSON-LD block");
            }
        }
    }

    objects
}
