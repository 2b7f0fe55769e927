//! Extraction passes that pull structured facts out of article pages.
//!
//! Each extractor consumes a parsed document (and the article URL) through
//! the narrow query interface in [`crate::parsers`] and produces its result
//! without ever failing the caller: evidence that cannot be harvested is
//! simply absent.
//!
//! # Submodules
//!
//! - [`pubdate`]: determines the most probable published and last-updated
//!   timestamps from URL, JSON-LD, `<time>` elements, and metadata tags

pub mod pubdate;
