//! Output generation for extraction reports.
//!
//! # Submodules
//!
//! - [`json`]: Serializes [`crate::models::DateReport`] rows to JSON, on
//!   stdout or to a file

pub mod json;
