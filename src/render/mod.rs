//! Output forms for a finished [`crate::model::Areas`].
//!
//! - [`text`]: aligned text tables, through `Display` on the model types
//! - [`document`]: nested JSON document (and its import)
//! - [`align`]: the column alignment utility used by the text tables

pub mod align;
pub mod document;
pub mod text;

pub use document::{from_document, populate_from_document_str, to_document, to_json_string, to_json_string_pretty};

/// Decimal places used for readings and statistics in text tables.
pub const DECIMAL_PLACES: usize = 6;

/// Format a reading for a text table.
pub fn format_value(value: f64) -> String {
    format!("{:.*}", DECIMAL_PLACES, value)
}
