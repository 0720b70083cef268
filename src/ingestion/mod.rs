//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`populate`] (from [`unified`]) which:
//!
//! - rejects unreadable or empty input before any format-specific work
//! - dispatches on [`SourceFormat`] and merges into an [`crate::model::Areas`]
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific functions are also available under:
//! - [`authority_codes`]
//! - [`authority_by_year`]
//! - [`stats_json`]

pub mod authority_by_year;
pub mod authority_codes;
pub mod columns;
mod fields;
pub mod observability;
pub mod stats_json;
pub mod unified;

use std::io::Read;

pub use columns::{SourceColumnMapping, SourceField, SourceFormat};
pub use observability::{
    CompositeObserver, FileObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    TracingObserver,
};
pub use unified::{IngestionOptions, IngestionRequest, populate, populate_from_path, populate_tagged};

/// Header-less, flexible CSV reader; the table readers validate headers and field counts
/// themselves.
pub(crate) fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
}
