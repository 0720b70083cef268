//! `regional-stats` ingests regional statistics into an in-memory [`model::Areas`] collection:
//! local authority areas, each with names per language and a set of measures, each measure a
//! year-keyed series of readings.
//!
//! ## What you can ingest
//!
//! - **Authority code tables** ([`ingestion::SourceFormat::AuthorityCodeCsv`]): `code,english,welsh`
//!   rows that name the areas.
//! - **Single-measure-by-year tables** ([`ingestion::SourceFormat::AuthorityByYearCsv`]): one row per
//!   area, one column per year, for a measure named by the column mapping.
//! - **Statistics documents** ([`ingestion::SourceFormat::StatsJson`]): JSON arrays of records,
//!   one reading per record (the StatsWales export shape).
//!
//! Each source comes with a [`ingestion::SourceColumnMapping`] that names the columns/keys holding
//! the authority code, names, measure, year and value. [`datasets::DatasetCatalog::builtin`]
//! carries the mappings for the StatsWales sources.
//!
//! Repeated imports merge: the later write wins a collision (a name for the same language, a
//! reading for the same year) and everything else accumulates.
//!
//! ## Quick example
//!
//! ```rust
//! use regional_stats::filters::{Filters, YearFilter};
//! use regional_stats::ingestion::{populate, IngestionOptions, SourceColumnMapping, SourceField, SourceFormat};
//! use regional_stats::model::Areas;
//!
//! # fn main() -> Result<(), regional_stats::StatsError> {
//! let cols = SourceColumnMapping::new()
//!     .with(SourceField::AuthCode, "Local authority code")
//!     .with(SourceField::SingleMeasureCode, "dens")
//!     .with(SourceField::SingleMeasureName, "Population density");
//! let input = "Local authority code,1991,1992\nW06000023,24.5,24.4\n";
//!
//! let options = IngestionOptions {
//!     filters: Filters { years: YearFilter::new(1992, 1992), ..Default::default() },
//!     ..Default::default()
//! };
//! let mut areas = Areas::new();
//! populate(&mut areas, input.as_bytes(), SourceFormat::AuthorityByYearCsv, &cols, &options)?;
//!
//! let dens = areas.area("W06000023")?.measure("DENS")?;
//! assert_eq!(dens.len(), 1);
//! assert_eq!(dens.value(1992)?, 24.4);
//! # Ok(())
//! # }
//! ```
//!
//! ## Output
//!
//! - Text: `Display` on [`model::Measure`], [`model::Area`] and [`model::Areas`] renders aligned
//!   tables with average, difference and percentage difference columns ([`render::text`]).
//! - JSON: [`render::to_json_string`] renders a nested document keyed by area code.
//!
//! ## Modules
//!
//! - [`model`]: measures, areas, and the area collection with their merge rules
//! - [`filters`]: area, measure and year filters applied during ingestion
//! - [`ingestion`]: unified entrypoint and format-specific readers
//! - [`render`]: text and JSON output
//! - [`datasets`]: source definitions
//! - [`error`]: the crate error type

pub mod datasets;
pub mod error;
pub mod filters;
pub mod ingestion;
pub mod model;
pub mod render;

pub use error::{ErrorKind, StatsError, StatsResult};
