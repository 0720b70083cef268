//! Unified ingestion entrypoint.
//!
//! [`populate`] reads a whole stream, rejects it if it is empty, then hands it to the reader for
//! the requested [`SourceFormat`]. If an [`IngestionObserver`] is configured, success, failure
//! and alerts are reported to it.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ErrorKind, StatsError, StatsResult};
use crate::filters::Filters;
use crate::model::Areas;

use super::authority_by_year::populate_from_authority_by_year_csv;
use super::authority_codes::populate_from_authority_code_csv;
use super::columns::{SourceColumnMapping, SourceFormat};
use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use super::stats_json::populate_from_stats_json_str;

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// Area, measure and year filters applied while reading.
    pub filters: Filters,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("filters", &self.filters)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            filters: Filters::default(),
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Ingest `reader` as `format` into `areas`.
///
/// Data merged before a failing record stays in `areas`.
///
/// # Examples
///
/// ```
/// use regional_stats::ingestion::{populate, IngestionOptions, SourceColumnMapping, SourceField, SourceFormat};
/// use regional_stats::model::Areas;
///
/// # fn main() -> Result<(), regional_stats::StatsError> {
/// let cols = SourceColumnMapping::new()
///     .with(SourceField::AuthCode, "Local authority code")
///     .with(SourceField::AuthNameEng, "Name (eng)")
///     .with(SourceField::AuthNameCym, "Name (cym)");
/// let input = "Local authority code,Name (eng),Name (cym)\nW06000023,Powys,Powys\n";
///
/// let mut areas = Areas::new();
/// populate(&mut areas, input.as_bytes(), SourceFormat::AuthorityCodeCsv, &cols, &IngestionOptions::default())?;
/// assert_eq!(areas.len(), 1);
/// # Ok(())
/// # }
/// ```
pub fn populate<R: Read>(
    areas: &mut Areas,
    reader: R,
    format: SourceFormat,
    cols: &SourceColumnMapping,
    options: &IngestionOptions,
) -> StatsResult<IngestionStats> {
    let ctx = IngestionContext {
        source: "<stream>".to_string(),
        format,
    };
    let result = read_input(reader).and_then(|input| dispatch(areas, &input, format, cols, &options.filters));
    report(options, &ctx, &result);
    result
}

/// Like [`populate`], with the format given as a tag such as `"stats-json"`.
pub fn populate_tagged<R: Read>(
    areas: &mut Areas,
    reader: R,
    tag: &str,
    cols: &SourceColumnMapping,
    options: &IngestionOptions,
) -> StatsResult<IngestionStats> {
    let format: SourceFormat = tag.parse()?;
    populate(areas, reader, format, cols, options)
}

/// Open `path` and ingest it as `format` into `areas`.
pub fn populate_from_path(
    areas: &mut Areas,
    path: impl AsRef<Path>,
    format: SourceFormat,
    cols: &SourceColumnMapping,
    options: &IngestionOptions,
) -> StatsResult<IngestionStats> {
    let path = path.as_ref();
    let ctx = IngestionContext {
        source: path.display().to_string(),
        format,
    };
    let result = File::open(path)
        .map_err(StatsError::from)
        .and_then(read_input)
        .and_then(|input| dispatch(areas, &input, format, cols, &options.filters));
    report(options, &ctx, &result);
    result
}

fn read_input<R: Read>(mut reader: R) -> StatsResult<String> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    if input.trim().is_empty() {
        return Err(StatsError::malformed("input is empty"));
    }
    Ok(input)
}

fn dispatch(
    areas: &mut Areas,
    input: &str,
    format: SourceFormat,
    cols: &SourceColumnMapping,
    filters: &Filters,
) -> StatsResult<IngestionStats> {
    match format {
        SourceFormat::AuthorityCodeCsv => {
            populate_from_authority_code_csv(areas, input.as_bytes(), cols, &filters.areas)
        }
        SourceFormat::AuthorityByYearCsv => {
            populate_from_authority_by_year_csv(areas, input.as_bytes(), cols, filters)
        }
        SourceFormat::StatsJson => populate_from_stats_json_str(areas, input, cols, filters),
    }
}

fn report(options: &IngestionOptions, ctx: &IngestionContext, result: &StatsResult<IngestionStats>) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    match result {
        Ok(stats) => obs.on_success(ctx, *stats),
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_failure(ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}

fn severity_for_error(e: &StatsError) -> IngestionSeverity {
    match e.kind() {
        ErrorKind::Io => IngestionSeverity::Critical,
        ErrorKind::Malformed | ErrorKind::NotFound | ErrorKind::InvalidArgument => {
            IngestionSeverity::Error
        }
    }
}

/// An owned ingestion job: one file, its format and mapping, and the options to read it with.
#[derive(Clone)]
pub struct IngestionRequest {
    /// Path to the input file.
    pub path: PathBuf,
    pub format: SourceFormat,
    pub cols: SourceColumnMapping,
    pub options: IngestionOptions,
}

impl fmt::Debug for IngestionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionRequest")
            .field("path", &self.path)
            .field("format", &self.format)
            .field("cols", &self.cols.len())
            .field("options", &self.options)
            .finish()
    }
}

impl IngestionRequest {
    /// Execute the request by calling [`populate_from_path`].
    pub fn run(&self, areas: &mut Areas) -> StatsResult<IngestionStats> {
        populate_from_path(areas, &self.path, self.format, &self.cols, &self.options)
    }
}
