//! Source definitions: which file holds what, in which format, under which column headers.
//!
//! [`DatasetCatalog::builtin`] carries the StatsWales sources the crate was written against.
//! A catalog can also be loaded from JSON, e.g.
//!
//! ```json
//! [
//!   {
//!     "name": "trains",
//!     "file": "tran0152.json",
//!     "format": "stats-json",
//!     "cols": {
//!       "AUTH_CODE": "LocalAuthority_Code",
//!       "AUTH_NAME_ENG": "LocalAuthority_ItemName_ENG",
//!       "SINGLE_MEASURE_CODE": "rail",
//!       "SINGLE_MEASURE_NAME": "Rail passenger journeys",
//!       "YEAR": "Year_Code",
//!       "VALUE": "Data"
//!     }
//!   }
//! ]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};
use crate::ingestion::{IngestionOptions, IngestionRequest, SourceColumnMapping, SourceField, SourceFormat};

/// One known source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFileSource {
    /// Short name used to select the source (e.g. `popden`).
    pub name: String,
    /// File name, relative to the data directory.
    pub file: String,
    pub format: SourceFormat,
    pub cols: SourceColumnMapping,
}

impl InputFileSource {
    /// An ingestion request for this source inside `dir`.
    pub fn request(&self, dir: impl AsRef<Path>, options: IngestionOptions) -> IngestionRequest {
        IngestionRequest {
            path: dir.as_ref().join(&self.file),
            format: self.format,
            cols: self.cols.clone(),
            options,
        }
    }
}

/// An ordered list of [`InputFileSource`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetCatalog {
    sources: Vec<InputFileSource>,
}

/// Name of the authority code source that supplies area names.
pub const AREAS_SOURCE: &str = "areas";

impl DatasetCatalog {
    pub fn new(sources: Vec<InputFileSource>) -> Self {
        Self { sources }
    }

    /// The StatsWales sources.
    pub fn builtin() -> Self {
        use SourceField::*;

        let record_cols = |code: &str, name: &str, measure_code: &str, measure_name: &str| {
            SourceColumnMapping::new()
                .with(AuthCode, code)
                .with(AuthNameEng, name)
                .with(MeasureCode, measure_code)
                .with(MeasureName, measure_name)
                .with(Year, "Year_Code")
                .with(Value, "Data")
        };
        let by_year_cols = |codename: &str, label: &str| {
            SourceColumnMapping::new()
                .with(AuthCode, "Local authority code")
                .with(SingleMeasureCode, codename)
                .with(SingleMeasureName, label)
        };
        let source = |name: &str, file: &str, format, cols| InputFileSource {
            name: name.to_string(),
            file: file.to_string(),
            format,
            cols,
        };

        Self::new(vec![
            source(
                AREAS_SOURCE,
                "areas.csv",
                SourceFormat::AuthorityCodeCsv,
                SourceColumnMapping::new()
                    .with(AuthCode, "Local authority code")
                    .with(AuthNameEng, "Name (eng)")
                    .with(AuthNameCym, "Name (cym)"),
            ),
            source(
                "popden",
                "popu1009.json",
                SourceFormat::StatsJson,
                record_cols(
                    "Localauthority_Code",
                    "Localauthority_ItemName_ENG",
                    "Measure_Code",
                    "Measure_ItemName_ENG",
                ),
            ),
            source(
                "biz",
                "econ0080.json",
                SourceFormat::StatsJson,
                record_cols(
                    "Area_Code",
                    "Area_ItemName_ENG",
                    "Variable_Code",
                    "Variable_ItemName_ENG",
                ),
            ),
            source(
                "aqi",
                "envi0201.json",
                SourceFormat::StatsJson,
                record_cols(
                    "Area_Code",
                    "Area_ItemName_ENG",
                    "Pollutant_ItemName_ENG",
                    "Pollutant_ItemName_ENG",
                ),
            ),
            source(
                "trains",
                "tran0152.json",
                SourceFormat::StatsJson,
                SourceColumnMapping::new()
                    .with(AuthCode, "LocalAuthority_Code")
                    .with(AuthNameEng, "LocalAuthority_ItemName_ENG")
                    .with(SingleMeasureCode, "rail")
                    .with(SingleMeasureName, "Rail passenger journeys")
                    .with(Year, "Year_Code")
                    .with(Value, "Data"),
            ),
            source(
                "complete-popden",
                "complete-popu1009-popden.csv",
                SourceFormat::AuthorityByYearCsv,
                by_year_cols("dens", "Population density"),
            ),
            source(
                "complete-pop",
                "complete-popu1009-pop.csv",
                SourceFormat::AuthorityByYearCsv,
                by_year_cols("pop", "Population"),
            ),
            source(
                "complete-area",
                "complete-popu1009-area.csv",
                SourceFormat::AuthorityByYearCsv,
                by_year_cols("area", "Land area"),
            ),
        ])
    }

    pub fn from_json_str(input: &str) -> StatsResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> StatsResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Source by name (case-insensitive).
    pub fn get(&self, name: &str) -> StatsResult<&InputFileSource> {
        self.sources
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| StatsError::not_found(format!("No dataset named {name}")))
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputFileSource> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for DatasetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
