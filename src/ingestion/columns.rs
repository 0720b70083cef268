//! Source formats and the semantic-field to column-header mapping each source supplies.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{StatsError, StatsResult};

/// Supported source file shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// `code,english name,welsh name` table of local authorities.
    AuthorityCodeCsv,
    /// One measure, one row per authority, one column per year.
    AuthorityByYearCsv,
    /// Array of records, one reading per record (StatsWales JSON export).
    StatsJson,
}

impl SourceFormat {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::AuthorityCodeCsv => "authority-code-csv",
            Self::AuthorityByYearCsv => "authority-by-year-csv",
            Self::StatsJson => "stats-json",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for SourceFormat {
    type Err = StatsError;

    /// Parse a format tag (case-insensitive).
    fn from_str(s: &str) -> StatsResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "authority-code-csv" => Ok(Self::AuthorityCodeCsv),
            "authority-by-year-csv" => Ok(Self::AuthorityByYearCsv),
            "stats-json" => Ok(Self::StatsJson),
            _ => Err(StatsError::UnsupportedFormat { tag: s.to_string() }),
        }
    }
}

/// Semantic fields a source can map to a column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceField {
    AuthCode,
    AuthNameEng,
    AuthNameCym,
    MeasureCode,
    MeasureName,
    /// For single-measure sources the mapped string is the codename itself, not a header.
    SingleMeasureCode,
    /// For single-measure sources the mapped string is the label itself, not a header.
    SingleMeasureName,
    Year,
    Value,
}

/// Mapping from [`SourceField`] to the literal column header (or fixed value) used by a source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceColumnMapping(BTreeMap<SourceField, String>);

impl SourceColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: SourceField, header: impl Into<String>) -> Self {
        self.0.insert(field, header.into());
        self
    }

    pub fn insert(&mut self, field: SourceField, header: impl Into<String>) {
        self.0.insert(field, header.into());
    }

    pub fn get(&self, field: SourceField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: SourceField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Mapped header for `field`, or a malformed-input error naming the missing field.
    pub(crate) fn require(&self, field: SourceField) -> StatsResult<&str> {
        self.get(field).ok_or_else(|| {
            StatsError::malformed(format!("column mapping has no entry for {field:?}"))
        })
    }

    pub(crate) fn expect_len(&self, format: SourceFormat, expected: usize) -> StatsResult<()> {
        if self.len() != expected {
            return Err(StatsError::malformed(format!(
                "{format} expects {expected} mapped columns, got {}",
                self.len()
            )));
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<(SourceField, S)> for SourceColumnMapping {
    fn from_iter<T: IntoIterator<Item = (SourceField, S)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(f, h)| (f, h.into())).collect())
    }
}
