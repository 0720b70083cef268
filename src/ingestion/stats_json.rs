//! Record-oriented statistics document ingestion (StatsWales JSON exports).
//!
//! Supported inputs:
//! - A JSON array of records: `[{...}, {...}]`
//! - An object whose `value` member is that array (the shape StatsWales serves)
//!
//! Every record carries one reading. The mapping names the record keys for the authority code,
//! English name, year and value, plus either per-record measure keys (`MEASURE_CODE`,
//! `MEASURE_NAME`) or a fixed measure (`SINGLE_MEASURE_CODE`, `SINGLE_MEASURE_NAME`) when the
//! whole document is one measure.

use std::io::Read;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{StatsError, StatsResult};
use crate::filters::Filters;
use crate::model::{Area, Areas, LANG_ENGLISH, Measure};

use super::columns::{SourceColumnMapping, SourceField, SourceFormat};
use super::fields::{finite, parse_error, parse_number, parse_year};
use super::observability::IngestionStats;

/// Where a record's measure codename and label come from.
enum MeasureSource<'a> {
    PerRecord { code_key: &'a str, name_key: &'a str },
    Fixed { codename: &'a str, label: &'a str },
}

struct RecordKeys<'a> {
    code: &'a str,
    name: &'a str,
    year: &'a str,
    value: &'a str,
    measure: MeasureSource<'a>,
}

impl<'a> RecordKeys<'a> {
    fn from_mapping(cols: &'a SourceColumnMapping) -> StatsResult<Self> {
        cols.expect_len(SourceFormat::StatsJson, 6)?;
        let measure = if cols.contains(SourceField::MeasureCode) {
            MeasureSource::PerRecord {
                code_key: cols.require(SourceField::MeasureCode)?,
                name_key: cols.require(SourceField::MeasureName)?,
            }
        } else {
            MeasureSource::Fixed {
                codename: cols.require(SourceField::SingleMeasureCode)?,
                label: cols.require(SourceField::SingleMeasureName)?,
            }
        };
        Ok(Self {
            code: cols.require(SourceField::AuthCode)?,
            name: cols.require(SourceField::AuthNameEng)?,
            year: cols.require(SourceField::Year)?,
            value: cols.require(SourceField::Value)?,
            measure,
        })
    }
}

/// One record, resolved through the mapping.
struct Reading {
    code: String,
    name: String,
    codename: String,
    label: String,
    year: u32,
    value: f64,
}

/// Ingest a statistics document read from `reader`.
pub fn populate_from_stats_json<R: Read>(
    areas: &mut Areas,
    mut reader: R,
    cols: &SourceColumnMapping,
    filters: &Filters,
) -> StatsResult<IngestionStats> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    populate_from_stats_json_str(areas, &input, cols, filters)
}

/// Ingest a statistics document held in memory.
///
/// An admitted area always receives its English name, whatever the measure and year filters
/// decide; the reading itself is only merged when both of those pass too. A record that cannot
/// be resolved aborts the call, leaving earlier records merged.
pub fn populate_from_stats_json_str(
    areas: &mut Areas,
    input: &str,
    cols: &SourceColumnMapping,
    filters: &Filters,
) -> StatsResult<IngestionStats> {
    let keys = RecordKeys::from_mapping(cols)?;

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(StatsError::malformed("json input is empty"));
    }
    let records = match serde_json::from_str::<Value>(trimmed)? {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("value") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(StatsError::malformed(
                    "json object has no 'value' array of records",
                ));
            }
        },
        _ => {
            return Err(StatsError::malformed(
                "json must be an array of records or an object with a 'value' array",
            ));
        }
    };

    let mut stats = IngestionStats::default();
    for (idx0, record) in records.iter().enumerate() {
        let row = idx0 + 1;
        let obj = record
            .as_object()
            .ok_or_else(|| StatsError::malformed(format!("record {row} is not a json object")))?;
        let reading = resolve_record(row, obj, &keys)?;
        stats.records += 1;

        if !filters.areas.matches(&reading.code, &reading.name, "", areas) {
            continue;
        }

        let mut area = Area::new(reading.code.as_str());
        area.set_name(LANG_ENGLISH, reading.name)?;
        if filters.measures.matches(&reading.codename) && filters.years.matches(reading.year) {
            let mut measure = Measure::new(&reading.codename, reading.label);
            measure.set_value(reading.year, reading.value);
            area.set_measure(&reading.codename, measure);
        } else {
            debug!(
                code = reading.code.as_str(),
                codename = reading.codename.as_str(),
                year = reading.year,
                "reading excluded by filter"
            );
        }
        areas.set_area(reading.code, area);
        stats.admitted += 1;
    }

    stats.areas = areas.len();
    info!(
        "Loaded {} of {} records, {} areas in total",
        stats.admitted, stats.records, stats.areas
    );
    Ok(stats)
}

fn resolve_record(row: usize, obj: &Map<String, Value>, keys: &RecordKeys<'_>) -> StatsResult<Reading> {
    let (codename, label) = match keys.measure {
        MeasureSource::PerRecord { code_key, name_key } => (
            text_field(row, obj, code_key)?,
            text_field(row, obj, name_key)?,
        ),
        MeasureSource::Fixed { codename, label } => (codename.to_string(), label.to_string()),
    };

    let year = match required(row, obj, keys.year)? {
        Value::Number(n) => n
            .as_u64()
            .and_then(|y| u32::try_from(y).ok())
            .ok_or_else(|| parse_error(row, keys.year, &n.to_string(), "expected a year"))?,
        Value::String(s) => parse_year(row, keys.year, s)?,
        other => return Err(parse_error(row, keys.year, &other.to_string(), "expected a year")),
    };

    let value = match required(row, obj, keys.value)? {
        Value::Number(n) => {
            let raw = n.to_string();
            let value = n
                .as_f64()
                .ok_or_else(|| parse_error(row, keys.value, &raw, "expected a number"))?;
            finite(row, keys.value, &raw, value)?
        }
        Value::String(s) => parse_number(row, keys.value, s)?,
        other => return Err(parse_error(row, keys.value, &other.to_string(), "expected a number")),
    };

    Ok(Reading {
        code: text_field(row, obj, keys.code)?,
        name: text_field(row, obj, keys.name)?,
        codename,
        label,
        year,
        value,
    })
}

fn required<'v>(row: usize, obj: &'v Map<String, Value>, key: &str) -> StatsResult<&'v Value> {
    obj.get(key)
        .ok_or_else(|| StatsError::malformed(format!("record {row} missing required field '{key}'")))
}

/// A string field; numbers are accepted and kept in their JSON text form.
fn text_field(row: usize, obj: &Map<String, Value>, key: &str) -> StatsResult<String> {
    match required(row, obj, key)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(parse_error(row, key, &other.to_string(), "expected string")),
    }
}
