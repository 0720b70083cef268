//! Field-level parsers shared by the source readers.

use crate::error::{StatsError, StatsResult};

/// Parse a year column or cell.
pub(crate) fn parse_year(row: usize, column: &str, raw: &str) -> StatsResult<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|e| parse_error(row, column, raw, e.to_string()))
}

/// Parse a numeric reading. `NaN` and infinities are rejected.
pub(crate) fn parse_number(row: usize, column: &str, raw: &str) -> StatsResult<f64> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| parse_error(row, column, raw, e.to_string()))?;
    finite(row, column, raw, value)
}

pub(crate) fn finite(row: usize, column: &str, raw: &str, value: f64) -> StatsResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(parse_error(row, column, raw, "reading must be a finite number"))
    }
}

pub(crate) fn parse_error(
    row: usize,
    column: &str,
    raw: &str,
    message: impl Into<String>,
) -> StatsError {
    StatsError::ParseError {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message: message.into(),
    }
}
