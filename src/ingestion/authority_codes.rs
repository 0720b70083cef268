//! Authority code table ingestion.
//!
//! The table has exactly three columns (code, English name, Welsh name) and a header row whose
//! fields must equal the mapped `AUTH_CODE`, `AUTH_NAME_ENG` and `AUTH_NAME_CYM` headers in that
//! order.

use std::io::Read;

use tracing::{debug, info};

use crate::error::{StatsError, StatsResult};
use crate::filters::AreaFilter;
use crate::model::{Area, Areas, LANG_ENGLISH, LANG_WELSH};

use super::columns::{SourceColumnMapping, SourceField, SourceFormat};
use super::csv_reader;
use super::observability::IngestionStats;

/// Ingest an authority code table into `areas`.
///
/// Each admitted row becomes an [`Area`] with an English and a Welsh name and no measures,
/// merged into whatever is already stored under that code. Rows already merged stay merged if a
/// later row fails.
pub fn populate_from_authority_code_csv<R: Read>(
    areas: &mut Areas,
    reader: R,
    cols: &SourceColumnMapping,
    area_filter: &AreaFilter,
) -> StatsResult<IngestionStats> {
    cols.expect_len(SourceFormat::AuthorityCodeCsv, 3)?;
    let expected = [
        cols.require(SourceField::AuthCode)?,
        cols.require(SourceField::AuthNameEng)?,
        cols.require(SourceField::AuthNameCym)?,
    ];

    let mut rdr = csv_reader(reader);
    let mut records = rdr.records();

    let header = match records.next() {
        Some(result) => result?,
        None => return Err(StatsError::malformed("authority code table has no data")),
    };
    if header.len() != expected.len() || header.iter().zip(expected).any(|(h, e)| h != e) {
        return Err(StatsError::malformed(format!(
            "authority code header {:?} does not match expected {:?}",
            header.iter().collect::<Vec<_>>(),
            expected
        )));
    }

    let mut stats = IngestionStats::default();
    for (row_idx0, result) in records.enumerate() {
        // 1-based, header is row 1.
        let row = row_idx0 + 2;
        let record = result?;
        if record.len() != expected.len() {
            return Err(StatsError::malformed(format!(
                "row {row} has {} fields, expected {}",
                record.len(),
                expected.len()
            )));
        }
        stats.records += 1;

        let (code, english, welsh) = (&record[0], &record[1], &record[2]);
        if !area_filter.matches(code, english, welsh, areas) {
            continue;
        }

        let mut area = Area::new(code);
        area.set_name(LANG_ENGLISH, english)?;
        area.set_name(LANG_WELSH, welsh)?;
        areas.set_area(code, area);
        stats.admitted += 1;
    }

    stats.areas = areas.len();
    debug!(records = stats.records, admitted = stats.admitted, "authority code table read");
    info!("Loaded {} authorities, {} areas in total", stats.admitted, stats.areas);
    Ok(stats)
}
