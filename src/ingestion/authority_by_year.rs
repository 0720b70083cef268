//! Single-measure-by-year table ingestion.
//!
//! The header is `<code column>,<year>,<year>,...`; each data row is an authority code followed
//! by one reading per year column. The measure's codename and label are not in the file, they
//! come from the column mapping (`SINGLE_MEASURE_CODE`, `SINGLE_MEASURE_NAME`).

use std::io::Read;

use tracing::{debug, info};

use crate::error::{StatsError, StatsResult};
use crate::filters::Filters;
use crate::model::{Area, Areas, Measure};

use super::columns::{SourceColumnMapping, SourceField, SourceFormat};
use super::csv_reader;
use super::fields::{parse_number, parse_year};
use super::observability::IngestionStats;

/// Ingest a by-year table into `areas`.
///
/// If the mapped measure fails the measure filter the whole source is skipped. Otherwise each
/// admitted row contributes one measure holding the readings whose year passes the year filter.
pub fn populate_from_authority_by_year_csv<R: Read>(
    areas: &mut Areas,
    reader: R,
    cols: &SourceColumnMapping,
    filters: &Filters,
) -> StatsResult<IngestionStats> {
    cols.expect_len(SourceFormat::AuthorityByYearCsv, 3)?;
    cols.require(SourceField::AuthCode)?;
    let codename = cols.require(SourceField::SingleMeasureCode)?;
    let label = cols.require(SourceField::SingleMeasureName)?;

    if !filters.measures.matches(codename) {
        debug!(codename, "measure excluded by filter, skipping source");
        return Ok(IngestionStats {
            areas: areas.len(),
            ..IngestionStats::default()
        });
    }

    let mut rdr = csv_reader(reader);
    let mut records = rdr.records();

    let header = match records.next() {
        Some(result) => result?,
        None => return Err(StatsError::malformed("by-year table has no data")),
    };
    let years = header
        .iter()
        .skip(1)
        .map(|raw| parse_year(1, raw, raw))
        .collect::<StatsResult<Vec<u32>>>()?;

    let mut stats = IngestionStats::default();
    for (row_idx0, result) in records.enumerate() {
        let row = row_idx0 + 2;
        let record = result?;
        if record.len() != years.len() + 1 {
            return Err(StatsError::malformed(format!(
                "row {row} has {} fields, expected {}",
                record.len(),
                years.len() + 1
            )));
        }
        stats.records += 1;

        let code = &record[0];
        let mut measure = Measure::new(codename, label);
        // Cells in years outside the filter are never parsed.
        for (&year, raw) in years.iter().zip(record.iter().skip(1)) {
            if filters.years.matches(year) {
                measure.set_value(year, parse_number(row, &year.to_string(), raw)?);
            }
        }

        if !filters.areas.matches(code, "", "", areas) {
            continue;
        }
        let mut area = Area::new(code);
        area.set_measure(codename, measure);
        areas.set_area(code, area);
        stats.admitted += 1;
    }

    stats.areas = areas.len();
    info!(
        "Loaded '{}' for {} of {} rows across {} years",
        codename,
        stats.admitted,
        stats.records,
        years.len()
    );
    Ok(stats)
}
