use std::io::Write;

use regional_stats::ErrorKind;
use regional_stats::datasets::{AREAS_SOURCE, DatasetCatalog};
use regional_stats::filters::{AreaFilter, Filters, YearFilter};
use regional_stats::ingestion::{
    IngestionOptions, SourceColumnMapping, SourceField, SourceFormat, populate, populate_from_path,
    populate_tagged,
};
use regional_stats::model::Areas;

fn areas_cols() -> SourceColumnMapping {
    SourceColumnMapping::new()
        .with(SourceField::AuthCode, "Local authority code")
        .with(SourceField::AuthNameEng, "Name (eng)")
        .with(SourceField::AuthNameCym, "Name (cym)")
}

#[test]
fn populate_dispatches_on_format() {
    let mut areas = Areas::new();
    let input = "Local authority code,Name (eng),Name (cym)\nW06000023,Powys,Powys\n";
    let stats = populate(
        &mut areas,
        input.as_bytes(),
        SourceFormat::AuthorityCodeCsv,
        &areas_cols(),
        &IngestionOptions::default(),
    )
    .unwrap();
    assert_eq!(stats.areas, 1);
    assert_eq!(areas.area("W06000023").unwrap().names().len(), 2);
}

#[test]
fn empty_stream_fails_before_format_checks() {
    // The mapping is wrong for this format too; emptiness is reported first.
    let mut areas = Areas::new();
    let err = populate(
        &mut areas,
        "\n\n".as_bytes(),
        SourceFormat::StatsJson,
        &areas_cols(),
        &IngestionOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
    assert!(err.to_string().contains("input is empty"));
}

#[test]
fn unreadable_stream_is_io() {
    let mut areas = Areas::new();
    let invalid_utf8: &[u8] = &[0xff, 0xfe, 0xfd];
    let err = populate(
        &mut areas,
        invalid_utf8,
        SourceFormat::AuthorityCodeCsv,
        &areas_cols(),
        &IngestionOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn unknown_tag_is_unsupported() {
    let mut areas = Areas::new();
    let err = populate_tagged(
        &mut areas,
        "a,b,c\n".as_bytes(),
        "parquet",
        &areas_cols(),
        &IngestionOptions::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("unsupported format 'parquet'"));
    assert!(areas.is_empty());
}

#[test]
fn tagged_dispatch_accepts_known_tags() {
    let mut areas = Areas::new();
    let input = "Local authority code,Name (eng),Name (cym)\nW06000023,Powys,Powys\n";
    populate_tagged(
        &mut areas,
        input.as_bytes(),
        "Authority-Code-CSV",
        &areas_cols(),
        &IngestionOptions::default(),
    )
    .unwrap();
    assert_eq!(areas.len(), 1);
}

#[test]
fn populate_from_path_reads_a_file() {
    let mut tmp = tempfile::NamedTempFile::new().unwrap();
    write!(
        tmp,
        "Local authority code,Name (eng),Name (cym)\nW06000011,Swansea,Abertawe\n"
    )
    .unwrap();

    let mut areas = Areas::new();
    populate_from_path(
        &mut areas,
        tmp.path(),
        SourceFormat::AuthorityCodeCsv,
        &areas_cols(),
        &IngestionOptions::default(),
    )
    .unwrap();
    assert!(areas.contains("W06000011"));
}

#[test]
fn missing_file_is_io() {
    let mut areas = Areas::new();
    let err = populate_from_path(
        &mut areas,
        "tests/fixtures/does_not_exist.csv",
        SourceFormat::AuthorityCodeCsv,
        &areas_cols(),
        &IngestionOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn builtin_catalog_sources_combine_across_files() {
    let catalog = DatasetCatalog::builtin();
    let options = IngestionOptions {
        filters: Filters {
            areas: AreaFilter::new(["powys"]),
            years: YearFilter::new(1992, 1993),
            ..Filters::default()
        },
        ..IngestionOptions::default()
    };

    let mut areas = Areas::new();
    for name in [AREAS_SOURCE, "popden", "complete-popden"] {
        catalog
            .get(name)
            .unwrap()
            .request("tests/fixtures", options.clone())
            .run(&mut areas)
            .unwrap();
    }

    assert_eq!(areas.len(), 1);
    let powys = areas.area("W06000023").unwrap();
    assert_eq!(powys.name("eng").unwrap(), "Powys");
    assert_eq!(powys.name("cym").unwrap(), "Powys");
    assert_eq!(powys.len(), 1);
    let dens = powys.measure("dens").unwrap();
    // The by-year table was read last, so its label and readings win.
    assert_eq!(dens.label(), "Population density");
    assert_eq!(dens.values().len(), 2);
    assert_eq!(dens.value(1993).unwrap(), 23.9);
}
