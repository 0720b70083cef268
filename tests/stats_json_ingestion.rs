use regional_stats::ErrorKind;
use regional_stats::filters::{AreaFilter, Filters, MeasureFilter, YearFilter};
use regional_stats::ingestion::stats_json::{populate_from_stats_json, populate_from_stats_json_str};
use regional_stats::ingestion::{SourceColumnMapping, SourceField};
use regional_stats::model::Areas;

fn popden_cols() -> SourceColumnMapping {
    SourceColumnMapping::new()
        .with(SourceField::AuthCode, "Localauthority_Code")
        .with(SourceField::AuthNameEng, "Localauthority_ItemName_ENG")
        .with(SourceField::MeasureCode, "Measure_Code")
        .with(SourceField::MeasureName, "Measure_ItemName_ENG")
        .with(SourceField::Year, "Year_Code")
        .with(SourceField::Value, "Data")
}

fn record(code: &str, name: &str, measure: &str, year: &str, value: f64) -> String {
    format!(
        r#"{{"Localauthority_Code":"{code}","Localauthority_ItemName_ENG":"{name}","Measure_Code":"{measure}","Measure_ItemName_ENG":"Population density","Year_Code":"{year}","Data":{value}}}"#
    )
}

fn three_years_for_powys() -> String {
    format!(
        "[{},{},{}]",
        record("W06000023", "Powys", "Dens", "1991", 23.4),
        record("W06000023", "Powys", "Dens", "1992", 23.6),
        record("W06000023", "Powys", "Dens", "1993", 23.9),
    )
}

#[test]
fn stats_json_from_fixture_happy_path() {
    let mut areas = Areas::new();
    let file = std::fs::File::open("tests/fixtures/popu1009.json").unwrap();
    let stats = populate_from_stats_json(&mut areas, file, &popden_cols(), &Filters::none()).unwrap();

    assert_eq!(stats.records, 9);
    assert_eq!(stats.admitted, 9);
    assert_eq!(areas.len(), 2);

    let swansea = areas.area("W06000011").unwrap();
    assert_eq!(swansea.name("eng").unwrap(), "Swansea");
    assert_eq!(swansea.len(), 2);
    let pop = swansea.measure("pop").unwrap();
    assert_eq!(pop.label(), "Population");
    // Textual values are parsed.
    assert_eq!(pop.value(1993).unwrap(), 230100.0);
    assert_eq!(swansea.measure("DENS").unwrap().value(1991).unwrap(), 595.2);
}

#[test]
fn year_filter_does_not_affect_name_admission() {
    let mut areas = Areas::new();
    let filters = Filters {
        years: YearFilter::new(1993, 1993),
        ..Filters::default()
    };
    populate_from_stats_json_str(&mut areas, &three_years_for_powys(), &popden_cols(), &filters).unwrap();

    let powys = areas.area("W06000023").unwrap();
    assert_eq!(powys.name("eng").unwrap(), "Powys");
    let dens = powys.measure("dens").unwrap();
    assert_eq!(dens.len(), 1);
    assert_eq!(dens.value(1993).unwrap(), 23.9);
}

#[test]
fn measure_filter_keeps_area_names() {
    let mut areas = Areas::new();
    let filters = Filters {
        measures: MeasureFilter::new(["pop"]),
        ..Filters::default()
    };
    populate_from_stats_json_str(&mut areas, &three_years_for_powys(), &popden_cols(), &filters).unwrap();

    let powys = areas.area("W06000023").unwrap();
    assert_eq!(powys.name("eng").unwrap(), "Powys");
    assert!(powys.is_empty());
}

#[test]
fn area_filter_substring_and_sticky_codes() {
    let mut areas = Areas::new();
    let filters = Filters {
        areas: AreaFilter::new(["w0600"]),
        ..Filters::default()
    };
    let input = format!(
        "[{},{}]",
        record("W06000023", "Powys", "Dens", "1991", 23.4),
        record("E09000001", "City of London", "Dens", "1991", 27.0),
    );
    populate_from_stats_json_str(&mut areas, &input, &popden_cols(), &filters).unwrap();
    assert_eq!(areas.len(), 1);
    assert!(areas.contains("W06000023"));

    // A later record that only matches because its code is already loaded.
    let filters = Filters {
        areas: AreaFilter::new(["cardiff"]),
        ..Filters::default()
    };
    let input = format!("[{}]", record("W06000023", "", "Dens", "1992", 23.6));
    populate_from_stats_json_str(&mut areas, &input, &popden_cols(), &filters).unwrap();
    assert_eq!(
        areas.area("W06000023").unwrap().measure("dens").unwrap().len(),
        2
    );
}

#[test]
fn missing_field_aborts_after_earlier_records() {
    let mut areas = Areas::new();
    let input = format!(
        r#"[{},{{"Localauthority_Code":"W06000011","Measure_Code":"Dens","Measure_ItemName_ENG":"x","Year_Code":"1991","Data":1}}]"#,
        record("W06000023", "Powys", "Dens", "1991", 23.4),
    );
    let err = populate_from_stats_json_str(&mut areas, &input, &popden_cols(), &Filters::none()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Malformed);
    assert!(err.to_string().contains("missing required field 'Localauthority_ItemName_ENG'"));
    assert_eq!(areas.len(), 1);
    assert!(areas.contains("W06000023"));
}

#[test]
fn mapping_with_wrong_size_is_malformed() {
    let mut areas = Areas::new();
    let cols = SourceColumnMapping::new()
        .with(SourceField::AuthCode, "Localauthority_Code")
        .with(SourceField::Year, "Year_Code");
    let err = populate_from_stats_json_str(&mut areas, &three_years_for_powys(), &cols, &Filters::none())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
    assert!(areas.is_empty());
}

#[test]
fn empty_input_is_malformed() {
    let mut areas = Areas::new();
    let err = populate_from_stats_json_str(&mut areas, "  \n", &popden_cols(), &Filters::none()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
    assert!(err.to_string().contains("empty"));
}

#[test]
fn non_finite_textual_value_is_rejected() {
    let mut areas = Areas::new();
    let input = r#"[{"Localauthority_Code":"W06000023","Localauthority_ItemName_ENG":"Powys","Measure_Code":"Dens","Measure_ItemName_ENG":"Population density","Year_Code":"1991","Data":"NaN"}]"#;
    let err = populate_from_stats_json_str(&mut areas, input, &popden_cols(), &Filters::none()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Malformed);
    assert!(err.to_string().contains("column 'Data'"));
    assert!(areas.is_empty());
}
