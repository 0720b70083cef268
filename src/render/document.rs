//! Nested JSON document export and import.
//!
//! Shape:
//!
//! ```json
//! {
//!   "W06000023": {
//!     "measures": { "dens": { "1991": 24.47, "1992": 24.41 } },
//!     "names": { "cym": "Powys", "eng": "Powys" }
//!   }
//! }
//! ```
//!
//! `names` is omitted for an area without names, a measure without readings is left out, and
//! `measures` is omitted when nothing is left in it. Measure labels are not part of the document.

use serde_json::{Map, Value};

use crate::error::{StatsError, StatsResult};
use crate::model::{Area, Areas, Measure};

/// Build the nested document for `areas`.
pub fn to_document(areas: &Areas) -> Value {
    let mut root = Map::new();
    for area in areas {
        let mut entry = Map::new();

        let measures: Map<String, Value> = area
            .measures()
            .iter()
            .filter(|(_, m)| !m.is_empty())
            .map(|(codename, m)| {
                let values = m
                    .values()
                    .iter()
                    .map(|(year, value)| (year.to_string(), Value::from(*value)))
                    .collect::<Map<_, _>>();
                (codename.clone(), Value::Object(values))
            })
            .collect();
        if !measures.is_empty() {
            entry.insert("measures".to_string(), Value::Object(measures));
        }

        if !area.names().is_empty() {
            let names = area
                .names()
                .iter()
                .map(|(lang, name)| (lang.clone(), Value::String(name.clone())))
                .collect::<Map<_, _>>();
            entry.insert("names".to_string(), Value::Object(names));
        }

        root.insert(area.code().to_string(), Value::Object(entry));
    }
    Value::Object(root)
}

/// Compact JSON text of [`to_document`]. An empty collection is `{}`.
pub fn to_json_string(areas: &Areas) -> String {
    to_document(areas).to_string()
}

/// Indented JSON text of [`to_document`].
pub fn to_json_string_pretty(areas: &Areas) -> StatsResult<String> {
    Ok(serde_json::to_string_pretty(&to_document(areas))?)
}

/// Rebuild a collection from a document produced by [`to_document`].
///
/// Imported measures are labelled with their codename.
pub fn from_document(doc: &Value) -> StatsResult<Areas> {
    let mut areas = Areas::new();
    merge_document(&mut areas, doc)?;
    Ok(areas)
}

/// Parse `input` as a document and merge it into `areas`.
pub fn populate_from_document_str(areas: &mut Areas, input: &str) -> StatsResult<()> {
    let doc: Value = serde_json::from_str(input)?;
    merge_document(areas, &doc)
}

fn merge_document(areas: &mut Areas, doc: &Value) -> StatsResult<()> {
    let root = doc
        .as_object()
        .ok_or_else(|| StatsError::malformed("document root must be an object"))?;

    for (code, entry) in root {
        let entry = entry
            .as_object()
            .ok_or_else(|| StatsError::malformed(format!("area '{code}' must be an object")))?;
        let mut area = Area::new(code.as_str());

        if let Some(names) = entry.get("names") {
            for (lang, name) in object_member(code, "names", names)? {
                let name = name.as_str().ok_or_else(|| {
                    StatsError::malformed(format!("area '{code}' name '{lang}' must be a string"))
                })?;
                area.set_name(lang, name)?;
            }
        }

        if let Some(measures) = entry.get("measures") {
            for (codename, values) in object_member(code, "measures", measures)? {
                let mut measure = Measure::new(codename, codename.as_str());
                for (year, value) in object_member(code, codename, values)? {
                    let year = year.parse::<u32>().map_err(|_| {
                        StatsError::malformed(format!(
                            "area '{code}' measure '{codename}' has non-numeric year '{year}'"
                        ))
                    })?;
                    let value = value.as_f64().ok_or_else(|| {
                        StatsError::malformed(format!(
                            "area '{code}' measure '{codename}' year {year} must be a number"
                        ))
                    })?;
                    measure.set_value(year, value);
                }
                area.set_measure(codename, measure);
            }
        }

        areas.set_area(code.as_str(), area);
    }
    Ok(())
}

fn object_member<'v>(code: &str, what: &str, v: &'v Value) -> StatsResult<&'v Map<String, Value>> {
    v.as_object()
        .ok_or_else(|| StatsError::malformed(format!("area '{code}' member '{what}' must be an object")))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{from_document, to_document, to_json_string};
    use crate::error::ErrorKind;
    use crate::model::{Area, Areas, Measure};

    #[test]
    fn empty_collection_is_empty_object() {
        assert_eq!(to_json_string(&Areas::new()), "{}");
    }

    #[test]
    fn empty_sub_objects_are_omitted() {
        let mut areas = Areas::new();
        areas.set_area("W1", Area::new("W1"));
        let mut named = Area::new("W2");
        named.set_name("eng", "Two").unwrap();
        named.set_measure("empty", Measure::new("empty", "Nothing yet"));
        areas.set_area("W2", named);

        assert_eq!(
            to_document(&areas),
            json!({ "W1": {}, "W2": { "names": { "eng": "Two" } } })
        );
    }

    #[test]
    fn years_become_string_keys() {
        let mut areas = Areas::new();
        let mut area = Area::new("W1");
        let mut m = Measure::new("Pop", "Population");
        m.set_value(1991, 100.0);
        m.set_value(1993, 110.5);
        area.set_measure("pop", m);
        areas.set_area("W1", area);

        assert_eq!(
            to_json_string(&areas),
            r#"{"W1":{"measures":{"pop":{"1991":100.0,"1993":110.5}}}}"#
        );
    }

    #[test]
    fn non_object_documents_are_malformed() {
        assert_eq!(from_document(&json!([])).unwrap_err().kind(), ErrorKind::Malformed);
        assert_eq!(
            from_document(&json!({"W1": {"measures": {"pop": {"19x1": 1.0}}}}))
                .unwrap_err()
                .kind(),
            ErrorKind::Malformed
        );
    }
}
