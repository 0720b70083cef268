//! Ingestion filters.
//!
//! Filters are evaluated per candidate record while a source is being ingested; nothing is
//! filtered after the fact. An empty filter matches everything.

use std::collections::BTreeSet;

use crate::model::Areas;

/// Case-insensitive substring filter over area code and names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaFilter {
    terms: BTreeSet<String>,
}

impl AreaFilter {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether an area with this code and these names is admitted into `areas`.
    ///
    /// A term matches when it is a substring of a non-empty code, English name or Welsh name.
    /// A code already present in `areas` is always admitted, so rows that only carry a code
    /// follow the areas admitted by an earlier source.
    pub fn matches(&self, code: &str, english: &str, welsh: &str, areas: &Areas) -> bool {
        if self.terms.is_empty() || areas.contains(code) {
            return true;
        }

        let haystacks: Vec<String> = [code, english, welsh]
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
            .collect();

        self.terms
            .iter()
            .any(|term| haystacks.iter().any(|h| h.contains(term.as_str())))
    }
}

/// Case-insensitive exact match on measure codenames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasureFilter {
    codenames: BTreeSet<String>,
}

impl MeasureFilter {
    pub fn new<I, S>(codenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            codenames: codenames
                .into_iter()
                .map(|c| c.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.codenames.is_empty()
    }

    pub fn matches(&self, codename: &str) -> bool {
        self.codenames.is_empty() || self.codenames.contains(&codename.to_ascii_lowercase())
    }
}

/// Inclusive year range. `(0, 0)` matches every year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearFilter {
    min: u32,
    max: u32,
}

impl YearFilter {
    /// The filter that admits every year.
    pub const ALL: Self = Self { min: 0, max: 0 };

    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn bounds(&self) -> (u32, u32) {
        (self.min, self.max)
    }

    pub fn is_all(&self) -> bool {
        self.min == 0 && self.max == 0
    }

    pub fn matches(&self, year: u32) -> bool {
        self.is_all() || (self.min <= year && year <= self.max)
    }
}

/// The three filters applied during ingestion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub areas: AreaFilter,
    pub measures: MeasureFilter,
    pub years: YearFilter,
}

impl Filters {
    /// Filters that admit everything.
    pub fn none() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::{AreaFilter, MeasureFilter, YearFilter};
    use crate::model::{Area, Areas};

    #[test]
    fn empty_area_filter_matches_everything() {
        let f = AreaFilter::default();
        assert!(f.matches("W06000023", "", "", &Areas::new()));
        assert!(f.matches("", "", "", &Areas::new()));
    }

    #[test]
    fn area_filter_matches_substrings_case_insensitively() {
        let areas = Areas::new();
        let f = AreaFilter::new(["w0600"]);
        assert!(f.matches("W06000023", "", "", &areas));
        assert!(!f.matches("E09000001", "London", "Llundain", &areas));

        let f = AreaFilter::new(["SWAN"]);
        assert!(f.matches("W06000011", "Swansea", "Abertawe", &areas));
        let f = AreaFilter::new(["tawe"]);
        assert!(f.matches("W06000011", "Swansea", "Abertawe", &areas));
    }

    #[test]
    fn area_filter_ignores_empty_fields() {
        let f = AreaFilter::new([""]);
        assert!(!f.matches("", "", "", &Areas::new()));
    }

    #[test]
    fn area_filter_admits_codes_already_loaded() {
        let mut areas = Areas::new();
        let f = AreaFilter::new(["swansea"]);
        assert!(!f.matches("W06000011", "", "", &areas));

        areas.set_area("W06000011", Area::new("W06000011"));
        assert!(f.matches("W06000011", "", "", &areas));
    }

    #[test]
    fn measure_filter_is_exact_and_case_insensitive() {
        let f = MeasureFilter::new(["POP"]);
        assert!(f.matches("pop"));
        assert!(f.matches("Pop"));
        assert!(!f.matches("popden"));
        assert!(MeasureFilter::default().matches("anything"));
    }

    #[test]
    fn year_filter_is_inclusive() {
        let f = YearFilter::new(1993, 1995);
        assert!(!f.matches(1992));
        assert!(f.matches(1993));
        assert!(f.matches(1995));
        assert!(!f.matches(1996));
        assert!(YearFilter::ALL.matches(0));
        assert!(YearFilter::ALL.matches(2024));
    }
}
