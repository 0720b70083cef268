//! An administrative area: code, names per language, and measures.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::error::{StatsError, StatsResult};

use super::Measure;

/// Language key for English names.
pub const LANG_ENGLISH: &str = "eng";
/// Language key for Welsh names.
pub const LANG_WELSH: &str = "cym";

/// A local authority area.
///
/// Names are keyed by a lowercase three-letter language code; measures by lowercase codename.
#[derive(Debug, Clone, PartialEq)]
pub struct Area {
    code: String,
    names: BTreeMap<String, String>,
    measures: BTreeMap<String, Measure>,
}

impl Area {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            names: BTreeMap::new(),
            measures: BTreeMap::new(),
        }
    }

    /// The local authority code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Name for `lang`. The lookup is exact against the stored lowercase keys.
    pub fn name(&self, lang: &str) -> StatsResult<&str> {
        self.names
            .get(lang)
            .map(String::as_str)
            .ok_or_else(|| StatsError::not_found(format!("No name found for language {lang}")))
    }

    /// Set the name for `lang`, which must be exactly three ASCII letters.
    pub fn set_name(&mut self, lang: &str, name: impl Into<String>) -> StatsResult<()> {
        if lang.len() != 3 || !lang.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(StatsError::InvalidArgument {
                message: format!("language code must be three alphabetical letters, got '{lang}'"),
            });
        }
        self.names.insert(lang.to_ascii_lowercase(), name.into());
        Ok(())
    }

    pub fn names(&self) -> &BTreeMap<String, String> {
        &self.names
    }

    /// Case-insensitive measure lookup.
    pub fn measure(&self, codename: &str) -> StatsResult<&Measure> {
        self.measures
            .get(&codename.to_ascii_lowercase())
            .ok_or_else(|| measure_not_found(codename))
    }

    /// Case-insensitive mutable measure lookup.
    pub fn measure_mut(&mut self, codename: &str) -> StatsResult<&mut Measure> {
        self.measures
            .get_mut(&codename.to_ascii_lowercase())
            .ok_or_else(|| measure_not_found(codename))
    }

    /// Insert `measure` under `codename`, merging into an existing measure with the same key.
    pub fn set_measure(&mut self, codename: &str, measure: Measure) {
        match self.measures.entry(codename.to_ascii_lowercase()) {
            Entry::Occupied(mut existing) => existing.get_mut().absorb(measure),
            Entry::Vacant(slot) => {
                slot.insert(measure);
            }
        }
    }

    /// Measures in ascending codename order.
    pub fn measures(&self) -> &BTreeMap<String, Measure> {
        &self.measures
    }

    /// Number of distinct measures.
    pub fn len(&self) -> usize {
        self.measures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    /// Combine `self` (existing) with `incoming`.
    ///
    /// Names and measures are unioned; `incoming` wins a shared language, and shared codenames
    /// are combined with [`Measure::merge`].
    pub fn merge(mut self, incoming: Area) -> Self {
        self.absorb(incoming);
        self
    }

    pub(crate) fn absorb(&mut self, incoming: Area) {
        self.names.extend(incoming.names);
        for (codename, measure) in incoming.measures {
            self.set_measure(&codename, measure);
        }
    }
}

fn measure_not_found(codename: &str) -> StatsError {
    StatsError::not_found(format!("No measure found matching {codename}"))
}
