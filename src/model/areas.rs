//! Top-level collection of areas keyed by local authority code.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::error::{StatsError, StatsResult};

use super::Area;

/// All areas loaded during a run, iterated in ascending code order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Areas {
    areas: BTreeMap<String, Area>,
}

impl Areas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `area` under `code`, or merge it into the area already stored there.
    pub fn set_area(&mut self, code: impl Into<String>, area: Area) {
        match self.areas.entry(code.into()) {
            Entry::Occupied(mut existing) => existing.get_mut().absorb(area),
            Entry::Vacant(slot) => {
                slot.insert(area);
            }
        }
    }

    pub fn area(&self, code: &str) -> StatsResult<&Area> {
        self.areas
            .get(code)
            .ok_or_else(|| StatsError::not_found(format!("No area found matching {code}")))
    }

    pub fn area_mut(&mut self, code: &str) -> StatsResult<&mut Area> {
        self.areas
            .get_mut(code)
            .ok_or_else(|| StatsError::not_found(format!("No area found matching {code}")))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.areas.contains_key(code)
    }

    /// Number of distinct areas.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Areas in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = &Area> {
        self.areas.values()
    }
}

impl<'a> IntoIterator for &'a Areas {
    type Item = &'a Area;
    type IntoIter = std::collections::btree_map::Values<'a, String, Area>;

    fn into_iter(self) -> Self::IntoIter {
        self.areas.values()
    }
}
