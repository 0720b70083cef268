//! A single named numeric time series.

use std::collections::BTreeMap;

use crate::error::{StatsError, StatsResult};

/// A named series of readings keyed by year.
///
/// The codename is lowercased on construction and never changes afterwards. Years iterate in
/// ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    codename: String,
    label: String,
    values: BTreeMap<u32, f64>,
}

impl Measure {
    /// Create an empty measure. `codename` is stored lowercased, `label` verbatim.
    pub fn new(codename: impl AsRef<str>, label: impl Into<String>) -> Self {
        Self {
            codename: codename.as_ref().to_ascii_lowercase(),
            label: label.into(),
            values: BTreeMap::new(),
        }
    }

    pub fn codename(&self) -> &str {
        &self.codename
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Value recorded for `year`.
    pub fn value(&self, year: u32) -> StatsResult<f64> {
        self.values
            .get(&year)
            .copied()
            .ok_or_else(|| StatsError::not_found(format!("No value found for year {year}")))
    }

    /// Insert or overwrite the value for `year`.
    pub fn set_value(&mut self, year: u32, value: f64) {
        self.values.insert(year, value);
    }

    /// All readings in ascending year order.
    pub fn values(&self) -> &BTreeMap<u32, f64> {
        &self.values
    }

    /// Number of distinct years.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Arithmetic mean of all readings, or `0.0` when there are none.
    pub fn average(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.values().sum::<f64>() / self.values.len() as f64
    }

    /// Absolute change between the earliest and the latest year, or `0.0` with fewer than two
    /// years.
    pub fn difference(&self) -> f64 {
        match self.endpoints() {
            Some((first, last)) => (last - first).abs(),
            None => 0.0,
        }
    }

    /// [`Self::difference`] as a percentage of the earliest year's value.
    ///
    /// Returns `0.0` with fewer than two years, or when the earliest value is zero.
    pub fn difference_as_percentage(&self) -> f64 {
        match self.endpoints() {
            Some((first, _)) if first != 0.0 => self.difference() / first * 100.0,
            _ => 0.0,
        }
    }

    fn endpoints(&self) -> Option<(f64, f64)> {
        if self.values.len() < 2 {
            return None;
        }
        let first = self.values.first_key_value()?.1;
        let last = self.values.last_key_value()?.1;
        Some((*first, *last))
    }

    /// Combine `self` (existing) with `incoming`.
    ///
    /// The result takes `incoming`'s label; readings are the union of both, with `incoming`
    /// winning on a shared year.
    pub fn merge(mut self, incoming: Measure) -> Self {
        self.absorb(incoming);
        self
    }

    pub(crate) fn absorb(&mut self, incoming: Measure) {
        self.label = incoming.label;
        self.values.extend(incoming.values);
    }
}
