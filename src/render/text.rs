//! Text table rendering via [`std::fmt::Display`].
//!
//! ```text
//! Powys / Powys (W06000023)
//! Population density (dens)
//!      1991      1992   Average    Diff.  % Diff.
//! 24.474326 24.405096 24.439711 0.069230 0.282870
//! ```
//!
//! Areas render in ascending code order separated by a blank line; measures in ascending
//! codename order.

use std::fmt;

use crate::model::{Area, Areas, LANG_ENGLISH, LANG_WELSH, Measure};

use super::align::AlignedRows;
use super::format_value;

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.label(), self.codename())?;
        if self.is_empty() {
            return writeln!(f, "<no data>");
        }

        let mut rows = AlignedRows::new();
        for (year, value) in self.values() {
            rows.push(year.to_string(), format_value(*value));
        }
        rows.push("Average", format_value(self.average()));
        rows.push("Diff.", format_value(self.difference()));
        rows.push("% Diff.", format_value(self.difference_as_percentage()));

        let (years, values) = rows.lines();
        writeln!(f, "{years}")?;
        writeln!(f, "{values}")
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let english = self.name(LANG_ENGLISH).ok().filter(|n| !n.is_empty());
        let welsh = self.name(LANG_WELSH).ok().filter(|n| !n.is_empty());
        match (english, welsh) {
            (Some(eng), Some(cym)) => write!(f, "{eng} / {cym}")?,
            (Some(name), None) | (None, Some(name)) => f.write_str(name)?,
            (None, None) => f.write_str("Unnamed")?,
        }
        writeln!(f, " ({})", self.code())?;

        if self.is_empty() {
            return writeln!(f, "<no measures>");
        }
        for measure in self.measures().values() {
            write!(f, "{measure}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Areas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, area) in self.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{area}")?;
        }
        Ok(())
    }
}
