//! Right-aligned two-row text columns.
//!
//! Works on already formatted strings; it knows nothing about what the cells mean.

/// Left-pad the shorter of `top` and `bottom` with spaces so both have the same width.
pub fn right_align_pair(top: &str, bottom: &str) -> (String, String) {
    let width = top.chars().count().max(bottom.chars().count());
    (format!("{top:>width$}"), format!("{bottom:>width$}"))
}

/// A header row and a value row whose cells are right-aligned pairwise and joined by one space.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignedRows {
    top: Vec<String>,
    bottom: Vec<String>,
}

impl AlignedRows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    pub fn push(&mut self, top: impl AsRef<str>, bottom: impl AsRef<str>) {
        let (top, bottom) = right_align_pair(top.as_ref(), bottom.as_ref());
        self.top.push(top);
        self.bottom.push(bottom);
    }

    pub fn len(&self) -> usize {
        self.top.len()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }

    /// The two finished lines, without trailing newlines.
    pub fn lines(&self) -> (String, String) {
        (self.top.join(" "), self.bottom.join(" "))
    }
}
