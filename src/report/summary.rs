//! Cross-trait accumulation of significant markers.

use crate::correct::CorrectedTrait;
use crate::data::CorrectedRecord;
use crate::error::Result;
use crate::report::writer::write_corrected_csv;
use std::path::Path;

/// Significant markers gathered across all traits of a run.
///
/// Built by folding per-trait results in a fixed order, so the written file
/// is deterministic.
#[derive(Debug, Clone, Default)]
pub struct SignificanceSummary {
    records: Vec<CorrectedRecord>,
    n_traits: usize,
}

impl SignificanceSummary {
    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the significant rows of one trait.
    pub fn absorb(mut self, corrected: &CorrectedTrait) -> Self {
        self.records.extend(corrected.significant().cloned());
        self.n_traits += 1;
        self
    }

    /// Build a summary from per-trait results in the given order.
    pub fn from_traits<'a, I>(traits: I) -> Self
    where
        I: IntoIterator<Item = &'a CorrectedTrait>,
    {
        traits.into_iter().fold(Self::new(), Self::absorb)
    }

    /// Significant records in accumulation order.
    pub fn records(&self) -> &[CorrectedRecord] {
        &self.records
    }

    /// Number of significant records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of traits folded in.
    pub fn n_traits(&self) -> usize {
        self.n_traits
    }

    /// Write the summary. An empty summary still gets its header row.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write_corrected_csv(path, &self.records)
    }
}
