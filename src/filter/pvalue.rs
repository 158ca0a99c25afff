//! P-value cleaning prior to correction.

use crate::data::{AssociationRecord, TraitTable};
use serde::{Deserialize, Serialize};

/// Rows surviving the cleaning step, with their validated p-values.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    /// Retained records in input order.
    pub records: Vec<AssociationRecord>,
    /// P-values of `records`, all finite and strictly positive.
    pub p_values: Vec<f64>,
    /// Audit counts for the excluded rows.
    pub report: CleaningReport,
}

/// Counts of rows excluded by the cleaning step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Rows before cleaning.
    pub n_input: usize,
    /// Missing or non-numeric p-values.
    pub n_missing: usize,
    /// NaN or infinite p-values.
    pub n_non_finite: usize,
    /// Zero or negative p-values, including values that underflowed to zero.
    pub n_non_positive: usize,
}

impl CleaningReport {
    /// Total rows excluded.
    pub fn n_excluded(&self) -> usize {
        self.n_missing + self.n_non_finite + self.n_non_positive
    }

    /// Rows retained.
    pub fn n_retained(&self) -> usize {
        self.n_input - self.n_excluded()
    }
}

impl std::fmt::Display for CleaningReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "kept {} of {} rows ({} missing, {} non-finite, {} non-positive)",
            self.n_retained(),
            self.n_input,
            self.n_missing,
            self.n_non_finite,
            self.n_non_positive
        )
    }
}

/// Drop rows whose p-value is missing, non-finite or `<= 0`.
///
/// A p-value of exactly zero is unusable for the log transform and is
/// excluded rather than treated as maximally significant. Exclusions are
/// counted, never reported as errors.
pub fn clean_p_values(table: &TraitTable) -> CleanedTable {
    let mut report = CleaningReport {
        n_input: table.len(),
        ..Default::default()
    };
    let mut records = Vec::with_capacity(table.len());
    let mut p_values = Vec::with_capacity(table.len());

    for record in table.records() {
        match record.p_value {
            None => report.n_missing += 1,
            Some(p) if !p.is_finite() => report.n_non_finite += 1,
            Some(p) if p <= 0.0 => report.n_non_positive += 1,
            Some(p) => {
                records.push(record.clone());
                p_values.push(p);
            }
        }
    }

    CleanedTable {
        records,
        p_values,
        report,
    }
}
