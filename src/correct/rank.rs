//! Ranking of corrected records by raw p-value.

use crate::data::CorrectedRecord;

/// Records sorted ascending by raw p-value.
///
/// The sort is stable: ties keep their input order.
pub fn sorted_by_pvalue(records: &[CorrectedRecord]) -> Vec<CorrectedRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| a.p_value.total_cmp(&b.p_value));
    sorted
}

/// The `n` smallest p-values, in ascending order.
///
/// Returns fewer rows when the table is shorter than `n`.
pub fn top_n(records: &[CorrectedRecord], n: usize) -> Vec<CorrectedRecord> {
    let mut sorted = sorted_by_pvalue(records);
    sorted.truncate(n);
    sorted
}
