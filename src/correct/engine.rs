//! Per-trait correction: cleaning, Bonferroni, BH, threshold flags and ranking.

use crate::correct::bh::bh_adjust;
use crate::correct::bonferroni::bonferroni_adjust;
use crate::correct::rank::top_n;
use crate::data::{CorrectedRecord, RunParameters, Significance, TraitTable};
use crate::filter::{clean_p_values, CleaningReport};

/// Corrected output for one trait.
#[derive(Debug, Clone)]
pub struct CorrectedTrait {
    /// Trait identifier used in output file names.
    pub trait_id: String,
    /// All cleaned rows in input order.
    pub full: Vec<CorrectedRecord>,
    /// The `top_n` rows with the smallest p-values, ascending.
    pub top: Vec<CorrectedRecord>,
    /// Rows excluded during cleaning.
    pub cleaning: CleaningReport,
}

impl CorrectedTrait {
    /// Rows flagged significant, in input order.
    pub fn significant(&self) -> impl Iterator<Item = &CorrectedRecord> {
        self.full.iter().filter(|r| r.is_significant())
    }

    /// Number of significant rows.
    pub fn n_significant(&self) -> usize {
        self.significant().count()
    }
}

/// Correct one trait's table.
///
/// The FDR adjustment runs over this trait's cleaned p-values only. The
/// Bonferroni adjustment and the significance flag use the run-wide
/// `n_tests`; the flag compares the raw p-value with `alpha / n_tests`
/// directly rather than reading `p_bonferroni`.
pub fn correct_trait(table: &TraitTable, params: &RunParameters) -> CorrectedTrait {
    let cleaned = clean_p_values(table);
    let q_values = bh_adjust(&cleaned.p_values);

    let threshold = params.bonferroni_threshold();
    let neg_log10_threshold = params.neg_log10_threshold();

    let full: Vec<CorrectedRecord> = cleaned
        .records
        .into_iter()
        .zip(cleaned.p_values.iter().zip(q_values))
        .map(|(record, (&p, q))| CorrectedRecord {
            trait_name: record.trait_name,
            marker_id: record.marker_id,
            chromosome: record.chromosome,
            position: record.position,
            p_value: p,
            p_bonferroni: bonferroni_adjust(p, params.n_tests()),
            p_fdr: q,
            neg_log10_p: -p.log10(),
            neg_log10_threshold,
            significance: Significance::from_threshold(p, threshold),
        })
        .collect();

    let top = top_n(&full, params.top_n());

    CorrectedTrait {
        trait_id: table.trait_id().to_string(),
        full,
        top,
        cleaning: cleaned.report,
    }
}
