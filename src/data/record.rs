//! Per-marker record types for association results.

use serde::{Deserialize, Serialize};

/// One row of raw association output for a single marker and trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationRecord {
    /// Trait (phenotype) name.
    pub trait_name: String,
    /// Marker (SNP) identifier.
    pub marker_id: String,
    /// Chromosome label as exported by the association test.
    pub chromosome: String,
    /// Physical position. Absent when the export left it empty or non-numeric.
    pub position: Option<i64>,
    /// Raw p-value. Absent when missing or non-numeric.
    pub p_value: Option<f64>,
}

impl AssociationRecord {
    /// Create a new association record.
    pub fn new(
        trait_name: impl Into<String>,
        marker_id: impl Into<String>,
        chromosome: impl Into<String>,
        position: Option<i64>,
        p_value: Option<f64>,
    ) -> Self {
        Self {
            trait_name: trait_name.into(),
            marker_id: marker_id.into(),
            chromosome: chromosome.into(),
            position,
            p_value,
        }
    }
}

/// Significance call against the Bonferroni threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Significance {
    Yes,
    No,
}

impl Significance {
    /// Classify an unadjusted p-value against the Bonferroni threshold.
    pub fn from_threshold(p_value: f64, threshold: f64) -> Self {
        if p_value < threshold {
            Self::Yes
        } else {
            Self::No
        }
    }

    /// Get the value written to output tables.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
        }
    }
}

/// An association record extended with multiple-testing corrections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectedRecord {
    pub trait_name: String,
    pub marker_id: String,
    pub chromosome: String,
    pub position: Option<i64>,
    /// Raw p-value. Always finite and strictly positive.
    pub p_value: f64,
    /// `min(p_value * n_tests, 1)`.
    pub p_bonferroni: f64,
    /// Benjamini-Hochberg adjusted p-value within the trait.
    pub p_fdr: f64,
    /// `-log10(p_value)`.
    pub neg_log10_p: f64,
    /// `-log10(alpha / n_tests)`, constant across a run.
    pub neg_log10_threshold: f64,
    pub significance: Significance,
}

impl CorrectedRecord {
    /// Check if this marker passes the Bonferroni threshold.
    pub fn is_significant(&self) -> bool {
        self.significance == Significance::Yes
    }
}
