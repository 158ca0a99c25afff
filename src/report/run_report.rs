//! Machine-readable record of a correction run.

use crate::data::RunParameters;
use crate::error::Result;
use crate::filter::CleaningReport;
use crate::report::writer::ensure_parent;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Counts and output paths for one trait.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraitReport {
    pub trait_id: String,
    pub input_file: PathBuf,
    pub cleaning: CleaningReport,
    /// Rows in the full corrected table.
    pub rows_written: usize,
    /// Rows in the top-N table.
    pub top_rows: usize,
    pub significant: usize,
    pub full_output: PathBuf,
    pub top_output: PathBuf,
}

/// Summary of an adjust run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustReport {
    pub n_tests: usize,
    pub top_n: usize,
    pub alpha: f64,
    pub bonferroni_threshold: f64,
    pub neg_log10_threshold: f64,
    pub traits: Vec<TraitReport>,
    pub summary_file: PathBuf,
    pub summary_rows: usize,
}

impl AdjustReport {
    /// Start a report for the given parameters.
    pub fn new(params: &RunParameters, summary_file: &Path) -> Self {
        Self {
            n_tests: params.n_tests(),
            top_n: params.top_n(),
            alpha: params.alpha(),
            bonferroni_threshold: params.bonferroni_threshold(),
            neg_log10_threshold: params.neg_log10_threshold(),
            traits: Vec::new(),
            summary_file: summary_file.to_path_buf(),
            summary_rows: 0,
        }
    }

    /// Total rows excluded by cleaning across all traits.
    pub fn total_excluded(&self) -> usize {
        self.traits.iter().map(|t| t.cleaning.n_excluded()).sum()
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON report to disk.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        ensure_parent(path)?;
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl std::fmt::Display for AdjustReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Bonferroni threshold: {:e} (alpha = {}, n_tests = {}, -log10 = {:.4})",
            self.bonferroni_threshold, self.alpha, self.n_tests, self.neg_log10_threshold
        )?;
        for t in &self.traits {
            writeln!(
                f,
                "  {}: {} rows written ({} excluded), top {} rows, {} significant",
                t.trait_id,
                t.rows_written,
                t.cleaning.n_excluded(),
                t.top_rows,
                t.significant
            )?;
        }
        writeln!(
            f,
            "Summary: {} significant rows across {} traits -> {}",
            self.summary_rows,
            self.traits.len(),
            self.summary_file.display()
        )?;
        Ok(())
    }
}
