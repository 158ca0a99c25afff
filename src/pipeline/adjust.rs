//! The correction stage: discover, correct and report every trait.

use crate::correct::{correct_trait, CorrectedTrait};
use crate::data::{RunParameters, TraitTable};
use crate::error::Result;
use crate::pipeline::discover::{discover_traits, DiscoveredTrait, DEFAULT_PATTERN};
use crate::report::{write_corrected_csv, AdjustReport, SignificanceSummary, TraitReport};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Inputs for one correction run.
#[derive(Debug, Clone)]
pub struct AdjustOptions {
    pub input_dir: PathBuf,
    pub pattern: String,
    pub output_dir: PathBuf,
    pub summary_file: PathBuf,
    pub params: RunParameters,
    /// Optional JSON run report.
    pub report: Option<PathBuf>,
}

impl AdjustOptions {
    /// Options with the default discovery pattern and no JSON report.
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        summary_file: impl Into<PathBuf>,
        params: RunParameters,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            pattern: DEFAULT_PATTERN.to_string(),
            output_dir: output_dir.into(),
            summary_file: summary_file.into(),
            params,
            report: None,
        }
    }

    /// Set the discovery pattern.
    pub fn pattern(mut self, pattern: &str) -> Self {
        self.pattern = pattern.to_string();
        self
    }

    /// Write a JSON run report to `path`.
    pub fn report(mut self, path: impl Into<PathBuf>) -> Self {
        self.report = Some(path.into());
        self
    }

    /// Path of the full corrected table for a trait.
    pub fn full_output(&self, trait_id: &str) -> PathBuf {
        self.output_dir.join(format!("adj_p_{}.csv", trait_id))
    }

    /// Path of the top-N table for a trait.
    pub fn top_output(&self, trait_id: &str) -> PathBuf {
        self.output_dir
            .join(format!("top_{}_{}.csv", self.params.top_n(), trait_id))
    }
}

/// Everything produced by [`run_adjust`].
#[derive(Debug, Clone)]
pub struct AdjustOutcome {
    /// Per-trait results in discovery order.
    pub traits: Vec<CorrectedTrait>,
    pub summary: SignificanceSummary,
    pub report: AdjustReport,
}

/// Run the correction stage.
///
/// Every discovered table is loaded and validated before anything is
/// written, so a malformed trait aborts the run without partial output.
/// Traits are corrected and written in parallel; the summary is folded in
/// discovery order afterwards.
pub fn run_adjust(options: &AdjustOptions) -> Result<AdjustOutcome> {
    let params = &options.params;
    let discovered = discover_traits(&options.input_dir, &options.pattern)?;
    info!(
        "Found {} trait tables in {:?} (n_tests = {}, threshold = {:e})",
        discovered.len(),
        options.input_dir,
        params.n_tests(),
        params.bonferroni_threshold()
    );

    let tables: Vec<TraitTable> = discovered
        .par_iter()
        .map(|d| TraitTable::from_csv(&d.path, d.trait_id.as_str()))
        .collect::<Result<Vec<_>>>()?;

    let corrected: Vec<CorrectedTrait> = tables
        .par_iter()
        .map(|table| correct_trait(table, params))
        .collect();

    fs::create_dir_all(&options.output_dir)?;
    let trait_reports: Vec<TraitReport> = discovered
        .par_iter()
        .zip(corrected.par_iter())
        .map(|(d, c)| write_trait(options, d, c))
        .collect::<Result<Vec<_>>>()?;

    let summary = SignificanceSummary::from_traits(&corrected);
    summary.write_csv(&options.summary_file)?;
    info!(
        "Wrote {} significant rows across {} traits to {:?}",
        summary.len(),
        summary.n_traits(),
        options.summary_file
    );

    let mut report = AdjustReport::new(params, &options.summary_file);
    report.traits = trait_reports;
    report.summary_rows = summary.len();
    if let Some(path) = &options.report {
        report.write_json(path)?;
        info!("Run report written to {:?}", path);
    }

    Ok(AdjustOutcome {
        traits: corrected,
        summary,
        report,
    })
}

fn write_trait(
    options: &AdjustOptions,
    discovered: &DiscoveredTrait,
    corrected: &CorrectedTrait,
) -> Result<TraitReport> {
    let full_output = options.full_output(&corrected.trait_id);
    let top_output = options.top_output(&corrected.trait_id);
    write_corrected_csv(&full_output, &corrected.full)?;
    write_corrected_csv(&top_output, &corrected.top)?;

    let cleaning = &corrected.cleaning;
    if cleaning.n_retained() == 0 {
        warn!(
            "Trait '{}': no valid p-values ({} rows read)",
            corrected.trait_id, cleaning.n_input
        );
    } else if cleaning.n_excluded() > 0 {
        info!("Trait '{}': {}", corrected.trait_id, cleaning);
    }
    let significant = corrected.n_significant();
    info!(
        "Trait '{}': {} rows -> {}, top {} -> {}, {} significant",
        corrected.trait_id,
        corrected.full.len(),
        display_name(&full_output),
        corrected.top.len(),
        display_name(&top_output),
        significant
    );

    Ok(TraitReport {
        trait_id: corrected.trait_id.clone(),
        input_file: discovered.path.clone(),
        cleaning: cleaning.clone(),
        rows_written: corrected.full.len(),
        top_rows: corrected.top.len(),
        significant,
        full_output,
        top_output,
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
