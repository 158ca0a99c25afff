//! YAML configuration for the split and adjust stages.

use crate::data::RunParameters;
use crate::error::{GwasError, Result};
use crate::partition::DEFAULT_PREFIX;
use crate::pipeline::adjust::AdjustOptions;
use crate::pipeline::discover::DEFAULT_PATTERN;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default total test count when none is configured.
pub const DEFAULT_N_TESTS: usize = 3048;

/// Default rows kept per trait in the ranked export.
pub const DEFAULT_TOP_N: usize = 10;

fn default_name() -> String {
    "unnamed".to_string()
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_n_tests() -> usize {
    DEFAULT_N_TESTS
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

/// Trait partitioning stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitStage {
    /// Tab-delimited association export with a `Trait` column.
    pub input: PathBuf,
    /// Directory receiving one CSV per trait.
    pub output_dir: PathBuf,
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

/// Correction and ranking stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustStage {
    /// Falls back to the split stage's `output_dir` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_dir: Option<PathBuf>,
    #[serde(default = "default_pattern")]
    pub pattern: String,
    pub output_dir: PathBuf,
    pub summary_file: PathBuf,
    #[serde(default = "default_n_tests")]
    pub n_tests: usize,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,
}

/// Pipeline configuration for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trait_split: Option<SplitStage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trait_adjust: Option<AdjustStage>,
}

impl PipelineConfig {
    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(GwasError::from)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(GwasError::from)
    }

    /// Load a config file, resolving relative paths against its directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(GwasError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        let yaml = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&yaml)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolve_paths(base))
    }

    /// Make every relative path relative to `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        if let Some(split) = self.trait_split.as_mut() {
            resolve(&mut split.input);
            resolve(&mut split.output_dir);
        }
        if let Some(adjust) = self.trait_adjust.as_mut() {
            if let Some(dir) = adjust.input_dir.as_mut() {
                resolve(dir);
            }
            resolve(&mut adjust.output_dir);
            resolve(&mut adjust.summary_file);
            if let Some(report) = adjust.report.as_mut() {
                resolve(report);
            }
        }
        self
    }

    /// Build options for the adjust stage, if configured.
    pub fn adjust_options(&self) -> Result<Option<AdjustOptions>> {
        let Some(stage) = &self.trait_adjust else {
            return Ok(None);
        };
        let input_dir = stage
            .input_dir
            .clone()
            .or_else(|| self.trait_split.as_ref().map(|s| s.output_dir.clone()))
            .ok_or_else(|| {
                GwasError::Config(
                    "trait_adjust.input_dir must be set when trait_split is not configured"
                        .to_string(),
                )
            })?;
        let params = RunParameters::new(stage.n_tests, stage.top_n)?;

        Ok(Some(AdjustOptions {
            input_dir,
            pattern: stage.pattern.clone(),
            output_dir: stage.output_dir.clone(),
            summary_file: stage.summary_file.clone(),
            params,
            report: stage.report.clone(),
        }))
    }

    /// An example configuration covering both stages.
    pub fn example() -> Self {
        Self {
            name: "gwas-traits".to_string(),
            trait_split: Some(SplitStage {
                input: PathBuf::from("results/mlm_stats.txt"),
                output_dir: PathBuf::from("results/traits"),
                prefix: default_prefix(),
            }),
            trait_adjust: Some(AdjustStage {
                input_dir: None,
                pattern: default_pattern(),
                output_dir: PathBuf::from("results/adjusted"),
                summary_file: PathBuf::from("results/significant_snps.csv"),
                n_tests: DEFAULT_N_TESTS,
                top_n: DEFAULT_TOP_N,
                report: Some(PathBuf::from("results/adjust_report.json")),
            }),
        }
    }
}
