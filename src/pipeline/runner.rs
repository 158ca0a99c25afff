//! Pipeline runner for the configured stages.

use crate::error::{GwasError, Result};
use crate::logging::StageTimer;
use crate::partition::{split_traits, WrittenPartition};
use crate::pipeline::adjust::{run_adjust, AdjustOutcome};
use crate::pipeline::config::PipelineConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A stage of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Split the combined association export by trait.
    TraitSplit,
    /// Correct, rank and summarize per-trait tables.
    TraitAdjust,
}

impl Stage {
    /// Every stage, in execution order.
    pub const ALL: [Stage; 2] = [Stage::TraitSplit, Stage::TraitAdjust];

    /// Get the configuration key.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TraitSplit => "trait_split",
            Self::TraitAdjust => "trait_adjust",
        }
    }

    /// Look up a stage by its configuration key.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }
}

/// Resolve stage names into stages in execution order.
///
/// Names may be comma-joined. Duplicates are dropped; unknown names fail with
/// all offenders listed.
pub fn select_stages<S: AsRef<str>>(names: &[S]) -> Result<Vec<Stage>> {
    let mut requested = Vec::new();
    let mut unknown = Vec::new();
    for name in names
        .iter()
        .flat_map(|n| n.as_ref().split(','))
        .map(str::trim)
        .filter(|n| !n.is_empty())
    {
        match Stage::from_name(name) {
            Some(stage) => requested.push(stage),
            None => unknown.push(name.to_string()),
        }
    }

    if !unknown.is_empty() {
        return Err(GwasError::Config(format!(
            "Unknown stage(s): {} (available: {})",
            unknown.join(", "),
            Stage::ALL.map(|s| s.name()).join(", ")
        )));
    }

    Ok(Stage::ALL
        .into_iter()
        .filter(|s| requested.contains(s))
        .collect())
}

/// Outputs of a pipeline run. Stages that did not run are `None`.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutcome {
    pub split: Option<Vec<WrittenPartition>>,
    pub adjust: Option<AdjustOutcome>,
}

/// Runs the stages present in a [`PipelineConfig`].
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create from a config.
    pub fn from_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Pipeline name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Stages present in the config, in execution order.
    pub fn configured_stages(&self) -> Vec<Stage> {
        let mut stages = Vec::new();
        if self.config.trait_split.is_some() {
            stages.push(Stage::TraitSplit);
        }
        if self.config.trait_adjust.is_some() {
            stages.push(Stage::TraitAdjust);
        }
        stages
    }

    /// Run the selected stages, or every configured stage when `selection` is
    /// `None`. With `dry_run`, only log what would run.
    ///
    /// Selecting a stage that has no section in the config is an error.
    pub fn run(&self, selection: Option<&[Stage]>, dry_run: bool) -> Result<PipelineOutcome> {
        let configured = self.configured_stages();
        let stages: Vec<Stage> = match selection {
            Some(selected) => {
                if let Some(missing) = selected.iter().find(|s| !configured.contains(*s)) {
                    return Err(GwasError::Config(format!(
                        "Stage '{}' is not configured",
                        missing.name()
                    )));
                }
                Stage::ALL
                    .into_iter()
                    .filter(|s| selected.contains(s))
                    .collect()
            }
            None => configured,
        };
        if stages.is_empty() {
            warn!("Pipeline '{}' has no stages to run", self.config.name);
        }
        let names: Vec<_> = stages.iter().map(|s| s.name()).collect();
        info!(
            "Pipeline '{}' started (dry_run = {}): {}",
            self.config.name,
            dry_run,
            names.join(", ")
        );

        // Adjust parameters are validated before any stage writes.
        let adjust_options = self.config.adjust_options()?;

        let mut outcome = PipelineOutcome::default();
        if dry_run {
            for stage in &stages {
                info!("[dry-run] {}", stage.name());
            }
            return Ok(outcome);
        }

        if let Some(split) = self
            .config
            .trait_split
            .as_ref()
            .filter(|_| stages.contains(&Stage::TraitSplit))
        {
            let _timer = StageTimer::start("Split association results by trait");
            outcome.split = Some(split_traits(&split.input, &split.output_dir, &split.prefix)?);
        }
        if let Some(options) = adjust_options
            .as_ref()
            .filter(|_| stages.contains(&Stage::TraitAdjust))
        {
            let _timer = StageTimer::start("Adjust trait p-values");
            outcome.adjust = Some(run_adjust(options)?);
        }

        info!("Pipeline '{}' complete", self.config.name);
        Ok(outcome)
    }
}
