//! Pipeline composition and execution.

mod adjust;
mod config;
mod discover;
mod runner;

pub use adjust::{run_adjust, AdjustOptions, AdjustOutcome};
pub use config::{AdjustStage, PipelineConfig, SplitStage, DEFAULT_N_TESTS, DEFAULT_TOP_N};
pub use discover::{discover_traits, DiscoveredTrait, DEFAULT_PATTERN};
pub use runner::{select_stages, Pipeline, PipelineOutcome, Stage};
