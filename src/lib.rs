//! GWAS Multiple-Testing Correction and Reporting Library
//!
//! This library takes per-marker, per-trait association p-values and produces
//! corrected significance calls, per-trait rankings and a cross-trait summary.
//!
//! # Overview
//!
//! The library is organized into composable modules:
//!
//! - **data**: Core data structures (records, trait tables, run parameters)
//! - **partition**: Splitting a combined association export by trait
//! - **filter**: P-value cleaning with audit counts
//! - **correct**: Multiple testing correction (Bonferroni, Benjamini-Hochberg) and ranking
//! - **report**: Corrected table output, the significance summary and run reports
//! - **pipeline**: File discovery, stage configuration and execution
//!
//! # Example
//!
//! ```no_run
//! use gwas_adjust::prelude::*;
//!
//! // Split the association export into one table per trait
//! split_traits("mlm_stats.txt", "traits", DEFAULT_PREFIX).unwrap();
//!
//! // Correct every trait against 3048 tests, keeping the top 10 markers
//! let params = RunParameters::new(3048, 10).unwrap();
//! let outcome = run_adjust(
//!     &AdjustOptions::new("traits", "adjusted", "significant_snps.csv", params),
//! )
//! .unwrap();
//! println!("{}", outcome.report);
//! ```

pub mod correct;
pub mod data;
pub mod error;
pub mod filter;
pub mod logging;
pub mod partition;
pub mod pipeline;
pub mod report;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::correct::{bh_adjust, bonferroni_adjust, correct_trait, top_n, CorrectedTrait};
    pub use crate::data::{
        AssociationRecord, CorrectedRecord, RunParameters, Significance, TraitTable,
        DEFAULT_ALPHA, REQUIRED_COLUMNS,
    };
    pub use crate::error::{GwasError, Result};
    pub use crate::filter::{clean_p_values, CleanedTable, CleaningReport};
    pub use crate::partition::{
        partition, sanitize_trait_name, split_traits, write_partitions, AssociationTable,
        TraitPartition, WrittenPartition, DEFAULT_PREFIX,
    };
    pub use crate::pipeline::{
        discover_traits, run_adjust, select_stages, AdjustOptions, AdjustOutcome, DiscoveredTrait,
        Pipeline, PipelineConfig, Stage, DEFAULT_PATTERN,
    };
    pub use crate::report::{
        write_corrected_csv, AdjustReport, SignificanceSummary, TraitReport, OUTPUT_COLUMNS,
    };
}
