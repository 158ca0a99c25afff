//! Output tables, the cross-trait summary and run reports.

pub mod run_report;
pub mod summary;
pub mod writer;

pub use run_report::{AdjustReport, TraitReport};
pub use summary::SignificanceSummary;
pub use writer::{ensure_parent, format_float, write_corrected_csv, OUTPUT_COLUMNS};
