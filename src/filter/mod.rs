//! Filtering primitives for association tables.

pub mod pvalue;

pub use pvalue::{clean_p_values, CleanedTable, CleaningReport};
