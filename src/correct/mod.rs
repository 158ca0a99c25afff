//! Multiple testing correction and ranking.

pub mod bh;
pub mod bonferroni;
pub mod engine;
pub mod rank;

pub use bh::bh_adjust;
pub use bonferroni::bonferroni_adjust;
pub use engine::{correct_trait, CorrectedTrait};
pub use rank::{sorted_by_pvalue, top_n};
