//! Data structures for association results and correction runs.

mod params;
mod record;
mod table;

pub use params::{RunParameters, DEFAULT_ALPHA};
pub use record::{AssociationRecord, CorrectedRecord, Significance};
pub use table::{detect_delimiter, parse_p_value, TraitTable, REQUIRED_COLUMNS};
