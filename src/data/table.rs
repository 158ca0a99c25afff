//! Per-trait association tables with schema validation at ingestion.

use crate::data::AssociationRecord;
use crate::error::{GwasError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Column names every per-trait table must carry (case-sensitive).
pub const REQUIRED_COLUMNS: [&str; 5] = ["Trait", "Marker", "Chr", "Pos", "p"];

/// Ordered association records for a single trait.
#[derive(Debug, Clone)]
pub struct TraitTable {
    /// Identifier used in output file names.
    trait_id: String,
    records: Vec<AssociationRecord>,
}

impl TraitTable {
    /// Create a table from already-parsed records.
    pub fn new(trait_id: impl Into<String>, records: Vec<AssociationRecord>) -> Self {
        Self {
            trait_id: trait_id.into(),
            records,
        }
    }

    /// Load a per-trait table from a delimited file.
    ///
    /// The delimiter is taken from the header line: tab if present, otherwise
    /// comma. All of [`REQUIRED_COLUMNS`] must be present; other columns are
    /// ignored. Missing or non-numeric p-values and positions are kept as
    /// `None` so the cleaning step can account for them.
    pub fn from_csv<P: AsRef<Path>>(path: P, trait_id: impl Into<String>) -> Result<Self> {
        let path = path.as_ref();
        let delimiter = detect_delimiter(path)?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let mut indices = [0usize; 5];
        for (slot, column) in indices.iter_mut().zip(REQUIRED_COLUMNS.iter()) {
            *slot = headers
                .iter()
                .position(|h| h.trim() == *column)
                .ok_or_else(|| GwasError::Schema {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                })?;
        }
        let [trait_idx, marker_idx, chr_idx, pos_idx, p_idx] = indices;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let field = |idx: usize| row.get(idx).unwrap_or("").trim();
            records.push(AssociationRecord::new(
                field(trait_idx),
                field(marker_idx),
                field(chr_idx),
                parse_position(field(pos_idx)),
                parse_p_value(field(p_idx)),
            ));
        }

        Ok(Self::new(trait_id, records))
    }

    /// Trait identifier.
    #[inline]
    pub fn trait_id(&self) -> &str {
        &self.trait_id
    }

    /// Records in input order.
    #[inline]
    pub fn records(&self) -> &[AssociationRecord] {
        &self.records
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Pick the field delimiter from the header line.
pub fn detect_delimiter(path: &Path) -> Result<u8> {
    let file = File::open(path)?;
    let mut header = String::new();
    BufReader::new(file).read_line(&mut header)?;
    Ok(if header.contains('\t') { b'\t' } else { b',' })
}

/// Parse a p-value field. Empty, `NA` and non-numeric text are missing.
///
/// Non-finite values (`NaN`, `Inf`) parse successfully and are left for the
/// cleaning step to reject.
pub fn parse_p_value(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("na") {
        return None;
    }
    raw.parse::<f64>().ok()
}

fn parse_position(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_comma_table() {
        let file = write_temp(
            "\"Trait\",\"Marker\",\"Chr\",\"Pos\",\"p\",\"add_effect\"\n\
             \"GY\",\"snp1\",\"1A\",1200,1e-7,0.3\n\
             \"GY\",\"snp2\",\"1B\",,NaN,0.1\n",
        );
        let table = TraitTable::from_csv(file.path(), "GY").unwrap();

        assert_eq!(table.trait_id(), "GY");
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].marker_id, "snp1");
        assert_eq!(table.records()[0].position, Some(1200));
        assert_eq!(table.records()[0].p_value, Some(1e-7));
        assert_eq!(table.records()[1].position, None);
        assert!(table.records()[1].p_value.unwrap().is_nan());
    }

    #[test]
    fn test_load_tab_table_with_reordered_columns() {
        let file = write_temp("p\tPos\tChr\tMarker\tTrait\n0.5\t10\t2D\tm1\tHT\n");
        let table = TraitTable::from_csv(file.path(), "HT").unwrap();

        let record = &table.records()[0];
        assert_eq!(record.trait_name, "HT");
        assert_eq!(record.chromosome, "2D");
        assert_eq!(record.p_value, Some(0.5));
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let file = write_temp("Trait,Marker,Chr,Pos,pvalue\nGY,m1,1A,5,0.1\n");
        let err = TraitTable::from_csv(file.path(), "GY").unwrap_err();

        match err {
            GwasError::Schema { column, .. } => assert_eq!(column, "p"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_only_table_is_empty() {
        let file = write_temp("Trait,Marker,Chr,Pos,p\n");
        let table = TraitTable::from_csv(file.path(), "GY").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_parse_p_value() {
        assert_eq!(parse_p_value("0.01"), Some(0.01));
        assert_eq!(parse_p_value(" 1e-300 "), Some(1e-300));
        assert_eq!(parse_p_value(""), None);
        assert_eq!(parse_p_value("NA"), None);
        assert_eq!(parse_p_value("abc"), None);
        assert_eq!(parse_p_value("1e-400"), Some(0.0));
    }
}
