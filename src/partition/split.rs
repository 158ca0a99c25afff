//! Splitting a combined association table into one table per trait.

use crate::error::{GwasError, Result};
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the column that identifies the trait of each row.
pub const TRAIT_COLUMN: &str = "Trait";

/// Default file name prefix for per-trait tables.
pub const DEFAULT_PREFIX: &str = "mlm_stats_";

/// A combined association table with all columns kept verbatim.
#[derive(Debug, Clone)]
pub struct AssociationTable {
    headers: StringRecord,
    rows: Vec<StringRecord>,
    trait_column: usize,
}

impl AssociationTable {
    /// Build a table from headers and rows.
    pub fn new(headers: StringRecord, rows: Vec<StringRecord>, source: &Path) -> Result<Self> {
        let trait_column = headers
            .iter()
            .position(|h| h.trim() == TRAIT_COLUMN)
            .ok_or_else(|| GwasError::NoTraitColumn(source.to_path_buf()))?;
        Ok(Self {
            headers,
            rows,
            trait_column,
        })
    }

    /// Load a tab-delimited association export.
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(GwasError::InputNotFound(path.to_path_buf()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_path(path)?;
        let headers = reader.headers()?.clone();
        let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;

        Self::new(headers, rows, path)
    }

    /// Column names.
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    /// Rows in input order.
    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn trait_of<'a>(&self, row: &'a StringRecord) -> &'a str {
        row.get(self.trait_column).unwrap_or("")
    }
}

/// Rows of a single trait, in input order.
#[derive(Debug, Clone)]
pub struct TraitPartition {
    pub trait_name: String,
    pub rows: Vec<StringRecord>,
}

impl TraitPartition {
    /// File-name-safe form of the trait name.
    pub fn file_stem(&self) -> String {
        sanitize_trait_name(&self.trait_name)
    }
}

/// A per-trait file written by [`write_partitions`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrittenPartition {
    pub trait_name: String,
    pub path: PathBuf,
    pub n_rows: usize,
}

/// Group rows by trait.
///
/// Traits appear in the order they are first seen; rows keep input order.
/// A blank or whitespace-only trait name is an error: it has no file stem the
/// adjust stage could discover.
pub fn partition(table: &AssociationTable) -> Result<Vec<TraitPartition>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut partitions: Vec<TraitPartition> = Vec::new();

    for (i, row) in table.rows().iter().enumerate() {
        let trait_name = table.trait_of(row);
        if trait_name.trim().is_empty() {
            return Err(GwasError::EmptyTraitName { row: i + 1 });
        }
        let slot = match index.get(trait_name) {
            Some(&slot) => slot,
            None => {
                index.insert(trait_name.to_string(), partitions.len());
                partitions.push(TraitPartition {
                    trait_name: trait_name.to_string(),
                    rows: Vec::new(),
                });
                partitions.len() - 1
            }
        };
        partitions[slot].rows.push(row.clone());
    }

    Ok(partitions)
}

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize_trait_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Fail if two distinct trait names share a sanitized file stem.
pub fn check_collisions(partitions: &[TraitPartition]) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for p in partitions {
        let stem = p.file_stem();
        if let Some(first) = seen.insert(stem.clone(), &p.trait_name) {
            return Err(GwasError::SanitizedNameCollision {
                first: first.to_string(),
                second: p.trait_name.clone(),
                sanitized: stem,
            });
        }
    }
    Ok(())
}

/// Write each partition to `<out_dir>/<prefix><sanitized trait>.csv`.
///
/// The output directory is created if absent. Name collisions are checked
/// before any file is written.
pub fn write_partitions(
    headers: &StringRecord,
    partitions: &[TraitPartition],
    out_dir: &Path,
    prefix: &str,
) -> Result<Vec<WrittenPartition>> {
    check_collisions(partitions)?;
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::with_capacity(partitions.len());
    for p in partitions {
        let path = out_dir.join(format!("{}{}.csv", prefix, p.file_stem()));
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::NonNumeric)
            .from_path(&path)?;
        writer.write_record(headers)?;
        for row in &p.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;

        debug!("Wrote {} rows for trait '{}' to {:?}", p.rows.len(), p.trait_name, path);
        written.push(WrittenPartition {
            trait_name: p.trait_name.clone(),
            path,
            n_rows: p.rows.len(),
        });
    }

    Ok(written)
}

/// Read a combined table and write one CSV per trait.
pub fn split_traits<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    out_dir: Q,
    prefix: &str,
) -> Result<Vec<WrittenPartition>> {
    let input = input.as_ref();
    let out_dir = out_dir.as_ref();

    let table = AssociationTable::from_tsv(input)?;
    let partitions = partition(&table)?;
    let written = write_partitions(table.headers(), &partitions, out_dir, prefix)?;

    info!(
        "Split {} rows from {:?} into {} trait tables under {:?}",
        table.len(),
        input,
        written.len(),
        out_dir
    );
    Ok(written)
}
