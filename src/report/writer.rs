//! Delimited output for corrected tables.

use crate::data::CorrectedRecord;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Output columns, in order.
pub const OUTPUT_COLUMNS: [&str; 10] = [
    "Trait",
    "Marker",
    "Chr",
    "Pos",
    "p",
    "p_Bonferroni",
    "p_FDR",
    "log10p",
    "log10_threshold",
    "significant",
];

/// Format a float deterministically.
///
/// Shortest round-trip representation; magnitudes below `1e-4` or at least
/// `1e15` switch to exponent form so tiny p-values stay compact.
pub fn format_float(value: f64) -> String {
    let abs = value.abs();
    if value == 0.0 || (1e-4..1e15).contains(&abs) {
        format!("{}", value)
    } else {
        format!("{:e}", value)
    }
}

/// Quote a string field, doubling embedded quotes.
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Write corrected records as comma-delimited text with a header row.
///
/// String columns (`Trait`, `Marker`, `Chr`, `significant`) and the header
/// are always quoted, even when the value looks numeric; numeric columns
/// never are. An empty slice produces a header-only file.
pub fn write_corrected_csv<P: AsRef<Path>>(path: P, records: &[CorrectedRecord]) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    // Quoting is decided per column here, so the writer must not add its own.
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_path(path)?;

    writer.write_record(OUTPUT_COLUMNS.iter().map(|c| quoted(c)))?;
    for r in records {
        let position = r.position.map(|p| p.to_string()).unwrap_or_default();
        writer.write_record([
            quoted(&r.trait_name),
            quoted(&r.marker_id),
            quoted(&r.chromosome),
            position,
            format_float(r.p_value),
            format_float(r.p_bonferroni),
            format_float(r.p_fdr),
            format_float(r.neg_log10_p),
            format_float(r.neg_log10_threshold),
            quoted(r.significance.name()),
        ])?;
    }
    writer.flush()?;

    Ok(())
}
