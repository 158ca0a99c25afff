//! Discovery of per-trait input files.

use crate::error::{GwasError, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default pattern for per-trait tables written by the partitioner.
pub const DEFAULT_PATTERN: &str = r"^mlm_stats_(.+)\.csv$";

/// A per-trait input file and the identifier used for its outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredTrait {
    pub trait_id: String,
    pub path: PathBuf,
}

/// List files in `dir` whose names match `pattern`.
///
/// The trait identifier is the pattern's first capture group when it has
/// one, otherwise the file stem. Results are sorted by identifier. Fails when
/// the directory is missing, when nothing matches, or when two files resolve
/// to the same identifier.
pub fn discover_traits(dir: &Path, pattern: &str) -> Result<Vec<DiscoveredTrait>> {
    if !dir.is_dir() {
        return Err(GwasError::InputDirNotFound(dir.to_path_buf()));
    }
    let re = Regex::new(pattern)?;

    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(caps) = re.captures(name) else {
            continue;
        };

        let trait_id = match caps.get(1).map(|m| m.as_str()) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(name)
                .to_string(),
        };
        debug!("Matched {:?} as trait '{}'", path, trait_id);
        found.push(DiscoveredTrait { trait_id, path });
    }

    if found.is_empty() {
        return Err(GwasError::NoMatchingFiles {
            dir: dir.to_path_buf(),
            pattern: pattern.to_string(),
        });
    }

    found.sort_by(|a, b| a.trait_id.cmp(&b.trait_id).then_with(|| a.path.cmp(&b.path)));
    if let Some(pair) = found.windows(2).find(|w| w[0].trait_id == w[1].trait_id) {
        return Err(GwasError::DuplicateTrait {
            trait_id: pair[0].trait_id.clone(),
            first: pair[0].path.clone(),
            second: pair[1].path.clone(),
        });
    }

    Ok(found)
}
