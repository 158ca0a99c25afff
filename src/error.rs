//! Error types for the gwas-adjust library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum GwasError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input table not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Input table {} has no 'Trait' column", .0.display())]
    NoTraitColumn(PathBuf),

    #[error("Input directory not found: {}", .0.display())]
    InputDirNotFound(PathBuf),

    #[error("No files in {} match pattern '{pattern}'", .dir.display())]
    NoMatchingFiles { dir: PathBuf, pattern: String },

    #[error("Missing required column '{column}' in {}", .path.display())]
    Schema { path: PathBuf, column: String },

    #[error("Data row {row} has an empty 'Trait' value")]
    EmptyTraitName { row: usize },

    #[error("Trait names {first:?} and {second:?} both map to file name '{sanitized}'")]
    SanitizedNameCollision {
        first: String,
        second: String,
        sanitized: String,
    },

    #[error("Files {} and {} both resolve to trait '{trait_id}'", .first.display(), .second.display())]
    DuplicateTrait {
        trait_id: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, GwasError>;
