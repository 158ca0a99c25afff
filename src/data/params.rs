//! Run-wide correction parameters.

use crate::error::{GwasError, Result};
use serde::{Deserialize, Serialize};

/// Family-wise error rate used for the Bonferroni threshold.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Constants fixed for a whole correction run.
///
/// `n_tests` is the total number of markers tested and is shared by every
/// trait in the run; it is never recomputed from a single trait's table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    n_tests: usize,
    top_n: usize,
    alpha: f64,
}

impl RunParameters {
    /// Create parameters with the default alpha of 0.05.
    pub fn new(n_tests: usize, top_n: usize) -> Result<Self> {
        Self::with_alpha(n_tests, top_n, DEFAULT_ALPHA)
    }

    /// Create parameters with a custom alpha.
    pub fn with_alpha(n_tests: usize, top_n: usize, alpha: f64) -> Result<Self> {
        if n_tests == 0 {
            return Err(GwasError::InvalidParameter(
                "n_tests must be a positive integer".to_string(),
            ));
        }
        if top_n == 0 {
            return Err(GwasError::InvalidParameter(
                "top_n must be a positive integer".to_string(),
            ));
        }
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(GwasError::InvalidParameter(format!(
                "alpha must be between 0 and 1 (exclusive), got {}",
                alpha
            )));
        }
        Ok(Self {
            n_tests,
            top_n,
            alpha,
        })
    }

    /// Total number of tests.
    #[inline]
    pub fn n_tests(&self) -> usize {
        self.n_tests
    }

    /// Rows kept per trait in the ranked export.
    #[inline]
    pub fn top_n(&self) -> usize {
        self.top_n
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// `alpha / n_tests`.
    #[inline]
    pub fn bonferroni_threshold(&self) -> f64 {
        self.alpha / self.n_tests as f64
    }

    /// `-log10(alpha / n_tests)`.
    #[inline]
    pub fn neg_log10_threshold(&self) -> f64 {
        -self.bonferroni_threshold().log10()
    }
}
