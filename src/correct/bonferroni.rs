//! Bonferroni family-wise error rate correction.

/// Per-marker Bonferroni adjusted p-value, `min(p * n_tests, 1)`.
///
/// Saturates to exactly 1.0 for `p >= 1 / n_tests` even where the product
/// would round just below one.
#[inline]
pub fn bonferroni_adjust(p_value: f64, n_tests: usize) -> f64 {
    let n = n_tests as f64;
    if p_value >= 1.0 / n {
        return 1.0;
    }
    (p_value * n).min(1.0)
}
