//! Weighted–weighted two-sample chi2 test.
//!
//! Compares the *shapes* of two histograms whose bins carry arbitrary
//! weights, using per-bin `sumw` and `sumw2`:
//!
//! ```text
//! chi2 = Σ_i (S2·c1_i − S1·c2_i)² / (S1²·v2_i + S2²·v1_i)
//! ndf  = (#bins used) − 1
//! ```
//!
//! where `S1`, `S2` are the in-range totals. Bins empty in both histograms are
//! excluded. A bin empty in only one histogram gets that histogram's squared
//! mean weight as its variance.

use ec_core::{Error, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::hist1d::Hist1D;

/// Outcome of [`chi2_test_ww`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chi2TestResult {
    /// Test statistic.
    pub chi2: f64,
    /// Degrees of freedom.
    pub ndf: usize,
    /// Upper-tail probability of `chi2` for `ndf` degrees of freedom.
    pub p_value: f64,
    /// Normalized per-bin residuals (0 for excluded bins).
    pub residuals: Vec<f64>,
}

impl Chi2TestResult {
    fn neutral(n_bins: usize) -> Self {
        Self { chi2: 0.0, ndf: 0, p_value: 1.0, residuals: vec![0.0; n_bins] }
    }

    /// `chi2 / ndf`, or 0 when there are no degrees of freedom.
    pub fn chi2_ndf(&self) -> f64 {
        if self.ndf == 0 { 0.0 } else { self.chi2 / self.ndf as f64 }
    }
}

fn mean_weight_sq(h: &Hist1D) -> f64 {
    let sumw: f64 = h.bin_content.iter().sum();
    let sumw2: f64 = h.sumw2.iter().sum();
    if sumw == 0.0 {
        return 1.0;
    }
    let w = sumw2 / sumw;
    w * w
}

/// Weighted two-sample chi2 test between `h1` and `h2`.
///
/// Returns [`Error::Validation`] when the binnings differ. Degenerate input
/// (an empty histogram, fewer than two usable bins) yields a neutral result
/// with `chi2 = 0`, `ndf = 0` and `p_value = 1`.
pub fn chi2_test_ww(h1: &Hist1D, h2: &Hist1D) -> Result<Chi2TestResult> {
    if h1.binning != h2.binning {
        return Err(Error::Validation(format!(
            "chi2 test needs identical binning ('{}' has {} bins, '{}' has {})",
            h1.name,
            h1.n_bins(),
            h2.name,
            h2.n_bins()
        )));
    }

    let n = h1.n_bins();
    let s1 = h1.integral();
    let s2 = h2.integral();
    if s1 == 0.0 || s2 == 0.0 {
        return Ok(Chi2TestResult::neutral(n));
    }

    let fallback1 = mean_weight_sq(h1);
    let fallback2 = mean_weight_sq(h2);

    let mut chi2 = 0.0;
    let mut used = 0usize;
    let mut residuals = vec![0.0; n];
    for i in 0..n {
        let (c1, c2) = (h1.bin_content[i], h2.bin_content[i]);
        let (mut v1, mut v2) = (h1.sumw2[i], h2.sumw2[i]);
        if c1 == 0.0 && c2 == 0.0 {
            continue;
        }
        if v1 <= 0.0 {
            v1 = fallback1;
        }
        if v2 <= 0.0 {
            v2 = fallback2;
        }
        let sigma = s1 * s1 * v2 + s2 * s2 * v1;
        if !(sigma > 0.0) || !sigma.is_finite() {
            continue;
        }
        let delta = s2 * c1 - s1 * c2;
        chi2 += delta * delta / sigma;
        residuals[i] = delta / sigma.sqrt();
        used += 1;
    }

    if used < 2 {
        return Ok(Chi2TestResult::neutral(n));
    }
    let ndf = used - 1;
    let dist = ChiSquared::new(ndf as f64)
        .map_err(|e| Error::Computation(format!("chi-squared distribution: {e}")))?;
    Ok(Chi2TestResult { chi2, ndf, p_value: dist.sf(chi2), residuals })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::Binning;
    use approx::assert_relative_eq;

    fn hist(name: &str, fills: &[(f64, f64)]) -> Hist1D {
        let mut h = Hist1D::new(name, Binning::uniform(4, 0.0, 4.0).unwrap());
        for &(x, w) in fills {
            h.fill(x, w);
        }
        h
    }

    #[test]
    fn identical_shapes_give_zero() {
        let a = hist("a", &[(0.5, 1.0), (1.5, 1.0), (1.5, 1.0), (2.5, 1.0)]);
        // Same shape, doubled normalization.
        let b = hist("b", &[(0.5, 2.0), (1.5, 2.0), (1.5, 2.0), (2.5, 2.0)]);
        let r = chi2_test_ww(&a, &b).unwrap();
        assert_relative_eq!(r.chi2, 0.0, epsilon = 1e-12);
        assert_eq!(r.ndf, 2);
        assert_relative_eq!(r.p_value, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn hand_computed_two_bins() {
        // c1 = [2, 1], c2 = [1, 2], unit weights.
        let a = hist("a", &[(0.5, 1.0), (0.5, 1.0), (1.5, 1.0)]);
        let b = hist("b", &[(0.5, 1.0), (1.5, 1.0), (1.5, 1.0)]);
        let r = chi2_test_ww(&a, &b).unwrap();
        // S1 = S2 = 3; per bin delta = ±3, sigma = 9·1 + 9·2 = 27 (and 9·2 + 9·1).
        assert_eq!(r.ndf, 1);
        assert_relative_eq!(r.chi2, 2.0 * 9.0 / 27.0, epsilon = 1e-12);
        assert_relative_eq!(r.chi2_ndf(), 2.0 / 3.0, epsilon = 1e-12);
        assert!(r.residuals[0] > 0.0 && r.residuals[1] < 0.0);
        assert_eq!(r.residuals[2], 0.0);
    }

    #[test]
    fn empty_histogram_is_neutral() {
        let a = hist("a", &[(0.5, 1.0)]);
        let b = hist("b", &[]);
        let r = chi2_test_ww(&a, &b).unwrap();
        assert_eq!(r.chi2, 0.0);
        assert_eq!(r.ndf, 0);
        assert_eq!(r.chi2_ndf(), 0.0);
    }

    #[test]
    fn one_sided_bin_uses_mean_weight() {
        let a = hist("a", &[(0.5, 1.0), (1.5, 1.0), (2.5, 1.0)]);
        let b = hist("b", &[(0.5, 4.0), (1.5, 4.0)]);
        let r = chi2_test_ww(&a, &b).unwrap();
        assert_eq!(r.ndf, 2);
        assert!(r.chi2.is_finite() && r.chi2 > 0.0);
        assert!(r.residuals.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn empty_truth_bin_with_corrected_content() {
        // truth = [1, 2, 0, 0] at unit weight, corrected = [2, 2, 0, 2] at weight 2.
        let truth = hist("true", &[(0.5, 1.0), (1.5, 1.0), (1.5, 1.0)]);
        let corr = hist("corr", &[(0.5, 2.0), (1.5, 2.0), (3.5, 2.0)]);
        let r = chi2_test_ww(&truth, &corr).unwrap();
        // S1 = 3, S2 = 6. Bin 0 agrees; bin 1: 6² / (9·4 + 36·2) = 36/108;
        // bin 3 falls back to truth's mean weight² = 1: 6² / (9·4 + 36·1) = 36/72.
        assert_eq!(r.ndf, 2);
        assert!(r.chi2.is_finite());
        assert_relative_eq!(r.chi2, 36.0 / 108.0 + 36.0 / 72.0, epsilon = 1e-12);
        assert_relative_eq!(r.chi2_ndf(), 5.0 / 12.0, epsilon = 1e-12);
        assert_relative_eq!(r.residuals[3], -6.0 / 72f64.sqrt(), epsilon = 1e-12);
        assert_eq!(r.residuals[2], 0.0);
    }

    #[test]
    fn binning_mismatch_is_an_error() {
        let a = hist("a", &[(0.5, 1.0)]);
        let b = Hist1D::new("b", Binning::uniform(5, 0.0, 4.0).unwrap());
        assert!(matches!(chi2_test_ww(&a, &b), Err(Error::Validation(_))));
    }
}
