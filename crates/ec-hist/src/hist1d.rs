//! Weighted 1D histogram.

use serde::{Deserialize, Serialize};

use crate::binning::Binning;

/// A weighted 1D histogram with per-bin sum of weights squared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hist1D {
    /// Histogram name.
    pub name: String,
    /// Bin edges.
    pub binning: Binning,
    /// Bin contents (sum of weights per bin, excluding under/overflow).
    pub bin_content: Vec<f64>,
    /// Sum of weights squared per bin.
    pub sumw2: Vec<f64>,
    /// Underflow sum of weights.
    pub underflow: f64,
    /// Overflow sum of weights.
    pub overflow: f64,
    /// Underflow sum of weights squared.
    pub underflow_sumw2: f64,
    /// Overflow sum of weights squared.
    pub overflow_sumw2: f64,
    /// Number of fill calls (including under/overflow).
    pub entries: u64,
}

impl Hist1D {
    /// Empty histogram over `binning`.
    pub fn new(name: impl Into<String>, binning: Binning) -> Self {
        let n_bins = binning.n_bins();
        Self {
            name: name.into(),
            binning,
            bin_content: vec![0.0; n_bins],
            sumw2: vec![0.0; n_bins],
            underflow: 0.0,
            overflow: 0.0,
            underflow_sumw2: 0.0,
            overflow_sumw2: 0.0,
            entries: 0,
        }
    }

    /// Number of in-range bins.
    pub fn n_bins(&self) -> usize {
        self.bin_content.len()
    }

    /// Add `weight` at `x`. Values outside the range go to under/overflow,
    /// NaN is counted as an entry but lands in no bin.
    pub fn fill(&mut self, x: f64, weight: f64) {
        self.entries += 1;
        let w2 = weight * weight;
        if let Some(b) = self.binning.find_bin(x) {
            self.bin_content[b] += weight;
            self.sumw2[b] += w2;
        } else if x < self.binning.min() {
            self.underflow += weight;
            self.underflow_sumw2 += w2;
        } else if x >= self.binning.max() {
            self.overflow += weight;
            self.overflow_sumw2 += w2;
        }
    }

    /// Sum of in-range weights.
    pub fn integral(&self) -> f64 {
        self.bin_content.iter().sum()
    }

    /// Sum of all weights, under/overflow included.
    pub fn total_weight(&self) -> f64 {
        self.integral() + self.underflow + self.overflow
    }

    /// Per-bin statistical error `sqrt(sumw2)`.
    pub fn errors(&self) -> Vec<f64> {
        self.sumw2.iter().map(|v| v.sqrt()).collect()
    }

    /// Largest in-range bin content (0 for an empty histogram).
    pub fn max_content(&self) -> f64 {
        self.bin_content.iter().copied().fold(0.0_f64, f64::max)
    }

    /// Bin-wise ratio `self / denominator` with uncorrelated error propagation.
    ///
    /// Bins with an empty denominator get ratio 0 and error 0.
    pub fn ratio_to(&self, denominator: &Hist1D) -> (Vec<f64>, Vec<f64>) {
        let n = self.n_bins().min(denominator.n_bins());
        let mut ratio = Vec::with_capacity(n);
        let mut err = Vec::with_capacity(n);
        for i in 0..n {
            let num = self.bin_content[i];
            let den = denominator.bin_content[i];
            if den == 0.0 {
                ratio.push(0.0);
                err.push(0.0);
                continue;
            }
            let r = num / den;
            let rel2 = if num != 0.0 { self.sumw2[i] / (num * num) } else { 0.0 }
                + denominator.sumw2[i] / (den * den);
            ratio.push(r);
            err.push(r.abs() * rel2.sqrt());
        }
        (ratio, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_bins() -> Binning {
        Binning::from_edges(vec![0.0, 1.0, 2.0, 3.0]).unwrap()
    }

    #[test]
    fn fill_simple() {
        let mut h = Hist1D::new("h", three_bins());
        for x in [0.5, 1.5, 2.5, 0.5, -1.0, 3.5] {
            h.fill(x, 1.0);
        }
        assert_eq!(h.bin_content, vec![2.0, 1.0, 1.0]);
        assert_eq!(h.underflow, 1.0);
        assert_eq!(h.overflow, 1.0);
        assert_eq!(h.entries, 6);
        assert_eq!(h.total_weight(), 6.0);
    }

    #[test]
    fn fill_with_weight() {
        let mut h = Hist1D::new("h", Binning::from_edges(vec![0.0, 1.0, 2.0]).unwrap());
        h.fill(0.5, 2.0);
        h.fill(1.5, 3.0);
        h.fill(0.5, 1.0);
        assert_eq!(h.bin_content, vec![3.0, 3.0]);
        assert_eq!(h.sumw2, vec![5.0, 9.0]);
        assert_eq!(h.max_content(), 3.0);
    }

    #[test]
    fn nan_lands_nowhere() {
        let mut h = Hist1D::new("h", three_bins());
        h.fill(f64::NAN, 1.0);
        assert_eq!(h.entries, 1);
        assert_eq!(h.total_weight(), 0.0);
    }

    #[test]
    fn ratio_skips_empty_denominator() {
        let mut num = Hist1D::new("n", three_bins());
        let mut den = Hist1D::new("d", three_bins());
        num.fill(0.5, 1.0);
        num.fill(1.5, 1.0);
        den.fill(0.5, 1.0);
        den.fill(0.5, 1.0);
        let (r, e) = num.ratio_to(&den);
        assert_eq!(r, vec![0.5, 0.0, 0.0]);
        assert!(e[0] > 0.0);
        assert_eq!(e[1], 0.0);
    }
}
