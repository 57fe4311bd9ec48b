//! Bin edges and value → bin lookup.

use ec_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Sorted bin edges (length = n_bins + 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binning {
    edges: Vec<f64>,
}

impl Binning {
    /// `n_bins` equal-width bins over `[min, max)`.
    pub fn uniform(n_bins: usize, min: f64, max: f64) -> Result<Self> {
        if n_bins == 0 {
            return Err(Error::Validation("binning needs at least 1 bin".into()));
        }
        if !(min.is_finite() && max.is_finite() && max > min) {
            return Err(Error::Validation(format!("invalid bin range [{min}, {max})")));
        }
        let width = (max - min) / n_bins as f64;
        let mut edges: Vec<f64> = (0..n_bins).map(|i| min + i as f64 * width).collect();
        edges.push(max);
        Ok(Self { edges })
    }

    /// Arbitrary strictly increasing edges.
    pub fn from_edges(edges: Vec<f64>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(Error::Validation(format!(
                "invalid bin_edges (len(edges)={}, need >= 2)",
                edges.len()
            )));
        }
        if edges.windows(2).any(|w| !(w[1] > w[0])) || edges.iter().any(|e| !e.is_finite()) {
            return Err(Error::Validation(
                "bin_edges must be finite and strictly increasing".into(),
            ));
        }
        Ok(Self { edges })
    }

    /// Number of in-range bins.
    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Lower edge of the first bin.
    pub fn min(&self) -> f64 {
        self.edges[0]
    }

    /// Upper edge of the last bin.
    pub fn max(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// Bin edges.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Bin centers.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
    }

    /// Find the bin index for a value.
    ///
    /// Returns `None` for underflow/overflow and NaN.
    pub fn find_bin(&self, val: f64) -> Option<usize> {
        let edges = &self.edges;
        if !(val >= edges[0]) || val >= edges[edges.len() - 1] {
            return None;
        }
        match edges.binary_search_by(|e| e.total_cmp(&val)) {
            Ok(i) => {
                if i >= edges.len() - 1 {
                    None
                } else {
                    Some(i)
                }
            }
            Err(i) => {
                if i == 0 || i >= edges.len() {
                    None
                } else {
                    Some(i - 1)
                }
            }
        }
    }
}
