//! Weighted 2D histogram.

use serde::{Deserialize, Serialize};

use crate::binning::Binning;

/// A weighted 2D histogram, row-major in `y` (index = `iy * nx + ix`).
///
/// Entries outside either axis range are counted in `entries` and in
/// `out_of_range` but land in no bin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hist2D {
    /// Histogram name.
    pub name: String,
    /// X-axis bin edges.
    pub x: Binning,
    /// Y-axis bin edges.
    pub y: Binning,
    /// Bin contents, `nx * ny`.
    pub bin_content: Vec<f64>,
    /// Sum of weights squared per bin.
    pub sumw2: Vec<f64>,
    /// Sum of weights that fell outside the 2D range.
    pub out_of_range: f64,
    /// Number of fill calls.
    pub entries: u64,
}

impl Hist2D {
    /// Empty histogram over `x × y`.
    pub fn new(name: impl Into<String>, x: Binning, y: Binning) -> Self {
        let n = x.n_bins() * y.n_bins();
        Self {
            name: name.into(),
            x,
            y,
            bin_content: vec![0.0; n],
            sumw2: vec![0.0; n],
            out_of_range: 0.0,
            entries: 0,
        }
    }

    /// Number of x bins.
    pub fn nx(&self) -> usize {
        self.x.n_bins()
    }

    /// Number of y bins.
    pub fn ny(&self) -> usize {
        self.y.n_bins()
    }

    /// Add `weight` at `(x, y)`.
    pub fn fill(&mut self, x: f64, y: f64, weight: f64) {
        self.entries += 1;
        match (self.x.find_bin(x), self.y.find_bin(y)) {
            (Some(ix), Some(iy)) => {
                let idx = iy * self.nx() + ix;
                self.bin_content[idx] += weight;
                self.sumw2[idx] += weight * weight;
            }
            _ => self.out_of_range += weight,
        }
    }

    /// Content of bin `(ix, iy)`.
    pub fn content(&self, ix: usize, iy: usize) -> f64 {
        self.bin_content[iy * self.nx() + ix]
    }

    /// Sum of in-range weights.
    pub fn integral(&self) -> f64 {
        self.bin_content.iter().sum()
    }

    /// Largest bin content (0 for an empty histogram).
    pub fn max_content(&self) -> f64 {
        self.bin_content.iter().copied().fold(0.0_f64, f64::max)
    }

    /// Bin-wise `self / denominator`; bins with an empty denominator are 0.
    pub fn ratio_to(&self, denominator: &Hist2D) -> Vec<f64> {
        self.bin_content
            .iter()
            .zip(&denominator.bin_content)
            .map(|(&n, &d)| if d == 0.0 { 0.0 } else { n / d })
            .collect()
    }
}
