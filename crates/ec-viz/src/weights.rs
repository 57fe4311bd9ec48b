//! Efficiency-weight diagnostics.

use ec_hist::{Hist1D, Hist2D};
use serde::{Deserialize, Serialize};

use crate::ArtifactMeta;

/// Reconstructed observable vs. clamped efficiency (`1 / weight`), as a heat map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightControlArtifact {
    /// Schema tag.
    pub schema_version: String,
    /// Producer metadata.
    pub meta: ArtifactMeta,
    /// Histogram name.
    pub name: String,
    /// X-axis title (the observable).
    pub x_label: String,
    /// Y-axis title.
    pub y_label: String,
    /// X bin edges.
    pub x_edges: Vec<f64>,
    /// Y bin edges.
    pub y_edges: Vec<f64>,
    /// Row-major grid (`iy * nx + ix`).
    pub z: Vec<f64>,
    /// Colour scale `[0, max(z)]`.
    pub z_range: [f64; 2],
}

/// Build a [`WeightControlArtifact`] from the diagnostic histogram of a 1D triplet.
pub fn weight_control_artifact(x_label: &str, h: &Hist2D) -> WeightControlArtifact {
    WeightControlArtifact {
        schema_version: "effcorr_weight_control_v1".to_string(),
        meta: ArtifactMeta::current(),
        name: h.name.clone(),
        x_label: x_label.to_string(),
        y_label: "1 / weight".to_string(),
        x_edges: h.x.edges().to_vec(),
        y_edges: h.y.edges().to_vec(),
        z: h.bin_content.clone(),
        z_range: [0.0, h.max_content()],
    }
}

/// Distribution of clamped efficiencies over all fiducial events of a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightDistributionArtifact {
    /// Schema tag.
    pub schema_version: String,
    /// Producer metadata.
    pub meta: ArtifactMeta,
    /// Histogram name.
    pub name: String,
    /// Bin edges.
    pub bin_edges: Vec<f64>,
    /// Counts per bin.
    pub y: Vec<f64>,
    /// Number of entries.
    pub entries: u64,
    /// Mean efficiency (bin-centre estimate), 0 when empty.
    pub mean: f64,
}

/// Build a [`WeightDistributionArtifact`] from the efficiency histogram.
pub fn weight_distribution_artifact(h: &Hist1D) -> WeightDistributionArtifact {
    let total = h.integral();
    let mean = if total > 0.0 {
        h.binning.centers().iter().zip(&h.bin_content).map(|(c, y)| c * y).sum::<f64>() / total
    } else {
        0.0
    };
    WeightDistributionArtifact {
        schema_version: "effcorr_weight_distribution_v1".to_string(),
        meta: ArtifactMeta::current(),
        name: h.name.clone(),
        bin_edges: h.binning.edges().to_vec(),
        y: h.bin_content.clone(),
        entries: h.entries,
        mean,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec_hist::Binning;

    #[test]
    fn distribution_mean_from_centres() {
        let mut h = Hist1D::new("hx_weights", Binning::uniform(4, 0.0, 1.0).unwrap());
        h.fill(0.1, 1.0);
        h.fill(0.9, 1.0);
        let art = weight_distribution_artifact(&h);
        assert_eq!(art.entries, 2);
        assert!((art.mean - 0.5).abs() < 1e-12);
    }

    #[test]
    fn control_grid_copied() {
        let mut h = Hist2D::new(
            "h1M_vs_weight",
            Binning::uniform(2, 0.0, 4.0).unwrap(),
            Binning::uniform(2, 0.0, 1.0).unwrap(),
        );
        h.fill(3.0, 0.75, 1.0);
        let art = weight_control_artifact("M [GeV]", &h);
        assert_eq!(art.z, vec![0.0, 0.0, 0.0, 1.0]);
        assert_eq!(art.z_range, [0.0, 1.0]);
    }
}
