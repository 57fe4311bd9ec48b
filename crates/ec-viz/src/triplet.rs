//! Generated / reconstructed / corrected comparison artifacts (numbers-first).

use ec_core::{Error, Result};
use ec_hist::{Chi2TestResult, Hist1D, Hist2D};
use serde::{Deserialize, Serialize};

use crate::ArtifactMeta;

/// Legend corner for 1D comparison figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    /// Top right of the main panel.
    #[default]
    NorthEast,
    /// Bottom right of the main panel.
    SouthEast,
}

/// Chi2 test outcome as stored in artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chi2Summary {
    /// Test statistic.
    pub chi2: f64,
    /// Degrees of freedom.
    pub ndf: usize,
    /// `chi2 / ndf` (0 when `ndf == 0`).
    pub chi2_ndf: f64,
    /// Upper-tail probability.
    pub p_value: f64,
    /// Normalized per-bin residuals.
    pub residuals: Vec<f64>,
}

impl From<&Chi2TestResult> for Chi2Summary {
    fn from(r: &Chi2TestResult) -> Self {
        Self {
            chi2: r.chi2,
            ndf: r.ndf,
            chi2_ndf: r.chi2_ndf(),
            p_value: r.p_value,
            residuals: r.residuals.clone(),
        }
    }
}

/// One series (values + symmetric errors) over shared bin edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Bin values.
    pub y: Vec<f64>,
    /// Bin errors.
    pub yerr: Vec<f64>,
}

/// 1D triplet comparison: generated, reconstructed, corrected, plus ratios to generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Triplet1DArtifact {
    /// Schema tag.
    pub schema_version: String,
    /// Producer metadata.
    pub meta: ArtifactMeta,
    /// Observable name (also the output file stem).
    pub name: String,
    /// X-axis title.
    pub x_label: String,
    /// Bin edges (`n + 1`).
    pub bin_edges: Vec<f64>,
    /// Generated distribution.
    pub truth: Series,
    /// Reconstructed distribution.
    pub reco: Series,
    /// Efficiency-corrected distribution.
    pub corrected: Series,
    /// `reco / truth` per bin (0 for empty truth bins).
    pub ratio_reco: Series,
    /// `corrected / truth` per bin (0 for empty truth bins).
    pub ratio_corrected: Series,
    /// Y range of the ratio panel.
    pub ratio_range: [f64; 2],
    /// Chi2 test of `truth` vs `corrected`.
    pub chi2: Chi2Summary,
    /// Legend corner.
    pub legend_position: LegendPosition,
}

/// Schema tag of [`Triplet1DArtifact`].
pub const TRIPLET1D_SCHEMA: &str = "effcorr_triplet1d_v1";

/// Schema tag of [`Triplet2DArtifact`].
pub const TRIPLET2D_SCHEMA: &str = "effcorr_triplet2d_v1";

/// Fixed y range of the ratio panels.
pub const RATIO_RANGE: [f64; 2] = [0.0, 2.0];

fn series(h: &Hist1D) -> Series {
    Series { y: h.bin_content.clone(), yerr: h.errors() }
}

fn ratio_series(num: &Hist1D, den: &Hist1D) -> Series {
    let (y, yerr) = num.ratio_to(den);
    Series { y, yerr }
}

/// Build a [`Triplet1DArtifact`] from the three histograms of one observable.
pub fn triplet1d_artifact(
    x_label: &str,
    truth: &Hist1D,
    reco: &Hist1D,
    corrected: &Hist1D,
    chi2: &Chi2TestResult,
    legend_position: LegendPosition,
) -> Result<Triplet1DArtifact> {
    if truth.binning != reco.binning || truth.binning != corrected.binning {
        return Err(Error::Validation(format!(
            "triplet '{}' has mismatched binnings",
            truth.name
        )));
    }
    Ok(Triplet1DArtifact {
        schema_version: TRIPLET1D_SCHEMA.to_string(),
        meta: ArtifactMeta::current(),
        name: truth.name.clone(),
        x_label: x_label.to_string(),
        bin_edges: truth.binning.edges().to_vec(),
        truth: series(truth),
        reco: series(reco),
        corrected: series(corrected),
        ratio_reco: ratio_series(reco, truth),
        ratio_corrected: ratio_series(corrected, truth),
        ratio_range: RATIO_RANGE,
        chi2: Chi2Summary::from(chi2),
        legend_position,
    })
}

/// 2D triplet comparison. Grids are row-major in y (`iy * nx + ix`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Triplet2DArtifact {
    /// Schema tag.
    pub schema_version: String,
    /// Producer metadata.
    pub meta: ArtifactMeta,
    /// Observable name.
    pub name: String,
    /// X-axis title.
    pub x_label: String,
    /// Y-axis title.
    pub y_label: String,
    /// X bin edges.
    pub x_edges: Vec<f64>,
    /// Y bin edges.
    pub y_edges: Vec<f64>,
    /// Generated grid.
    pub truth: Vec<f64>,
    /// Reconstructed grid.
    pub reco: Vec<f64>,
    /// Corrected grid.
    pub corrected: Vec<f64>,
    /// `reco / truth` grid.
    pub ratio_reco: Vec<f64>,
    /// `corrected / truth` grid.
    pub ratio_corrected: Vec<f64>,
    /// Colour scale of the three distribution panels, `[0, max(truth)]`.
    pub z_range: [f64; 2],
    /// Colour scale of the ratio panels.
    pub ratio_range: [f64; 2],
}

/// Build a [`Triplet2DArtifact`] from the three histograms of one observable.
pub fn triplet2d_artifact(
    x_label: &str,
    y_label: &str,
    truth: &Hist2D,
    reco: &Hist2D,
    corrected: &Hist2D,
) -> Result<Triplet2DArtifact> {
    let same = |h: &Hist2D| h.x == truth.x && h.y == truth.y;
    if !same(reco) || !same(corrected) {
        return Err(Error::Validation(format!(
            "triplet '{}' has mismatched binnings",
            truth.name
        )));
    }
    Ok(Triplet2DArtifact {
        schema_version: TRIPLET2D_SCHEMA.to_string(),
        meta: ArtifactMeta::current(),
        name: truth.name.clone(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        x_edges: truth.x.edges().to_vec(),
        y_edges: truth.y.edges().to_vec(),
        truth: truth.bin_content.clone(),
        reco: reco.bin_content.clone(),
        corrected: corrected.bin_content.clone(),
        ratio_reco: reco.ratio_to(truth),
        ratio_corrected: corrected.ratio_to(truth),
        z_range: [0.0, truth.max_content()],
        ratio_range: RATIO_RANGE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ec_hist::{Binning, chi2_test_ww};

    #[test]
    fn triplet1d_shapes_and_ratios() {
        let b = Binning::uniform(3, 0.0, 3.0).unwrap();
        let mut t = Hist1D::new("h1M", b.clone());
        let mut r = Hist1D::new("h1M_reco", b.clone());
        let mut c = Hist1D::new("h1M_corr", b);
        for x in [0.5, 0.5, 1.5] {
            t.fill(x, 1.0);
        }
        r.fill(0.5, 1.0);
        c.fill(0.5, 2.0);
        let chi2 = chi2_test_ww(&t, &c).unwrap();
        let art = triplet1d_artifact("M [GeV]", &t, &r, &c, &chi2, LegendPosition::SouthEast)
            .unwrap();
        assert_eq!(art.name, "h1M");
        assert_eq!(art.bin_edges.len(), 4);
        assert_eq!(art.ratio_reco.y, vec![0.5, 0.0, 0.0]);
        assert_eq!(art.ratio_corrected.y, vec![1.0, 0.0, 0.0]);
        assert_eq!(art.ratio_range, [0.0, 2.0]);

        let json = serde_json::to_string(&art).unwrap();
        assert!(json.contains("\"legend_position\":\"south_east\""));
        let back: Triplet1DArtifact = serde_json::from_str(&json).unwrap();
        assert_eq!(back.truth, art.truth);
    }

    #[test]
    fn triplet2d_colour_scale_from_truth() {
        let x = Binning::uniform(2, 0.0, 2.0).unwrap();
        let y = Binning::uniform(2, 0.0, 2.0).unwrap();
        let mut t = Hist2D::new("h2", x.clone(), y.clone());
        let r = Hist2D::new("h2_reco", x.clone(), y.clone());
        let mut c = Hist2D::new("h2_corr", x, y);
        t.fill(0.5, 0.5, 1.0);
        t.fill(0.5, 0.5, 1.0);
        c.fill(0.5, 0.5, 5.0);
        let art = triplet2d_artifact("x", "y", &t, &r, &c).unwrap();
        assert_eq!(art.z_range, [0.0, 2.0]);
        assert_eq!(art.ratio_corrected[0], 2.5);
        assert_eq!(art.ratio_reco, vec![0.0; 4]);
    }

    #[test]
    fn mismatched_binning_rejected() {
        let t = Hist1D::new("a", Binning::uniform(3, 0.0, 3.0).unwrap());
        let r = Hist1D::new("b", Binning::uniform(4, 0.0, 3.0).unwrap());
        let chi2 = chi2_test_ww(&t, &t).unwrap();
        assert!(triplet1d_artifact("x", &t, &r, &t, &chi2, LegendPosition::NorthEast).is_err());
    }
}
