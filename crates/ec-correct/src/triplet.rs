//! Generated / reconstructed / corrected histogram triplets.
//!
//! A triplet is filled once per fiducial event and consumed by `save`, which
//! writes its figures and numbers-first JSON artifacts.

use std::path::Path;

use ec_hist::{Binning, Chi2TestResult, Hist1D, Hist2D, chi2_test_ww};
use ec_viz::{
    LegendPosition, triplet1d_artifact, triplet2d_artifact, weight_control_artifact,
};
use ec_viz_render::config::VizConfig;
use ec_viz_render::plots::{triplet1d, triplet2d, weight_control};
use serde::Serialize;

use crate::error::Result;

/// 1D triplet plus the (reco value, clamped efficiency) diagnostic.
#[derive(Debug, Clone)]
pub struct Triplet1D {
    truth: Hist1D,
    reco: Hist1D,
    corrected: Hist1D,
    weight_control: Hist2D,
    x_label: String,
    legend: LegendPosition,
}

impl Triplet1D {
    /// The diagnostic uses `binning` on x and as many bins over `[0, 1]` on y.
    pub fn new(
        name: &str,
        x_label: &str,
        binning: Binning,
        legend: LegendPosition,
    ) -> ec_core::Result<Self> {
        let efficiency_axis = Binning::uniform(binning.n_bins(), 0.0, 1.0)?;
        Ok(Self {
            truth: Hist1D::new(name, binning.clone()),
            reco: Hist1D::new(format!("{name}_reco"), binning.clone()),
            corrected: Hist1D::new(format!("{name}_corr"), binning.clone()),
            weight_control: Hist2D::new(format!("{name}_vs_weight"), binning, efficiency_axis),
            x_label: x_label.to_string(),
            legend,
        })
    }

    /// Name of the `true` histogram, used as the file stem.
    pub fn name(&self) -> &str {
        &self.truth.name
    }

    /// `true` always gets unit weight at `generated`; reconstructed events add
    /// unit weight to `reco`, `weight` to `corrected` and one entry at
    /// `(reconstructed, 1 / weight)` to the diagnostic.
    pub fn fill(&mut self, passed_reco: bool, generated: f64, reconstructed: f64, weight: f64) {
        self.truth.fill(generated, 1.0);
        if passed_reco {
            self.reco.fill(reconstructed, 1.0);
            self.corrected.fill(reconstructed, weight);
            self.weight_control.fill(reconstructed, 1.0 / weight, 1.0);
        }
    }

    /// Generated distribution.
    pub fn truth(&self) -> &Hist1D {
        &self.truth
    }

    /// Reconstructed distribution, unit weights.
    pub fn reco(&self) -> &Hist1D {
        &self.reco
    }

    /// Reconstructed distribution with correction weights.
    pub fn corrected(&self) -> &Hist1D {
        &self.corrected
    }

    /// Reconstructed value against clamped efficiency.
    pub fn weight_control(&self) -> &Hist2D {
        &self.weight_control
    }

    /// Weighted chi2 test of `corrected` against `true`.
    pub fn chi2(&self) -> ec_core::Result<Chi2TestResult> {
        chi2_test_ww(&self.truth, &self.corrected)
    }

    /// Write `<name>.svg`, `<name>_logy.svg`, `<name>_vs_weight.svg` and the
    /// JSON artifacts into `dir`; return chi2/ndf.
    pub fn save(self, dir: &Path, config: &VizConfig) -> Result<f64> {
        let chi2 = self.chi2()?;
        let name = self.truth.name.clone();
        let art = triplet1d_artifact(
            &self.x_label,
            &self.truth,
            &self.reco,
            &self.corrected,
            &chi2,
            self.legend,
        )?;
        write_json(dir, &name, &art)?;
        let linear = triplet1d::render(&art, config, triplet1d::YScale::Linear)?;
        write_figure(dir, &name, linear, config)?;
        let log = triplet1d::render(&art, config, triplet1d::YScale::Log)?;
        write_figure(dir, &format!("{name}_logy"), log, config)?;

        let control = weight_control_artifact(&self.x_label, &self.weight_control);
        write_json(dir, &control.name, &control)?;
        let svg = weight_control::render(&control, config)?;
        write_figure(dir, &control.name, svg, config)?;

        tracing::info!(
            observable = %name,
            chi2 = chi2.chi2,
            ndf = chi2.ndf,
            chi2_ndf = chi2.chi2_ndf(),
            "saved 1D triplet"
        );
        Ok(chi2.chi2_ndf())
    }
}

/// 2D triplet; no diagnostic and no goodness-of-fit.
#[derive(Debug, Clone)]
pub struct Triplet2D {
    truth: Hist2D,
    reco: Hist2D,
    corrected: Hist2D,
    x_label: String,
    y_label: String,
}

impl Triplet2D {
    /// Empty triplet over `x` × `y`.
    pub fn new(name: &str, x_label: &str, y_label: &str, x: Binning, y: Binning) -> Self {
        Self {
            truth: Hist2D::new(name, x.clone(), y.clone()),
            reco: Hist2D::new(format!("{name}_reco"), x.clone(), y.clone()),
            corrected: Hist2D::new(format!("{name}_corr"), x, y),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
        }
    }

    /// Name of the `true` histogram, used as the file stem.
    pub fn name(&self) -> &str {
        &self.truth.name
    }

    /// Same routing as [`Triplet1D::fill`], without the diagnostic.
    pub fn fill(
        &mut self,
        passed_reco: bool,
        generated: (f64, f64),
        reconstructed: (f64, f64),
        weight: f64,
    ) {
        self.truth.fill(generated.0, generated.1, 1.0);
        if passed_reco {
            self.reco.fill(reconstructed.0, reconstructed.1, 1.0);
            self.corrected.fill(reconstructed.0, reconstructed.1, weight);
        }
    }

    /// Generated distribution.
    pub fn truth(&self) -> &Hist2D {
        &self.truth
    }

    /// Reconstructed distribution, unit weights.
    pub fn reco(&self) -> &Hist2D {
        &self.reco
    }

    /// Reconstructed distribution with correction weights.
    pub fn corrected(&self) -> &Hist2D {
        &self.corrected
    }

    /// Write `<name>.svg` and `<name>.json` into `dir`. Always returns `0.0`.
    pub fn save(self, dir: &Path, config: &VizConfig) -> Result<f64> {
        let art = triplet2d_artifact(
            &self.x_label,
            &self.y_label,
            &self.truth,
            &self.reco,
            &self.corrected,
        )?;
        write_json(dir, &art.name, &art)?;
        let svg = triplet2d::render(&art, config)?;
        write_figure(dir, &art.name, svg, config)?;
        tracing::debug!(observable = %art.name, "saved 2D triplet");
        Ok(0.0)
    }
}

pub(crate) fn write_json<T: Serialize>(dir: &Path, stem: &str, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    ec_viz_render::output::write_bytes(&dir.join(format!("{stem}.json")), &bytes)?;
    Ok(())
}

/// Encode `svg` in the configured output format and write `<stem>.<format>`.
pub(crate) fn write_figure(dir: &Path, stem: &str, svg: String, config: &VizConfig) -> Result<()> {
    let format = config.output.format.as_str();
    let bytes = ec_viz_render::svg_to_format(svg, format, config)?;
    ec_viz_render::output::write_bytes(&dir.join(format!("{stem}.{format}")), &bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn t1() -> Triplet1D {
        let b = Binning::uniform(10, 0.0, 1.0).unwrap();
        Triplet1D::new("h1x", "x", b, LegendPosition::NorthEast).unwrap()
    }

    #[test]
    fn fill_routes_by_reco_flag() {
        let mut t = t1();
        t.fill(true, 0.15, 0.25, 2.0);
        t.fill(false, 0.35, 0.45, 4.0);
        assert_relative_eq!(t.truth().total_weight(), 2.0);
        assert_relative_eq!(t.reco().total_weight(), 1.0);
        assert_relative_eq!(t.corrected().total_weight(), 2.0);
        assert_eq!(t.weight_control().entries, 1);
        // (0.25, 0.5) -> ix = 2, iy = 5
        assert_relative_eq!(t.weight_control().content(2, 5), 1.0);
    }

    #[test]
    fn unit_weights_reproduce_truth() {
        let mut t = t1();
        for i in 0..100 {
            let x = (i as f64 * 0.37) % 1.0;
            t.fill(true, x, x, 1.0);
        }
        assert_eq!(t.truth().bin_content, t.reco().bin_content);
        assert_eq!(t.truth().bin_content, t.corrected().bin_content);
        let chi2 = t.chi2().unwrap();
        assert_relative_eq!(chi2.chi2, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn diagnostic_axis_matches_observable_bins() {
        let t = t1();
        assert_eq!(t.weight_control().nx(), 10);
        assert_eq!(t.weight_control().ny(), 10);
        assert_eq!(t.weight_control().y.max(), 1.0);
        assert_eq!(t.weight_control().name, "h1x_vs_weight");
    }

    #[test]
    fn fill_2d_routes_by_reco_flag() {
        let b = Binning::uniform(4, 0.0, 4.0).unwrap();
        let mut t = Triplet2D::new("h2", "x", "y", b.clone(), b);
        t.fill(true, (0.5, 0.5), (1.5, 1.5), 3.0);
        t.fill(false, (2.5, 2.5), (3.5, 3.5), 3.0);
        assert_relative_eq!(t.truth().integral(), 2.0);
        assert_relative_eq!(t.reco().integral(), 1.0);
        assert_relative_eq!(t.corrected().content(1, 1), 3.0);
    }
}
