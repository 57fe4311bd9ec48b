//! Derived observables of a two-track system and the reference histogram set.

use std::f64::consts::PI;

use ec_core::TrackPair;
use ec_viz::LegendPosition;

/// Scalars derived from one track pair. Evaluated identically for the
/// generated and the reconstructed pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservableSet {
    /// System invariant mass.
    pub mass: f64,
    /// System rapidity.
    pub rapidity: f64,
    /// System transverse momentum.
    pub pt: f64,
    /// `y₁ − y₂`.
    pub delta_y: f64,
    /// Pseudorapidity of the first track.
    pub eta1: f64,
    /// Pseudorapidity of the second track.
    pub eta2: f64,
    /// Transverse momentum of the first track.
    pub pt1: f64,
    /// Transverse momentum of the second track.
    pub pt2: f64,
    /// Azimuth of the first track, in `(-π, π]`.
    pub phi1: f64,
    /// Azimuth of the second track, in `(-π, π]`.
    pub phi2: f64,
    /// `φ₁ − φ₂` wrapped into `[-π, π)`.
    pub delta_phi: f64,
}

impl ObservableSet {
    /// All observables of `pair`; the first track is the one listed first
    /// in the record.
    pub fn from_pair(pair: &TrackPair) -> Self {
        let system = pair.system();
        let (a, b) = (&pair.first, &pair.second);
        Self {
            mass: system.mass(),
            rapidity: system.rapidity(),
            pt: system.pt(),
            delta_y: a.rapidity() - b.rapidity(),
            eta1: a.eta(),
            eta2: b.eta(),
            pt1: a.pt(),
            pt2: b.pt(),
            phi1: a.phi(),
            phi2: b.phi(),
            delta_phi: a.delta_phi(b),
        }
    }
}

/// Fixed-width axis `(bins, min, max)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSpec {
    /// Number of bins.
    pub bins: usize,
    /// Lower edge.
    pub min: f64,
    /// Upper edge.
    pub max: f64,
}

impl AxisSpec {
    /// Axis of `bins` equal bins over `[min, max)`.
    pub const fn new(bins: usize, min: f64, max: f64) -> Self {
        Self { bins, min, max }
    }

    /// Histogram binning of this axis.
    pub fn binning(&self) -> ec_core::Result<ec_hist::Binning> {
        ec_hist::Binning::uniform(self.bins, self.min, self.max)
    }
}

/// A declared 1D observable.
#[derive(Debug, Clone)]
pub struct Observable1D {
    /// Histogram name; also the figure file stem.
    pub name: &'static str,
    /// x-axis title.
    pub label: &'static str,
    /// Binning.
    pub axis: AxisSpec,
    /// Legend corner of the figure.
    pub legend: LegendPosition,
    /// Value extracted from an [`ObservableSet`].
    pub value: fn(&ObservableSet) -> f64,
}

/// A declared 2D observable.
#[derive(Debug, Clone)]
pub struct Observable2D {
    /// Histogram name; also the figure file stem.
    pub name: &'static str,
    /// x-axis title.
    pub x_label: &'static str,
    /// y-axis title.
    pub y_label: &'static str,
    /// x binning.
    pub x: AxisSpec,
    /// y binning.
    pub y: AxisSpec,
    /// `(x, y)` extracted from an [`ObservableSet`].
    pub value: fn(&ObservableSet) -> (f64, f64),
}

/// Bins of every reference 1D axis.
pub const BINS_1D: usize = 100;
/// Bins per axis of every reference 2D observable.
pub const BINS_2D: usize = 80;

const MASS_LABEL: &str = "System M (GeV)";

/// The six reference 1D observables.
pub fn reference_1d() -> Vec<Observable1D> {
    fn obs(
        name: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        legend: LegendPosition,
        value: fn(&ObservableSet) -> f64,
    ) -> Observable1D {
        Observable1D { name, label, axis: AxisSpec::new(BINS_1D, min, max), legend, value }
    }

    let ne = LegendPosition::NorthEast;
    let se = LegendPosition::SouthEast;
    let dy_label = "\u{0394}y \u{2261} y\u{2081} \u{2212} y\u{2082}";
    vec![
        obs("h1M", MASS_LABEL, 0.0, 4.0, ne, |o| o.mass),
        obs("h1Y", "System y", -1.0, 1.0, ne, |o| o.rapidity),
        obs("h1Pt", "System p\u{209C} (GeV)", 0.0, 2.0, ne, |o| o.pt),
        obs("h1pt1", "Track p\u{209C} (GeV)", 0.0, 2.0, ne, |o| o.pt1),
        obs("h1eta1", "Track \u{03B7}", -1.0, 1.0, se, |o| o.eta1),
        obs("h1dY", dy_label, -2.0, 2.0, ne, |o| o.delta_y),
    ]
}

/// The six reference 2D observables.
pub fn reference_2d() -> Vec<Observable2D> {
    let ax = |min, max| AxisSpec::new(BINS_2D, min, max);
    let pt_label = "Track p\u{209C} (GeV)";
    vec![
        Observable2D {
            name: "h2etaphi",
            x_label: "Track \u{03B7}",
            y_label: "Track \u{03C6} (rad)",
            x: ax(-1.0, 1.0),
            y: ax(-PI, PI),
            value: |o| (o.eta1, o.phi1),
        },
        Observable2D {
            name: "h2etaeta",
            x_label: "Track \u{03B7}\u{207D}\u{00B9}\u{207E}",
            y_label: "Track \u{03B7}\u{207D}\u{00B2}\u{207E}",
            x: ax(-1.0, 1.0),
            y: ax(-1.0, 1.0),
            value: |o| (o.eta1, o.eta2),
        },
        Observable2D {
            name: "h2pt1pt2",
            x_label: "Track p\u{209C}\u{207D}\u{00B9}\u{207E} (GeV)",
            y_label: "Track p\u{209C}\u{207D}\u{00B2}\u{207E} (GeV)",
            x: ax(0.0, 2.0),
            y: ax(0.0, 2.0),
            value: |o| (o.pt1, o.pt2),
        },
        // Signed Δφ; the negative half lands in the underflow.
        Observable2D {
            name: "h2Mdeltaphi",
            x_label: MASS_LABEL,
            y_label: "Pair \u{0394}\u{03C6} (rad)",
            x: ax(0.0, 4.0),
            y: ax(0.0, PI),
            value: |o| (o.mass, o.delta_phi),
        },
        Observable2D {
            name: "h2MPt",
            x_label: MASS_LABEL,
            y_label: "System p\u{209C} (GeV)",
            x: ax(0.0, 4.0),
            y: ax(0.0, 2.5),
            value: |o| (o.mass, o.pt),
        },
        Observable2D {
            name: "h2Mpt1",
            x_label: MASS_LABEL,
            y_label: pt_label,
            x: ax(0.0, 4.0),
            y: ax(0.0, 2.5),
            value: |o| (o.mass, o.pt1),
        },
    ]
}
