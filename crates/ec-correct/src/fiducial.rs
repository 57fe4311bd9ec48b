//! Fiducial phase space, decided on the generated pair.

use ec_core::TrackPair;
use serde::{Deserialize, Serialize};

/// Both tracks need `pT > pt_min` and `|η| < eta_max` (strict).
///
/// The thresholds must match the ones the efficiency model was trained with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiducialFilter {
    /// Track transverse momentum threshold (GeV).
    pub pt_min: f64,
    /// Track pseudorapidity threshold.
    pub eta_max: f64,
}

impl Default for FiducialFilter {
    fn default() -> Self {
        Self { pt_min: 0.1, eta_max: 0.9 }
    }
}

impl FiducialFilter {
    /// Whether the generated pair lies inside the fiducial region.
    pub fn accepts(&self, generated: &TrackPair) -> bool {
        [&generated.first, &generated.second]
            .iter()
            .all(|p| p.pt() > self.pt_min && p.eta().abs() < self.eta_max)
    }
}
