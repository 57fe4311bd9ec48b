//! Event record and particle species

use serde::{Deserialize, Serialize};

use crate::kinematics::{FourVector, TrackPair};

/// Charged pion mass (GeV)
pub const PION_MASS: f64 = 0.139570;

/// Charged kaon mass (GeV)
pub const KAON_MASS: f64 = 0.493677;

/// Particle species resolved from a PDG-style particle code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Species {
    /// π±
    ChargedPion,
    /// K±
    ChargedKaon,
    /// Anything else; treated as massless
    Other,
}

impl Species {
    /// Resolve a species by exact code match (sign ignored).
    pub fn from_code(code: i32) -> Self {
        match code.unsigned_abs() {
            211 => Self::ChargedPion,
            321 => Self::ChargedKaon,
            _ => Self::Other,
        }
    }

    /// On-shell mass in GeV.
    pub fn mass(self) -> f64 {
        match self {
            Self::ChargedPion => PION_MASS,
            Self::ChargedKaon => KAON_MASS,
            Self::Other => 0.0,
        }
    }
}

/// Cartesian 3-momentum (GeV).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ThreeMomentum {
    /// x component
    pub px: f64,
    /// y component
    pub py: f64,
    /// z component
    pub pz: f64,
}

impl ThreeMomentum {
    /// Create a new 3-momentum
    pub const fn new(px: f64, py: f64, pz: f64) -> Self {
        Self { px, py, pz }
    }

    /// On-shell four-vector with the given mass.
    pub fn with_mass(self, mass: f64) -> FourVector {
        FourVector::from_xyzm(self.px, self.py, self.pz, mass)
    }
}

/// One two-track event as delivered by the record-extraction step.
///
/// Masses are not stored; they are assigned from `codes` when the
/// four-vectors are built, and the same codes apply to both the generated
/// and the reconstructed representation of a track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Generator-level momenta of tracks 1 and 2
    pub generated: [ThreeMomentum; 2],
    /// Reconstruction-level momenta of tracks 1 and 2
    pub reconstructed: [ThreeMomentum; 2],
    /// Particle codes of tracks 1 and 2
    pub codes: [i32; 2],
    /// Whether the event was successfully reconstructed
    pub reco_ok: bool,
}

impl EventRecord {
    /// Masses of tracks 1 and 2.
    pub fn masses(&self) -> [f64; 2] {
        [Species::from_code(self.codes[0]).mass(), Species::from_code(self.codes[1]).mass()]
    }

    /// Generator-level four-vector pair.
    pub fn generated_pair(&self) -> TrackPair {
        let [m1, m2] = self.masses();
        TrackPair::new(self.generated[0].with_mass(m1), self.generated[1].with_mass(m2))
    }

    /// Reconstruction-level four-vector pair.
    pub fn reconstructed_pair(&self) -> TrackPair {
        let [m1, m2] = self.masses();
        TrackPair::new(self.reconstructed[0].with_mass(m1), self.reconstructed[1].with_mass(m2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_by_code() {
        assert_eq!(Species::from_code(211).mass(), 0.139570);
        assert_eq!(Species::from_code(-211).mass(), 0.139570);
        assert_eq!(Species::from_code(321).mass(), 0.493677);
        assert_eq!(Species::from_code(-321).mass(), 0.493677);
        assert_eq!(Species::from_code(2212).mass(), 0.0);
        assert_eq!(Species::from_code(0).mass(), 0.0);
        assert_eq!(Species::from_code(21).mass(), 0.0);
    }

    #[test]
    fn reconstructed_leg_reuses_codes() {
        let rec = EventRecord {
            generated: [ThreeMomentum::new(0.3, 0.0, 0.0), ThreeMomentum::new(0.0, 0.4, 0.0)],
            reconstructed: [ThreeMomentum::new(0.3, 0.0, 0.0), ThreeMomentum::new(0.0, 0.4, 0.0)],
            codes: [211, -321],
            reco_ok: true,
        };
        let g = rec.generated_pair();
        let r = rec.reconstructed_pair();
        approx::assert_relative_eq!(g.first.mass(), PION_MASS, epsilon = 1e-12);
        approx::assert_relative_eq!(g.second.mass(), KAON_MASS, epsilon = 1e-12);
        assert_eq!(g, r);
    }
}
