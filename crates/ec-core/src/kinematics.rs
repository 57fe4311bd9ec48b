//! Relativistic four-vectors and track pairs.
//!
//! Conventions follow the usual collider ones: `pt` is transverse to the z
//! (beam) axis, `phi` lies in `(-π, π]` and pair azimuthal differences are
//! wrapped into `[-π, π)`.

use std::f64::consts::PI;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Pseudorapidity returned for momenta along the beam axis.
const ETA_ALONG_BEAM: f64 = 1e10;

/// Four-momentum `(px, py, pz, E)` in GeV.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FourVector {
    /// x component
    pub px: f64,
    /// y component
    pub py: f64,
    /// z component
    pub pz: f64,
    /// Energy
    pub e: f64,
}

impl FourVector {
    /// Create from explicit components.
    pub const fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// On-shell vector: `E = sqrt(|p|² + m²)`.
    pub fn from_xyzm(px: f64, py: f64, pz: f64, mass: f64) -> Self {
        let p2 = px * px + py * py + pz * pz;
        Self { px, py, pz, e: (p2 + mass * mass).sqrt() }
    }

    /// |p|
    pub fn p(&self) -> f64 {
        (self.px * self.px + self.py * self.py + self.pz * self.pz).sqrt()
    }

    /// Transverse momentum.
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Invariant mass. Space-like vectors return `-sqrt(-m²)`.
    pub fn mass(&self) -> f64 {
        let m2 = self.e * self.e - self.p() * self.p();
        if m2 < 0.0 { -(-m2).sqrt() } else { m2.sqrt() }
    }

    /// Azimuthal angle in `(-π, π]`; zero for vectors along the beam.
    pub fn phi(&self) -> f64 {
        if self.px == 0.0 && self.py == 0.0 { 0.0 } else { self.py.atan2(self.px) }
    }

    /// Pseudorapidity `-ln tan(θ/2)`.
    pub fn eta(&self) -> f64 {
        let p = self.p();
        let cos_theta = if p == 0.0 { 1.0 } else { self.pz / p };
        if cos_theta * cos_theta < 1.0 {
            -0.5 * ((1.0 - cos_theta) / (1.0 + cos_theta)).ln()
        } else if self.pz == 0.0 {
            0.0
        } else {
            ETA_ALONG_BEAM.copysign(self.pz)
        }
    }

    /// Rapidity `½ ln((E + pz) / (E − pz))`.
    pub fn rapidity(&self) -> f64 {
        let num = self.e + self.pz;
        let den = self.e - self.pz;
        if num <= 0.0 || den <= 0.0 {
            return ETA_ALONG_BEAM.copysign(self.pz);
        }
        0.5 * (num / den).ln()
    }

    /// `phi(self) − phi(other)` wrapped into `[-π, π)`.
    pub fn delta_phi(&self, other: &FourVector) -> f64 {
        wrap_phi(self.phi() - other.phi())
    }
}

impl Add for FourVector {
    type Output = FourVector;

    fn add(self, rhs: FourVector) -> FourVector {
        FourVector::new(self.px + rhs.px, self.py + rhs.py, self.pz + rhs.pz, self.e + rhs.e)
    }
}

/// Wrap an angle into `[-π, π)`.
pub fn wrap_phi(mut x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    while x >= PI {
        x -= 2.0 * PI;
    }
    while x < -PI {
        x += 2.0 * PI;
    }
    x
}

/// Two tracks of one event, in record order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackPair {
    /// Track 1
    pub first: FourVector,
    /// Track 2
    pub second: FourVector,
}

impl TrackPair {
    /// Pair two four-vectors.
    pub const fn new(first: FourVector, second: FourVector) -> Self {
        Self { first, second }
    }

    /// Combined two-track system.
    pub fn system(&self) -> FourVector {
        self.first + self.second
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn on_shell_energy() {
        let v = FourVector::from_xyzm(3.0, 0.0, 4.0, 0.0);
        assert_relative_eq!(v.e, 5.0);
        assert_relative_eq!(v.mass(), 0.0);
        let v = FourVector::from_xyzm(0.0, 0.0, 0.0, 0.5);
        assert_relative_eq!(v.e, 0.5);
        assert_relative_eq!(v.mass(), 0.5);
    }

    #[test]
    fn transverse_quantities() {
        let v = FourVector::from_xyzm(0.3, 0.4, 0.0, 0.1);
        assert_relative_eq!(v.pt(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(v.eta(), 0.0);
        assert_relative_eq!(v.rapidity(), 0.0);
        assert_relative_eq!(v.phi(), 0.4_f64.atan2(0.3));
    }

    #[test]
    fn eta_matches_theta_definition() {
        let eta: f64 = 0.7;
        let pt = 0.4;
        let v = FourVector::from_xyzm(pt, 0.0, pt * eta.sinh(), 0.0);
        assert_relative_eq!(v.eta(), eta, epsilon = 1e-12);
        // massless: rapidity == pseudorapidity
        assert_relative_eq!(v.rapidity(), eta, epsilon = 1e-12);
    }

    #[test]
    fn eta_along_beam() {
        assert_eq!(FourVector::from_xyzm(0.0, 0.0, 2.0, 0.0).eta(), 1e10);
        assert_eq!(FourVector::from_xyzm(0.0, 0.0, -2.0, 0.0).eta(), -1e10);
        assert_eq!(FourVector::default().eta(), 0.0);
    }

    #[test]
    fn delta_phi_wraps() {
        let a = FourVector::from_xyzm(-1.0, 0.01, 0.0, 0.0);
        let b = FourVector::from_xyzm(-1.0, -0.01, 0.0, 0.0);
        let d = a.delta_phi(&b);
        assert!((-PI..PI).contains(&d));
        assert_relative_eq!(d, -2.0 * 0.01_f64.atan(), epsilon = 1e-9);
        assert_relative_eq!(wrap_phi(PI), -PI);
        assert_relative_eq!(wrap_phi(3.0 * PI + 0.5), -PI + 0.5, epsilon = 1e-12);
    }

    #[test]
    fn back_to_back_system_mass() {
        let m = 0.139570;
        let pair = TrackPair::new(
            FourVector::from_xyzm(0.5, 0.0, 0.0, m),
            FourVector::from_xyzm(-0.5, 0.0, 0.0, m),
        );
        let sys = pair.system();
        assert_relative_eq!(sys.pt(), 0.0);
        assert_relative_eq!(sys.mass(), 2.0 * (0.25_f64 + m * m).sqrt(), epsilon = 1e-12);
    }
}
