//! Chief-orbit classical elements (spec §3) and vector primitives shared by
//! every downstream crate.

use crate::constants::MIN_INCLINATION_DEG;
use crate::error::{KernelError, KernelResult};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A chief spacecraft's classical orbital elements.
///
/// Invariant (validated by [`ClassicalOrbitalElements::validate`]):
/// `|i| >= 0.1 deg` and `|i - 180 deg| >= 0.1 deg` — the quasi-nonsingular
/// ROE parameterization is singular at the equator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassicalOrbitalElements {
    pub a: f64,
    pub e: f64,
    pub i: f64,
    pub raan: f64,
    pub arg_perigee: f64,
    pub mean_anomaly: f64,
    pub h: f64,
    pub mu: f64,
}

impl ClassicalOrbitalElements {
    pub fn new(
        a: f64,
        e: f64,
        i: f64,
        raan: f64,
        arg_perigee: f64,
        mean_anomaly: f64,
        mu: f64,
    ) -> KernelResult<Self> {
        let h = (mu * a * (1.0 - e * e)).sqrt();
        let elements = Self {
            a,
            e,
            i,
            raan,
            arg_perigee,
            mean_anomaly,
            h,
            mu,
        };
        elements.validate()?;
        Ok(elements)
    }

    /// Precondition checks shared by every operation that takes a chief
    /// orbit (spec §3, §7).
    pub fn validate(&self) -> KernelResult<()> {
        if self.a <= 0.0 {
            return Err(KernelError::InvalidSemiMajorAxis { value: self.a });
        }
        if !(0.0..1.0).contains(&self.e) {
            return Err(KernelError::InvalidEccentricity { value: self.e });
        }
        if self.mu <= 0.0 {
            return Err(KernelError::InvalidGravitationalParameter { value: self.mu });
        }
        let i_deg = self.i.to_degrees();
        let dist_from_0 = i_deg.rem_euclid(360.0).min((360.0 - i_deg.rem_euclid(360.0)).abs());
        let dist_from_180 = (i_deg.rem_euclid(360.0) - 180.0).abs();
        if dist_from_0 < MIN_INCLINATION_DEG || dist_from_180 < MIN_INCLINATION_DEG {
            return Err(KernelError::NearEquatorialOrbit { inclination_deg: i_deg });
        }
        Ok(())
    }
}

/// A 3-vector, used for both RIC positions/velocities and delta-v.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn norm(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn scale(self, k: f64) -> Self {
        Self {
            x: self.x * k,
            y: self.y * k,
            z: self.z * k,
        }
    }
}

impl Add for Vector3 {
    type Output = Vector3;
    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;
    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;
    fn mul(self, rhs: f64) -> Vector3 {
        self.scale(rhs)
    }
}

/// A chief-centered Radial/In-track/Cross-track state (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RelativeState {
    pub position: Vector3,
    pub velocity: Vector3,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leo_chief() -> ClassicalOrbitalElements {
        ClassicalOrbitalElements::new(
            6_778_000.0,
            0.0005,
            51.6_f64.to_radians(),
            45_f64.to_radians(),
            30_f64.to_radians(),
            0.0,
            crate::constants::MU_EARTH,
        )
        .unwrap()
    }

    #[test]
    fn accepts_valid_leo_chief() {
        leo_chief();
    }

    #[test]
    fn rejects_equatorial_orbit() {
        let err = ClassicalOrbitalElements::new(
            6_778_000.0,
            0.0005,
            0.01_f64.to_radians(),
            0.0,
            0.0,
            0.0,
            crate::constants::MU_EARTH,
        );
        assert!(matches!(err, Err(KernelError::NearEquatorialOrbit { .. })));
    }

    #[test]
    fn rejects_negative_semi_major_axis() {
        assert!(ClassicalOrbitalElements::new(-1.0, 0.0, 0.5, 0.0, 0.0, 0.0, crate::constants::MU_EARTH).is_err());
    }

    #[test]
    fn vector3_arithmetic() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vector3::new(3.0, 3.0, 3.0));
        assert_eq!(a.scale(2.0), Vector3::new(2.0, 4.0, 6.0));
    }
}
