//! Kepler equation solver and orbital-radius/velocity primitives (spec §4.A).

use crate::error::{KernelError, KernelResult};
use core::f64::consts::PI;

/// Newton-Raphson tolerance on the eccentric anomaly correction.
const KEPLER_TOL: f64 = 1e-10;
/// Hard iteration cap for the Kepler solve.
const KEPLER_MAX_ITER: u32 = 100;

/// Mean motion n = sqrt(mu / a^3).
pub fn mean_motion(a: f64, mu: f64) -> KernelResult<f64> {
    if a <= 0.0 {
        return Err(KernelError::InvalidSemiMajorAxis { value: a });
    }
    if mu <= 0.0 {
        return Err(KernelError::InvalidGravitationalParameter { value: mu });
    }
    Ok((mu / a.powi(3)).sqrt())
}

/// Solve Kepler's equation E - e*sin(E) = M for the true anomaly.
///
/// Newton iteration on E with initial guess E=M, up to 100 iterations,
/// tolerance 1e-10 on the per-step correction; then converts E to the true
/// anomaly via the half-angle atan2 form (preserves quadrant).
pub fn true_anomaly_from_mean(mean_anomaly: f64, e: f64) -> KernelResult<f64> {
    if !(0.0..1.0).contains(&e) {
        return Err(KernelError::InvalidEccentricity { value: e });
    }

    let m = mean_anomaly;
    let mut big_e = m;
    for _ in 0..KEPLER_MAX_ITER {
        let f = big_e - e * big_e.sin() - m;
        let f_prime = 1.0 - e * big_e.cos();
        let delta = f / f_prime;
        big_e -= delta;
        if delta.abs() < KEPLER_TOL {
            break;
        }
    }

    let half_e = big_e / 2.0;
    let nu = 2.0
        * f64::atan2(
            (1.0 + e).sqrt() * half_e.sin(),
            (1.0 - e).sqrt() * half_e.cos(),
        );
    Ok(nu)
}

/// Orbital radius r = a(1-e^2) / (1 + e cos(nu)).
pub fn orbital_radius(a: f64, e: f64, nu: f64) -> f64 {
    a * (1.0 - e * e) / (1.0 + e * nu.cos())
}

/// Radial velocity component a*n*e*sin(nu) / sqrt(1-e^2).
pub fn radial_velocity(a: f64, e: f64, n: f64, nu: f64) -> f64 {
    a * n * e * nu.sin() / (1.0 - e * e).sqrt()
}

/// Angular velocity theta_dot = n (1 + e cos nu)^2 / (1-e^2)^{3/2}.
pub fn angular_velocity(n: f64, e: f64, nu: f64) -> f64 {
    n * (1.0 + e * nu.cos()).powi(2) / (1.0 - e * e).powf(1.5)
}

/// Reduce an angle to [0, 2*pi).
pub fn normalize_angle(x: f64) -> f64 {
    let two_pi = 2.0 * PI;
    let m = x % two_pi;
    if m < 0.0 {
        m + two_pi
    } else {
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn mean_motion_rejects_bad_inputs() {
        assert!(mean_motion(0.0, 1.0).is_err());
        assert!(mean_motion(1.0, 0.0).is_err());
        assert!(mean_motion(6_778_000.0, 3.986004418e14).is_ok());
    }

    #[test]
    fn true_anomaly_circular_matches_mean() {
        let nu = true_anomaly_from_mean(1.2, 0.0).unwrap();
        assert_abs_diff_eq!(nu, 1.2, epsilon = 1e-9);
    }

    #[test]
    fn true_anomaly_quadrant_preserved() {
        for m in [0.1, 1.5, 3.0, 4.5, 6.0] {
            let nu = true_anomaly_from_mean(m, 0.1).unwrap();
            assert!(nu.is_finite());
        }
    }

    #[test]
    fn true_anomaly_rejects_bad_eccentricity() {
        assert!(true_anomaly_from_mean(0.0, 1.0).is_err());
        assert!(true_anomaly_from_mean(0.0, -0.1).is_err());
    }

    #[test]
    fn normalize_angle_wraps_into_range() {
        assert_abs_diff_eq!(normalize_angle(-0.1), 2.0 * PI - 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_angle(2.0 * PI + 0.3), 0.3, epsilon = 1e-12);
    }
}
