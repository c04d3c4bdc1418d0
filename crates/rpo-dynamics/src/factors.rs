//! Orbital-factor library (spec §4.B): compute once per propagation call,
//! reuse across STM row assembly, per the §9 "orbital factors as a
//! once-per-call record" abstraction strategy.

use rpo_core::constants::{J2, R_EARTH};
use rpo_core::ClassicalOrbitalElements;

/// Koenig/Guffanti/D'Amico (2017) factors derived from the chief orbit and
/// a propagation time `tau`.
#[derive(Debug, Clone, Copy)]
pub struct OrbitalFactors {
    pub n: f64,
    pub eta: f64,
    pub p: f64,
    pub q: f64,
    pub r: f64,
    pub s: f64,
    pub t: f64,
    pub e_factor: f64,
    pub f_factor: f64,
    pub g_factor: f64,
    pub kappa: f64,
    pub omega_dot: f64,
    pub omega_f: f64,
    pub ex_i: f64,
    pub ey_i: f64,
    pub ex_f: f64,
    pub ey_f: f64,
    pub cos_wt: f64,
    pub sin_wt: f64,
}

impl OrbitalFactors {
    pub fn new(chief: &ClassicalOrbitalElements, tau: f64, n: f64) -> Self {
        let e = chief.e;
        let cos_i = chief.i.cos();
        let sin_i = chief.i.sin();

        let eta = (1.0 - e * e).sqrt();
        let p = 3.0 * cos_i * cos_i - 1.0;
        let q = 5.0 * cos_i * cos_i - 1.0;
        let r = cos_i;
        let s = 2.0 * sin_i * cos_i;
        let t = sin_i * sin_i;
        let e_factor = 1.0 + eta;
        let f_factor = 4.0 + 3.0 * eta;
        let g_factor = 1.0 / (eta * eta);

        let kappa = (3.0 / 4.0) * J2 * R_EARTH * R_EARTH * chief.mu.sqrt()
            / (chief.a.powf(3.5) * eta.powi(4));

        let omega_dot = kappa * q;
        let omega_f = chief.arg_perigee + omega_dot * tau;
        let ex_i = e * chief.arg_perigee.cos();
        let ey_i = e * chief.arg_perigee.sin();
        let ex_f = e * omega_f.cos();
        let ey_f = e * omega_f.sin();
        let wt = omega_dot * tau;

        Self {
            n,
            eta,
            p,
            q,
            r,
            s,
            t,
            e_factor,
            f_factor,
            g_factor,
            kappa,
            omega_dot,
            omega_f,
            ex_i,
            ey_i,
            ex_f,
            ey_f,
            cos_wt: wt.cos(),
            sin_wt: wt.sin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpo_core::constants::MU_EARTH;

    #[test]
    fn factors_are_finite_for_leo_chief() {
        let chief = ClassicalOrbitalElements::new(
            6_778_000.0,
            0.0005,
            51.6_f64.to_radians(),
            45_f64.to_radians(),
            30_f64.to_radians(),
            0.0,
            MU_EARTH,
        )
        .unwrap();
        let n = rpo_core::kepler::mean_motion(chief.a, chief.mu).unwrap();
        let f = OrbitalFactors::new(&chief, 100.0, n);
        assert!(f.kappa.is_finite() && f.kappa > 0.0);
        assert!(f.eta > 0.0 && f.eta <= 1.0);
    }

    #[test]
    fn zero_tau_keeps_apsidal_line_unchanged() {
        let chief = ClassicalOrbitalElements::new(
            6_778_000.0,
            0.01,
            51.6_f64.to_radians(),
            45_f64.to_radians(),
            30_f64.to_radians(),
            0.0,
            MU_EARTH,
        )
        .unwrap();
        let n = rpo_core::kepler::mean_motion(chief.a, chief.mu).unwrap();
        let f = OrbitalFactors::new(&chief, 0.0, n);
        assert!((f.omega_f - chief.arg_perigee).abs() < 1e-12);
        assert!((f.cos_wt - 1.0).abs() < 1e-12);
        assert!(f.sin_wt.abs() < 1e-12);
    }
}
