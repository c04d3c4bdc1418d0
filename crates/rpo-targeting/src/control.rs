//! Gauss variational control matrix (spec §4.F), near-circular form
//! (Eq. 2.38, D'Amico 2010) — see the open-question note in DESIGN.md on
//! why the full eccentric `(r/a)` form is not implemented.

use nalgebra::SMatrix;
use rpo_core::error::KernelResult;
use rpo_core::kepler::{mean_motion, true_anomaly_from_mean};
use rpo_core::{ClassicalOrbitalElements, Vector3};
use rpo_dynamics::QuasiNonsingularROE;

/// `computeControlMatrix(chief)`: 6x3 map from RIC delta-v `(dv_R, dv_I,
/// dv_C)` to instantaneous ROE change.
pub fn compute_control_matrix(chief: &ClassicalOrbitalElements) -> KernelResult<SMatrix<f64, 6, 3>> {
    let n = mean_motion(chief.a, chief.mu)?;
    let nu = true_anomaly_from_mean(chief.mean_anomaly, chief.e)?;
    let u = chief.arg_perigee + nu;
    let k = 1.0 / (n * chief.a);
    let (su, cu) = (u.sin(), u.cos());

    Ok(SMatrix::<f64, 6, 3>::new(
        0.0, 2.0 * k, 0.0, //
        -2.0 * k, 0.0, 0.0, //
        su * k, 2.0 * cu * k, 0.0, //
        -cu * k, 2.0 * su * k, 0.0, //
        0.0, 0.0, cu * k, //
        0.0, 0.0, su * k,
    ))
}

/// `applyDeltaV(roe, dv, chief)` = roe + B(chief) . dv.
pub fn apply_delta_v(
    roe: QuasiNonsingularROE,
    dv: Vector3,
    chief: &ClassicalOrbitalElements,
) -> KernelResult<QuasiNonsingularROE> {
    let b = compute_control_matrix(chief)?;
    let dv_vec = nalgebra::SVector::<f64, 3>::new(dv.x, dv.y, dv.z);
    Ok(QuasiNonsingularROE::from_vector(roe.to_vector() + b * dv_vec))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rpo_core::constants::MU_EARTH;

    fn circular_chief_at_u_zero() -> ClassicalOrbitalElements {
        // e=0, mean_anomaly=0 => nu=0 => u = arg_perigee + 0 = arg_perigee.
        // Set arg_perigee=0 so u=0 exactly (spec S4).
        ClassicalOrbitalElements::new(6_778_000.0, 0.0, 51.6_f64.to_radians(), 45_f64.to_radians(), 0.0, 0.0, MU_EARTH)
            .unwrap()
    }

    #[test]
    fn radial_burn_at_u_zero_matches_spec_s4() {
        let chief = circular_chief_at_u_zero();
        let n = mean_motion(chief.a, chief.mu).unwrap();
        let k = 1.0 / (n * chief.a);
        let roe = apply_delta_v(QuasiNonsingularROE::ZERO, Vector3::new(1.0, 0.0, 0.0), &chief).unwrap();
        assert_relative_eq!(roe.da, 0.0, epsilon = 1e-12);
        assert_relative_eq!(roe.dlambda, -2.0 * k, epsilon = 1e-12);
        assert_relative_eq!(roe.dex, 0.0, epsilon = 1e-12);
        assert_relative_eq!(roe.dey, -k, epsilon = 1e-12);
        assert_relative_eq!(roe.dix, 0.0, epsilon = 1e-12);
        assert_relative_eq!(roe.diy, 0.0, epsilon = 1e-12);
    }
}
