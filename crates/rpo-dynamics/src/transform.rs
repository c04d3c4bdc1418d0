//! ROE <-> RIC frame transform (spec §4.D), valid for arbitrary eccentricity.
//!
//! `T` has 4x4 (in-plane: R, I, rdot_R, rdot_I <-> da, dlambda, dex, dey) and
//! 2x2 (out-of-plane: C, rdot_C <-> dix, diy) block-diagonal structure.
//! Inversion exploits that structure rather than inverting the full 6x6
//! (spec §9 "block-structured inversion").

use nalgebra::{SMatrix, SVector};
use rpo_core::error::KernelResult;
use rpo_core::kepler::{angular_velocity, mean_motion, orbital_radius, radial_velocity, true_anomaly_from_mean};
use rpo_core::linalg::{invert2x2, invert4x4};
use rpo_core::{ClassicalOrbitalElements, RelativeState, Vector3};

use crate::roe::QuasiNonsingularROE;

/// Build the 6x6 `T(chief)` mapping ROE to RIC state
/// `[R, I, C, rdot_R, rdot_I, rdot_C]`.
pub fn build_transform(chief: &ClassicalOrbitalElements) -> KernelResult<SMatrix<f64, 6, 6>> {
    let n = mean_motion(chief.a, chief.mu)?;
    let nu = true_anomaly_from_mean(chief.mean_anomaly, chief.e)?;
    let r = orbital_radius(chief.a, chief.e, nu);
    let rdot = radial_velocity(chief.a, chief.e, n, nu);
    let theta_dot = angular_velocity(n, chief.e, nu);
    let u = chief.arg_perigee + nu;
    let (su, cu) = (u.sin(), u.cos());

    let mut t = SMatrix::<f64, 6, 6>::zeros();

    // Row R (position, radial)
    t[(0, 0)] = r;
    t[(0, 2)] = -r * cu;
    t[(0, 3)] = -r * su;

    // Row I (position, in-track)
    t[(1, 1)] = r;
    t[(1, 2)] = 2.0 * r * su;
    t[(1, 3)] = -2.0 * r * cu;

    // Row C (position, cross-track)
    t[(2, 4)] = r * su;
    t[(2, 5)] = -r * cu;

    // Row rdot_R: time-derivative of row R holding the ROE fixed.
    t[(3, 0)] = rdot;
    t[(3, 2)] = r * theta_dot * su - rdot * cu;
    t[(3, 3)] = -rdot * su - r * theta_dot * cu;

    // Row rdot_I: the -1.5 r n term encodes the Keplerian along-track
    // secular drift in velocity from da (spec §4.D).
    t[(4, 0)] = -1.5 * r * n;
    t[(4, 1)] = rdot;
    t[(4, 2)] = 2.0 * rdot * su + 2.0 * r * theta_dot * cu;
    t[(4, 3)] = -2.0 * rdot * cu + 2.0 * r * theta_dot * su;

    // Row rdot_C
    t[(5, 4)] = rdot * su + r * theta_dot * cu;
    t[(5, 5)] = -rdot * cu + r * theta_dot * su;

    Ok(t)
}

/// `roeToRIC(chief, roe)` = T . roe
pub fn roe_to_ric(chief: &ClassicalOrbitalElements, roe: QuasiNonsingularROE) -> KernelResult<RelativeState> {
    let t = build_transform(chief)?;
    let v = t * roe.to_vector();
    Ok(RelativeState {
        position: Vector3::new(v[0], v[1], v[2]),
        velocity: Vector3::new(v[3], v[4], v[5]),
    })
}

/// `ricToROE(chief, ric)` = T^-1 . ric, via block decomposition.
pub fn ric_to_roe(chief: &ClassicalOrbitalElements, ric: RelativeState) -> KernelResult<QuasiNonsingularROE> {
    let t = build_transform(chief)?;

    // In-plane block: rows/cols {R, I, rdot_R, rdot_I} <-> {da, dlambda, dex, dey}
    let inplane = SMatrix::<f64, 4, 4>::new(
        t[(0, 0)], t[(0, 1)], t[(0, 2)], t[(0, 3)],
        t[(1, 0)], t[(1, 1)], t[(1, 2)], t[(1, 3)],
        t[(3, 0)], t[(3, 1)], t[(3, 2)], t[(3, 3)],
        t[(4, 0)], t[(4, 1)], t[(4, 2)], t[(4, 3)],
    );
    let inplane_inv = invert4x4(&inplane)?;
    let inplane_rhs = SVector::<f64, 4>::new(ric.position.x, ric.position.y, ric.velocity.x, ric.velocity.y);
    let inplane_roe = inplane_inv * inplane_rhs;

    // Out-of-plane block: rows/cols {C, rdot_C} <-> {dix, diy}
    let outplane = SMatrix::<f64, 2, 2>::new(t[(2, 4)], t[(2, 5)], t[(5, 4)], t[(5, 5)]);
    let outplane_inv = invert2x2(&outplane)?;
    let outplane_rhs = SVector::<f64, 2>::new(ric.position.z, ric.velocity.z);
    let outplane_roe = outplane_inv * outplane_rhs;

    Ok(QuasiNonsingularROE {
        da: inplane_roe[0],
        dlambda: inplane_roe[1],
        dex: inplane_roe[2],
        dey: inplane_roe[3],
        dix: outplane_roe[0],
        diy: outplane_roe[1],
    })
}
