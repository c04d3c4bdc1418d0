//! State transition matrix library (spec §4.C): Keplerian 6x6, J2 6x6,
//! eccentric-drag 7x7, arbitrary-drag 9x9. Built once per propagation call
//! from a shared [`OrbitalFactors`] record (§9 abstraction strategy).

use crate::factors::OrbitalFactors;
use nalgebra::SMatrix;
use rpo_core::error::{KernelError, KernelResult};

/// Keplerian 6x6 STM: identity except the da->dlambda secular drift term.
pub fn keplerian_stm(n: f64, tau: f64) -> SMatrix<f64, 6, 6> {
    let mut phi = SMatrix::<f64, 6, 6>::identity();
    phi[(1, 0)] = -(3.0 / 2.0) * n * tau;
    phi
}

/// J2 6x6 STM (Koenig, Guffanti & D'Amico 2017, Eq. A6). Shared verbatim as
/// the 6x6 block inside both drag STMs.
pub fn j2_stm(f: &OrbitalFactors, tau: f64) -> SMatrix<f64, 6, 6> {
    let mut phi = SMatrix::<f64, 6, 6>::identity();
    let k = f.kappa;

    phi[(1, 0)] = -(3.0 * f.n / 2.0 + 7.0 * k * f.e_factor * f.p / 2.0) * tau;
    phi[(1, 2)] = k * f.ex_i * f.f_factor * f.g_factor * f.p * tau;
    phi[(1, 3)] = k * f.ey_i * f.f_factor * f.g_factor * f.p * tau;
    phi[(1, 4)] = -k * f.f_factor * f.s * tau;

    phi[(2, 0)] = (7.0 / 2.0) * k * f.ey_f * f.q * tau;
    phi[(2, 2)] = f.cos_wt - 4.0 * k * f.ex_i * f.ey_f * f.g_factor * f.q * tau;
    phi[(2, 3)] = -f.sin_wt - 4.0 * k * f.ey_i * f.ey_f * f.g_factor * f.q * tau;
    phi[(2, 4)] = 5.0 * k * f.ey_f * f.s * tau;

    phi[(3, 0)] = -(7.0 / 2.0) * k * f.ex_f * f.q * tau;
    phi[(3, 2)] = f.sin_wt + 4.0 * k * f.ex_i * f.ex_f * f.g_factor * f.q * tau;
    phi[(3, 3)] = f.cos_wt + 4.0 * k * f.ey_i * f.ex_f * f.g_factor * f.q * tau;
    phi[(3, 4)] = -5.0 * k * f.ex_f * f.s * tau;

    phi[(5, 0)] = (7.0 / 2.0) * k * f.s * tau;
    phi[(5, 2)] = -4.0 * k * f.ex_i * f.g_factor * f.s * tau;
    phi[(5, 3)] = -4.0 * k * f.ey_i * f.g_factor * f.s * tau;
    phi[(5, 4)] = 2.0 * k * f.t * tau;

    phi
}

/// Eccentric-drag 7x7 STM (Koenig et al. 2017, Appendix C). Precondition:
/// `e >= 0.05` — the circularization constraint assumes a near-circular
/// chief is not being used (rejected explicitly by the caller).
pub fn eccentric_drag_stm(
    f: &OrbitalFactors,
    e: f64,
    tau: f64,
) -> KernelResult<SMatrix<f64, 7, 7>> {
    if e < 0.05 {
        return Err(KernelError::DragEccentricityTooLow { value: e });
    }

    let mut phi = SMatrix::<f64, 7, 7>::identity();
    let j2 = j2_stm(f, tau);
    for r in 0..6 {
        for c in 0..6 {
            phi[(r, c)] = j2[(r, c)];
        }
    }

    let k = f.kappa;
    let t2 = tau * tau;
    let ecomp = e * (1.0 - e);

    phi[(0, 6)] = tau;
    phi[(1, 6)] =
        (-3.0 * f.n / 4.0 - 7.0 * k * f.eta * f.p / 4.0 + 1.5 * k * ecomp * f.eta * f.g_factor * f.p)
            * t2;
    phi[(2, 6)] = (1.0 - e) * f.omega_f.cos() * tau
        - k * f.ey_f * f.q * (-7.0 / 4.0 + 2.0 * ecomp * f.g_factor) * t2;
    phi[(3, 6)] = (1.0 - e) * f.omega_f.sin() * tau
        + k * f.ex_f * f.q * (-7.0 / 4.0 + 2.0 * ecomp * f.g_factor) * t2;
    phi[(4, 6)] = 0.0;
    phi[(5, 6)] = k * f.s * (7.0 / 4.0 - 2.0 * ecomp * f.g_factor) * t2;

    Ok(phi)
}

/// Arbitrary-eccentricity drag 9x9 STM (Koenig et al. 2017, Appendix D).
///
/// The `da_dot` column (6) is the "pure da" part shared with the eccentric
/// 7x7 column above. The `dex_dot`/`dey_dot` columns (7, 8) carry a
/// documented asymmetry (spec §4.C): column `dey_dot` lacks the `dlambda`
/// and `diy` coupling terms present in column `dex_dot`. That asymmetry is
/// reproduced verbatim here — rows 1 and 5 of column 8 are exactly zero,
/// not a symmetrized half-share of column 7's terms. One consequence: the
/// two STMs (eccentric vs. arbitrary, under the circularization-constraint
/// conversion) are exactly equivalent only when the eccentricity-rate
/// direction aligns with the x-axis (chief argument of perigee 0); see
/// `drag_model_equivalence_under_circularization_constraint` below.
pub fn arbitrary_drag_stm(f: &OrbitalFactors, tau: f64) -> SMatrix<f64, 9, 9> {
    let mut phi = SMatrix::<f64, 9, 9>::identity();
    let j2 = j2_stm(f, tau);
    for r in 0..6 {
        for c in 0..6 {
            phi[(r, c)] = j2[(r, c)];
        }
    }

    let k = f.kappa;
    let t2 = tau * tau;
    let (ex_i, ey_i) = (f.ex_i, f.ey_i);
    let (ex_f, ey_f) = (f.ex_f, f.ey_f);

    // -- column da_dot: the part of the eccentric column that survives
    // when the eccentricity vector itself is held fixed.
    phi[(0, 6)] = tau;
    phi[(1, 6)] = (-3.0 * f.n / 4.0 - 7.0 * k * f.eta * f.p / 4.0) * t2;
    phi[(2, 6)] = k * ey_f * f.q * (7.0 / 4.0) * t2;
    phi[(3, 6)] = -k * ex_f * f.q * (7.0 / 4.0) * t2;
    phi[(4, 6)] = 0.0;
    phi[(5, 6)] = k * f.s * (7.0 / 4.0) * t2;

    // -- column dex_dot: carries the dlambda/diy drag-eccentricity coupling.
    phi[(1, 7)] = 1.5 * k * f.eta * f.g_factor * f.p * ex_i * t2;
    phi[(2, 7)] = f.cos_wt * tau - 2.0 * k * ey_f * f.q * f.g_factor * ex_i * t2;
    phi[(3, 7)] = f.sin_wt * tau + 2.0 * k * ex_f * f.q * f.g_factor * ex_i * t2;
    phi[(5, 7)] = -2.0 * k * f.s * f.g_factor * ex_i * t2;

    // -- column dey_dot: documented asymmetry (Appendix D) — no dlambda or
    // diy coupling (rows 1, 5 stay zero).
    phi[(2, 8)] = -f.sin_wt * tau - 2.0 * k * ey_f * f.q * f.g_factor * ey_i * t2;
    phi[(3, 8)] = f.cos_wt * tau + 2.0 * k * ex_f * f.q * f.g_factor * ey_i * t2;

    phi
}
