//! Time-of-flight optimization (spec §4.F): golden-section search, with an
//! optional multi-start refinement pass.

use rpo_core::error::KernelResult;
use rpo_core::kepler::mean_motion;
use rpo_core::{ClassicalOrbitalElements, RelativeState, Vector3};

use crate::shooter::solve_rendezvous;
use crate::types::{ManeuverLeg, TargetingOptions};

const GOLDEN_RATIO: f64 = 0.6180339887498949;
const TOL_FRACTION: f64 = 0.01;

fn cost(
    initial_ric: RelativeState,
    target_pos: Vector3,
    chief: &ClassicalOrbitalElements,
    tof: f64,
    options: &TargetingOptions,
) -> (f64, Option<ManeuverLeg>) {
    match solve_rendezvous(initial_ric, target_pos, chief, tof, options) {
        Ok(leg) if leg.converged => (leg.total_delta_v, Some(leg)),
        _ => (f64::INFINITY, None),
    }
}

fn golden_section(
    initial_ric: RelativeState,
    target_pos: Vector3,
    chief: &ClassicalOrbitalElements,
    options: &TargetingOptions,
    mut lo: f64,
    mut hi: f64,
    tol: f64,
) -> KernelResult<ManeuverLeg> {
    let mut c = hi - GOLDEN_RATIO * (hi - lo);
    let mut d = lo + GOLDEN_RATIO * (hi - lo);
    let (mut fc, _) = cost(initial_ric, target_pos, chief, c, options);
    let (mut fd, _) = cost(initial_ric, target_pos, chief, d, options);

    while (hi - lo).abs() > tol {
        if fc < fd {
            hi = d;
            d = c;
            fd = fc;
            c = hi - GOLDEN_RATIO * (hi - lo);
            fc = cost(initial_ric, target_pos, chief, c, options).0;
        } else {
            lo = c;
            c = d;
            fc = fd;
            d = lo + GOLDEN_RATIO * (hi - lo);
            fd = cost(initial_ric, target_pos, chief, d, options).0;
        }
    }

    let mid = (lo + hi) / 2.0;
    solve_rendezvous(initial_ric, target_pos, chief, mid, options)
}

/// `optimizeTOF(initialRIC, targetPos, chief, options)`.
pub fn optimize_tof(
    initial_ric: RelativeState,
    target_pos: Vector3,
    chief: &ClassicalOrbitalElements,
    options: &TargetingOptions,
) -> KernelResult<ManeuverLeg> {
    let n = mean_motion(chief.a, chief.mu)?;
    let period = 2.0 * std::f64::consts::PI / n;
    let lo = options.tof_search_range.min_orbits * period;
    let hi = options.tof_search_range.max_orbits * period;
    golden_section(initial_ric, target_pos, chief, options, lo, hi, TOL_FRACTION * period)
}

/// `optimizeTOFMultiStart(..., numSamples=5)`: sample the bracket, keep the
/// best converged leg, refine within `+-0.25` orbit of it.
pub fn optimize_tof_multi_start(
    initial_ric: RelativeState,
    target_pos: Vector3,
    chief: &ClassicalOrbitalElements,
    options: &TargetingOptions,
    num_samples: usize,
) -> KernelResult<ManeuverLeg> {
    let n = mean_motion(chief.a, chief.mu)?;
    let period = 2.0 * std::f64::consts::PI / n;
    let lo = options.tof_search_range.min_orbits * period;
    let hi = options.tof_search_range.max_orbits * period;

    let mut best: Option<(f64, f64)> = None; // (tof, cost)
    for k in 0..num_samples.max(1) {
        let frac = if num_samples <= 1 { 0.5 } else { k as f64 / (num_samples - 1) as f64 };
        let tof = lo + frac * (hi - lo);
        let (c, _) = cost(initial_ric, target_pos, chief, tof, options);
        if c.is_finite() && best.is_none_or(|(_, bc)| c < bc) {
            best = Some((tof, c));
        }
    }

    match best {
        Some((best_tof, _)) => {
            let window = 0.25 * period;
            let lo_r = (best_tof - window).max(lo);
            let hi_r = (best_tof + window).min(hi);
            golden_section(initial_ric, target_pos, chief, options, lo_r, hi_r, TOL_FRACTION * period)
        }
        None => optimize_tof(initial_ric, target_pos, chief, options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rpo_core::constants::MU_EARTH;

    fn leo_chief() -> ClassicalOrbitalElements {
        ClassicalOrbitalElements::new(
            6_778_000.0,
            0.0005,
            51.6_f64.to_radians(),
            45_f64.to_radians(),
            30_f64.to_radians(),
            0.0,
            MU_EARTH,
        )
        .unwrap()
    }

    #[test]
    fn optimize_tof_matches_multi_start_within_one_percent() {
        let chief = leo_chief();
        let initial = RelativeState { position: Vector3::new(50.0, -300.0, 20.0), velocity: Vector3::ZERO };
        let options = TargetingOptions::default();
        let single = optimize_tof(initial, Vector3::ZERO, &chief, &options).unwrap();
        let multi = optimize_tof_multi_start(initial, Vector3::ZERO, &chief, &options, 5).unwrap();
        assert!(single.converged && multi.converged);
        assert_relative_eq!(single.total_delta_v, multi.total_delta_v, max_relative = 0.01);
    }
}
