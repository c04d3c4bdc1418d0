//! Trajectory synthesis (spec §4.F, §12): dense RIC sampling across legs,
//! burn markers, and uniform resampling for export/visualization.

use rpo_core::error::KernelResult;
use rpo_core::{ClassicalOrbitalElements, Vector3};
use rpo_dynamics::{ric_to_roe, roe_to_ric};
use rpo_propagate::{propagate_roe_with_chief, PropagationOptions};

use crate::control::apply_delta_v;
use crate::types::{Maneuver, ManeuverLeg, MissionPlan, TrajectoryPoint};

/// A burn marker (mission-elapsed time, the maneuver that occurred there).
pub type ManeuverMarker = (f64, Maneuver);

/// `generateLegTrajectory(leg, chief0, position0, velocity0, options,
/// numPoints)`. Sample 0 is the state immediately after `burn1` — position
/// is unchanged from `position0` because impulsive burns change only
/// velocity.
pub fn generate_leg_trajectory(
    leg: &ManeuverLeg,
    chief0: &ClassicalOrbitalElements,
    position0: Vector3,
    velocity0: Vector3,
    options: &PropagationOptions,
    num_points: usize,
) -> KernelResult<Vec<TrajectoryPoint>> {
    let roe0 = ric_to_roe(chief0, rpo_core::RelativeState { position: position0, velocity: velocity0 })?;
    let roe_after_burn = apply_delta_v(roe0, leg.burn1.delta_v, chief0)?;

    let n = num_points.max(2);
    let mut points = Vec::with_capacity(n);
    for i in 0..n {
        let t = if n == 1 { 0.0 } else { (i as f64) * leg.tof / ((n - 1) as f64) };
        let (roe_t, chief_t) = propagate_roe_with_chief(roe_after_burn, chief0, t, options)?;
        let ric_t = roe_to_ric(&chief_t, roe_t)?;
        points.push(TrajectoryPoint { time: t, position: ric_t.position, velocity: ric_t.velocity });
    }
    Ok(points)
}

/// `generateMissionTrajectory(plan, chief0, position0, velocity0, options,
/// pointsPerLeg)`.
pub fn generate_mission_trajectory(
    plan: &MissionPlan,
    chief0: &ClassicalOrbitalElements,
    position0: Vector3,
    velocity0: Vector3,
    options: &PropagationOptions,
    points_per_leg: usize,
) -> KernelResult<Vec<TrajectoryPoint>> {
    let mut out = Vec::with_capacity(plan.legs.len() * points_per_leg);
    let mut chief_cur = *chief0;
    let mut position_cur = position0;
    let mut velocity_cur = velocity0;
    let mut time_offset = 0.0;

    for leg in &plan.legs {
        let leg_points = generate_leg_trajectory(leg, &chief_cur, position_cur, velocity_cur, options, points_per_leg)?;
        for mut p in leg_points {
            p.time += time_offset;
            out.push(p);
        }
        time_offset += leg.tof;
        chief_cur = leg.burn2.chief;
        position_cur = leg.to;
        velocity_cur = leg.target_velocity;
    }
    Ok(out)
}

/// `generateTrajectoryWithManeuvers(plan, chief0, position0, velocity0,
/// options, pointsPerLeg)` (spec §12 supplement): dense samples paired with
/// the burn markers that occur within them, for visualization overlays.
pub fn generate_trajectory_with_maneuvers(
    plan: &MissionPlan,
    chief0: &ClassicalOrbitalElements,
    position0: Vector3,
    velocity0: Vector3,
    options: &PropagationOptions,
    points_per_leg: usize,
) -> KernelResult<(Vec<TrajectoryPoint>, Vec<ManeuverMarker>)> {
    let points = generate_mission_trajectory(plan, chief0, position0, velocity0, options, points_per_leg)?;
    let mut markers = Vec::with_capacity(plan.legs.len() * 2);
    let mut time_offset = 0.0;
    for leg in &plan.legs {
        markers.push((time_offset, leg.burn1));
        markers.push((time_offset + leg.tof, leg.burn2));
        time_offset += leg.tof;
    }
    Ok((points, markers))
}

/// `sampleTrajectoryUniform(traj, N)`: binary-search interpolation, linear
/// in both position and velocity.
pub fn sample_trajectory_uniform(traj: &[TrajectoryPoint], n: usize) -> Vec<TrajectoryPoint> {
    if traj.is_empty() || n == 0 {
        return Vec::new();
    }
    if traj.len() == 1 || n == 1 {
        return vec![traj[0]];
    }

    let t0 = traj[0].time;
    let t1 = traj[traj.len() - 1].time;
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let t = t0 + (i as f64) * (t1 - t0) / ((n - 1) as f64);
        out.push(interpolate_at(traj, t));
    }
    out
}

fn interpolate_at(traj: &[TrajectoryPoint], t: f64) -> TrajectoryPoint {
    let mut lo = 0usize;
    let mut hi = traj.len() - 1;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if traj[mid].time <= t {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let (a, b) = (traj[lo], traj[hi]);
    let span = b.time - a.time;
    let frac = if span.abs() < f64::EPSILON { 0.0 } else { (t - a.time) / span };
    TrajectoryPoint {
        time: t,
        position: a.position + (b.position - a.position) * frac,
        velocity: a.velocity + (b.velocity - a.velocity) * frac,
    }
}
