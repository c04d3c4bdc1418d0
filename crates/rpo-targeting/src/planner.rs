//! Multi-waypoint mission planner and incremental replanning (spec §4.F).

use rpo_core::error::KernelResult;
use rpo_core::{ClassicalOrbitalElements, RelativeState, Vector3};

use crate::shooter::solve_rendezvous;
use crate::tof::optimize_tof;
use crate::types::{ManeuverLeg, MissionPlan, MissionSummary, TargetingOptions, Waypoint};

/// `planMission(initialRIC, waypoints, chief, options)`.
pub fn plan_mission(
    initial_ric: RelativeState,
    waypoints: &[Waypoint],
    chief: &ClassicalOrbitalElements,
    options: &TargetingOptions,
) -> KernelResult<MissionPlan> {
    if waypoints.is_empty() {
        return Ok(MissionPlan { legs: Vec::new(), total_delta_v: 0.0, total_time: 0.0, converged: true });
    }

    let mut state = initial_ric;
    let mut chief_cur = *chief;
    let mut legs = Vec::with_capacity(waypoints.len());
    let mut total_delta_v = 0.0;
    let mut total_time = 0.0;
    let mut converged = true;

    for wp in waypoints {
        let leg = match wp.tof_hint {
            Some(tof) => solve_rendezvous(state, wp.position, &chief_cur, tof, options)?,
            None => optimize_tof(state, wp.position, &chief_cur, options)?,
        };
        total_delta_v += leg.total_delta_v;
        total_time += leg.tof;
        converged &= leg.converged;
        chief_cur = leg.burn2.chief;
        state = RelativeState { position: wp.position, velocity: wp.velocity.unwrap_or(Vector3::ZERO) };
        legs.push(leg);
    }

    Ok(MissionPlan { legs, total_delta_v, total_time, converged })
}

/// `replanFromWaypoint(existingPlan, modifiedIndex, newWaypoints, chief0,
/// state0, options)`. `modified_index <= 0` triggers a full replan.
pub fn replan_from_waypoint(
    existing_plan: &MissionPlan,
    modified_index: i64,
    new_waypoints: &[Waypoint],
    chief0: &ClassicalOrbitalElements,
    state0: RelativeState,
    options: &TargetingOptions,
) -> KernelResult<MissionPlan> {
    if modified_index <= 0 {
        return plan_mission(state0, new_waypoints, chief0, options);
    }

    let keep = modified_index as usize;
    let kept_legs: Vec<ManeuverLeg> = existing_plan.legs.iter().take(keep).copied().collect();

    let mut state = state0;
    let mut chief_cur = *chief0;
    for leg in &kept_legs {
        state = RelativeState { position: leg.to, velocity: Vector3::ZERO };
        chief_cur = leg.burn2.chief;
    }

    let tail_waypoints = &new_waypoints[keep.min(new_waypoints.len())..];
    let tail_plan = plan_mission(state, tail_waypoints, &chief_cur, options)?;

    let mut legs = kept_legs;
    legs.extend(tail_plan.legs);
    let total_delta_v: f64 = legs.iter().map(|l| l.total_delta_v).sum();
    let total_time: f64 = legs.iter().map(|l| l.tof).sum();
    let converged = legs.iter().all(|l| l.converged);

    Ok(MissionPlan { legs, total_delta_v, total_time, converged })
}

/// `getMissionStateAtTime(plan, t)` -> `(legIndex, timeInLeg)` or `None` if
/// `t` is outside `[0, plan.total_time]`.
pub fn get_mission_state_at_time(plan: &MissionPlan, t: f64) -> Option<(usize, f64)> {
    if t < 0.0 || t > plan.total_time {
        return None;
    }
    let mut elapsed = 0.0;
    for (i, leg) in plan.legs.iter().enumerate() {
        if t <= elapsed + leg.tof || i == plan.legs.len() - 1 {
            return Some((i, t - elapsed));
        }
        elapsed += leg.tof;
    }
    None
}

/// `getMissionSummary(plan)` (spec §12 supplement).
pub fn get_mission_summary(plan: &MissionPlan) -> MissionSummary {
    MissionSummary {
        leg_count: plan.legs.len(),
        total_delta_v: plan.total_delta_v,
        total_time: plan.total_time,
        converged: plan.converged,
    }
}

/// `extractWaypointPositions(waypoints)` (spec §12 supplement).
pub fn extract_waypoint_positions(waypoints: &[Waypoint]) -> Vec<Vector3> {
    waypoints.iter().map(|wp| wp.position).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn empty_waypoints_yields_trivial_plan() {
        let chief = leo_chief();
        let initial = RelativeState::default();
        let plan = plan_mission(initial, &[], &chief, &TargetingOptions::default()).unwrap();
        assert!(plan.legs.is_empty());
        assert_eq!(plan.total_delta_v, 0.0);
        assert!(plan.converged);
    }

    #[test]
    fn two_waypoint_plan_matches_manual_chaining_s2() {
        let chief = leo_chief();
        let initial = RelativeState { position: Vector3::new(50.0, -300.0, 20.0), velocity: Vector3::ZERO };
        let waypoints = vec![
            Waypoint { position: Vector3::new(0.0, -100.0, 0.0), velocity: None, tof_hint: None },
            Waypoint { position: Vector3::new(0.0, 100.0, 0.0), velocity: None, tof_hint: None },
        ];
        let options = TargetingOptions::default();
        let plan = plan_mission(initial, &waypoints, &chief, &options).unwrap();
        assert_eq!(plan.legs.len(), 2);
        assert!(plan.legs[0].converged && plan.legs[1].converged);
        assert_eq!(plan.legs[1].from, Vector3::new(0.0, -100.0, 0.0));

        let manual_leg1 = solve_rendezvous(initial, waypoints[0].position, &chief, plan.legs[0].tof, &options).unwrap();
        let state2 = RelativeState { position: waypoints[0].position, velocity: Vector3::ZERO };
        let manual_leg2 =
            solve_rendezvous(state2, waypoints[1].position, &manual_leg1.burn2.chief, plan.legs[1].tof, &options)
                .unwrap();
        let manual_total = manual_leg1.total_delta_v + manual_leg2.total_delta_v;
        assert!((manual_total - plan.total_delta_v).abs() < 1e-9);
    }

    #[test]
    fn replan_from_zero_equals_full_plan() {
        let chief = leo_chief();
        let initial = RelativeState { position: Vector3::new(50.0, -300.0, 20.0), velocity: Vector3::ZERO };
        let waypoints = vec![Waypoint { position: Vector3::ZERO, velocity: None, tof_hint: None }];
        let options = TargetingOptions::default();
        let plan = plan_mission(initial, &waypoints, &chief, &options).unwrap();
        let replanned = replan_from_waypoint(&plan, 0, &waypoints, &chief, initial, &options).unwrap();
        assert_eq!(plan.legs.len(), replanned.legs.len());
        assert!((plan.total_delta_v - replanned.total_delta_v).abs() < 1e-9);
    }

    #[test]
    fn replan_keeps_legs_before_modified_index() {
        let chief = leo_chief();
        let initial = RelativeState { position: Vector3::new(50.0, -300.0, 20.0), velocity: Vector3::ZERO };
        let waypoints = vec![
            Waypoint { position: Vector3::new(0.0, -100.0, 0.0), velocity: None, tof_hint: None },
            Waypoint { position: Vector3::new(0.0, 100.0, 0.0), velocity: None, tof_hint: None },
        ];
        let options = TargetingOptions::default();
        let plan = plan_mission(initial, &waypoints, &chief, &options).unwrap();

        let new_waypoints = vec![
            waypoints[0],
            Waypoint { position: Vector3::new(0.0, 200.0, 0.0), velocity: None, tof_hint: None },
        ];
        let replanned = replan_from_waypoint(&plan, 1, &new_waypoints, &chief, initial, &options).unwrap();
        assert_eq!(replanned.legs[0], plan.legs[0]);
    }

    #[test]
    fn get_mission_state_at_time_rejects_out_of_range() {
        let plan = MissionPlan { legs: Vec::new(), total_delta_v: 0.0, total_time: 100.0, converged: true };
        assert!(get_mission_state_at_time(&plan, -1.0).is_none());
        assert!(get_mission_state_at_time(&plan, 200.0).is_none());
    }
}
