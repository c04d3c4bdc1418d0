//! WASM bindings: mission-planning surface for the visualization front-end
//! (spec §6). Every kernel type already derives `Serialize`/`Deserialize`,
//! so these wrappers marshal JsValue in and out without a parallel DTO
//! layer — unlike the point-mass/6DoF bridge this crate is grounded on,
//! whose upstream types needed field-by-field conversion.

use serde::{Deserialize, Serialize};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use rpo_core::error::ValidationFailure;
use rpo_core::{ClassicalOrbitalElements, RelativeState, Vector3};
use rpo_dynamics::QuasiNonsingularROE;
use rpo_propagate::PropagationOptions;
use rpo_targeting::{MissionPlan, TargetingOptions, TrajectoryPoint, Waypoint};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
}

fn ok(value: &impl Serialize) -> Result<JsValue, JsValue> {
    swb::to_value(value).map_err(|e| e.into())
}

/// `propagateROE(roe0, chief, dt, options)`.
#[wasm_bindgen(js_name = propagateROE)]
pub fn propagate_roe_js(roe0: JsValue, chief: JsValue, dt: f64, options: JsValue) -> Result<JsValue, JsValue> {
    let roe0: QuasiNonsingularROE = swb::from_value(roe0)?;
    let chief: ClassicalOrbitalElements = swb::from_value(chief)?;
    let options: PropagationOptions = swb::from_value(options)?;
    let roe = rpo_propagate::propagate_roe(roe0, &chief, dt, &options).map_err(js_err)?;
    ok(&roe)
}

#[derive(Serialize)]
struct PropagateWithChiefResult {
    roe: QuasiNonsingularROE,
    chief: ClassicalOrbitalElements,
}

/// `propagateROEWithChief(roe0, chief, dt, options)`.
#[wasm_bindgen(js_name = propagateROEWithChief)]
pub fn propagate_roe_with_chief_js(
    roe0: JsValue,
    chief: JsValue,
    dt: f64,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let roe0: QuasiNonsingularROE = swb::from_value(roe0)?;
    let chief: ClassicalOrbitalElements = swb::from_value(chief)?;
    let options: PropagationOptions = swb::from_value(options)?;
    let (roe, chief) = rpo_propagate::propagate_roe_with_chief(roe0, &chief, dt, &options).map_err(js_err)?;
    ok(&PropagateWithChiefResult { roe, chief })
}

/// `roeToRIC(chief, roe)`.
#[wasm_bindgen(js_name = roeToRIC)]
pub fn roe_to_ric_js(chief: JsValue, roe: JsValue) -> Result<JsValue, JsValue> {
    let chief: ClassicalOrbitalElements = swb::from_value(chief)?;
    let roe: QuasiNonsingularROE = swb::from_value(roe)?;
    let ric = rpo_dynamics::roe_to_ric(&chief, roe).map_err(js_err)?;
    ok(&ric)
}

/// `ricToROE(chief, ric)`.
#[wasm_bindgen(js_name = ricToROE)]
pub fn ric_to_roe_js(chief: JsValue, ric: JsValue) -> Result<JsValue, JsValue> {
    let chief: ClassicalOrbitalElements = swb::from_value(chief)?;
    let ric: RelativeState = swb::from_value(ric)?;
    let roe = rpo_dynamics::ric_to_roe(&chief, ric).map_err(js_err)?;
    ok(&roe)
}

/// `computeControlMatrix(chief)`, returned row-major as 6 rows of 3.
#[wasm_bindgen(js_name = computeControlMatrix)]
pub fn compute_control_matrix_js(chief: JsValue) -> Result<JsValue, JsValue> {
    let chief: ClassicalOrbitalElements = swb::from_value(chief)?;
    let b = rpo_targeting::compute_control_matrix(&chief).map_err(js_err)?;
    let rows: Vec<[f64; 3]> = (0..6).map(|r| [b[(r, 0)], b[(r, 1)], b[(r, 2)]]).collect();
    ok(&rows)
}

/// `applyDeltaV(roe, dv, chief)`.
#[wasm_bindgen(js_name = applyDeltaV)]
pub fn apply_delta_v_js(roe: JsValue, dv: JsValue, chief: JsValue) -> Result<JsValue, JsValue> {
    let roe: QuasiNonsingularROE = swb::from_value(roe)?;
    let dv: Vector3 = swb::from_value(dv)?;
    let chief: ClassicalOrbitalElements = swb::from_value(chief)?;
    let roe_after = rpo_targeting::apply_delta_v(roe, dv, &chief).map_err(js_err)?;
    ok(&roe_after)
}

/// `solveRendezvous(initialRIC, targetPos, chief, tof, options)`.
#[wasm_bindgen(js_name = solveRendezvous)]
pub fn solve_rendezvous_js(
    initial_ric: JsValue,
    target_pos: JsValue,
    chief: JsValue,
    tof: f64,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let initial_ric: RelativeState = swb::from_value(initial_ric)?;
    let target_pos: Vector3 = swb::from_value(target_pos)?;
    let chief: ClassicalOrbitalElements = swb::from_value(chief)?;
    let options: TargetingOptions = swb::from_value(options)?;
    let leg = rpo_targeting::solve_rendezvous(initial_ric, target_pos, &chief, tof, &options).map_err(js_err)?;
    ok(&leg)
}

/// `optimizeTOF(initialRIC, targetPos, chief, options)`.
#[wasm_bindgen(js_name = optimizeTOF)]
pub fn optimize_tof_js(
    initial_ric: JsValue,
    target_pos: JsValue,
    chief: JsValue,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let initial_ric: RelativeState = swb::from_value(initial_ric)?;
    let target_pos: Vector3 = swb::from_value(target_pos)?;
    let chief: ClassicalOrbitalElements = swb::from_value(chief)?;
    let options: TargetingOptions = swb::from_value(options)?;
    let leg = rpo_targeting::optimize_tof(initial_ric, target_pos, &chief, &options).map_err(js_err)?;
    ok(&leg)
}

/// `optimizeTOFMultiStart(initialRIC, targetPos, chief, options, numSamples)`.
#[wasm_bindgen(js_name = optimizeTOFMultiStart)]
pub fn optimize_tof_multi_start_js(
    initial_ric: JsValue,
    target_pos: JsValue,
    chief: JsValue,
    options: JsValue,
    num_samples: usize,
) -> Result<JsValue, JsValue> {
    let initial_ric: RelativeState = swb::from_value(initial_ric)?;
    let target_pos: Vector3 = swb::from_value(target_pos)?;
    let chief: ClassicalOrbitalElements = swb::from_value(chief)?;
    let options: TargetingOptions = swb::from_value(options)?;
    let leg = rpo_targeting::optimize_tof_multi_start(initial_ric, target_pos, &chief, &options, num_samples)
        .map_err(js_err)?;
    ok(&leg)
}

/// `planMission(initialRIC, waypoints, chief, options)`.
#[wasm_bindgen(js_name = planMission)]
pub fn plan_mission_js(
    initial_ric: JsValue,
    waypoints: JsValue,
    chief: JsValue,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let initial_ric: RelativeState = swb::from_value(initial_ric)?;
    let waypoints: Vec<Waypoint> = swb::from_value(waypoints)?;
    let chief: ClassicalOrbitalElements = swb::from_value(chief)?;
    let options: TargetingOptions = swb::from_value(options)?;
    let plan = rpo_targeting::plan_mission(initial_ric, &waypoints, &chief, &options).map_err(js_err)?;
    ok(&plan)
}

/// `replanFromWaypoint(existingPlan, modifiedIndex, newWaypoints, chief0, state0, options)`.
#[wasm_bindgen(js_name = replanFromWaypoint)]
pub fn replan_from_waypoint_js(
    existing_plan: JsValue,
    modified_index: i64,
    new_waypoints: JsValue,
    chief0: JsValue,
    state0: JsValue,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let existing_plan: MissionPlan = swb::from_value(existing_plan)?;
    let new_waypoints: Vec<Waypoint> = swb::from_value(new_waypoints)?;
    let chief0: ClassicalOrbitalElements = swb::from_value(chief0)?;
    let state0: RelativeState = swb::from_value(state0)?;
    let options: TargetingOptions = swb::from_value(options)?;
    let replanned =
        rpo_targeting::replan_from_waypoint(&existing_plan, modified_index, &new_waypoints, &chief0, state0, &options)
            .map_err(js_err)?;
    ok(&replanned)
}

#[derive(Serialize)]
struct MissionStateAtTime {
    leg_index: usize,
    time_in_leg: f64,
}

/// `getMissionStateAtTime(plan, t)`, `null` if `t` is outside the plan span.
#[wasm_bindgen(js_name = getMissionStateAtTime)]
pub fn get_mission_state_at_time_js(plan: JsValue, t: f64) -> Result<JsValue, JsValue> {
    let plan: MissionPlan = swb::from_value(plan)?;
    let state = rpo_targeting::get_mission_state_at_time(&plan, t)
        .map(|(leg_index, time_in_leg)| MissionStateAtTime { leg_index, time_in_leg });
    ok(&state)
}

/// `getMissionSummary(plan)`.
#[wasm_bindgen(js_name = getMissionSummary)]
pub fn get_mission_summary_js(plan: JsValue) -> Result<JsValue, JsValue> {
    let plan: MissionPlan = swb::from_value(plan)?;
    ok(&rpo_targeting::get_mission_summary(&plan))
}

/// `extractWaypointPositions(waypoints)`.
#[wasm_bindgen(js_name = extractWaypointPositions)]
pub fn extract_waypoint_positions_js(waypoints: JsValue) -> Result<JsValue, JsValue> {
    let waypoints: Vec<Waypoint> = swb::from_value(waypoints)?;
    ok(&rpo_targeting::extract_waypoint_positions(&waypoints))
}

/// `generateLegTrajectory(leg, chief0, position0, velocity0, options, numPoints)`.
#[wasm_bindgen(js_name = generateLegTrajectory)]
pub fn generate_leg_trajectory_js(
    leg: JsValue,
    chief0: JsValue,
    position0: JsValue,
    velocity0: JsValue,
    options: JsValue,
    num_points: usize,
) -> Result<JsValue, JsValue> {
    let leg = swb::from_value(leg)?;
    let chief0: ClassicalOrbitalElements = swb::from_value(chief0)?;
    let position0: Vector3 = swb::from_value(position0)?;
    let velocity0: Vector3 = swb::from_value(velocity0)?;
    let options: PropagationOptions = swb::from_value(options)?;
    let points =
        rpo_targeting::generate_leg_trajectory(&leg, &chief0, position0, velocity0, &options, num_points)
            .map_err(js_err)?;
    ok(&points)
}

/// `generateMissionTrajectory(plan, chief0, position0, velocity0, options, pointsPerLeg)`.
#[wasm_bindgen(js_name = generateMissionTrajectory)]
pub fn generate_mission_trajectory_js(
    plan: JsValue,
    chief0: JsValue,
    position0: JsValue,
    velocity0: JsValue,
    options: JsValue,
    points_per_leg: usize,
) -> Result<JsValue, JsValue> {
    let plan: MissionPlan = swb::from_value(plan)?;
    let chief0: ClassicalOrbitalElements = swb::from_value(chief0)?;
    let position0: Vector3 = swb::from_value(position0)?;
    let velocity0: Vector3 = swb::from_value(velocity0)?;
    let options: PropagationOptions = swb::from_value(options)?;
    let points =
        rpo_targeting::generate_mission_trajectory(&plan, &chief0, position0, velocity0, &options, points_per_leg)
            .map_err(js_err)?;
    ok(&points)
}

#[derive(Serialize)]
struct TrajectoryWithManeuvers {
    points: Vec<TrajectoryPoint>,
    markers: Vec<rpo_targeting::ManeuverMarker>,
}

/// `generateTrajectoryWithManeuvers(plan, chief0, position0, velocity0, options, pointsPerLeg)`.
#[wasm_bindgen(js_name = generateTrajectoryWithManeuvers)]
pub fn generate_trajectory_with_maneuvers_js(
    plan: JsValue,
    chief0: JsValue,
    position0: JsValue,
    velocity0: JsValue,
    options: JsValue,
    points_per_leg: usize,
) -> Result<JsValue, JsValue> {
    let plan: MissionPlan = swb::from_value(plan)?;
    let chief0: ClassicalOrbitalElements = swb::from_value(chief0)?;
    let position0: Vector3 = swb::from_value(position0)?;
    let velocity0: Vector3 = swb::from_value(velocity0)?;
    let options: PropagationOptions = swb::from_value(options)?;
    let (points, markers) = rpo_targeting::generate_trajectory_with_maneuvers(
        &plan,
        &chief0,
        position0,
        velocity0,
        &options,
        points_per_leg,
    )
    .map_err(js_err)?;
    ok(&TrajectoryWithManeuvers { points, markers })
}

/// `sampleTrajectoryUniform(traj, n)`.
#[wasm_bindgen(js_name = sampleTrajectoryUniform)]
pub fn sample_trajectory_uniform_js(traj: JsValue, n: usize) -> Result<JsValue, JsValue> {
    let traj: Vec<TrajectoryPoint> = swb::from_value(traj)?;
    ok(&rpo_targeting::sample_trajectory_uniform(&traj, n))
}

#[derive(Serialize, Deserialize)]
struct ValidationResult {
    valid: bool,
    failure: Option<ValidationFailure>,
}

/// `validateTargetingConfig(chief, options)`, returned as `{valid, failure}`
/// rather than thrown, per spec §6/§7.
#[wasm_bindgen(js_name = validateTargetingConfig)]
pub fn validate_targeting_config_js(chief: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let chief: ClassicalOrbitalElements = swb::from_value(chief)?;
    let options: PropagationOptions = swb::from_value(options)?;
    let result = match rpo_propagate::validate_targeting_config(&chief, &options) {
        Ok(()) => ValidationResult { valid: true, failure: None },
        Err(failure) => ValidationResult { valid: false, failure: Some(failure) },
    };
    ok(&result)
}

fn js_err(e: rpo_core::error::KernelError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::wasm_bindgen_test;

    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    fn leo_chief_json() -> serde_json::Value {
        serde_json::json!({
            "a": 6_778_000.0,
            "e": 0.0005,
            "i": 51.6_f64.to_radians(),
            "raan": 45_f64.to_radians(),
            "arg_perigee": 30_f64.to_radians(),
            "mean_anomaly": 0.0,
            "h": 0.0,
            "mu": 3.986004418e14,
        })
    }

    #[wasm_bindgen_test]
    fn roe_to_ric_round_trips_through_ric_to_roe() {
        let chief = swb::to_value(&leo_chief_json()).unwrap();
        let roe = swb::to_value(&QuasiNonsingularROE {
            da: 1e-4,
            dlambda: 2e-4,
            dex: 1e-3,
            dey: -2e-3,
            dix: 5e-4,
            diy: -3e-4,
        })
        .unwrap();
        let ric = roe_to_ric_js(chief.clone(), roe.clone()).unwrap();
        let back = ric_to_roe_js(chief, ric).unwrap();
        let back: QuasiNonsingularROE = swb::from_value(back).unwrap();
        assert!((back.da - 1e-4).abs() < 1e-9);
    }

    #[wasm_bindgen_test]
    fn validate_targeting_config_reports_invalid_drag_combination() {
        let chief = swb::to_value(&leo_chief_json()).unwrap();
        let options = swb::to_value(&serde_json::json!({
            "include_j2": false,
            "include_drag": true,
            "drag_config": null,
            "chief_absolute_da_dot": null,
        }))
        .unwrap();
        let result = validate_targeting_config_js(chief, options).unwrap();
        let result: ValidationResult = swb::from_value(result).unwrap();
        assert!(!result.valid);
    }
}
