pub mod control;
pub mod planner;
pub mod shooter;
pub mod tof;
pub mod trajectory;
pub mod types;

pub use control::{apply_delta_v, compute_control_matrix};
pub use planner::{extract_waypoint_positions, get_mission_state_at_time, get_mission_summary, plan_mission, replan_from_waypoint};
pub use shooter::solve_rendezvous;
pub use tof::{optimize_tof, optimize_tof_multi_start};
pub use trajectory::{
    generate_leg_trajectory, generate_mission_trajectory, generate_trajectory_with_maneuvers,
    sample_trajectory_uniform, ManeuverMarker,
};
pub use types::{Maneuver, ManeuverLeg, MissionPlan, MissionSummary, TargetingOptions, TofSearchRange, TrajectoryPoint, Waypoint};
