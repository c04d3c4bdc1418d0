//! Targeting and planning data model (spec §3).

use rpo_core::{ClassicalOrbitalElements, Vector3};
use rpo_propagate::PropagationOptions;
use serde::{Deserialize, Serialize};

/// A commanded relative-position stop, with an optional arrival velocity
/// (default zero) and an optional time-of-flight hint that, when present,
/// skips TOF optimization for that leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: Vector3,
    pub velocity: Option<Vector3>,
    pub tof_hint: Option<f64>,
}

/// An impulsive burn: the RIC delta-v applied and the chief state at the
/// instant it was applied (spec §9 "clone-on-advance for chief").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Maneuver {
    pub delta_v: Vector3,
    pub magnitude: f64,
    pub chief: ClassicalOrbitalElements,
}

/// A single two-impulse rendezvous leg.
///
/// Invariants: `total_delta_v >= 0`; `iterations >= 1`; `converged` implies
/// `position_error < positionTolerance` of the options the leg was solved
/// under.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManeuverLeg {
    pub from: Vector3,
    pub to: Vector3,
    pub target_velocity: Vector3,
    pub tof: f64,
    pub burn1: Maneuver,
    pub burn2: Maneuver,
    pub total_delta_v: f64,
    pub converged: bool,
    pub iterations: u32,
    pub position_error: f64,
}

/// An ordered sequence of legs. Invariant: the end of leg k equals the
/// start of leg k+1 (position = waypoint_k, velocity = waypoint_k.velocity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionPlan {
    pub legs: Vec<ManeuverLeg>,
    pub total_delta_v: f64,
    pub total_time: f64,
    pub converged: bool,
}

/// A compact summary of a [`MissionPlan`] (spec §12 supplement).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissionSummary {
    pub leg_count: usize,
    pub total_delta_v: f64,
    pub total_time: f64,
    pub converged: bool,
}

/// A single time-sampled point along a trajectory, time cumulative from
/// mission start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub time: f64,
    pub position: Vector3,
    pub velocity: Vector3,
}

/// Golden-section search bracket for [`crate::tof::optimize_tof`], expressed
/// in orbits of the chief's period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TofSearchRange {
    pub min_orbits: f64,
    pub max_orbits: f64,
}

impl Default for TofSearchRange {
    fn default() -> Self {
        Self { min_orbits: 0.5, max_orbits: 3.0 }
    }
}

/// Options controlling the shooter, TOF optimizer, and planner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetingOptions {
    pub propagation: PropagationOptions,
    pub max_iterations: u32,
    pub position_tolerance: f64,
    pub velocity_tolerance: f64,
    pub target_velocity: Vector3,
    pub tof_search_range: TofSearchRange,
}

impl Default for TargetingOptions {
    fn default() -> Self {
        Self {
            propagation: PropagationOptions::default(),
            max_iterations: 50,
            position_tolerance: 1.0,
            velocity_tolerance: 1e-3,
            target_velocity: Vector3::ZERO,
            tof_search_range: TofSearchRange::default(),
        }
    }
}
