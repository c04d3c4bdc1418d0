//! Kernel error type.
//!
//! One enum for every failure mode named in spec §7: precondition
//! violations carry the offending field and the value observed; numeric
//! singularities name which matrix failed.

use thiserror::Error;

/// Errors produced anywhere in the kernel.
///
/// Non-convergence of the shooter and a penalized TOF sample are *not*
/// represented here — those are reported via `converged`/`+inf` cost, not
/// an `Err`, per spec §7.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    #[error("invalid semi-major axis: a = {value} (must be > 0)")]
    InvalidSemiMajorAxis { value: f64 },

    #[error("invalid eccentricity: e = {value} (must be in [0, 1))")]
    InvalidEccentricity { value: f64 },

    #[error("invalid gravitational parameter: mu = {value} (must be > 0)")]
    InvalidGravitationalParameter { value: f64 },

    #[error("near-equatorial orbit: inclination = {inclination_deg} deg (must be >= 0.1 deg from 0 or 180)")]
    NearEquatorialOrbit { inclination_deg: f64 },

    #[error("negative propagation time: dt = {value} (must be >= 0)")]
    NegativeTime { value: f64 },

    #[error("drag enabled without J2: includeDrag=true requires includeJ2=true")]
    DragWithoutJ2,

    #[error("drag requested but no DragConfig supplied")]
    DragMissingConfig,

    #[error("eccentric drag model requires e >= 0.05, got e = {value}")]
    DragEccentricityTooLow { value: f64 },

    #[error("matrix singular at this configuration ({which}): |det| = {determinant:e} < 1e-15")]
    Singular { which: &'static str, determinant: f64 },
}

/// Structured validation result for UI-friendly reporting, per spec §6/§7.
///
/// Distinct from [`KernelError`]: this is the *mirror* surface
/// `validateTargetingConfig` returns so a host can render a message and
/// suggestion without pattern-matching an error enum.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidationFailure {
    pub code: ValidationCode,
    pub message: String,
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    InvalidSemiMajorAxis,
    InvalidEccentricity,
    InvalidGravitationalParameter,
    NearEquatorialOrbit,
    DragMissingConfig,
    DragEccentricityTooLow,
}

pub type KernelResult<T> = Result<T, KernelError>;
