//! `validateTargetingConfig` (spec §6/§7): a structured mirror of the
//! precondition checks in [`crate::propagate`], returning a UI-friendly
//! code/message/suggestion instead of bubbling a [`KernelError`].

use rpo_core::error::{KernelError, ValidationCode, ValidationFailure};
use rpo_core::ClassicalOrbitalElements;
use rpo_dynamics::DragConfig;

use crate::options::PropagationOptions;

fn to_validation(err: KernelError) -> ValidationFailure {
    match err {
        KernelError::InvalidSemiMajorAxis { value } => ValidationFailure {
            code: ValidationCode::InvalidSemiMajorAxis,
            message: format!("semi-major axis must be > 0, got {value}"),
            suggestion: Some("set a chief semi-major axis above Earth's radius".into()),
        },
        KernelError::InvalidEccentricity { value } => ValidationFailure {
            code: ValidationCode::InvalidEccentricity,
            message: format!("eccentricity must be in [0, 1), got {value}"),
            suggestion: Some("use an elliptical or circular orbit".into()),
        },
        KernelError::InvalidGravitationalParameter { value } => ValidationFailure {
            code: ValidationCode::InvalidGravitationalParameter,
            message: format!("gravitational parameter must be > 0, got {value}"),
            suggestion: Some("use MU_EARTH unless orbiting another body".into()),
        },
        KernelError::NearEquatorialOrbit { inclination_deg } => ValidationFailure {
            code: ValidationCode::NearEquatorialOrbit,
            message: format!(
                "inclination {inclination_deg} deg is within 0.1 deg of the equator, where quasi-nonsingular ROE is singular"
            ),
            suggestion: Some("choose an inclination at least 0.1 deg from 0 or 180".into()),
        },
        KernelError::DragMissingConfig => ValidationFailure {
            code: ValidationCode::DragMissingConfig,
            message: "drag is enabled but no DragConfig was supplied".into(),
            suggestion: Some("provide an eccentric or arbitrary DragConfig".into()),
        },
        KernelError::DragEccentricityTooLow { value } => ValidationFailure {
            code: ValidationCode::DragEccentricityTooLow,
            message: format!("eccentric drag model requires e >= 0.05, got {value}"),
            suggestion: Some("switch to the arbitrary drag model, valid at any eccentricity".into()),
        },
        other => ValidationFailure {
            code: ValidationCode::InvalidSemiMajorAxis,
            message: other.to_string(),
            suggestion: None,
        },
    }
}

/// Returns `Ok(())` if `(chief, options)` would not fail propagation, or a
/// structured [`ValidationFailure`] describing the first violation found.
pub fn validate_targeting_config(
    chief: &ClassicalOrbitalElements,
    options: &PropagationOptions,
) -> Result<(), ValidationFailure> {
    chief.validate().map_err(to_validation)?;

    if options.include_drag {
        match options.drag_config {
            None => {
                return Err(to_validation(KernelError::DragMissingConfig));
            }
            Some(DragConfig::Eccentric { .. }) if chief.e < 0.05 => {
                return Err(to_validation(KernelError::DragEccentricityTooLow { value: chief.e }));
            }
            Some(_) => {}
        }
    }

    Ok(())
}
