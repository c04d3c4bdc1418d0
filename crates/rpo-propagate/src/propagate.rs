//! ROE propagator (spec §4.E): selects an STM per [`PropagationOptions`],
//! validates preconditions, and optionally advances the chief's own
//! secular elements alongside the ROE.

use log::debug;
use rpo_core::error::{KernelError, KernelResult};
use rpo_core::kepler::{mean_motion, normalize_angle};
use rpo_core::linalg::mat_vec_mul;
use rpo_core::ClassicalOrbitalElements;
use rpo_dynamics::{ArbitraryDragState, DragConfig, EccentricDragState, OrbitalFactors, QuasiNonsingularROE};

use crate::options::PropagationOptions;

/// Validate the preconditions shared by every propagation entry point
/// (spec §4.E): chief elements, non-negative Δt, and drag-without-J2.
fn validate_preconditions(
    chief: &ClassicalOrbitalElements,
    dt: f64,
    options: &PropagationOptions,
) -> KernelResult<()> {
    chief.validate()?;
    if dt < 0.0 {
        return Err(KernelError::NegativeTime { value: dt });
    }
    if options.include_drag && !options.include_j2 {
        return Err(KernelError::DragWithoutJ2);
    }
    Ok(())
}

/// `propagateROE(roe0, chief, dt, options)`: pick an STM (drag > J2 >
/// Keplerian) and apply it.
pub fn propagate_roe(
    roe0: QuasiNonsingularROE,
    chief: &ClassicalOrbitalElements,
    dt: f64,
    options: &PropagationOptions,
) -> KernelResult<QuasiNonsingularROE> {
    validate_preconditions(chief, dt, options)?;
    let n = mean_motion(chief.a, chief.mu)?;

    if options.include_drag {
        let drag_config = options.drag_config.ok_or(KernelError::DragMissingConfig)?;
        let f = OrbitalFactors::new(chief, dt, n);
        return Ok(match drag_config {
            DragConfig::Eccentric { da_dot_drag } => {
                if chief.e < 0.05 {
                    return Err(KernelError::DragEccentricityTooLow { value: chief.e });
                }
                let phi = rpo_dynamics::stm::eccentric_drag_stm(&f, chief.e, dt)?;
                let x0 = EccentricDragState { roe: roe0, da_dot: da_dot_drag }.to_vector();
                EccentricDragState::from_vector(mat_vec_mul(&phi, &x0)).roe
            }
            DragConfig::Arbitrary {
                da_dot_drag,
                dex_dot_drag,
                dey_dot_drag,
            } => {
                let phi = rpo_dynamics::stm::arbitrary_drag_stm(&f, dt);
                let x0 = ArbitraryDragState {
                    roe: roe0,
                    da_dot: da_dot_drag,
                    dex_dot: dex_dot_drag,
                    dey_dot: dey_dot_drag,
                }
                .to_vector();
                ArbitraryDragState::from_vector(mat_vec_mul(&phi, &x0)).roe
            }
        });
    }

    let phi = if options.include_j2 {
        let f = OrbitalFactors::new(chief, dt, n);
        rpo_dynamics::stm::j2_stm(&f, dt)
    } else {
        rpo_dynamics::stm::keplerian_stm(n, dt)
    };
    Ok(QuasiNonsingularROE::from_vector(mat_vec_mul(&phi, &roe0.to_vector())))
}

/// `propagateROEWithChief`: propagate the ROE, then advance the chief's
/// own mean anomaly (always), argument of perigee and RAAN (iff J2 on),
/// and optionally its semi-major axis (implementation extension, spec §9).
pub fn propagate_roe_with_chief(
    roe0: QuasiNonsingularROE,
    chief: &ClassicalOrbitalElements,
    dt: f64,
    options: &PropagationOptions,
) -> KernelResult<(QuasiNonsingularROE, ClassicalOrbitalElements)> {
    let roe1 = propagate_roe(roe0, chief, dt, options)?;
    let n = mean_motion(chief.a, chief.mu)?;

    let new_mean_anomaly = normalize_angle(chief.mean_anomaly + n * dt);
    let (new_arg_perigee, new_raan) = if options.include_j2 {
        let f = OrbitalFactors::new(chief, dt, n);
        (
            normalize_angle(chief.arg_perigee + f.kappa * f.q * dt),
            normalize_angle(chief.raan - 2.0 * f.kappa * f.r * dt),
        )
    } else {
        (chief.arg_perigee, chief.raan)
    };

    let new_a = match options.chief_absolute_da_dot {
        Some(da_dot) => {
            debug!("advancing chief a by chief_absolute_da_dot over dt={dt}");
            chief.a + da_dot * dt
        }
        None => chief.a,
    };

    let new_chief = ClassicalOrbitalElements::new(
        new_a,
        chief.e,
        chief.i,
        new_raan,
        new_arg_perigee,
        new_mean_anomaly,
        chief.mu,
    )?;
    Ok((roe1, new_chief))
}
