//! Property 4 (spec §8): with pure dex/dey and zero da, the eccentricity
//! vector returns to its initial orientation after one full J2 apsidal
//! period tau = 2*pi / omega_dot.

use rpo_core::constants::MU_EARTH;
use rpo_core::ClassicalOrbitalElements;
use rpo_dynamics::factors::OrbitalFactors;
use rpo_dynamics::stm::j2_stm;

fn leo_chief() -> ClassicalOrbitalElements {
    ClassicalOrbitalElements::new(
        6_778_000.0,
        0.01,
        51.6_f64.to_radians(),
        45_f64.to_radians(),
        30_f64.to_radians(),
        0.0,
        MU_EARTH,
    )
    .unwrap()
}

#[test]
fn eccentricity_vector_returns_to_initial_orientation_after_one_apsidal_period() {
    let chief = leo_chief();
    let n = rpo_core::kepler::mean_motion(chief.a, chief.mu).unwrap();

    let probe = OrbitalFactors::new(&chief, 0.0, n);
    let omega_dot = probe.omega_dot;
    assert!(omega_dot.abs() > 0.0, "J2 must induce nonzero apsidal drift for this test to be meaningful");

    let tau = 2.0 * std::f64::consts::PI / omega_dot;
    let f = OrbitalFactors::new(&chief, tau, n);
    let phi = j2_stm(&f, tau);

    let (dex0, dey0) = (1e-3, -2e-3);
    let dex1 = phi[(2, 2)] * dex0 + phi[(2, 3)] * dey0;
    let dey1 = phi[(3, 2)] * dex0 + phi[(3, 3)] * dey0;

    assert!((dex1 - dex0).abs() < 1e-6, "dex drifted: {dex1} vs {dex0}");
    assert!((dey1 - dey0).abs() < 1e-6, "dey drifted: {dey1} vs {dey0}");
}
