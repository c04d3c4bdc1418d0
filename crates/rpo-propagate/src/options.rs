//! Propagation options (spec §3/§4.E).

use rpo_dynamics::DragConfig;
use serde::{Deserialize, Serialize};

/// Which perturbation models a propagation call should include.
///
/// Invariant (checked in [`crate::propagate::propagate_roe`]): `include_drag`
/// implies `include_j2` — drag without J2 is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropagationOptions {
    pub include_j2: bool,
    pub include_drag: bool,
    pub drag_config: Option<DragConfig>,
    /// Optional implementation extension (spec §4.E, §9 open question):
    /// secular decay of the chief's own semi-major axis. Off by default;
    /// not derived from the Koenig paper.
    pub chief_absolute_da_dot: Option<f64>,
}

impl Default for PropagationOptions {
    fn default() -> Self {
        Self {
            include_j2: true,
            include_drag: false,
            drag_config: None,
            chief_absolute_da_dot: None,
        }
    }
}
