//! Quasi-nonsingular ROE types, plain and augmented (spec §3).

use nalgebra::SVector;
use serde::{Deserialize, Serialize};

/// The six quasi-nonsingular relative orbital elements, ordered
/// `[da, dlambda, dex, dey, dix, diy]` per spec §6.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuasiNonsingularROE {
    pub da: f64,
    pub dlambda: f64,
    pub dex: f64,
    pub dey: f64,
    pub dix: f64,
    pub diy: f64,
}

impl QuasiNonsingularROE {
    pub const ZERO: Self = Self {
        da: 0.0,
        dlambda: 0.0,
        dex: 0.0,
        dey: 0.0,
        dix: 0.0,
        diy: 0.0,
    };

    pub fn to_vector(self) -> SVector<f64, 6> {
        SVector::<f64, 6>::new(self.da, self.dlambda, self.dex, self.dey, self.dix, self.diy)
    }

    pub fn from_vector(v: SVector<f64, 6>) -> Self {
        Self {
            da: v[0],
            dlambda: v[1],
            dex: v[2],
            dey: v[3],
            dix: v[4],
            diy: v[5],
        }
    }
}

/// The 7-element augmented state: six ROE plus drift rate `da_dot`
/// (eccentric drag model, spec §3/§4.C).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EccentricDragState {
    pub roe: QuasiNonsingularROE,
    pub da_dot: f64,
}

impl EccentricDragState {
    pub fn to_vector(self) -> SVector<f64, 7> {
        let r = self.roe;
        SVector::<f64, 7>::from_row_slice(&[r.da, r.dlambda, r.dex, r.dey, r.dix, r.diy, self.da_dot])
    }

    pub fn from_vector(v: SVector<f64, 7>) -> Self {
        Self {
            roe: QuasiNonsingularROE {
                da: v[0],
                dlambda: v[1],
                dex: v[2],
                dey: v[3],
                dix: v[4],
                diy: v[5],
            },
            da_dot: v[6],
        }
    }
}

/// The 9-element augmented state: six ROE plus `(da_dot, dex_dot,
/// dey_dot)` (arbitrary-eccentricity drag model, spec §3/§4.C).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArbitraryDragState {
    pub roe: QuasiNonsingularROE,
    pub da_dot: f64,
    pub dex_dot: f64,
    pub dey_dot: f64,
}

impl ArbitraryDragState {
    pub fn to_vector(self) -> SVector<f64, 9> {
        let r = self.roe;
        SVector::<f64, 9>::from_row_slice(&[
            r.da, r.dlambda, r.dex, r.dey, r.dix, r.diy, self.da_dot, self.dex_dot, self.dey_dot,
        ])
    }

    pub fn from_vector(v: SVector<f64, 9>) -> Self {
        Self {
            roe: QuasiNonsingularROE {
                da: v[0],
                dlambda: v[1],
                dex: v[2],
                dey: v[3],
                dix: v[4],
                diy: v[5],
            },
            da_dot: v[6],
            dex_dot: v[7],
            dey_dot: v[8],
        }
    }
}

/// Drag configuration: which augmented state applies (spec §3).
///
/// Modeled as a discriminated union per the §9 "Abstraction strategies"
/// note, with a match/dispatch at the propagation entry point
/// (`rpo_propagate::propagate_roe`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DragConfig {
    /// Requires `e >= 0.05` (circularization-constraint model).
    Eccentric { da_dot_drag: f64 },
    /// Valid at any eccentricity.
    Arbitrary {
        da_dot_drag: f64,
        dex_dot_drag: f64,
        dey_dot_drag: f64,
    },
}

impl DragConfig {
    /// Convert an eccentric drag config to an arbitrary one along the
    /// chief apsidal line: `de_dot = (1-e) * da_dot`, spec §4.C.
    pub fn eccentric_to_arbitrary(da_dot: f64, e: f64, arg_perigee: f64) -> DragConfig {
        let de_dot = (1.0 - e) * da_dot;
        DragConfig::Arbitrary {
            da_dot_drag: da_dot,
            dex_dot_drag: de_dot * arg_perigee.cos(),
            dey_dot_drag: de_dot * arg_perigee.sin(),
        }
    }
}
