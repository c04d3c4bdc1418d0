pub mod factors;
pub mod roe;
pub mod stm;
pub mod transform;

pub use factors::OrbitalFactors;
pub use roe::{ArbitraryDragState, DragConfig, EccentricDragState, QuasiNonsingularROE};
pub use transform::{build_transform, ric_to_roe, roe_to_ric};
