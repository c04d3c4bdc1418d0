//! Kepler math primitives, orbital-element types, and the kernel-wide error
//! type shared by every crate in the RPO planning workspace.

pub mod constants;
pub mod elements;
pub mod error;
pub mod kepler;
pub mod linalg;

pub use elements::{ClassicalOrbitalElements, RelativeState, Vector3};
pub use error::{KernelError, KernelResult, ValidationCode, ValidationFailure};
