pub mod options;
pub mod propagate;
pub mod validate;

pub use options::PropagationOptions;
pub use propagate::{propagate_roe, propagate_roe_with_chief};
pub use validate::validate_targeting_config;
