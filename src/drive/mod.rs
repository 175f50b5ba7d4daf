//! drive - engine-agnostic kinematic vehicle helpers (pure types + per-frame steps)

pub mod types;
pub mod steering;
pub mod longitudinal;
pub mod kinematics;

pub use types::*;
