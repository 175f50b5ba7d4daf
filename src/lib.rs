//! Single-vehicle kinematic driving simulation: keyboard-style controls in,
//! one pose per frame out, bounce-back collisions against static boxes.

pub mod drive;
pub mod input;
pub mod obstacle;
pub mod collision;
pub mod vehicle;
pub mod camera;
pub mod course;
pub mod debug;
pub mod config;
pub mod state;
pub mod net;
pub mod logging;

pub use drive::{Pose, VehicleBounds, VehiclePhysicsConfig};
pub use input::{InputSnapshot, KeyState};
pub use obstacle::{Obstacle, ObstacleData};
pub use vehicle::{FrameReport, Vehicle, VehicleState};
