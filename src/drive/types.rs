//! Core shared types for `drive` (engine-agnostic).
// drive/types.rs
use serde::{Deserialize, Serialize};

pub type Vec3 = [f32; 3];

/// Below this magnitude a freshly integrated speed snaps to exactly zero.
pub const SPEED_DEADZONE: f32 = 0.001;

/// The vehicle only moves (and collides) when |speed| exceeds this.
pub const MOTION_EPSILON: f32 = 0.001;

/// Steer angles at or under this are treated as straight-line motion.
pub const STRAIGHT_STEER_EPSILON: f32 = 0.01;

// ============================================
// Pose (published once per frame)
// ============================================
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub position: Vec3, // world space, y is fixed for planar motion
    pub yaw: f32,       // radians about +Y, accumulates without wraparound
}

impl Pose {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }

    /// Yaw folded into [-π, π] for display.
    pub fn heading(&self) -> f32 {
        crate::drive::kinematics::normalize_angle(self.yaw)
    }
}

// ============================================
// ----- configs ------------------------------
// ============================================

/// Local collision envelope of the vehicle. Fixed constants, wide and tall
/// enough to contain the rendered model; never derived from a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleBounds {
    pub half_extents: Vec3,  // [hx, hy, hz] (width, height, length halves)
    pub center_offset: Vec3, // local offset of the box center from the pose origin
}

impl Default for VehicleBounds {
    fn default() -> Self {
        Self {
            half_extents: [1.0, 0.75, 2.0],
            center_offset: [0.0, 0.75, 0.0], // box rests on the ground plane
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehiclePhysicsConfig {
    pub acceleration: f32,    // speed added per frame while a drive key is held
    pub max_speed: f32,       // |speed| clamp (units / frame)
    pub friction: f32,        // multiplicative decay per frame, (0, 1]
    pub max_steer_angle: f32, // radians
    pub steer_speed: f32,     // smoothing rate toward target steer, (0, 1]
    pub wheel_base: f32,      // bicycle-model axle distance
    pub bounce_damping: f32,  // fraction of speed kept (reversed) on impact, [0, 1]
    pub bounds: VehicleBounds,
}

impl Default for VehiclePhysicsConfig {
    fn default() -> Self {
        Self {
            acceleration: 0.008,
            max_speed: 0.25,
            friction: 0.96,
            max_steer_angle: 0.6, // ~34 degrees
            steer_speed: 0.08,
            wheel_base: 2.0,
            bounce_damping: 0.5,
            bounds: VehicleBounds::default(),
        }
    }
}
