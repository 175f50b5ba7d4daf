// ==============================================================================
// vehicle.rs — VEHICLE KINEMATIC MODEL (ONE ADVANCE PER FRAME)
// ==============================================================================
// Frame order is load-bearing:
// 1) steering   (always)
// 2) speed      (always)
// 3) motion     (only when |speed| > MOTION_EPSILON)
//    - candidate yaw from the bicycle model
//    - candidate position along the candidate yaw
//    - collision test of the candidate pose
//    - commit, or keep the old pose and bounce the speed
// 4) publish the committed pose
//
// Motion uses the steer angle and speed produced earlier in the same frame.
// ==============================================================================

use serde::Serialize;
use tracing::debug;

use crate::collision;
use crate::drive::{
    kinematics, longitudinal, steering, Pose, Vec3, VehiclePhysicsConfig, MOTION_EPSILON,
};
use crate::input::InputSnapshot;
use crate::obstacle::Obstacle;

/// Visual wheel spin per unit of speed each frame (radians).
const WHEEL_SPIN_PER_SPEED: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VehicleState {
    pub steer_angle: f32, // radians, |θ| <= max_steer_angle
    pub speed: f32,       // units / frame along facing, |s| <= max_speed
    pub position: Vec3,   // y stays where it spawned
    pub yaw: f32,         // radians, unbounded
}

impl VehicleState {
    pub fn at(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw, ..Default::default() }
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.yaw)
    }
}

/// Rendering-only wheel state. Never read back by physics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WheelVisuals {
    pub front_steer: f32, // radians, applied to both steerable wheels
    pub spin: f32,        // accumulated roll angle, radians
}

/// What a frame publishes to renderers and the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub pose: Pose,
    pub speed: f32,
    pub steer_angle: f32,
    pub wheels: WheelVisuals,
    pub collided: bool, // candidate pose rejected this frame
}

pub struct Vehicle {
    config: VehiclePhysicsConfig, // fixed at construction
    state: VehicleState,
    wheels: WheelVisuals,
}

impl Vehicle {
    pub fn new(config: VehiclePhysicsConfig, position: Vec3) -> Self {
        Self::with_state(config, VehicleState::at(position, 0.0))
    }

    /// Start from an arbitrary state; values are clamped into the config's limits.
    pub fn with_state(config: VehiclePhysicsConfig, mut state: VehicleState) -> Self {
        state.steer_angle = state.steer_angle.clamp(-config.max_steer_angle, config.max_steer_angle);
        state.speed = state.speed.clamp(-config.max_speed, config.max_speed);
        Self {
            config,
            state,
            wheels: WheelVisuals::default(),
        }
    }

    pub fn config(&self) -> &VehiclePhysicsConfig {
        &self.config
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn pose(&self) -> Pose {
        self.state.pose()
    }

    pub fn advance(&mut self, input: &InputSnapshot, obstacles: &[Obstacle]) -> FrameReport {
        let cfg = &self.config;

        // --------------------------------------------------------------
        // 1) Steering
        // --------------------------------------------------------------
        self.state.steer_angle = steering::update_steering(
            self.state.steer_angle,
            input.steer_left,
            input.steer_right,
            cfg.max_steer_angle,
            cfg.steer_speed,
        );

        // --------------------------------------------------------------
        // 2) Speed
        // --------------------------------------------------------------
        self.state.speed =
            longitudinal::update_speed(self.state.speed, input.accelerate, input.decelerate, cfg);

        // --------------------------------------------------------------
        // 3) Motion + collision
        // --------------------------------------------------------------
        let mut collided = false;
        if self.state.speed.abs() > MOTION_EPSILON {
            let speed = self.state.speed;
            let candidate_yaw =
                self.state.yaw + kinematics::yaw_delta(self.state.steer_angle, cfg.wheel_base, speed);
            let candidate = Pose::new(
                kinematics::advance_position(self.state.position, candidate_yaw, speed),
                candidate_yaw,
            );

            if let Some((index, _)) = collision::first_hit(&candidate, &cfg.bounds, obstacles) {
                collided = true;
                self.state.speed = longitudinal::bounce_speed(speed, cfg.bounce_damping);
                debug!(
                    obstacle = index,
                    speed_before = speed,
                    speed_after = self.state.speed,
                    "vehicle bounced"
                );
            } else {
                self.state.position = candidate.position;
                self.state.yaw = candidate.yaw;
            }
        }

        // --------------------------------------------------------------
        // 4) Visual wheels + publish
        // --------------------------------------------------------------
        self.wheels.front_steer = self.state.steer_angle;
        self.wheels.spin += self.state.speed * WHEEL_SPIN_PER_SPEED;

        FrameReport {
            pose: self.state.pose(),
            speed: self.state.speed,
            steer_angle: self.state.steer_angle,
            wheels: self.wheels,
            collided,
        }
    }
}
