// ==============================================================================
// kinematics.rs — BICYCLE-MODEL YAW + PLANAR HEADING STEP
// ==============================================================================
// yaw_delta(steer, wheel_base, speed):
// - |steer| <= STRAIGHT_STEER_EPSILON -> 0 (straight line, keeps tan() away from 0)
// - otherwise:
//     R = wheel_base / tan(|steer|)
//     ω = speed / R
//     Δyaw = sign(steer) * ω
//
// advance_position(pos, yaw, speed):
//     x += sin(yaw) * speed
//     z += cos(yaw) * speed
// Forward is +Z at yaw 0, so sin/cos are swapped relative to a heading vector
// measured from +X.
// ==============================================================================

use std::f32::consts::{PI, TAU};

use crate::drive::types::{Vec3, STRAIGHT_STEER_EPSILON};

#[inline]
pub fn turning_radius(steer_angle: f32, wheel_base: f32) -> f32 {
    wheel_base / steer_angle.abs().tan()
}

#[inline]
pub fn yaw_delta(steer_angle: f32, wheel_base: f32, speed: f32) -> f32 {
    if steer_angle.abs() <= STRAIGHT_STEER_EPSILON {
        return 0.0;
    }
    let angular_velocity = speed / turning_radius(steer_angle, wheel_base);
    steer_angle.signum() * angular_velocity
}

#[inline]
pub fn advance_position(position: Vec3, yaw: f32, speed: f32) -> Vec3 {
    [
        position[0] + yaw.sin() * speed,
        position[1],
        position[2] + yaw.cos() * speed,
    ]
}

/// Fold any angle into [-π, π].
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped < -PI { wrapped + TAU } else { wrapped }
}
