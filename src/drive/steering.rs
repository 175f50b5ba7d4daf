// ==============================================================================
// steering.rs — STEERING ANGLE (TARGET + FIRST-ORDER SMOOTHING)
// ==============================================================================
// Responsibilities:
// - Convert held steer keys into a target angle
// - Move the current angle toward the target with a low-pass filter
// - Keep the result inside [-max_steer_angle, +max_steer_angle]
// ------------------------------------------------------------------------------
// target_steer_angle(left, right, max):
// - left held  -> +max  (checked first, so left wins when both are held)
// - right held -> -max
// - otherwise  -> 0
//
// smooth_steer(angle, target, rate):
//   angle' = angle + (target - angle) * rate
//
// rate in (0, 1] never overshoots the target; the angle approaches it
// asymptotically. The output also drives the visual front wheels.
// ==============================================================================

#[inline]
pub fn target_steer_angle(steer_left: bool, steer_right: bool, max_angle: f32) -> f32 {
    if steer_left {
        max_angle
    } else if steer_right {
        -max_angle
    } else {
        0.0
    }
}

#[inline]
pub fn smooth_steer(steer_angle: f32, target: f32, steer_speed: f32) -> f32 {
    steer_angle + (target - steer_angle) * steer_speed
}

/// One full steering update for a frame.
pub fn update_steering(
    steer_angle: f32,
    steer_left: bool,
    steer_right: bool,
    max_angle: f32,
    steer_speed: f32,
) -> f32 {
    let target = target_steer_angle(steer_left, steer_right, max_angle);
    smooth_steer(steer_angle, target, steer_speed).clamp(-max_angle, max_angle)
}
