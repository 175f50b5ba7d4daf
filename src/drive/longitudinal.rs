// ==============================================================================
// longitudinal.rs — SPEED INTEGRATION (ACCEL + FRICTION + CLAMP + DEADZONE)
// ==============================================================================
// Per frame:
// 1) target acceleration: +accel (forward, checked first), -accel (backward), 0
// 2) speed = (speed + accel) * friction
//    Friction is applied after the acceleration is added, every frame, so a
//    coasting vehicle decays toward rest and the added acceleration is itself
//    scaled by friction.
// 3) clamp to [-max_speed, max_speed]
// 4) |speed| < SPEED_DEADZONE -> exactly 0
//
// Speed is displacement per frame along the facing direction.
// ===============================================================================

use crate::drive::types::{VehiclePhysicsConfig, SPEED_DEADZONE};

#[inline]
pub fn target_acceleration(accelerate: bool, decelerate: bool, accel: f32) -> f32 {
    if accelerate {
        accel
    } else if decelerate {
        -accel
    } else {
        0.0
    }
}

pub fn update_speed(
    speed: f32,
    accelerate: bool,
    decelerate: bool,
    config: &VehiclePhysicsConfig,
) -> f32 {
    let accel = target_acceleration(accelerate, decelerate, config.acceleration);

    let mut next = (speed + accel) * config.friction;
    next = next.clamp(-config.max_speed, config.max_speed);

    if next.abs() < SPEED_DEADZONE {
        next = 0.0;
    }
    next
}

/// Speed after hitting something: reversed and damped.
#[inline]
pub fn bounce_speed(speed: f32, bounce_damping: f32) -> f32 {
    -speed * bounce_damping
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> VehiclePhysicsConfig {
        VehiclePhysicsConfig::default()
    }

    #[test]
    fn first_frame_from_rest() {
        let s = update_speed(0.0, true, false, &cfg());
        assert!((s - 0.00768).abs() < 1e-7);
    }

    #[test]
    fn forward_wins_over_backward() {
        let s = update_speed(0.0, true, true, &cfg());
        assert!(s > 0.0);
    }

    #[test]
    fn coasting_decays_by_friction() {
        let s = update_speed(0.1, false, false, &cfg());
        assert!((s - 0.096).abs() < 1e-7);
    }

    #[test]
    fn builds_up_monotonically_below_max() {
        let c = cfg();
        let mut s = 0.0;
        for _ in 0..50 {
            let next = update_speed(s, true, false, &c);
            assert!(next >= s);
            assert!(next <= c.max_speed);
            s = next;
        }
        assert!(s > 0.1);
    }

    #[test]
    fn clamps_to_max_speed() {
        let c = VehiclePhysicsConfig { acceleration: 0.5, ..cfg() };
        assert_eq!(update_speed(0.0, true, false, &c), c.max_speed);
        assert_eq!(update_speed(0.0, false, true, &c), -c.max_speed);
    }

    #[test]
    fn deadzone_snaps_to_exact_zero() {
        assert_eq!(update_speed(0.001, false, false, &cfg()), 0.0);
        assert_eq!(update_speed(-0.0005, false, false, &cfg()), 0.0);
    }

    #[test]
    fn bounce_reverses_and_damps() {
        assert!((bounce_speed(0.2, 0.5) + 0.1).abs() < 1e-7);
        assert!((bounce_speed(-0.2, 0.5) - 0.1).abs() < 1e-7);
    }
}
