// ---------------------------------------------
// OBSTACLE COURSE SCATTER
// ---------------------------------------------
// Seeded random boxes around the spawn point, added on top of any obstacles
// listed in the config. A clear disc around the spawn keeps the vehicle from
// starting inside a box.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::drive::Vec3;
use crate::obstacle::ObstacleData;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseConfig {
    pub seed: u64,
    pub count: usize,
    pub radius: f32,           // boxes land within this distance of spawn (XZ)
    pub keep_clear: f32,       // and never closer than this (to the box edge)
    pub min_size: f32,
    pub max_size: f32,
    pub stoppable_ratio: f64,  // chance a box blocks the vehicle
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            count: 24,
            radius: 60.0,
            keep_clear: 6.0,
            min_size: 1.0,
            max_size: 4.0,
            stoppable_ratio: 0.75,
        }
    }
}

// ---------------------------------------------------------
// Generate a course from a config (deterministic per seed)
// ---------------------------------------------------------
pub fn scatter(config: &CourseConfig, spawn: Vec3) -> Vec<ObstacleData> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    scatter_with(&mut rng, config, spawn)
}

pub fn scatter_with<R: Rng>(rng: &mut R, config: &CourseConfig, spawn: Vec3) -> Vec<ObstacleData> {
    let mut out = Vec::new();
    let max_size = config.max_size.max(config.min_size);

    // bounded retries so a tiny radius can't spin forever
    let mut attempts = 0;
    while out.len() < config.count && attempts < config.count.saturating_mul(32) {
        attempts += 1;

        let w = rng.gen_range(config.min_size..=max_size);
        let h = rng.gen_range(config.min_size..=max_size);
        let d = rng.gen_range(config.min_size..=max_size);

        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let dist = rng.gen_range(0.0..=config.radius);
        let x = spawn[0] + angle.sin() * dist;
        let z = spawn[2] + angle.cos() * dist;

        // nearest point of the box footprint must stay outside the clear disc
        let reach = 0.5 * (w * w + d * d).sqrt();
        if dist - reach < config.keep_clear {
            continue;
        }

        out.push(ObstacleData {
            position: [x, h * 0.5, z], // resting on the ground plane
            size: [w, h, d],
            stoppable: rng.gen_bool(config.stoppable_ratio.clamp(0.0, 1.0)),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_course() {
        let cfg = CourseConfig::default();
        assert_eq!(scatter(&cfg, [0.0; 3]), scatter(&cfg, [0.0; 3]));

        let other = CourseConfig { seed: 2, ..cfg };
        assert_ne!(scatter(&cfg, [0.0; 3]), scatter(&other, [0.0; 3]));
    }

    #[test]
    fn keeps_spawn_clear_and_stays_in_radius() {
        let cfg = CourseConfig { count: 64, ..Default::default() };
        let spawn = [10.0, 0.0, -5.0];
        let course = scatter(&cfg, spawn);
        assert_eq!(course.len(), 64);

        for o in &course {
            let dx = o.position[0] - spawn[0];
            let dz = o.position[2] - spawn[2];
            let dist = (dx * dx + dz * dz).sqrt();
            assert!(dist <= cfg.radius + 1e-3);
            assert!(dist >= cfg.keep_clear);
            assert!(o.validate().is_ok());
            assert!((o.position[1] - o.size[1] * 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn impossible_layout_gives_up() {
        let cfg = CourseConfig { radius: 1.0, keep_clear: 5.0, ..Default::default() };
        assert!(scatter(&cfg, [0.0; 3]).is_empty());
    }
}
