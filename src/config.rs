//! Server configuration, read once at startup from a JSON file.
//!
//! Every field has a default, so an empty object (or no file at all) gives the
//! stock scene: a single vehicle at the origin and no obstacles.

use std::{env, fs, path::Path};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::camera::ChaseCameraConfig;
use crate::course::{self, CourseConfig};
use crate::drive::{Vec3, VehiclePhysicsConfig};
use crate::obstacle::{self, Obstacle, ObstacleData};

/// Above this the frame period rounds toward zero.
pub const MAX_TICK_HZ: f64 = 1000.0;

/// Upper bound on scattered course boxes.
pub const MAX_COURSE_COUNT: usize = 10_000;

/// Env var holding the config file path.
pub const CONFIG_ENV: &str = "DRIVE_SERVER_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub bind_addr: String,
    pub tick_hz: f64,
    pub debug_overlay: bool,
    pub spawn: Vec3,
    pub vehicle: VehiclePhysicsConfig,
    pub camera: ChaseCameraConfig,
    pub obstacles: Vec<ObstacleData>,
    pub course: Option<CourseConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:9001".to_owned(),
            tick_hz: 60.0,
            debug_overlay: false,
            spawn: [0.0, 0.0, 0.0],
            vehicle: VehiclePhysicsConfig::default(),
            camera: ChaseCameraConfig::default(),
            obstacles: Vec::new(),
            course: None,
        }
    }
}

fn finite(vals: &[f32]) -> bool {
    vals.iter().all(|v| v.is_finite())
}

impl SimConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(text).context("invalid config json")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in config {}", path.display()))
    }

    /// Load from `$DRIVE_SERVER_CONFIG` if set, otherwise defaults.
    pub fn from_env() -> Result<Self> {
        match env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = Path::new(&path);
                info!(path = %path.display(), "loading config");
                Self::load(path)
            }
            None => {
                info!("no {CONFIG_ENV} set, using default config");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.tick_hz.is_finite() && self.tick_hz > 0.0 && self.tick_hz <= MAX_TICK_HZ,
            "tick_hz must be in (0, {MAX_TICK_HZ}], got {}",
            self.tick_hz
        );
        ensure!(finite(&self.spawn), "spawn {:?} is not finite", self.spawn);

        let v = &self.vehicle;
        ensure!(
            finite(&[
                v.acceleration,
                v.max_speed,
                v.friction,
                v.max_steer_angle,
                v.steer_speed,
                v.wheel_base,
                v.bounce_damping,
            ]),
            "vehicle config has non-finite values"
        );
        ensure!(v.acceleration >= 0.0, "vehicle.acceleration must not be negative");
        ensure!(v.max_speed > 0.0, "vehicle.max_speed must be positive");
        ensure!(v.max_steer_angle > 0.0, "vehicle.max_steer_angle must be positive");
        ensure!(v.wheel_base > 0.0, "vehicle.wheel_base must be positive");
        ensure!(
            v.friction > 0.0 && v.friction <= 1.0,
            "vehicle.friction must be in (0, 1], got {}",
            v.friction
        );
        ensure!(
            v.steer_speed > 0.0 && v.steer_speed <= 1.0,
            "vehicle.steer_speed must be in (0, 1], got {}",
            v.steer_speed
        );
        ensure!(
            (0.0..=1.0).contains(&v.bounce_damping),
            "vehicle.bounce_damping must be in [0, 1], got {}",
            v.bounce_damping
        );
        ensure!(
            finite(&v.bounds.half_extents)
                && finite(&v.bounds.center_offset)
                && v.bounds.half_extents.iter().all(|h| *h > 0.0),
            "vehicle.bounds must be finite with positive half extents"
        );
        ensure!(finite(&self.camera.offset), "camera.offset is not finite");

        for o in &self.obstacles {
            o.validate()?;
        }
        if let Some(c) = &self.course {
            ensure!(
                c.count <= MAX_COURSE_COUNT,
                "course.count must be at most {MAX_COURSE_COUNT}, got {}",
                c.count
            );
            ensure!(
                c.radius.is_finite() && c.keep_clear.is_finite() && c.radius >= 0.0,
                "course.radius/keep_clear must be finite"
            );
            ensure!(
                c.min_size.is_finite() && c.max_size.is_finite() && c.min_size > 0.0,
                "course sizes must be finite and positive"
            );
        }
        Ok(())
    }

    /// Obstacles from the file followed by the scattered course, in that order.
    pub fn build_obstacles(&self) -> Result<Vec<Obstacle>> {
        let mut data = self.obstacles.clone();
        if let Some(c) = &self.course {
            data.extend(course::scatter(c, self.spawn));
        }
        obstacle::build_registry(&data)
    }
}
