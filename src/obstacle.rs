// ==============================================================================
// obstacle.rs — STATIC OBSTACLE REGISTRY
// ==============================================================================
// ObstacleData is the scene/wire record {position, size, stoppable}.
// Obstacle is the resolved form used by collision (center + half extents).
// Obstacles are created once before the first frame and never mutated.
// Non-stoppable obstacles are decoration only; collision skips them.
// ==============================================================================

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::drive::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleData {
    pub position: Vec3, // box center, world space
    pub size: Vec3,     // full [w, h, d]
    pub stoppable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub stoppable: bool,
}

impl Obstacle {
    pub fn new(center: Vec3, size: Vec3, stoppable: bool) -> Self {
        Self {
            center,
            half_extents: [size[0] * 0.5, size[1] * 0.5, size[2] * 0.5],
            stoppable,
        }
    }

    pub fn size(&self) -> Vec3 {
        [
            self.half_extents[0] * 2.0,
            self.half_extents[1] * 2.0,
            self.half_extents[2] * 2.0,
        ]
    }

    pub fn to_data(&self) -> ObstacleData {
        ObstacleData {
            position: self.center,
            size: self.size(),
            stoppable: self.stoppable,
        }
    }
}

impl From<ObstacleData> for Obstacle {
    fn from(d: ObstacleData) -> Self {
        Obstacle::new(d.position, d.size, d.stoppable)
    }
}

impl ObstacleData {
    /// Scene setup rejects data the collision test cannot reason about.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.position.iter().all(|v| v.is_finite()),
            "obstacle position {:?} is not finite",
            self.position
        );
        ensure!(
            self.size.iter().all(|v| v.is_finite() && *v > 0.0),
            "obstacle size {:?} must be finite and positive",
            self.size
        );
        Ok(())
    }
}

/// Validate and resolve an ordered obstacle list; order is preserved.
pub fn build_registry(data: &[ObstacleData]) -> Result<Vec<Obstacle>> {
    data.iter()
        .enumerate()
        .map(|(i, d)| {
            d.validate()
                .map_err(|e| e.context(format!("obstacle #{i}")))?;
            Ok(Obstacle::from(*d))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_extents_from_size() {
        let o = Obstacle::new([0.0, 1.0, 5.0], [2.0, 2.0, 4.0], true);
        assert_eq!(o.half_extents, [1.0, 1.0, 2.0]);
        assert_eq!(o.size(), [2.0, 2.0, 4.0]);
        assert_eq!(o.to_data().position, [0.0, 1.0, 5.0]);
    }

    #[test]
    fn registry_keeps_order() {
        let data = [
            ObstacleData { position: [0.0, 1.0, 5.0], size: [2.0, 2.0, 2.0], stoppable: true },
            ObstacleData { position: [3.0, 1.0, 0.0], size: [1.0, 2.0, 1.0], stoppable: false },
        ];
        let reg = build_registry(&data).unwrap();
        assert_eq!(reg.len(), 2);
        assert!(reg[0].stoppable);
        assert!(!reg[1].stoppable);
    }

    #[test]
    fn rejects_bad_data() {
        let neg = ObstacleData { position: [0.0; 3], size: [-1.0, 1.0, 1.0], stoppable: true };
        let nan = ObstacleData { position: [f32::NAN, 0.0, 0.0], size: [1.0; 3], stoppable: true };
        assert!(neg.validate().is_err());
        assert!(nan.validate().is_err());

        let err = build_registry(&[nan]).unwrap_err();
        assert!(format!("{err:#}").contains("obstacle #0"));
    }
}
