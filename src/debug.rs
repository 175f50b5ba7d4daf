// ==============================================================================
// debug.rs — DEBUG OVERLAY PRIMITIVES (SERVER -> VIEWER)
// ------------------------------------------------------------------------------
// Serializable boxes for a viewer to draw on top of the scene:
// - DebugBox: a world-space AABB with a color
// - DebugOverlay: the vehicle's collision AABB at its committed pose, plus the
//   AABB of every stoppable obstacle
//
// Helpers:
// - build_overlay(): fills an overlay from a pose and the obstacle registry
//
// Purely visualization scaffolding; nothing here feeds back into the vehicle.
// ==============================================================================

use rapier3d::parry::bounding_volume::Aabb;
use serde::Serialize;

use crate::collision::{obstacle_aabb, vehicle_aabb};
use crate::drive::{Pose, VehicleBounds};
use crate::obstacle::Obstacle;

const VEHICLE_COLOR: [f32; 3] = [1.0, 1.0, 0.0];
const VEHICLE_HIT_COLOR: [f32; 3] = [1.0, 0.3, 0.0];
const OBSTACLE_COLOR: [f32; 3] = [1.0, 0.0, 0.0];

#[derive(Clone, Debug, Serialize)]
pub struct DebugBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
    pub color: [f32; 3],
}

impl DebugBox {
    fn from_aabb(aabb: &Aabb, color: [f32; 3]) -> Self {
        Self {
            min: aabb.mins.into(),
            max: aabb.maxs.into(),
            color,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct DebugOverlay {
    pub vehicle: Option<DebugBox>,
    pub obstacles: Vec<DebugBox>,
}

impl DebugOverlay {
    pub fn clear(&mut self) {
        self.vehicle = None;
        self.obstacles.clear();
    }
}

pub fn build_overlay(
    overlay: &mut DebugOverlay,
    pose: &Pose,
    bounds: &VehicleBounds,
    obstacles: &[Obstacle],
    collided: bool,
) {
    overlay.clear();

    let color = if collided { VEHICLE_HIT_COLOR } else { VEHICLE_COLOR };
    overlay.vehicle = Some(DebugBox::from_aabb(&vehicle_aabb(pose, bounds), color));

    overlay.obstacles.extend(
        obstacles
            .iter()
            .filter(|o| o.stoppable)
            .map(|o| DebugBox::from_aabb(&obstacle_aabb(o), OBSTACLE_COLOR)),
    );
}
