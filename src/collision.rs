// ==============================================================================
// collision.rs — CANDIDATE POSE vs STATIC OBSTACLES (AABB)
// ==============================================================================
// would_collide(pose, bounds, obstacles):
// 1) Take the 8 corners of the vehicle's local box (VehicleBounds)
// 2) Transform them by the candidate pose (yaw about +Y, then translation)
// 3) Enclose them in a world-space AABB
// 4) Test that AABB against every stoppable obstacle's center ± half extents
//
// The AABB of the rotated box over-approximates the rotated box itself. That
// is intended: near 45° the vehicle is treated as wider than it is.
//
// Overlap is inclusive on all three axes (parry `BoundingVolume::intersects`):
// boxes that only share a face DO collide.
//
// Stateless. Same inputs always give the same answer.
// ==============================================================================

use rapier3d::parry::bounding_volume::{Aabb, BoundingVolume};
use rapier3d::prelude::{Isometry, Point, Real, Vector};

use crate::drive::{Pose, VehicleBounds};
use crate::obstacle::Obstacle;

#[inline]
fn point(v: [f32; 3]) -> Point<Real> {
    Point::new(v[0], v[1], v[2])
}

#[inline]
pub fn pose_isometry(pose: &Pose) -> Isometry<Real> {
    let [x, y, z] = pose.position;
    Isometry::new(Vector::new(x, y, z), Vector::new(0.0, pose.yaw, 0.0))
}

/// The vehicle's eight local corners, before any pose is applied.
pub fn local_corners(bounds: &VehicleBounds) -> [Point<Real>; 8] {
    let [hx, hy, hz] = bounds.half_extents;
    Aabb::from_half_extents(point(bounds.center_offset), Vector::new(hx, hy, hz)).vertices()
}

/// World AABB enclosing the vehicle's corners at `pose`.
pub fn vehicle_aabb(pose: &Pose, bounds: &VehicleBounds) -> Aabb {
    let iso = pose_isometry(pose);
    let corners = local_corners(bounds).map(|c| iso * c);

    let (mins, maxs) = corners[1..]
        .iter()
        .fold((corners[0], corners[0]), |(lo, hi), c| (lo.inf(c), hi.sup(c)));

    Aabb::new(mins, maxs)
}

pub fn obstacle_aabb(obstacle: &Obstacle) -> Aabb {
    let [hx, hy, hz] = obstacle.half_extents;
    Aabb::from_half_extents(point(obstacle.center), Vector::new(hx, hy, hz))
}

/// First stoppable obstacle hit by the vehicle box at `pose`, if any.
pub fn first_hit<'a>(
    pose: &Pose,
    bounds: &VehicleBounds,
    obstacles: &'a [Obstacle],
) -> Option<(usize, &'a Obstacle)> {
    let vehicle = vehicle_aabb(pose, bounds);

    obstacles
        .iter()
        .enumerate()
        .filter(|(_, o)| o.stoppable)
        .find(|(_, o)| vehicle.intersects(&obstacle_aabb(o)))
}

pub fn would_collide(pose: &Pose, bounds: &VehicleBounds, obstacles: &[Obstacle]) -> bool {
    first_hit(pose, bounds, obstacles).is_some()
}
