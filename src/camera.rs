//! Chase camera framing derived from the published vehicle pose.
//!
//! The camera does not rotate with the vehicle: it sits at a fixed world
//! offset from the vehicle position and looks at it.

use serde::{Deserialize, Serialize};

use crate::drive::{Pose, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaseCameraConfig {
    pub offset: Vec3, // world-space eye offset from the vehicle
}

impl Default for ChaseCameraConfig {
    fn default() -> Self {
        Self { offset: [0.0, 15.0, 10.0] }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraFrame {
    pub eye: Vec3,
    pub target: Vec3,
}

pub fn frame_camera(config: &ChaseCameraConfig, pose: &Pose) -> CameraFrame {
    let [x, y, z] = pose.position;
    let [ox, oy, oz] = config.offset;
    CameraFrame {
        eye: [x + ox, y + oy, z + oz],
        target: pose.position,
    }
}
