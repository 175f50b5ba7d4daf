use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use anyhow::Result;

use crate::camera::{frame_camera, CameraFrame, ChaseCameraConfig};
use crate::config::SimConfig;
use crate::debug::{build_overlay, DebugOverlay};
use crate::input::{InputSnapshot, KeyState};
use crate::obstacle::{Obstacle, ObstacleData};
use crate::vehicle::{FrameReport, Vehicle, WheelVisuals};

pub struct Viewer {
    pub keys: KeyState,
    pub tx: UnboundedSender<String>,
}

#[derive(Serialize)]
pub struct VehicleSnapshot {
    pub position: [f32; 3],
    pub yaw: f32,
    pub heading: f32, // yaw folded into [-π, π]
    pub speed: f32,
    pub steer_angle: f32,
    pub wheels: WheelVisuals,
    pub collided: bool,
}

impl From<&FrameReport> for VehicleSnapshot {
    fn from(r: &FrameReport) -> Self {
        Self {
            position: r.pose.position,
            yaw: r.pose.yaw,
            heading: r.pose.heading(),
            speed: r.speed,
            steer_angle: r.steer_angle,
            wheels: r.wheels,
            collided: r.collided,
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage<'a> {
    Welcome {
        viewer_id: &'a str,
        obstacles: Vec<ObstacleData>,
    },
    Pong,
    Snapshot {
        tick: u64,
        vehicle: VehicleSnapshot,
        camera: CameraFrame,
        floor_center: [f32; 2],
        #[serde(skip_serializing_if = "Option::is_none")]
        debug: Option<&'a DebugOverlay>,
    },
}

impl ServerMessage<'_> {
    pub fn to_json(&self) -> String {
        // plain data, serialization can't fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Everything the frame driver and the viewer connections share.
pub struct SimState {
    pub tick: u64,
    pub vehicle: Vehicle,
    pub obstacles: Vec<Obstacle>,
    pub camera: ChaseCameraConfig,
    pub viewers: HashMap<String, Viewer>,
    debug_enabled: bool,
    debug_overlay: DebugOverlay,
}

impl SimState {
    pub fn new(config: &SimConfig) -> Result<Self> {
        Ok(Self {
            tick: 0,
            vehicle: Vehicle::new(config.vehicle, config.spawn),
            obstacles: config.build_obstacles()?,
            camera: config.camera,
            viewers: HashMap::new(),
            debug_enabled: config.debug_overlay,
            debug_overlay: DebugOverlay::default(),
        })
    }

    pub fn register_viewer(&mut self, id: &str, tx: UnboundedSender<String>) {
        let welcome = ServerMessage::Welcome {
            viewer_id: id,
            obstacles: self.obstacles.iter().map(Obstacle::to_data).collect(),
        };
        let _ = tx.send(welcome.to_json());

        self.viewers.insert(id.to_owned(), Viewer { keys: KeyState::new(), tx });
    }

    pub fn remove_viewer(&mut self, id: &str) {
        self.viewers.remove(id);
    }

    pub fn set_key(&mut self, id: &str, key: &str, pressed: bool) {
        match self.viewers.get_mut(id) {
            Some(viewer) => viewer.keys.set(key, pressed),
            None => warn!(viewer = id, "key event from unknown viewer"),
        }
    }

    pub fn release_all(&mut self, id: &str) {
        if let Some(viewer) = self.viewers.get_mut(id) {
            viewer.keys.release_all();
        }
    }

    /// Controls held by any connected viewer.
    pub fn input_snapshot(&self) -> InputSnapshot {
        self.viewers
            .values()
            .map(|v| v.keys.snapshot())
            .fold(InputSnapshot::default(), InputSnapshot::merge)
    }

    /// Run exactly one frame and return the message to publish.
    pub fn step(&mut self) -> String {
        let input = self.input_snapshot();
        let report = self.vehicle.advance(&input, &self.obstacles);
        self.tick += 1;

        if report.collided {
            debug!(tick = self.tick, "candidate pose rejected");
        }

        if self.debug_enabled {
            build_overlay(
                &mut self.debug_overlay,
                &report.pose,
                &self.vehicle.config().bounds,
                &self.obstacles,
                report.collided,
            );
        }

        let [x, _, z] = report.pose.position;
        ServerMessage::Snapshot {
            tick: self.tick,
            vehicle: VehicleSnapshot::from(&report),
            camera: frame_camera(&self.camera, &report.pose),
            floor_center: [x, z],
            debug: self.debug_enabled.then_some(&self.debug_overlay),
        }
        .to_json()
    }

    /// Send a message to every viewer; closed channels are pruned.
    pub fn broadcast(&mut self, msg: &str) {
        self.viewers.retain(|id, viewer| {
            let open = viewer.tx.send(msg.to_owned()).is_ok();
            if !open {
                debug!(viewer = %id, "dropping closed viewer channel");
            }
            open
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    fn parse(msg: &str) -> serde_json::Value {
        serde_json::from_str(msg).unwrap()
    }

    #[test]
    fn welcome_lists_obstacles() {
        let config = SimConfig::from_json(
            r#"{"obstacles":[{"position":[0,1,5],"size":[2,2,2],"stoppable":true}]}"#,
        )
        .unwrap();
        let mut sim = SimState::new(&config).unwrap();
        let (tx, mut rx) = unbounded_channel();
        sim.register_viewer("v1", tx);

        let welcome = parse(&rx.try_recv().unwrap());
        assert_eq!(welcome["type"], "welcome");
        assert_eq!(welcome["viewer_id"], "v1");
        assert_eq!(welcome["obstacles"][0]["size"][0], 2.0);
        assert_eq!(welcome["obstacles"][0]["stoppable"], true);
    }

    #[test]
    fn viewer_keys_are_merged() {
        let mut sim = SimState::new(&SimConfig::default()).unwrap();
        let (tx1, _rx1) = unbounded_channel();
        let (tx2, _rx2) = unbounded_channel();
        sim.register_viewer("a", tx1);
        sim.register_viewer("b", tx2);

        sim.set_key("a", "ArrowUp", true);
        sim.set_key("b", "A", true);
        let input = sim.input_snapshot();
        assert!(input.accelerate && input.steer_left);

        sim.remove_viewer("b");
        assert!(!sim.input_snapshot().steer_left);

        sim.release_all("a");
        assert_eq!(sim.input_snapshot(), InputSnapshot::default());
    }

    #[test]
    fn step_publishes_one_frame() {
        let mut sim = SimState::new(&SimConfig::default()).unwrap();
        let (tx, _rx) = unbounded_channel();
        sim.register_viewer("a", tx);
        sim.set_key("a", "w", true);

        let snap = parse(&sim.step());
        assert_eq!(snap["type"], "snapshot");
        assert_eq!(snap["tick"], 1);
        let z = snap["vehicle"]["position"][2].as_f64().unwrap();
        assert!((z - 0.00768).abs() < 1e-6);
        assert_eq!(snap["camera"]["eye"][1], 15.0);
        assert!(snap.get("debug").is_none());
    }

    #[test]
    fn debug_overlay_when_enabled() {
        let config = SimConfig { debug_overlay: true, ..Default::default() };
        let mut sim = SimState::new(&config).unwrap();
        let (tx, _rx) = unbounded_channel();
        sim.register_viewer("a", tx);
        sim.set_key("a", "w", true);

        let snap = parse(&sim.step());
        let z = snap["vehicle"]["position"][2].as_f64().unwrap();
        let max_z = snap["debug"]["vehicle"]["max"][2].as_f64().unwrap();
        // drawn at the pose the frame committed, half length 2.0 ahead of it
        assert!((max_z - (z + 2.0)).abs() < 1e-5);
    }

    #[test]
    fn broadcast_prunes_closed_viewers() {
        let mut sim = SimState::new(&SimConfig::default()).unwrap();
        let (tx, rx) = unbounded_channel();
        sim.register_viewer("gone", tx);
        drop(rx);
        sim.broadcast("{}");
        assert!(sim.viewers.is_empty());
    }
}
