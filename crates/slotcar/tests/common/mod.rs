#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};

use slotcar::{SlotcarConfig, Vehicle};
use slotcar_core::{
    BodyId, ControlTarget, DriveMapper, JointProvider, PathRequest, Pose, TrajectoryTracker,
    WheelActuator,
};

pub const VEHICLE_ID: BodyId = BodyId(1);
pub const VEHICLE_NAME: &str = "tinyRobot1";

pub fn vehicle() -> Vehicle {
    Vehicle::new(VEHICLE_NAME, VEHICLE_ID)
}

/// Replays one scripted target per `update` call; repeats the last entry once the script
/// runs out.
#[derive(Debug, Default)]
pub struct ScriptedTracker {
    pub script: VecDeque<Option<ControlTarget>>,
    pub last: Option<ControlTarget>,
    pub stop_distance: f64,
    pub stop_radius: f64,
    pub updates: Vec<(Pose, f64)>,
    pub paths: Vec<(PathRequest, Pose)>,
}

impl ScriptedTracker {
    pub fn new(script: impl IntoIterator<Item = Option<ControlTarget>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            last: None,
            stop_distance: 1.0,
            stop_radius: 0.5,
            updates: Vec::new(),
            paths: Vec::new(),
        }
    }

    pub fn constant(target: ControlTarget) -> Self {
        Self::new([Some(target)])
    }
}

impl TrajectoryTracker for ScriptedTracker {
    fn update(&mut self, pose: &Pose, time: f64) -> Option<ControlTarget> {
        self.updates.push((*pose, time));
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        self.last
    }

    fn stop_distance(&self) -> f64 {
        self.stop_distance
    }

    fn stop_radius(&self) -> f64 {
        self.stop_radius
    }

    fn set_path(&mut self, request: &PathRequest, pose: &Pose) {
        self.paths.push((request.clone(), *pose));
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveCall {
    pub measured: [f64; 2],
    pub forward_velocity: f64,
    pub yaw_rate: f64,
    pub dt: f64,
}

/// Records every invocation and returns `[v - w, v + w]`.
#[derive(Debug, Default)]
pub struct RecordingDrive {
    pub calls: Vec<DriveCall>,
}

impl DriveMapper for RecordingDrive {
    fn compute_wheel_targets(
        &mut self,
        measured: [f64; 2],
        forward_velocity: f64,
        yaw_rate: f64,
        dt: f64,
    ) -> [f64; 2] {
        self.calls.push(DriveCall {
            measured,
            forward_velocity,
            yaw_rate,
            dt,
        });
        [forward_velocity - yaw_rate, forward_velocity + yaw_rate]
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct FakeWheel {
    pub target: Option<f64>,
    pub max_force: Option<f64>,
    pub commands: usize,
    pub velocity: f64,
}

impl WheelActuator for FakeWheel {
    fn set_target_velocity(&mut self, velocity: f64) {
        self.target = Some(velocity);
        self.commands += 1;
    }

    fn set_max_force(&mut self, force: f64) {
        self.max_force = Some(force);
    }

    fn current_velocity(&self) -> f64 {
        self.velocity
    }
}

#[derive(Debug, Default)]
pub struct FakeJoints {
    pub joints: BTreeMap<String, FakeWheel>,
}

impl FakeJoints {
    pub fn both() -> Self {
        let config = SlotcarConfig::default();
        Self::named(&[config.joints.left.as_str(), config.joints.right.as_str()])
    }

    pub fn named(names: &[&str]) -> Self {
        Self {
            joints: names
                .iter()
                .map(|n| (n.to_string(), FakeWheel::default()))
                .collect(),
        }
    }
}

impl JointProvider for FakeJoints {
    type Actuator = FakeWheel;

    fn joint(&mut self, name: &str) -> Option<FakeWheel> {
        self.joints.remove(name)
    }
}
