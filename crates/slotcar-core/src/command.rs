use crate::Pose;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A timed pose on a requested path. `t` is the simulation time (seconds) at which the
/// vehicle is expected to be at this pose.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Waypoint {
    pub t: f64,
    pub x: f64,
    pub y: f64,
    pub yaw: f64,
}

impl Waypoint {
    pub fn new(t: f64, x: f64, y: f64, yaw: f64) -> Self {
        Self { t, x, y, yaw }
    }

    pub fn pose(&self) -> Pose {
        Pose::planar(self.x, self.y, self.yaw)
    }
}

/// New trajectory for a named vehicle.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathRequest {
    #[cfg_attr(feature = "serde", serde(default))]
    pub fleet_name: String,
    pub robot_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub task_id: String,
    pub path: Vec<Waypoint>,
}

/// Operating mode reported by the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RobotMode {
    Idle,
    Charging,
    #[default]
    Moving,
    Paused,
    Waiting,
    Emergency,
    GoingHome,
    Docking,
    AdapterError,
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModeRequest {
    #[cfg_attr(feature = "serde", serde(default))]
    pub fleet_name: String,
    pub robot_name: String,
    pub mode: RobotMode,
}

/// Everything a host may send to a running controller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Command {
    Path(PathRequest),
    Mode(ModeRequest),
}

impl Command {
    pub fn robot_name(&self) -> &str {
        match self {
            Command::Path(req) => &req.robot_name,
            Command::Mode(req) => &req.robot_name,
        }
    }
}
