use core::f64::consts::PI;

use slotcar_core::{wrap_angle, ControlTarget, PathRequest, Pose, TrajectoryTracker, Waypoint};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shortest horizon used when converting remaining distance into a speed.
const MIN_HORIZON_SECONDS: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FollowerParams {
    pub nominal_drive_speed: f64,
    pub nominal_turn_speed: f64,
    /// A waypoint counts as reached within this planar distance (m).
    pub arrival_distance: f64,
    /// Above this heading error (rad) the vehicle turns in place.
    pub turn_in_place_threshold: f64,
    /// Proportional gain from heading error to yaw rate (1/s).
    pub heading_gain: f64,
    pub stop_distance: f64,
    pub stop_radius: f64,
}

impl Default for FollowerParams {
    fn default() -> Self {
        Self {
            nominal_drive_speed: 0.5,
            nominal_turn_speed: PI / 8.0,
            arrival_distance: 0.05,
            turn_in_place_threshold: 0.2,
            heading_gain: 2.0,
            stop_distance: 1.0,
            stop_radius: 1.0,
        }
    }
}

/// Follows the timed waypoints of the last accepted path request.
///
/// Reached waypoints are consumed in order. A vehicle that reaches a waypoint before its
/// scheduled time holds position until then.
#[derive(Debug, Clone)]
pub struct WaypointFollower {
    params: FollowerParams,
    task_id: String,
    path: Vec<Waypoint>,
    next_index: usize,
    path_origin: Option<Pose>,
}

impl WaypointFollower {
    pub fn new(params: FollowerParams) -> Self {
        Self {
            params,
            task_id: String::new(),
            path: Vec::new(),
            next_index: 0,
            path_origin: None,
        }
    }

    pub fn params(&self) -> FollowerParams {
        self.params
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn remaining(&self) -> &[Waypoint] {
        &self.path[self.next_index.min(self.path.len())..]
    }

    pub fn is_finished(&self) -> bool {
        self.next_index >= self.path.len()
    }

    /// Vehicle pose when the current path was accepted.
    pub fn path_origin(&self) -> Option<Pose> {
        self.path_origin
    }

    fn steer_towards(&self, pose: &Pose, waypoint: &Waypoint, time: f64) -> ControlTarget {
        let p = self.params;
        let dx = waypoint.x - pose.position.x;
        let dy = waypoint.y - pose.position.y;
        let distance = dx.hypot(dy);

        let heading_error = wrap_angle(dy.atan2(dx) - pose.yaw);
        let turn_limit = p.nominal_turn_speed.max(0.0);
        let yaw_rate = (p.heading_gain * heading_error).clamp(-turn_limit, turn_limit);

        if heading_error.abs() > p.turn_in_place_threshold {
            return ControlTarget::new(0.0, yaw_rate);
        }

        let horizon = (waypoint.t - time).max(MIN_HORIZON_SECONDS);
        let forward = (distance / horizon).min(p.nominal_drive_speed.max(0.0));
        ControlTarget::new(forward, yaw_rate)
    }
}

impl Default for WaypointFollower {
    fn default() -> Self {
        Self::new(FollowerParams::default())
    }
}

impl TrajectoryTracker for WaypointFollower {
    fn update(&mut self, pose: &Pose, time: f64) -> Option<ControlTarget> {
        while let Some(waypoint) = self.path.get(self.next_index) {
            let dx = waypoint.x - pose.position.x;
            let dy = waypoint.y - pose.position.y;
            if dx.hypot(dy) > self.params.arrival_distance {
                return Some(self.steer_towards(pose, waypoint, time));
            }
            if time < waypoint.t {
                return Some(ControlTarget::default());
            }
            self.next_index += 1;
        }
        None
    }

    fn stop_distance(&self) -> f64 {
        self.params.stop_distance
    }

    fn stop_radius(&self) -> f64 {
        self.params.stop_radius
    }

    fn set_path(&mut self, request: &PathRequest, pose: &Pose) {
        self.task_id = request.task_id.clone();
        self.path = request.path.clone();
        self.next_index = 0;
        self.path_origin = Some(*pose);
    }
}
