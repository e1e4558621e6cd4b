use crate::{PathRequest, Pose};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Desired body velocities for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlTarget {
    /// Forward velocity along the vehicle heading (m/s).
    pub forward_velocity: f64,
    /// Yaw rate, CCW positive (rad/s).
    pub yaw_rate: f64,
}

impl ControlTarget {
    pub const fn new(forward_velocity: f64, yaw_rate: f64) -> Self {
        Self {
            forward_velocity,
            yaw_rate,
        }
    }

    /// Same rotation, no translation.
    pub const fn without_translation(self) -> Self {
        Self {
            forward_velocity: 0.0,
            yaw_rate: self.yaw_rate,
        }
    }
}

/// Source of the per-tick control target.
///
/// Implementations own the trajectory; the controller only asks "what now?" once per tick.
pub trait TrajectoryTracker {
    /// Advance tracking to `time` and return the target for this tick, or `None` once the
    /// trajectory is exhausted.
    fn update(&mut self, pose: &Pose, time: f64) -> Option<ControlTarget>;

    /// Distance ahead of the vehicle at which the stop zone is centered (m).
    fn stop_distance(&self) -> f64;

    /// Radius of the stop zone (m).
    fn stop_radius(&self) -> f64;

    /// Replace the current trajectory. `pose` is the vehicle pose when the request arrived.
    fn set_path(&mut self, request: &PathRequest, pose: &Pose);
}

/// Differential-drive mapping from body velocities to wheel angular velocities.
pub trait DriveMapper {
    /// `measured` is `[left, right]` wheel angular velocity as currently reported by the
    /// actuators. Returns `[left, right]` wheel targets.
    fn compute_wheel_targets(
        &mut self,
        measured: [f64; 2],
        forward_velocity: f64,
        yaw_rate: f64,
        dt: f64,
    ) -> [f64; 2];
}
