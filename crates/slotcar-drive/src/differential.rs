use core::f64::consts::PI;

use slotcar_core::DriveMapper;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriveParams {
    /// Tire radius (m).
    pub tire_radius: f64,
    /// Distance between the two drive wheels (m).
    pub base_width: f64,
    /// Commanded forward velocity is clamped to this magnitude (m/s).
    pub nominal_drive_speed: f64,
    /// Limit on forward velocity change per second (m/s^2).
    pub max_drive_acceleration: f64,
    /// Commanded yaw rate is clamped to this magnitude (rad/s).
    pub nominal_turn_speed: f64,
    /// Limit on yaw rate change per second (rad/s^2).
    pub max_turn_acceleration: f64,
}

impl Default for DriveParams {
    fn default() -> Self {
        Self {
            tire_radius: 0.1,
            base_width: 0.52,
            nominal_drive_speed: 0.5,
            max_drive_acceleration: 0.75,
            nominal_turn_speed: PI / 8.0,
            max_turn_acceleration: PI,
        }
    }
}

/// Differential-drive kinematics with speed clamping and acceleration limiting.
///
/// Acceleration is limited relative to the body velocity implied by the measured wheel
/// speeds, so a wheel that lags its target is not commanded an ever-growing step.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferentialDrive {
    params: DriveParams,
}

impl DifferentialDrive {
    pub fn new(params: DriveParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> DriveParams {
        self.params
    }

    /// Forward kinematics: `[left, right]` wheel angular velocities to `(forward, yaw_rate)`.
    pub fn body_velocities(&self, wheels: [f64; 2]) -> (f64, f64) {
        let r = self.params.tire_radius;
        let forward = r * (wheels[0] + wheels[1]) * 0.5;
        let yaw_rate = r * (wheels[1] - wheels[0]) / self.params.base_width;
        (forward, yaw_rate)
    }

    /// Inverse kinematics: `(forward, yaw_rate)` to `[left, right]` wheel angular velocities.
    pub fn wheel_velocities(&self, forward: f64, yaw_rate: f64) -> [f64; 2] {
        let r = self.params.tire_radius;
        let half_base = self.params.base_width * 0.5;
        [
            (forward - yaw_rate * half_base) / r,
            (forward + yaw_rate * half_base) / r,
        ]
    }
}

impl Default for DifferentialDrive {
    fn default() -> Self {
        Self::new(DriveParams::default())
    }
}

impl DriveMapper for DifferentialDrive {
    fn compute_wheel_targets(
        &mut self,
        measured: [f64; 2],
        forward_velocity: f64,
        yaw_rate: f64,
        dt: f64,
    ) -> [f64; 2] {
        let p = self.params;
        let (v_now, w_now) = self.body_velocities(measured);

        let v_cmd = clamp_abs(forward_velocity, p.nominal_drive_speed);
        let w_cmd = clamp_abs(yaw_rate, p.nominal_turn_speed);

        let v = rate_limit(v_now, v_cmd, p.max_drive_acceleration, dt);
        let w = rate_limit(w_now, w_cmd, p.max_turn_acceleration, dt);

        self.wheel_velocities(v, w)
    }
}

fn clamp_abs(value: f64, limit: f64) -> f64 {
    let limit = limit.max(0.0);
    value.clamp(-limit, limit)
}

fn rate_limit(current: f64, desired: f64, max_rate: f64, dt: f64) -> f64 {
    if !max_rate.is_finite() || max_rate <= 0.0 || dt <= 0.0 {
        return desired;
    }
    let max_step = max_rate * dt;
    current + (desired - current).clamp(-max_step, max_step)
}
