//! Vehicle configuration loading and validation.

use std::f64::consts::PI;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use slotcar_core::WheelSide;
use slotcar_drive::{DriveParams, FollowerParams};

use crate::SlotcarError;

/// Vehicle configuration, usually loaded from a YAML file next to the vehicle model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotcarConfig {
    /// Cruise speed along the path (m/s)
    #[serde(default = "default_nominal_drive_speed")]
    pub nominal_drive_speed: f64,

    /// Forward acceleration limit (m/s^2)
    #[serde(default = "default_max_drive_acceleration")]
    pub max_drive_acceleration: f64,

    /// Turning speed (rad/s)
    #[serde(default = "default_nominal_turn_speed")]
    pub nominal_turn_speed: f64,

    /// Yaw acceleration limit (rad/s^2)
    #[serde(default = "default_max_turn_acceleration")]
    pub max_turn_acceleration: f64,

    #[serde(default = "default_tire_radius")]
    pub tire_radius: f64,

    #[serde(default = "default_base_width")]
    pub base_width: f64,

    /// Distance ahead of the vehicle at which the stop zone is centered (m)
    #[serde(default = "default_stop_distance")]
    pub stop_distance: f64,

    /// Radius of the stop zone (m)
    #[serde(default = "default_stop_radius")]
    pub stop_radius: f64,

    /// Path tracking tuning
    #[serde(default)]
    pub tracking: TrackingConfig,

    /// Force ceiling applied to both wheel joints every time they are driven
    #[serde(default = "default_max_wheel_force")]
    pub max_wheel_force: f64,

    /// Wheel joint names on the vehicle model
    #[serde(default)]
    pub joints: JointNames,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingConfig {
    #[serde(default = "default_arrival_distance")]
    pub arrival_distance: f64,

    #[serde(default = "default_turn_in_place_threshold")]
    pub turn_in_place_threshold: f64,

    #[serde(default = "default_heading_gain")]
    pub heading_gain: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointNames {
    #[serde(default = "default_left_joint")]
    pub left: String,

    #[serde(default = "default_right_joint")]
    pub right: String,
}

impl JointNames {
    pub fn name(&self, side: WheelSide) -> &str {
        match side {
            WheelSide::Left => &self.left,
            WheelSide::Right => &self.right,
        }
    }
}

fn default_nominal_drive_speed() -> f64 {
    0.5
}
fn default_max_drive_acceleration() -> f64 {
    0.75
}
fn default_nominal_turn_speed() -> f64 {
    PI / 8.0
}
fn default_max_turn_acceleration() -> f64 {
    PI
}
fn default_tire_radius() -> f64 {
    0.1
}
fn default_base_width() -> f64 {
    0.52
}
fn default_stop_distance() -> f64 {
    1.0
}
fn default_stop_radius() -> f64 {
    1.0
}
fn default_arrival_distance() -> f64 {
    0.05
}
fn default_turn_in_place_threshold() -> f64 {
    0.2
}
fn default_heading_gain() -> f64 {
    2.0
}
fn default_max_wheel_force() -> f64 {
    10_000_000.0
}
fn default_left_joint() -> String {
    "joint_tire_left".to_string()
}
fn default_right_joint() -> String {
    "joint_tire_right".to_string()
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            arrival_distance: default_arrival_distance(),
            turn_in_place_threshold: default_turn_in_place_threshold(),
            heading_gain: default_heading_gain(),
        }
    }
}

impl Default for JointNames {
    fn default() -> Self {
        Self {
            left: default_left_joint(),
            right: default_right_joint(),
        }
    }
}

impl Default for SlotcarConfig {
    fn default() -> Self {
        Self {
            nominal_drive_speed: default_nominal_drive_speed(),
            max_drive_acceleration: default_max_drive_acceleration(),
            nominal_turn_speed: default_nominal_turn_speed(),
            max_turn_acceleration: default_max_turn_acceleration(),
            tire_radius: default_tire_radius(),
            base_width: default_base_width(),
            stop_distance: default_stop_distance(),
            stop_radius: default_stop_radius(),
            tracking: TrackingConfig::default(),
            max_wheel_force: default_max_wheel_force(),
            joints: JointNames::default(),
        }
    }
}

impl SlotcarConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> crate::Result<()> {
        positive("tire_radius", self.tire_radius)?;
        positive("base_width", self.base_width)?;
        positive("nominal_drive_speed", self.nominal_drive_speed)?;
        positive("nominal_turn_speed", self.nominal_turn_speed)?;
        non_negative("max_drive_acceleration", self.max_drive_acceleration)?;
        non_negative("max_turn_acceleration", self.max_turn_acceleration)?;
        non_negative("stop_distance", self.stop_distance)?;
        non_negative("stop_radius", self.stop_radius)?;
        non_negative("tracking.arrival_distance", self.tracking.arrival_distance)?;
        non_negative("max_wheel_force", self.max_wheel_force)?;
        if self.joints.left.is_empty() || self.joints.right.is_empty() {
            return Err(SlotcarError::InvalidConfig {
                field: "joints",
                reason: "must name both wheel joints".to_string(),
            });
        }
        Ok(())
    }

    pub fn drive_params(&self) -> DriveParams {
        DriveParams {
            tire_radius: self.tire_radius,
            base_width: self.base_width,
            nominal_drive_speed: self.nominal_drive_speed,
            max_drive_acceleration: self.max_drive_acceleration,
            nominal_turn_speed: self.nominal_turn_speed,
            max_turn_acceleration: self.max_turn_acceleration,
        }
    }

    pub fn follower_params(&self) -> FollowerParams {
        FollowerParams {
            nominal_drive_speed: self.nominal_drive_speed,
            nominal_turn_speed: self.nominal_turn_speed,
            arrival_distance: self.tracking.arrival_distance,
            turn_in_place_threshold: self.tracking.turn_in_place_threshold,
            heading_gain: self.tracking.heading_gain,
            stop_distance: self.stop_distance,
            stop_radius: self.stop_radius,
        }
    }
}

fn positive(field: &'static str, value: f64) -> crate::Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SlotcarError::InvalidConfig {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

// Infinity is allowed here: an infinite limit disables it.
fn non_negative(field: &'static str, value: f64) -> crate::Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(SlotcarError::InvalidConfig {
            field,
            reason: format!("must not be negative, got {value}"),
        })
    }
}
