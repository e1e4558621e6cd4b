use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WheelSide {
    Left,
    Right,
}

impl WheelSide {
    pub const BOTH: [WheelSide; 2] = [WheelSide::Left, WheelSide::Right];

    /// Position of this wheel in `[left, right]` arrays.
    pub fn index(self) -> usize {
        match self {
            WheelSide::Left => 0,
            WheelSide::Right => 1,
        }
    }
}

impl fmt::Display for WheelSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WheelSide::Left => f.write_str("left"),
            WheelSide::Right => f.write_str("right"),
        }
    }
}

/// A velocity-controlled wheel joint.
pub trait WheelActuator {
    fn set_target_velocity(&mut self, velocity: f64);

    fn set_max_force(&mut self, force: f64);

    /// Angular velocity currently reported by the joint (rad/s).
    fn current_velocity(&self) -> f64;
}

/// Looks up wheel joints by name when a controller is attached to a vehicle model.
pub trait JointProvider {
    type Actuator: WheelActuator;

    fn joint(&mut self, name: &str) -> Option<Self::Actuator>;
}
