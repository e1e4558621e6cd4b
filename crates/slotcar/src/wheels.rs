use slotcar_core::{JointProvider, WheelActuator, WheelSide};

use crate::config::JointNames;
use crate::SlotcarError;

/// The two drive wheels. A wheel that could not be bound stays `None` and is skipped
/// whenever the pair is driven.
#[derive(Debug)]
pub struct WheelPair<A> {
    wheels: [Option<A>; 2],
}

impl<A: WheelActuator> WheelPair<A> {
    pub fn new(left: Option<A>, right: Option<A>) -> Self {
        Self {
            wheels: [left, right],
        }
    }

    /// Look up both joints by name. Returns one error per missing joint.
    pub fn bind<J>(joints: &mut J, names: &JointNames) -> (Self, Vec<SlotcarError>)
    where
        J: JointProvider<Actuator = A>,
    {
        let mut errors = Vec::new();
        let mut lookup = |side: WheelSide| {
            let name = names.name(side);
            let joint = joints.joint(name);
            if joint.is_none() {
                errors.push(SlotcarError::MissingActuator {
                    side,
                    joint: name.to_string(),
                });
            }
            joint
        };
        let left = lookup(WheelSide::Left);
        let right = lookup(WheelSide::Right);
        (Self::new(left, right), errors)
    }

    pub fn get(&self, side: WheelSide) -> Option<&A> {
        self.wheels[side.index()].as_ref()
    }

    pub fn get_mut(&mut self, side: WheelSide) -> Option<&mut A> {
        self.wheels[side.index()].as_mut()
    }

    pub fn is_complete(&self) -> bool {
        self.wheels.iter().all(Option::is_some)
    }

    /// `[left, right]` joint velocities; a missing wheel reads as stationary.
    pub fn measured_velocities(&self) -> [f64; 2] {
        WheelSide::BOTH.map(|side| self.get(side).map_or(0.0, |w| w.current_velocity()))
    }

    pub fn apply(&mut self, targets: [f64; 2], max_force: f64) {
        for (wheel, target) in self.wheels.iter_mut().zip(targets) {
            if let Some(wheel) = wheel {
                wheel.set_target_velocity(target);
                wheel.set_max_force(max_force);
            }
        }
    }
}
