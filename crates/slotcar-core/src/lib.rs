//! Engine-agnostic primitives for the slotcar vehicle controller: geometry, world views,
//! commands, and the collaborator traits the controller drives.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod actuator;
pub mod body;
pub mod command;
pub mod control;
pub mod math;
pub mod tick;
pub mod world;

pub use actuator::{JointProvider, WheelActuator, WheelSide};
pub use body::{Body, BodyId};
pub use command::{Command, ModeRequest, PathRequest, RobotMode, Waypoint};
pub use control::{ControlTarget, DriveMapper, TrajectoryTracker};
pub use math::{wrap_angle, Pose, Vec3};
pub use tick::ElapsedClock;
pub use world::{WorldSnapshot, WorldView};
