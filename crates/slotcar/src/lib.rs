//! Slotcar - per-tick motion control for a simulated differential-drive vehicle
//!
//! Every simulation step the controller reads the vehicle pose and the bodies around it,
//! asks a trajectory tracker for a target velocity, vetoes forward motion while a body sits
//! in the stop zone ahead, and turns the result into two wheel velocity commands.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod wheels;

pub use commands::{command_channel, CommandInbox, CommandSender};
pub use config::{JointNames, SlotcarConfig, TrackingConfig};
pub use controller::{
    DriveReport, Lifecycle, ReferenceSlotcar, Slotcar, TickOutcome, TickReport, Vehicle,
};
pub use error::{Result, SlotcarError};
pub use events::{EventSink, NullEventSink, SlotcarEvent, VecEventSink};
pub use wheels::WheelPair;

pub use slotcar_core as core;
pub use slotcar_drive as drive;
pub use slotcar_safety as safety;
