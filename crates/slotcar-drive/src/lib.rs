//! Reference collaborators for the slotcar controller: a timed-waypoint follower and a
//! differential-drive wheel mapper.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod differential;
pub mod follower;

pub use differential::{DifferentialDrive, DriveParams};
pub use follower::{FollowerParams, WaypointFollower};
