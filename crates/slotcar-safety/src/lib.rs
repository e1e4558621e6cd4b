//! Collision-risk primitives: exemption of infrastructure, a stop-zone proximity test, and
//! an emergency-stop latch that vetoes translation.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod arbiter;
pub mod infrastructure;
pub mod monitor;

pub use arbiter::{StopArbiter, StopState, StopTransition};
pub use infrastructure::{
    classify, is_infrastructure_name, InfrastructureSet, INFRASTRUCTURE_MARKERS,
};
pub use monitor::{is_blocked, StopZone};
