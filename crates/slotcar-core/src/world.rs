use crate::{Body, Pose};

/// Read-only world access handed to the controller once per tick.
///
/// The controller never owns or caches world data: everything here is read fresh on every
/// call to `Slotcar::tick`.
pub trait WorldView {
    /// Current simulation time in seconds.
    fn sim_time(&self) -> f64;

    /// Current pose of the controlled vehicle.
    fn vehicle_pose(&self) -> Pose;

    /// Every body present in the world, including the vehicle itself.
    fn bodies(&self) -> &[Body];
}

/// Plain-data world view, useful for hosts that copy simulator state once per step and for
/// tests.
#[derive(Debug, Clone, Default)]
pub struct WorldSnapshot {
    pub time: f64,
    pub vehicle_pose: Pose,
    pub bodies: Vec<Body>,
}

impl WorldSnapshot {
    pub fn new(time: f64, vehicle_pose: Pose) -> Self {
        Self {
            time,
            vehicle_pose,
            bodies: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.bodies.push(body);
        self
    }

    pub fn body_mut(&mut self, name: &str) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.name == name)
    }
}

impl WorldView for WorldSnapshot {
    fn sim_time(&self) -> f64 {
        self.time
    }

    fn vehicle_pose(&self) -> Pose {
        self.vehicle_pose
    }

    fn bodies(&self) -> &[Body] {
        &self.bodies
    }
}
