use slotcar_core::{Body, BodyId, Pose, Vec3};

use crate::InfrastructureSet;

/// Proximity test geometry: a circle of `radius` centered `distance` ahead of the vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopZone {
    pub distance: f64,
    pub radius: f64,
}

impl StopZone {
    pub fn new(distance: f64, radius: f64) -> Self {
        Self { distance, radius }
    }

    pub fn center(&self, pose: &Pose) -> Vec3 {
        pose.project_ahead(self.distance)
    }

    /// First dynamic, non-exempt body strictly inside the zone.
    ///
    /// Scan order is the snapshot's order; only whether some body is found is meaningful.
    pub fn first_blocker(
        &self,
        pose: &Pose,
        bodies: &[Body],
        infrastructure: &InfrastructureSet,
    ) -> Option<BodyId> {
        let center = self.center(pose);
        bodies
            .iter()
            .filter(|b| !b.is_static)
            .filter(|b| !infrastructure.contains(b.id))
            .find(|b| b.position.distance(center) < self.radius)
            .map(|b| b.id)
    }
}

pub fn is_blocked(
    pose: &Pose,
    stop_distance: f64,
    stop_radius: f64,
    bodies: &[Body],
    infrastructure: &InfrastructureSet,
) -> bool {
    StopZone::new(stop_distance, stop_radius)
        .first_blocker(pose, bodies, infrastructure)
        .is_some()
}
