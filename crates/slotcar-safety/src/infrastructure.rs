use std::collections::BTreeSet;

use slotcar_core::{Body, BodyId};

/// Name fragments that mark a dynamic body as building infrastructure. Matching is a plain,
/// case-sensitive substring test.
pub const INFRASTRUCTURE_MARKERS: [&str; 2] = ["door", "lift"];

/// Bodies that never count as obstacles: the vehicle itself plus doors and lifts present when
/// the set was built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfrastructureSet {
    members: BTreeSet<BodyId>,
}

impl InfrastructureSet {
    pub fn contains(&self, id: BodyId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.members.iter().copied()
    }
}

pub fn is_infrastructure_name(name: &str) -> bool {
    INFRASTRUCTURE_MARKERS
        .iter()
        .any(|marker| name.contains(marker))
}

/// Build the exemption set for `vehicle` from the bodies currently in the world.
///
/// Static bodies are skipped: the obstacle scan already ignores them.
pub fn classify(vehicle: BodyId, bodies: &[Body]) -> InfrastructureSet {
    let mut members = BTreeSet::new();
    members.insert(vehicle);
    for body in bodies {
        if body.is_static {
            continue;
        }
        if is_infrastructure_name(&body.name) {
            members.insert(body.id);
        }
    }
    InfrastructureSet { members }
}
