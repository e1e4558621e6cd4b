use core::fmt;

use crate::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier for a body in the simulated world.
///
/// Identity is owned by the world: the same physical body must report the same id on every
/// tick, since exemption sets are keyed on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyId(pub u64);

impl BodyId {
    pub fn stable_id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// One entry of a world snapshot. Transient: rebuilt by the world every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub name: String,
    pub position: Vec3,
    pub is_static: bool,
}

impl Body {
    pub fn dynamic(id: u64, name: impl Into<String>, position: Vec3) -> Self {
        Self {
            id: BodyId(id),
            name: name.into(),
            position,
            is_static: false,
        }
    }

    pub fn fixed(id: u64, name: impl Into<String>, position: Vec3) -> Self {
        Self {
            id: BodyId(id),
            name: name.into(),
            position,
            is_static: true,
        }
    }
}
