use serde::{Deserialize, Serialize};

use crate::models::enemy::{EnemyType, HostileUnit};
use crate::models::position::Vec3;

/// Squadron flying formation. Slots are laid out relative to the leader,
/// with +z ahead of it and +x to its right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Formation {
    Line,
    Wedge,
    Column,
    Box,
}

impl Formation {
    /// Spacing scale applied to the canonical slot pattern.
    pub fn cohesion(&self) -> f64 {
        match self {
            Formation::Line => 15.0,
            Formation::Wedge => 20.0,
            Formation::Column => 12.0,
            Formation::Box => 18.0,
        }
    }

    fn pattern(&self) -> [(f64, f64, f64); 4] {
        match self {
            Formation::Line => [(-1.0, 0.0, 0.0), (1.0, 0.0, 0.0), (-2.0, 0.0, 0.0), (2.0, 0.0, 0.0)],
            Formation::Wedge => [(-1.0, 0.0, -1.0), (1.0, 0.0, -1.0), (-2.0, 0.0, -2.0), (2.0, 0.0, -2.0)],
            Formation::Column => [(0.0, 0.0, -1.0), (0.0, 0.0, -2.0), (0.0, 0.0, -3.0), (0.0, 0.0, -4.0)],
            Formation::Box => [(1.0, 0.0, 0.0), (0.0, 0.0, -1.0), (1.0, 0.0, -1.0), (0.5, 1.0, -0.5)],
        }
    }

    /// Offset from the leader of the `index`th follower.
    pub fn slot_offset(&self, index: usize) -> Vec3 {
        let (x, y, z) = self.pattern()[index % 4];
        Vec3::new(x, y, z) * self.cohesion()
    }

    /// Formation a freshly formed group flies: fighters alone fly a wedge,
    /// anything with a basestar a box, other mixes a line.
    pub fn for_group(units: &[HostileUnit]) -> Formation {
        if units.iter().any(|u| u.kind == EnemyType::Basestar) {
            Formation::Box
        } else if units.iter().all(|u| u.kind == EnemyType::Fighter) {
            Formation::Wedge
        } else {
            Formation::Line
        }
    }
}
