use serde::{Deserialize, Serialize};
use std::fmt;

use super::position::Vec3;

/// Stable identity of a hostile unit. Units are looked up by id, never by reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hostile unit tiers: light, medium and heavy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyType {
    Fighter,
    Cruiser,
    Basestar,
}

impl EnemyType {
    pub fn name(&self) -> &'static str {
        match self {
            EnemyType::Fighter => "FIGHTER",
            EnemyType::Cruiser => "CRUISER",
            EnemyType::Basestar => "BASESTAR",
        }
    }

    pub fn base_health(&self) -> f64 {
        match self {
            EnemyType::Fighter => 1.0,
            EnemyType::Cruiser => 2.0,
            EnemyType::Basestar => 3.0,
        }
    }

    /// Sphere radius used for torpedo collision.
    pub fn hitbox_radius(&self) -> f64 {
        match self {
            EnemyType::Fighter => 3.0,
            EnemyType::Cruiser => 5.0,
            EnemyType::Basestar => 8.0,
        }
    }

    /// Cruise speed in world units per second, before difficulty scaling.
    pub fn base_speed(&self) -> f64 {
        match self {
            EnemyType::Fighter => 60.0,
            EnemyType::Cruiser => 40.0,
            EnemyType::Basestar => 20.0,
        }
    }

    pub fn attack_range(&self) -> f64 {
        match self {
            EnemyType::Fighter => 40.0,
            EnemyType::Cruiser => 60.0,
            EnemyType::Basestar => 80.0,
        }
    }

    pub fn kill_score(&self) -> u32 {
        match self {
            EnemyType::Fighter => 100,
            EnemyType::Cruiser => 250,
            EnemyType::Basestar => 500,
        }
    }
}

/// A hostile warship somewhere in the galaxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostileUnit {
    pub id: UnitId,
    pub kind: EnemyType,
    pub position: Vec3,
    pub velocity: Vec3,
    pub health: f64,
}

impl HostileUnit {
    pub fn new(id: UnitId, kind: EnemyType, position: Vec3) -> Self {
        HostileUnit {
            id,
            kind,
            position,
            velocity: Vec3::ZERO,
            health: kind.base_health(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}
