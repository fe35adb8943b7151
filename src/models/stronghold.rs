use serde::{Deserialize, Serialize};

use super::constants::{STRONGHOLD_ATTACK_COUNTDOWN, STRONGHOLD_HEALTH};
use super::position::{SectorCoord, Vec3};

/// A friendly starbase. Offers repair and refuel, and falls if besieged too long.
///
/// `under_attack` -> countdown -> `destroyed` is one-way; docking can cancel a
/// running countdown but nothing brings a destroyed starbase back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stronghold {
    pub id: u32,
    pub sector: SectorCoord,
    pub position: Vec3,
    pub health: f64,
    pub under_attack: bool,
    /// Seconds left before the starbase falls, while under attack.
    pub countdown: f64,
    pub destroyed: bool,
}

impl Stronghold {
    pub fn new(id: u32, sector: SectorCoord) -> Self {
        Stronghold {
            id,
            sector,
            position: sector.center(),
            health: STRONGHOLD_HEALTH,
            under_attack: false,
            countdown: STRONGHOLD_ATTACK_COUNTDOWN,
            destroyed: false,
        }
    }

    /// Begin a siege. Returns true if this started a new attack.
    pub fn start_attack(&mut self) -> bool {
        if self.destroyed || self.under_attack {
            return false;
        }
        self.under_attack = true;
        self.countdown = STRONGHOLD_ATTACK_COUNTDOWN;
        true
    }

    /// Lift a siege. Returns true if an attack was actually running.
    pub fn cancel_attack(&mut self) -> bool {
        if !self.under_attack {
            return false;
        }
        self.under_attack = false;
        self.countdown = STRONGHOLD_ATTACK_COUNTDOWN;
        true
    }

    /// Mark destroyed. Returns false if it already was.
    pub fn destroy(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.destroyed = true;
        self.under_attack = false;
        self.countdown = 0.0;
        self.health = 0.0;
        true
    }
}
