use serde::{Deserialize, Serialize};

use super::constants::{MAX_ENERGY, MAX_VELOCITY_LEVEL};
use super::position::{SectorCoord, Vec3};
use super::subsystems::ShipSubsystems;

/// The player's starfighter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerShip {
    pub position: Vec3,
    /// Discrete throttle setting, 0-9.
    pub velocity: u8,
    pub energy: f64,
    pub max_energy: f64,
    pub kills: u32,
    pub sector: SectorCoord,
    pub subsystems: ShipSubsystems,
    pub shields_active: bool,
    pub computer_active: bool,
}

impl PlayerShip {
    pub fn new(sector: SectorCoord) -> Self {
        PlayerShip {
            position: sector.center(),
            velocity: 0,
            energy: MAX_ENERGY,
            max_energy: MAX_ENERGY,
            kills: 0,
            sector,
            subsystems: ShipSubsystems::new(),
            shields_active: false,
            computer_active: false,
        }
    }

    /// Force energy back into [0, max].
    pub fn clamp_energy(&mut self) {
        self.energy = self.energy.clamp(0.0, self.max_energy);
    }

    /// Deduct `amount` if the ship can afford it. Leaves energy untouched otherwise.
    pub fn try_spend_energy(&mut self, amount: f64) -> bool {
        if amount < 0.0 || self.energy < amount {
            return false;
        }
        self.energy -= amount;
        self.clamp_energy();
        true
    }

    /// Set the throttle, capped by what the engines can currently deliver.
    /// Returns the level actually applied.
    pub fn set_velocity(&mut self, level: u8) -> u8 {
        let cap = self.subsystems.max_speed_level().min(MAX_VELOCITY_LEVEL);
        self.velocity = level.min(cap);
        self.velocity
    }

    /// Full repair and refuel, as granted by a starbase.
    pub fn dock(&mut self) {
        self.subsystems.repair_all();
        self.energy = self.max_energy;
    }
}
