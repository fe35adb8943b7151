use serde::{Deserialize, Serialize};

pub const GALAXY_SIZE: usize = 16;
/// World units spanned by one sector along x and z.
pub const SECTOR_SCALE: f64 = 100.0;
/// The mission starts here; no hostiles or strongholds are generated in it.
pub const CENTER_SECTOR: (i32, i32) = (8, 8);
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10;
pub const PREFERRED_MAX_ENEMIES_PER_SECTOR: usize = 4;

// Player ship
pub const MAX_ENERGY: f64 = 9999.0;
pub const MAX_VELOCITY_LEVEL: u8 = 9;

// Energy economy (all drains per second)
pub const BASE_ENERGY_DRAIN: f64 = 0.5;
pub const VELOCITY_ENERGY_COST: [f64; 10] = [0.0, 1.0, 1.5, 2.0, 3.0, 4.0, 6.0, 8.0, 12.0, 18.0];
pub const SHIELD_ENERGY_DRAIN: f64 = 2.0;
pub const COMPUTER_ENERGY_DRAIN: f64 = 0.5;
pub const DAMAGED_SYSTEM_DRAIN_MULTIPLIER: f64 = 1.5;
pub const LOW_ENERGY_THRESHOLD: f64 = 2000.0;
pub const CRITICAL_ENERGY_THRESHOLD: f64 = 500.0;
pub const ENERGY_WARNING_PULSE_INTERVAL: f64 = 5.0;
pub const TORPEDO_ENERGY_COST: f64 = 10.0;
pub const HYPERSPACE_BASE_COST: f64 = 100.0;
pub const HYPERSPACE_COST_PER_SECTOR: f64 = 10.0;

// Torpedoes
pub const TORPEDO_SPEED: f64 = 200.0;
pub const TORPEDO_MAX_RANGE: f64 = 500.0;
pub const TORPEDO_COOLDOWN: f64 = 0.5;
pub const TORPEDO_BASE_DAMAGE: f64 = 1.0;
pub const LOCK_THRESHOLD: f64 = 5.0;
pub const OPTIMAL_RANGE_MIN: f64 = 30.0;
pub const OPTIMAL_RANGE_MAX: f64 = 70.0;
/// Lateral spread (fraction of torpedo speed) with no locks at all.
pub const LOCK_DEVIATION: f64 = 0.15;
/// Extra lateral spread (fraction of torpedo speed) from damaged tubes.
pub const MISFIRE_DEVIATION: f64 = 0.25;

// Strongholds
pub const STRONGHOLD_HEALTH: f64 = 100.0;
pub const STRONGHOLD_ATTACK_COUNTDOWN: f64 = 60.0;
pub const STRONGHOLD_THREAT_RADIUS: i32 = 2;
pub const STRONGHOLD_SIEGE_MIN_ENEMIES: usize = 2;
pub const DOCKING_MAX_VELOCITY: u8 = 2;
pub const DOCKING_RADIUS: f64 = 10.0;

// AI
pub const ENEMY_ATTACK_INTERVAL: f64 = 3.0;
pub const ENEMY_BASE_HIT_CHANCE: f64 = 0.5;
pub const DEFAULT_AGGRESSION: f64 = 0.6;
pub const FIGHTER_MIN_AGGRESSION: f64 = 0.8;
pub const PATROL_WAYPOINT_COUNT: usize = 6;
pub const PATROL_RADIUS: f64 = 50.0;
pub const WAYPOINT_REACHED_DISTANCE: f64 = 5.0;
pub const EVADE_RELEASE_DISTANCE: f64 = 150.0;

// Squadrons
pub const MIN_SQUADRON_SIZE: usize = 2;
pub const MAX_SQUADRON_SIZE: usize = 5;
pub const FORMATION_SLOT_TOLERANCE: f64 = 10.0;
pub const SQUADRON_STRONGHOLD_RANGE: i32 = 5;
pub const SQUADRON_PLAYER_RANGE: i32 = 3;

pub const NUM_SUBSYSTEMS: usize = 6;

/// The six independently damageable ship subsystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subsystem {
    Weapons = 0,
    Propulsion = 1,
    Defense = 2,
    TargetingComputer = 3,
    LongRangeSensor = 4,
    Communications = 5,
}

impl Subsystem {
    pub fn name(&self) -> &'static str {
        match self {
            Subsystem::Weapons => "PHOTON TORPEDOES",
            Subsystem::Propulsion => "ENGINES",
            Subsystem::Defense => "SHIELDS",
            Subsystem::TargetingComputer => "COMPUTER",
            Subsystem::LongRangeSensor => "LONG RANGE SCAN",
            Subsystem::Communications => "SUBSPACE RADIO",
        }
    }

    pub const ALL: [Subsystem; NUM_SUBSYSTEMS] = [
        Subsystem::Weapons,
        Subsystem::Propulsion,
        Subsystem::Defense,
        Subsystem::TargetingComputer,
        Subsystem::LongRangeSensor,
        Subsystem::Communications,
    ];
}
