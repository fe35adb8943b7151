use rand::Rng;
use tracing::{debug, info};

use crate::models::constants::Subsystem;
use crate::models::difficulty::DifficultyConfig;
use crate::models::rng::GameRng;
use crate::models::subsystems::{ShipSubsystems, SubsystemStatus};

/// What one hostile hit did to the ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Shields took the hit; nothing was damaged.
    Absorbed,
    /// The hit landed but no subsystem was affected.
    NoEffect,
    /// One subsystem dropped a step.
    Degraded {
        subsystem: Subsystem,
        status: SubsystemStatus,
    },
}

/// Chance that active shields absorb a hit outright.
pub fn shield_absorb_chance(subsystems: &ShipSubsystems, config: &DifficultyConfig) -> f64 {
    match subsystems.status(Subsystem::Defense) {
        SubsystemStatus::Operational => config.shield_effectiveness,
        SubsystemStatus::Damaged => config.shield_effectiveness * 0.5,
        SubsystemStatus::Destroyed => 0.0,
    }
}

/// Resolve one hostile hit on the player (called once per hit).
///
/// Rolls shield absorption first, then whether any subsystem is hurt, then
/// which one. The pick never lands on a subsystem that is already destroyed:
/// it re-rolls among the ones still standing.
pub fn apply_damage(
    subsystems: &mut ShipSubsystems,
    shields_active: bool,
    config: &DifficultyConfig,
    rng: &mut GameRng,
) -> DamageOutcome {
    if shields_active && !subsystems.is_destroyed(Subsystem::Defense) {
        let absorb = shield_absorb_chance(subsystems, config).clamp(0.0, 1.0);
        if rng.gen_bool(absorb) {
            debug!("hit absorbed by shields");
            return DamageOutcome::Absorbed;
        }
    }

    if !rng.gen_bool(config.system_damage_chance.clamp(0.0, 1.0)) {
        return DamageOutcome::NoEffect;
    }

    let Some(subsystem) = pick_damageable(subsystems, rng) else {
        return DamageOutcome::NoEffect;
    };
    let status = subsystems.degrade(subsystem);
    info!(system = subsystem.name(), status = status.label(), "subsystem damaged");
    DamageOutcome::Degraded { subsystem, status }
}

/// Uniform pick over all six, re-rolled while it hits a destroyed one.
/// Bounded: after a handful of misses the pick is made among the survivors.
fn pick_damageable(subsystems: &ShipSubsystems, rng: &mut GameRng) -> Option<Subsystem> {
    let candidates = subsystems.damageable();
    if candidates.is_empty() {
        return None;
    }
    for _ in 0..Subsystem::ALL.len() {
        let pick = Subsystem::ALL[rng.gen_range(0..Subsystem::ALL.len())];
        if !subsystems.is_destroyed(pick) {
            return Some(pick);
        }
    }
    Some(candidates[rng.gen_range(0..candidates.len())])
}

/// Reset every subsystem to operational (starbase docking).
pub fn repair_all(subsystems: &mut ShipSubsystems) {
    subsystems.repair_all();
    info!("all subsystems repaired");
}
