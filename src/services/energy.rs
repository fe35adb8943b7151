//! Ship energy economy
//!
//! Per-tick drain from life support, engines, shields and the targeting
//! computer; one-shot and pulsed low-energy warnings; and the depletion
//! loss. Point charges (torpedoes, hyperspace) live here too.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::constants::{
    Subsystem, BASE_ENERGY_DRAIN, COMPUTER_ENERGY_DRAIN, CRITICAL_ENERGY_THRESHOLD,
    DAMAGED_SYSTEM_DRAIN_MULTIPLIER, ENERGY_WARNING_PULSE_INTERVAL, HYPERSPACE_BASE_COST,
    HYPERSPACE_COST_PER_SECTOR, LOW_ENERGY_THRESHOLD, SHIELD_ENERGY_DRAIN, TORPEDO_ENERGY_COST,
    VELOCITY_ENERGY_COST,
};
use crate::models::events::{EventQueue, GameEvent};
use crate::models::game_state::{DefeatReason, GameState, MissionOutcome};
use crate::models::ship::PlayerShip;
use crate::models::subsystems::SubsystemStatus;

/// Cost of a hyperspace jump across `distance` sectors.
pub fn hyperspace_cost(distance: u32) -> f64 {
    HYPERSPACE_BASE_COST + distance as f64 * HYPERSPACE_COST_PER_SECTOR
}

/// Charge one torpedo. False (and no change) if the ship can't afford it.
pub fn consume_torpedo_energy(player: &mut PlayerShip) -> bool {
    player.try_spend_energy(TORPEDO_ENERGY_COST)
}

/// Charge a hyperspace jump. False (and no change) if the ship can't afford it.
pub fn consume_hyperspace_energy(player: &mut PlayerShip, distance: u32) -> bool {
    player.try_spend_energy(hyperspace_cost(distance))
}

/// Drain rate of a toggled system given the status of the subsystem behind it.
/// `None` means the subsystem is destroyed and the toggle must drop.
fn toggle_drain(base: f64, status: SubsystemStatus) -> Option<f64> {
    match status {
        SubsystemStatus::Operational => Some(base),
        SubsystemStatus::Damaged => Some(base * DAMAGED_SYSTEM_DRAIN_MULTIPLIER),
        SubsystemStatus::Destroyed => None,
    }
}

/// Warning and depletion bookkeeping. The energy value itself lives on the
/// player's ship in the game state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyEconomy {
    low_warning: bool,
    critical_warning: bool,
    depleted: bool,
    /// Seconds since the last warning pulse.
    pulse_timer: f64,
}

impl EnergyEconomy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn low_warning(&self) -> bool {
        self.low_warning
    }

    pub fn critical_warning(&self) -> bool {
        self.critical_warning
    }

    pub fn is_depleted(&self) -> bool {
        self.depleted
    }

    /// Total drain per second for the current ship state. Drops shields or
    /// computer (and reports it) when the backing subsystem is destroyed.
    pub fn drain_rate(player: &mut PlayerShip, events: &mut EventQueue) -> f64 {
        let systems = player.subsystems;
        let level = (player.velocity as usize).min(VELOCITY_ENERGY_COST.len() - 1);
        let mut rate =
            BASE_ENERGY_DRAIN + VELOCITY_ENERGY_COST[level] * systems.propulsion_energy_multiplier();

        if player.shields_active {
            match toggle_drain(SHIELD_ENERGY_DRAIN, systems.status(Subsystem::Defense)) {
                Some(drain) => rate += drain,
                None => {
                    player.shields_active = false;
                    warn!("shields offline: defense destroyed");
                    events.push(GameEvent::ShieldsOffline);
                }
            }
        }

        if player.computer_active {
            match toggle_drain(COMPUTER_ENERGY_DRAIN, systems.status(Subsystem::TargetingComputer)) {
                Some(drain) => rate += drain,
                None => {
                    player.computer_active = false;
                    warn!("targeting computer offline: destroyed");
                    events.push(GameEvent::ComputerOffline);
                }
            }
        }

        rate
    }

    /// Advance the economy by `dt` seconds. No-op once the mission is over.
    pub fn tick(&mut self, dt: f64, state: &mut GameState, events: &mut EventQueue) {
        if !state.is_active() {
            return;
        }

        let rate = Self::drain_rate(&mut state.player, events);
        state.player.energy -= rate * dt;
        state.player.clamp_energy();
        let energy = state.player.energy;

        self.update_warnings(energy, dt, events);

        if energy <= 0.0 && !self.depleted {
            self.depleted = true;
            warn!("ship energy depleted");
            events.push(GameEvent::EnergyDepleted);
            if state.end(MissionOutcome::Defeat { reason: DefeatReason::EnergyDepleted }) {
                info!("mission lost: energy depleted");
                events.push(GameEvent::MissionEnded {
                    outcome: MissionOutcome::Defeat { reason: DefeatReason::EnergyDepleted },
                });
            }
        }
    }

    fn update_warnings(&mut self, energy: f64, dt: f64, events: &mut EventQueue) {
        if energy >= LOW_ENERGY_THRESHOLD {
            self.low_warning = false;
            self.critical_warning = false;
            self.pulse_timer = 0.0;
            return;
        }

        let mut entered = false;
        if !self.low_warning {
            self.low_warning = true;
            entered = true;
            warn!(energy, "energy low");
            events.push(GameEvent::EnergyLow { energy });
        }
        if energy < CRITICAL_ENERGY_THRESHOLD && !self.critical_warning {
            self.critical_warning = true;
            entered = true;
            warn!(energy, "energy critical");
            events.push(GameEvent::EnergyCritical { energy });
        }

        if entered {
            self.pulse_timer = 0.0;
            return;
        }

        self.pulse_timer += dt;
        if self.pulse_timer >= ENERGY_WARNING_PULSE_INTERVAL {
            self.pulse_timer -= ENERGY_WARNING_PULSE_INTERVAL;
            events.push(GameEvent::EnergyWarningPulse {
                energy,
                critical: self.critical_warning,
            });
        }
    }

    /// Add `amount` energy, or refill to max with `None`. Clears all
    /// warnings and the depletion flag.
    pub fn restore_energy(&mut self, state: &mut GameState, amount: Option<f64>) {
        let player = &mut state.player;
        match amount {
            Some(amount) => player.energy += amount,
            None => player.energy = player.max_energy,
        }
        player.clamp_energy();
        self.low_warning = false;
        self.critical_warning = false;
        self.depleted = false;
        self.pulse_timer = 0.0;
    }

    /// Flip shields. Refuses to raise them with the defense subsystem
    /// destroyed. Returns the resulting state.
    pub fn toggle_shields(&self, state: &mut GameState) -> bool {
        let player = &mut state.player;
        if !player.shields_active && player.subsystems.is_destroyed(Subsystem::Defense) {
            return false;
        }
        player.shields_active = !player.shields_active;
        player.shields_active
    }

    /// Flip the targeting computer. Refuses to start it when destroyed.
    /// Returns the resulting state.
    pub fn toggle_computer(&self, state: &mut GameState) -> bool {
        let player = &mut state.player;
        if !player.computer_active && player.subsystems.is_destroyed(Subsystem::TargetingComputer) {
            return false;
        }
        player.computer_active = !player.computer_active;
        player.computer_active
    }
}
