//! Stronghold manager
//!
//! Siege countdowns, starbase loss, distress calls and docking.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::constants::{
    DOCKING_MAX_VELOCITY, DOCKING_RADIUS, STRONGHOLD_SIEGE_MIN_ENEMIES, STRONGHOLD_THREAT_RADIUS,
};
use crate::models::events::{EventQueue, GameEvent};
use crate::models::galaxy::Galaxy;
use crate::models::game_state::{DefeatReason, GameState, MissionOutcome};
use crate::models::position::{SectorCoord, Vec3};
use crate::services::damage;
use crate::services::energy::EnergyEconomy;

/// Outcome of a docking attempt, with a message suitable for the HUD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockingResult {
    pub success: bool,
    pub message: String,
}

impl DockingResult {
    pub(crate) fn refused(message: &str) -> Self {
        DockingResult {
            success: false,
            message: message.to_string(),
        }
    }
}

/// A distress call still travelling through damaged comms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PendingAlert {
    sector: SectorCoord,
    remaining: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrongholdManager {
    pending_alerts: Vec<PendingAlert>,
}

impl StrongholdManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distress calls delayed by damaged communications.
    pub fn pending_alerts(&self) -> usize {
        self.pending_alerts.len()
    }

    /// Advance every siege by `dt`, then re-evaluate which starbases are
    /// besieged. Losing the last starbase ends the mission.
    pub fn update(
        &mut self,
        dt: f64,
        galaxy: &mut Galaxy,
        state: &mut GameState,
        events: &mut EventQueue,
    ) {
        if !state.is_active() {
            return;
        }

        self.run_countdowns(dt, galaxy, state, events);
        if !state.is_active() {
            return;
        }
        self.recompute_sieges(galaxy, state, events);
        self.deliver_alerts(dt, galaxy, events);
    }

    fn run_countdowns(
        &mut self,
        dt: f64,
        galaxy: &mut Galaxy,
        state: &mut GameState,
        events: &mut EventQueue,
    ) {
        let mut fallen = Vec::new();
        for base in galaxy.strongholds_mut().filter(|s| !s.destroyed && s.under_attack) {
            base.countdown -= dt;
            if base.countdown <= 0.0 {
                fallen.push(base.sector);
            }
        }

        for sector in fallen {
            // Sectors come from the grid itself, so this cannot be out of bounds.
            if !matches!(galaxy.destroy_stronghold(sector), Ok(true)) {
                continue;
            }
            let remaining = galaxy.live_stronghold_count();
            warn!(?sector, remaining, "starbase lost");
            events.push(GameEvent::StrongholdDestroyed { sector, remaining });

            if remaining == 0 {
                let outcome = MissionOutcome::Defeat {
                    reason: DefeatReason::StrongholdsLost,
                };
                if state.end(outcome) {
                    info!("mission lost: every starbase destroyed");
                    events.push(GameEvent::MissionEnded { outcome });
                }
                return;
            }
        }
    }

    /// A starbase is besieged while at least two hostiles sit anywhere in the
    /// 5x5 block of sectors around it. A running countdown is left alone.
    fn recompute_sieges(&mut self, galaxy: &mut Galaxy, state: &GameState, events: &mut EventQueue) {
        let sectors: Vec<SectorCoord> = galaxy
            .strongholds()
            .filter(|s| !s.destroyed)
            .map(|s| s.sector)
            .collect();

        for sector in sectors {
            let besieged =
                galaxy.enemies_in_block(sector, STRONGHOLD_THREAT_RADIUS) >= STRONGHOLD_SIEGE_MIN_ENEMIES;
            let Some(base) = galaxy.stronghold_at_mut(sector) else {
                continue;
            };

            if besieged {
                if base.start_attack() {
                    info!(?sector, "starbase under attack");
                    self.raise_alert(sector, state, events);
                }
            } else if base.cancel_attack() {
                info!(?sector, "siege lifted");
                self.pending_alerts.retain(|a| a.sector != sector);
                events.push(GameEvent::StrongholdAttackCancelled { sector });
            }
        }
    }

    fn raise_alert(&mut self, sector: SectorCoord, state: &GameState, events: &mut EventQueue) {
        match state.player.subsystems.comms_alert_delay() {
            Some(delay) if delay <= 0.0 => events.push(GameEvent::StrongholdUnderAttack { sector }),
            Some(delay) => self.pending_alerts.push(PendingAlert {
                sector,
                remaining: delay,
            }),
            None => debug!(?sector, "distress call lost: communications destroyed"),
        }
    }

    fn deliver_alerts(&mut self, dt: f64, galaxy: &Galaxy, events: &mut EventQueue) {
        for alert in self.pending_alerts.iter_mut() {
            alert.remaining -= dt;
        }
        let (due, waiting): (Vec<_>, Vec<_>) =
            self.pending_alerts.drain(..).partition(|a| a.remaining <= 0.0);
        self.pending_alerts = waiting;

        for alert in due {
            let still_besieged = galaxy
                .stronghold_at(alert.sector)
                .is_some_and(|s| s.under_attack && !s.destroyed);
            if still_besieged {
                events.push(GameEvent::StrongholdUnderAttack {
                    sector: alert.sector,
                });
            }
        }
    }

    /// Try to dock with the starbase in `sector`.
    ///
    /// Checks run in a fixed order and the first failure is reported: no
    /// starbase, starbase destroyed, moving too fast, too far away. A
    /// successful dock repairs every subsystem, refuels the ship and lifts
    /// any siege on that starbase.
    #[allow(clippy::too_many_arguments)]
    pub fn attempt_docking(
        &mut self,
        galaxy: &mut Galaxy,
        state: &mut GameState,
        energy: &mut EnergyEconomy,
        position: Vec3,
        velocity: u8,
        sector: SectorCoord,
        events: &mut EventQueue,
    ) -> DockingResult {
        let Some(base) = galaxy.stronghold_at_mut(sector) else {
            return DockingResult::refused("No starbase in this sector");
        };
        if base.destroyed {
            return DockingResult::refused("Starbase has been destroyed");
        }
        if velocity > DOCKING_MAX_VELOCITY {
            return DockingResult::refused("Velocity too high to dock (reduce to 2 or less)");
        }
        if position.distance(base.position) > DOCKING_RADIUS {
            return DockingResult::refused("Too far from starbase (close to within 10 units)");
        }

        if base.cancel_attack() {
            self.pending_alerts.retain(|a| a.sector != sector);
            events.push(GameEvent::StrongholdAttackCancelled { sector });
        }
        damage::repair_all(&mut state.player.subsystems);
        energy.restore_energy(state, None);
        info!(?sector, "docking complete");
        events.push(GameEvent::DockingComplete { sector });

        DockingResult {
            success: true,
            message: "Docking complete: ship repaired and refueled".to_string(),
        }
    }
}
