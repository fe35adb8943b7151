//! Combat system
//!
//! Torpedo launch, flight and impact against hostiles, plus routing of
//! hostile hits on the player into the subsystem damage model.

mod targeting;
mod torpedoes;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::constants::{Subsystem, TORPEDO_BASE_DAMAGE, TORPEDO_COOLDOWN};
use crate::models::enemy::{EnemyType, UnitId};
use crate::models::galaxy::Galaxy;
use crate::models::game_state::GameState;
use crate::models::position::{SectorCoord, Vec3};
use crate::models::rng::GameRng;
use crate::services::damage::{self, DamageOutcome};
use crate::services::energy;

pub use targeting::{calculate_lock_status, nearest_target, LockStatus};
pub use torpedoes::{Direction, Projectile};

/// Outcome of one torpedo during an update pass.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    /// Struck a unit that survived.
    Hit {
        projectile: u32,
        unit: UnitId,
        remaining_health: f64,
    },
    /// Struck and destroyed a unit.
    Destroyed {
        projectile: u32,
        unit: UnitId,
        kind: EnemyType,
        sector: SectorCoord,
    },
    /// Ran out of range.
    Expired { projectile: u32 },
}

/// Owns torpedoes in flight and the launcher cooldown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatResolver {
    projectiles: Vec<Projectile>,
    /// Seconds of combat time, advanced by `update`.
    clock: f64,
    last_fire: Option<f64>,
    next_projectile_id: u32,
}

impl CombatResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn active_projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter().filter(|p| p.active)
    }

    /// Drop every torpedo in flight (hyperspace jump).
    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    /// Seconds the launcher must rest between shots at the current weapons status.
    /// `None` while the tubes are destroyed.
    pub fn effective_cooldown(state: &GameState) -> Option<f64> {
        let rate = state.player.subsystems.torpedo_fire_rate_multiplier();
        (rate > 0.0).then(|| TORPEDO_COOLDOWN / rate)
    }

    /// Launch a torpedo. Returns `None` (and changes nothing) when the tubes
    /// are destroyed, the launcher is still cooling down, or the ship can't
    /// pay for the shot.
    pub fn fire_torpedo(
        &mut self,
        state: &mut GameState,
        position: Vec3,
        direction: Direction,
        lock: LockStatus,
        rng: &mut GameRng,
    ) -> Option<Projectile> {
        let cooldown = Self::effective_cooldown(state)?;
        if let Some(last) = self.last_fire {
            if self.clock - last < cooldown {
                return None;
            }
        }
        if !energy::consume_torpedo_energy(&mut state.player) {
            debug!("torpedo refused: insufficient energy");
            return None;
        }

        let weapons_damaged = state.player.subsystems.is_damaged(Subsystem::Weapons);
        let spread = torpedoes::spread(lock, weapons_damaged);
        let projectile = Projectile {
            id: self.next_projectile_id,
            position,
            velocity: torpedoes::launch_velocity(direction, spread, rng),
            direction,
            distance_traveled: 0.0,
            active: true,
        };
        self.next_projectile_id += 1;
        self.last_fire = Some(self.clock);
        self.projectiles.push(projectile.clone());
        debug!(id = projectile.id, ?direction, locks = lock.count(), "torpedo away");
        Some(projectile)
    }

    /// Advance every torpedo by `dt` seconds and resolve impacts.
    ///
    /// Torpedoes deactivated on the previous pass are pruned first. Impacts
    /// are tested along the path flown this step, so neither a large `dt`
    /// nor a sector boundary lets a torpedo slip past a hitbox. A hit
    /// always spends the torpedo; a kill goes through
    /// [`Galaxy::destroy_enemy`] and is credited to the player.
    pub fn update(&mut self, dt: f64, galaxy: &mut Galaxy, state: &mut GameState) -> Vec<CombatEvent> {
        self.clock += dt;
        self.projectiles.retain(|p| p.active);

        let damage = TORPEDO_BASE_DAMAGE * state.player.subsystems.torpedo_damage_multiplier();
        let mut events = Vec::new();

        for projectile in self.projectiles.iter_mut() {
            let from = projectile.position;
            if !projectile.advance(dt) {
                events.push(CombatEvent::Expired { projectile: projectile.id });
                continue;
            }
            let to = projectile.position;

            // Swept test: the whole step, against every unit, nearest first.
            let Some(target) = galaxy
                .units_mut()
                .filter(|u| u.position.distance_to_segment(from, to) <= u.kind.hitbox_radius())
                .min_by(|a, b| a.position.distance(from).total_cmp(&b.position.distance(from)))
            else {
                continue;
            };

            projectile.active = false;
            target.health -= damage;
            let (unit, kind, remaining) = (target.id, target.kind, target.health);
            let sector = SectorCoord::from_world(target.position);

            if remaining > 0.0 {
                debug!(%unit, remaining, "torpedo hit");
                events.push(CombatEvent::Hit {
                    projectile: projectile.id,
                    unit,
                    remaining_health: remaining,
                });
                continue;
            }

            if galaxy.destroy_enemy(unit).is_ok() {
                state.player.kills += 1;
                state.add_score(kind.kill_score());
                info!(%unit, kind = kind.name(), kills = state.player.kills, "hostile destroyed by torpedo");
                events.push(CombatEvent::Destroyed {
                    projectile: projectile.id,
                    unit,
                    kind,
                    sector,
                });
            }
        }

        events
    }

    /// A hostile shot connected with the player.
    pub fn handle_player_damage(&self, state: &mut GameState, rng: &mut GameRng) -> DamageOutcome {
        let shields = state.player.shields_active;
        damage::apply_damage(&mut state.player.subsystems, shields, &state.config, rng)
    }
}
