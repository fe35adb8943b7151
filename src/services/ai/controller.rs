use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::TAU;
use tracing::debug;

use crate::models::constants::{
    DEFAULT_AGGRESSION, ENEMY_ATTACK_INTERVAL, ENEMY_BASE_HIT_CHANCE, EVADE_RELEASE_DISTANCE,
    FIGHTER_MIN_AGGRESSION, PATROL_RADIUS, PATROL_WAYPOINT_COUNT, WAYPOINT_REACHED_DISTANCE,
};
use crate::models::difficulty::DifficultyConfig;
use crate::models::enemy::{EnemyType, HostileUnit, UnitId};
use crate::models::galaxy::Galaxy;
use crate::models::position::{SectorCoord, Vec3};
use crate::models::rng::GameRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    Idle,
    Patrol,
    Chase,
    Attack,
    MoveToStronghold,
    AttackStronghold,
    Evade,
}

/// Something a unit did this tick that the rest of the mission must resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    FiredAtPlayer { unit: UnitId, hit: bool },
}

/// Behavior record for one hostile unit. Refers to its unit by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiController {
    pub unit: UnitId,
    pub kind: EnemyType,
    pub state: AiState,
    pub target_position: Option<Vec3>,
    pub target_sector: Option<SectorCoord>,
    /// Seconds until the next shot is allowed.
    pub attack_cooldown: f64,
    pub aggression: f64,
    pub waypoints: Vec<Vec3>,
    pub waypoint_index: usize,
    pub squadron: Option<u32>,
    /// Squadron followers have their velocity set by the squadron.
    pub follows_formation: bool,
}

impl AiController {
    /// Velocity is owned by this controller (not by a squadron).
    pub fn steers_itself(&self) -> bool {
        !(self.squadron.is_some() && self.follows_formation)
    }
}

/// Circular patrol loop in the horizontal plane around `center`.
pub fn patrol_loop(center: Vec3) -> Vec<Vec3> {
    (0..PATROL_WAYPOINT_COUNT)
        .map(|i| {
            let angle = TAU * i as f64 / PATROL_WAYPOINT_COUNT as f64;
            center + Vec3::new(angle.cos() * PATROL_RADIUS, 0.0, angle.sin() * PATROL_RADIUS)
        })
        .collect()
}

/// Owns every AI controller, keyed by unit id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiDirector {
    controllers: BTreeMap<UnitId, AiController>,
    config: DifficultyConfig,
}

impl AiDirector {
    pub fn new(config: DifficultyConfig) -> Self {
        AiDirector {
            controllers: BTreeMap::new(),
            config,
        }
    }

    pub fn controller(&self, id: UnitId) -> Option<&AiController> {
        self.controllers.get(&id)
    }

    pub fn controller_mut(&mut self, id: UnitId) -> Option<&mut AiController> {
        self.controllers.get_mut(&id)
    }

    pub fn controllers(&self) -> impl Iterator<Item = &AiController> {
        self.controllers.values()
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    fn attack_interval(&self) -> f64 {
        ENEMY_ATTACK_INTERVAL / self.config.attack_rate_multiplier.max(f64::EPSILON)
    }

    fn hit_chance(&self) -> f64 {
        (ENEMY_BASE_HIT_CHANCE * self.config.accuracy_multiplier).clamp(0.0, 1.0)
    }

    pub fn speed_of(&self, kind: EnemyType) -> f64 {
        kind.base_speed() * self.config.speed_multiplier
    }

    /// Start controlling `unit`. `aggression` overrides the difficulty
    /// default; fighters never go below their floor either way.
    pub fn register_enemy(&mut self, unit: &HostileUnit, galaxy: &Galaxy, aggression: Option<f64>) {
        let base = aggression.unwrap_or(DEFAULT_AGGRESSION * self.config.aggression_multiplier);
        let mut aggression = base.clamp(0.0, 1.0);
        if unit.kind == EnemyType::Fighter {
            aggression = aggression.max(FIGHTER_MIN_AGGRESSION);
        }

        let mut controller = AiController {
            unit: unit.id,
            kind: unit.kind,
            state: AiState::Idle,
            target_position: None,
            target_sector: None,
            attack_cooldown: self.attack_interval(),
            aggression,
            waypoints: patrol_loop(unit.position),
            waypoint_index: 0,
            squadron: None,
            follows_formation: false,
        };
        reset_to_default(&mut controller, unit.position, galaxy);
        debug!(unit = %unit.id, kind = unit.kind.name(), state = ?controller.state, "AI registered");
        self.controllers.insert(unit.id, controller);
    }

    /// Register every unit currently in the galaxy.
    pub fn register_all(&mut self, galaxy: &Galaxy) {
        let units: Vec<HostileUnit> = galaxy.units().cloned().collect();
        for unit in &units {
            self.register_enemy(unit, galaxy, None);
        }
    }

    pub fn unregister_enemy(&mut self, id: UnitId) -> Option<AiController> {
        self.controllers.remove(&id)
    }

    /// A unit survived a hit. Heavier hulls break off to evade.
    pub fn notify_damaged(&mut self, id: UnitId) {
        if let Some(c) = self.controllers.get_mut(&id) {
            if c.kind != EnemyType::Fighter && c.state != AiState::Evade {
                debug!(unit = %id, "AI evading after hit");
                c.state = AiState::Evade;
                c.target_sector = None;
            }
        }
    }

    /// Mark a unit as leading or following in a squadron, or release it.
    pub fn assign_squadron(&mut self, id: UnitId, squadron: Option<u32>, leader: bool) {
        if let Some(c) = self.controllers.get_mut(&id) {
            c.squadron = squadron;
            c.follows_formation = squadron.is_some() && !leader;
        }
    }

    pub fn set_state(&mut self, id: UnitId, state: AiState) {
        if let Some(c) = self.controllers.get_mut(&id) {
            c.state = state;
        }
    }

    /// Send a unit at the starbase in `sector`, unless it is already busy
    /// with a starbase.
    pub fn order_stronghold_attack(&mut self, id: UnitId, sector: SectorCoord, galaxy: &Galaxy) {
        let Some(c) = self.controllers.get_mut(&id) else {
            return;
        };
        if matches!(c.state, AiState::MoveToStronghold | AiState::AttackStronghold) {
            return;
        }
        if let Some(base) = galaxy.stronghold_at(sector).filter(|s| !s.destroyed) {
            c.state = AiState::MoveToStronghold;
            c.target_sector = Some(sector);
            c.target_position = Some(base.position);
        }
    }

    /// Send a unit after the player unless it is already engaged or evading.
    pub fn order_player_attack(&mut self, id: UnitId) {
        if let Some(c) = self.controllers.get_mut(&id) {
            if matches!(c.state, AiState::Idle | AiState::Patrol | AiState::MoveToStronghold) {
                c.state = AiState::Chase;
                c.target_sector = None;
            }
        }
    }

    /// Put idle or chasing units on their patrol loop. Units already
    /// attacking, evading or tied to a starbase keep their state.
    pub fn order_patrol(&mut self, id: UnitId) {
        if let Some(c) = self.controllers.get_mut(&id) {
            if matches!(c.state, AiState::Idle | AiState::Chase) && !c.waypoints.is_empty() {
                c.state = AiState::Patrol;
                c.target_position = None;
                c.target_sector = None;
            }
        }
    }

    /// Run one AI step for every unit, then move the units and re-home any
    /// that crossed a sector boundary.
    ///
    /// Controllers whose unit has left the galaxy are dropped first.
    pub fn update(
        &mut self,
        dt: f64,
        galaxy: &mut Galaxy,
        player_position: Vec3,
        player_sector: SectorCoord,
        rng: &mut GameRng,
    ) -> Vec<AiAction> {
        self.controllers.retain(|id, _| galaxy.unit(*id).is_some());

        let interval = self.attack_interval();
        let hit_chance = self.hit_chance();
        let speed_multiplier = self.config.speed_multiplier;
        let mut actions = Vec::new();

        for controller in self.controllers.values_mut() {
            let Some(unit) = galaxy.unit(controller.unit) else {
                continue;
            };
            let position = unit.position;
            let range = controller.kind.attack_range();
            let distance = position.distance(player_position);

            controller.attack_cooldown = (controller.attack_cooldown - dt).max(0.0);
            let before = controller.state;
            transition(controller, position, distance, galaxy);
            if controller.state != before {
                debug!(unit = %controller.unit, from = ?before, to = ?controller.state, "AI state change");
            }

            if controller.state == AiState::Attack && distance <= range && controller.attack_cooldown <= 0.0 {
                controller.attack_cooldown = interval;
                let hit = rng.gen_bool(hit_chance);
                debug!(unit = %controller.unit, hit, ?player_sector, "hostile fired on player");
                actions.push(AiAction::FiredAtPlayer {
                    unit: controller.unit,
                    hit,
                });
            }

            if !controller.steers_itself() {
                continue;
            }
            let target = steering_target(controller, position, player_position);
            controller.target_position = target;
            let velocity = match target {
                Some(t) => (t - position).normalized() * (controller.kind.base_speed() * speed_multiplier),
                None => Vec3::ZERO,
            };
            if let Some(unit) = galaxy.unit_mut(controller.unit) {
                unit.velocity = velocity;
            }
        }

        for controller in self.controllers.values() {
            if let Some(unit) = galaxy.unit_mut(controller.unit) {
                unit.position = unit.position + unit.velocity * dt;
            }
        }
        galaxy.relocate_units();

        actions
    }
}

/// Type-dependent starting behavior, also used whenever a unit loses its target.
fn reset_to_default(c: &mut AiController, position: Vec3, galaxy: &Galaxy) {
    c.target_position = None;
    c.target_sector = None;
    c.state = match c.kind {
        EnemyType::Fighter => AiState::Chase,
        EnemyType::Cruiser => {
            c.waypoint_index = 0;
            AiState::Patrol
        }
        EnemyType::Basestar => match nearest_stronghold(galaxy, SectorCoord::from_world(position)) {
            Some(sector) => {
                c.target_sector = Some(sector);
                c.target_position = galaxy.stronghold_at(sector).map(|s| s.position);
                AiState::MoveToStronghold
            }
            None => AiState::Idle,
        },
    };
}

/// Nearest live starbase by grid distance, preferring ones not already besieged.
fn nearest_stronghold(galaxy: &Galaxy, from: SectorCoord) -> Option<SectorCoord> {
    let nearest = |want_quiet: bool| {
        galaxy
            .strongholds()
            .filter(|s| !s.destroyed && (!want_quiet || !s.under_attack))
            .min_by_key(|s| (s.sector.manhattan(from), s.id))
            .map(|s| s.sector)
    };
    nearest(true).or_else(|| nearest(false))
}

fn transition(c: &mut AiController, position: Vec3, distance: f64, galaxy: &Galaxy) {
    let range = c.kind.attack_range();
    match c.state {
        AiState::Idle | AiState::Patrol => {
            if distance <= 2.0 * range && c.aggression > 0.5 {
                c.state = AiState::Chase;
            }
        }
        AiState::Chase => {
            if distance <= range {
                c.state = AiState::Attack;
            } else if distance > 3.0 * range {
                reset_to_default(c, position, galaxy);
            }
        }
        AiState::Attack => {
            if distance > 1.5 * range {
                c.state = AiState::Chase;
            }
        }
        AiState::MoveToStronghold => match live_target(c, galaxy) {
            Some(base) if position.distance(base) <= range => c.state = AiState::AttackStronghold,
            Some(base) => c.target_position = Some(base),
            None => reset_to_default(c, position, galaxy),
        },
        AiState::AttackStronghold => {
            if live_target(c, galaxy).is_none() {
                reset_to_default(c, position, galaxy);
            }
        }
        AiState::Evade => {
            if distance > EVADE_RELEASE_DISTANCE {
                reset_to_default(c, position, galaxy);
            }
        }
    }
}

fn live_target(c: &AiController, galaxy: &Galaxy) -> Option<Vec3> {
    c.target_sector
        .and_then(|sector| galaxy.stronghold_at(sector))
        .filter(|s| !s.destroyed)
        .map(|s| s.position)
}

/// Where the unit should head this tick. `None` means hold position.
fn steering_target(c: &mut AiController, position: Vec3, player: Vec3) -> Option<Vec3> {
    match c.state {
        AiState::Idle | AiState::Attack | AiState::AttackStronghold => None,
        AiState::Chase => Some(player),
        AiState::MoveToStronghold => c.target_position,
        AiState::Patrol => {
            if c.waypoints.is_empty() {
                return None;
            }
            if position.distance(c.waypoints[c.waypoint_index]) <= WAYPOINT_REACHED_DISTANCE {
                c.waypoint_index = (c.waypoint_index + 1) % c.waypoints.len();
            }
            Some(c.waypoints[c.waypoint_index])
        }
        AiState::Evade => {
            let away = (position - player).normalized();
            let away = if away == Vec3::ZERO { Vec3::new(0.0, 0.0, 1.0) } else { away };
            Some(position + away * EVADE_RELEASE_DISTANCE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::difficulty::Difficulty;
    use rand::SeedableRng;

    fn empty_galaxy() -> Galaxy {
        let mut galaxy = Galaxy::initialize(Difficulty::Warrior, 3);
        galaxy.clear();
        galaxy
    }

    fn spawn(galaxy: &mut Galaxy, kind: EnemyType, at: Vec3) -> HostileUnit {
        let id = galaxy.spawn_enemy(HostileUnit::new(UnitId(0), kind, at));
        galaxy.unit(id).cloned().unwrap()
    }

    fn far_player() -> Vec3 {
        Vec3::new(1550.0, 0.0, 1550.0)
    }

    // ========== Registration ==========

    #[test]
    fn initial_states_follow_unit_type() {
        let mut galaxy = empty_galaxy();
        galaxy.place_stronghold(SectorCoord::new(2, 2)).unwrap();
        let fighter = spawn(&mut galaxy, EnemyType::Fighter, Vec3::new(150.0, 0.0, 150.0));
        let cruiser = spawn(&mut galaxy, EnemyType::Cruiser, Vec3::new(450.0, 0.0, 450.0));
        let basestar = spawn(&mut galaxy, EnemyType::Basestar, Vec3::new(650.0, 0.0, 650.0));

        let mut ai = AiDirector::new(Difficulty::Warrior.config());
        ai.register_all(&galaxy);

        assert_eq!(ai.controller(fighter.id).unwrap().state, AiState::Chase);
        let c = ai.controller(cruiser.id).unwrap();
        assert_eq!(c.state, AiState::Patrol);
        assert_eq!(c.waypoints.len(), PATROL_WAYPOINT_COUNT);
        let b = ai.controller(basestar.id).unwrap();
        assert_eq!(b.state, AiState::MoveToStronghold);
        assert_eq!(b.target_sector, Some(SectorCoord::new(2, 2)));
    }

    #[test]
    fn basestar_prefers_unthreatened_starbase() {
        let mut galaxy = empty_galaxy();
        galaxy.place_stronghold(SectorCoord::new(6, 6)).unwrap();
        galaxy.place_stronghold(SectorCoord::new(1, 1)).unwrap();
        galaxy.stronghold_at_mut(SectorCoord::new(6, 6)).unwrap().start_attack();
        let basestar = spawn(&mut galaxy, EnemyType::Basestar, Vec3::new(750.0, 0.0, 750.0));

        let mut ai = AiDirector::new(Difficulty::Warrior.config());
        ai.register_enemy(&basestar, &galaxy, None);
        assert_eq!(
            ai.controller(basestar.id).unwrap().target_sector,
            Some(SectorCoord::new(1, 1))
        );
    }

    #[test]
    fn aggression_defaults_and_floors() {
        let mut galaxy = empty_galaxy();
        let fighter = spawn(&mut galaxy, EnemyType::Fighter, Vec3::new(150.0, 0.0, 150.0));
        let cruiser = spawn(&mut galaxy, EnemyType::Cruiser, Vec3::new(450.0, 0.0, 450.0));

        let mut ai = AiDirector::new(Difficulty::Novice.config());
        ai.register_enemy(&fighter, &galaxy, Some(0.1));
        ai.register_enemy(&cruiser, &galaxy, None);
        assert_eq!(ai.controller(fighter.id).unwrap().aggression, FIGHTER_MIN_AGGRESSION);
        assert!((ai.controller(cruiser.id).unwrap().aggression - 0.3).abs() < 1e-9);

        ai.register_enemy(&cruiser, &galaxy, Some(4.0));
        assert_eq!(ai.controller(cruiser.id).unwrap().aggression, 1.0);
    }

    // ========== Transitions ==========

    #[test]
    fn patrol_to_chase_to_attack() {
        let mut galaxy = empty_galaxy();
        let player = Vec3::new(450.0, 0.0, 450.0);
        let cruiser = spawn(&mut galaxy, EnemyType::Cruiser, player + Vec3::new(0.0, 0.0, 100.0));
        let mut ai = AiDirector::new(Difficulty::Warrior.config());
        ai.register_enemy(&cruiser, &galaxy, Some(0.9));
        let mut rng = GameRng::seed_from_u64(1);

        ai.update(0.0, &mut galaxy, player, SectorCoord::from_world(player), &mut rng);
        assert_eq!(ai.controller(cruiser.id).unwrap().state, AiState::Chase);

        // Close the gap: 100 -> under 60 at speed 40.
        for _ in 0..3 {
            ai.update(0.5, &mut galaxy, player, SectorCoord::from_world(player), &mut rng);
        }
        ai.update(0.0, &mut galaxy, player, SectorCoord::from_world(player), &mut rng);
        assert_eq!(ai.controller(cruiser.id).unwrap().state, AiState::Attack);
    }

    #[test]
    fn timid_patroller_ignores_player() {
        let mut galaxy = empty_galaxy();
        let player = Vec3::new(450.0, 0.0, 450.0);
        let cruiser = spawn(&mut galaxy, EnemyType::Cruiser, player + Vec3::new(0.0, 0.0, 30.0));
        let mut ai = AiDirector::new(Difficulty::Warrior.config());
        ai.register_enemy(&cruiser, &galaxy, Some(0.5));
        let mut rng = GameRng::seed_from_u64(1);
        ai.update(0.1, &mut galaxy, player, SectorCoord::from_world(player), &mut rng);
        assert_eq!(ai.controller(cruiser.id).unwrap().state, AiState::Patrol);
    }

    #[test]
    fn attack_fires_on_interval_and_breaks_off() {
        let mut galaxy = empty_galaxy();
        let player = Vec3::new(450.0, 0.0, 450.0);
        let fighter = spawn(&mut galaxy, EnemyType::Fighter, player + Vec3::new(0.0, 0.0, 20.0));
        let mut ai = AiDirector::new(Difficulty::Warrior.config());
        ai.register_enemy(&fighter, &galaxy, None);
        let mut rng = GameRng::seed_from_u64(1);
        let sector = SectorCoord::from_world(player);

        let mut shots = 0;
        for _ in 0..65 {
            shots += ai.update(0.1, &mut galaxy, player, sector, &mut rng).len();
        }
        assert_eq!(ai.controller(fighter.id).unwrap().state, AiState::Attack);
        assert_eq!(shots, 2, "one shot every three seconds");
        assert_eq!(galaxy.unit(fighter.id).unwrap().velocity, Vec3::ZERO);

        // Player jumps well away: attack -> chase.
        let far = player + Vec3::new(0.0, 0.0, 200.0);
        ai.update(0.0, &mut galaxy, far, sector, &mut rng);
        assert_eq!(ai.controller(fighter.id).unwrap().state, AiState::Chase);
    }

    #[test]
    fn lost_target_reverts_to_default() {
        let mut galaxy = empty_galaxy();
        let start = Vec3::new(450.0, 0.0, 450.0);
        let cruiser = spawn(&mut galaxy, EnemyType::Cruiser, start);
        let mut ai = AiDirector::new(Difficulty::Warrior.config());
        ai.register_enemy(&cruiser, &galaxy, None);
        ai.set_state(cruiser.id, AiState::Chase);
        let mut rng = GameRng::seed_from_u64(1);
        ai.update(0.0, &mut galaxy, far_player(), SectorCoord::new(15, 15), &mut rng);
        assert_eq!(ai.controller(cruiser.id).unwrap().state, AiState::Patrol);
    }

    #[test]
    fn basestar_arrives_and_besieges() {
        let mut galaxy = empty_galaxy();
        let base = SectorCoord::new(4, 4);
        galaxy.place_stronghold(base).unwrap();
        let basestar = spawn(&mut galaxy, EnemyType::Basestar, base.center() + Vec3::new(100.0, 0.0, 0.0));
        let mut ai = AiDirector::new(Difficulty::Warrior.config());
        ai.register_enemy(&basestar, &galaxy, None);
        let mut rng = GameRng::seed_from_u64(1);

        for _ in 0..10 {
            ai.update(0.5, &mut galaxy, far_player(), SectorCoord::new(15, 15), &mut rng);
        }
        assert_eq!(ai.controller(basestar.id).unwrap().state, AiState::AttackStronghold);
        assert_eq!(galaxy.unit(basestar.id).unwrap().velocity, Vec3::ZERO);

        galaxy.destroy_stronghold(base).unwrap();
        ai.update(0.5, &mut galaxy, far_player(), SectorCoord::new(15, 15), &mut rng);
        assert_eq!(ai.controller(basestar.id).unwrap().state, AiState::Idle);
    }

    #[test]
    fn velocity_scales_with_difficulty() {
        let mut galaxy = empty_galaxy();
        let fighter = spawn(&mut galaxy, EnemyType::Fighter, Vec3::new(150.0, 0.0, 150.0));
        let mut ai = AiDirector::new(Difficulty::Commander.config());
        ai.register_enemy(&fighter, &galaxy, None);
        let mut rng = GameRng::seed_from_u64(1);
        ai.update(0.0, &mut galaxy, far_player(), SectorCoord::new(15, 15), &mut rng);
        let speed = galaxy.unit(fighter.id).unwrap().velocity.length();
        assert!((speed - 60.0 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn damaged_heavy_units_evade_until_clear() {
        let mut galaxy = empty_galaxy();
        let player = Vec3::new(450.0, 0.0, 450.0);
        let cruiser = spawn(&mut galaxy, EnemyType::Cruiser, player + Vec3::new(0.0, 0.0, 50.0));
        let fighter = spawn(&mut galaxy, EnemyType::Fighter, player + Vec3::new(0.0, 0.0, 30.0));
        let mut ai = AiDirector::new(Difficulty::Warrior.config());
        ai.register_all(&galaxy);
        ai.notify_damaged(cruiser.id);
        ai.notify_damaged(fighter.id);
        assert_eq!(ai.controller(cruiser.id).unwrap().state, AiState::Evade);
        assert_ne!(ai.controller(fighter.id).unwrap().state, AiState::Evade);

        let mut rng = GameRng::seed_from_u64(1);
        let sector = SectorCoord::from_world(player);
        for _ in 0..3 {
            ai.update(1.0, &mut galaxy, player, sector, &mut rng);
        }
        assert_eq!(ai.controller(cruiser.id).unwrap().state, AiState::Evade);
        let pos = galaxy.unit(cruiser.id).unwrap().position;
        assert!(pos.distance(player) > EVADE_RELEASE_DISTANCE);
        ai.update(0.0, &mut galaxy, player, sector, &mut rng);
        assert_eq!(ai.controller(cruiser.id).unwrap().state, AiState::Patrol);
    }

    #[test]
    fn destroyed_units_are_dropped() {
        let mut galaxy = empty_galaxy();
        let fighter = spawn(&mut galaxy, EnemyType::Fighter, Vec3::new(150.0, 0.0, 150.0));
        let mut ai = AiDirector::new(Difficulty::Warrior.config());
        ai.register_enemy(&fighter, &galaxy, None);
        galaxy.destroy_enemy(fighter.id).unwrap();
        let mut rng = GameRng::seed_from_u64(1);
        ai.update(0.1, &mut galaxy, far_player(), SectorCoord::new(15, 15), &mut rng);
        assert!(ai.is_empty());
    }

    #[test]
    fn followers_do_not_steer() {
        let mut galaxy = empty_galaxy();
        let fighter = spawn(&mut galaxy, EnemyType::Fighter, Vec3::new(150.0, 0.0, 150.0));
        let mut ai = AiDirector::new(Difficulty::Warrior.config());
        ai.register_enemy(&fighter, &galaxy, None);
        ai.assign_squadron(fighter.id, Some(1), false);
        galaxy.unit_mut(fighter.id).unwrap().velocity = Vec3::new(1.0, 0.0, 0.0);
        let mut rng = GameRng::seed_from_u64(1);
        ai.update(1.0, &mut galaxy, far_player(), SectorCoord::new(15, 15), &mut rng);
        let unit = galaxy.unit(fighter.id).unwrap();
        assert_eq!(unit.velocity, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(unit.position, Vec3::new(151.0, 0.0, 150.0));
    }
}
