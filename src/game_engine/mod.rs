//! Mission lifecycle
//!
//! The GameEngine owns one instance of every simulation component for a
//! single mission, drives them in a fixed order each tick, and is the only
//! thing a host talks to. Starting a new mission replaces the whole engine
//! state; nothing from the previous mission survives except undrained events.

use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::difficulty::Difficulty;
use crate::models::errors::{GameError, GameResult};
use crate::models::events::{EventQueue, GameEvent};
use crate::models::galaxy::{Galaxy, GalaxyData, ScanCell};
use crate::models::game_state::{DefeatReason, GameState, MissionOutcome};
use crate::models::position::{SectorCoord, Vec3};
use crate::models::rng::GameRng;
use crate::models::sector::Sector;
use crate::services::ai::{AiAction, AiDirector, SquadronCoordinator};
use crate::services::combat::{
    nearest_target, CombatEvent, CombatResolver, Direction, LockStatus, Projectile,
};
use crate::services::damage::DamageOutcome;
use crate::services::energy::{self, EnergyEconomy};
use crate::services::starbase::{DockingResult, StrongholdManager};

/// Core engine that runs one mission and checks for its end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEngine {
    galaxy: Galaxy,
    state: GameState,
    energy: EnergyEconomy,
    combat: CombatResolver,
    strongholds: StrongholdManager,
    ai: AiDirector,
    squadrons: SquadronCoordinator,
    rng: GameRng,
    #[serde(skip)]
    events: EventQueue,
}

impl GameEngine {
    /// Creates a new mission with a procedurally generated galaxy
    ///
    /// # Arguments
    ///
    /// * `difficulty` - Tier whose table sizes the enemy force and scales every roll
    /// * `seed` - Seed for the single random stream the mission draws from
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        let mut rng = GameRng::seed_from_u64(seed);
        let galaxy = Galaxy::generate(difficulty, seed, &mut rng);
        let state = GameState::new(difficulty, galaxy.player_sector());

        let mut ai = AiDirector::new(*galaxy.config());
        ai.register_all(&galaxy);

        let mut events = EventQueue::new();
        events.push(GameEvent::MissionStarted { seed });
        let mut squadrons = SquadronCoordinator::new();
        squadrons.form_squadrons(&galaxy, &mut events);

        info!(%difficulty, seed, "mission started");
        GameEngine {
            galaxy,
            state,
            energy: EnergyEconomy::new(),
            combat: CombatResolver::new(),
            strongholds: StrongholdManager::new(),
            ai,
            squadrons,
            rng,
            events,
        }
    }

    /// Replace the current mission with a fresh one, seeded from the current
    /// random stream.
    pub fn start_new_game(&mut self, difficulty: Difficulty) {
        let seed = self.rng.next_u64();
        self.start_new_game_with_seed(difficulty, seed);
    }

    pub fn start_new_game_with_seed(&mut self, difficulty: Difficulty, seed: u64) {
        let mut pending = std::mem::take(&mut self.events);
        *self = GameEngine::new(difficulty, seed);
        pending.extend(self.events.drain());
        self.events = pending;
    }

    /// End the mission on the host's say-so. Returns false if it had
    /// already ended.
    pub fn end_game(&mut self, victory: bool) -> bool {
        let outcome = if victory {
            MissionOutcome::Victory {
                score: self.state.score,
            }
        } else {
            MissionOutcome::Defeat {
                reason: DefeatReason::Abandoned,
            }
        };
        self.finish(outcome)
    }

    fn finish(&mut self, outcome: MissionOutcome) -> bool {
        if !self.state.end(outcome) {
            return false;
        }
        info!(?outcome, score = self.state.score, "mission ended");
        self.events.push(GameEvent::MissionEnded { outcome });
        true
    }

    pub fn pause_game(&mut self) {
        self.state.set_paused(true);
    }

    pub fn resume_game(&mut self) {
        self.state.set_paused(false);
    }

    // ========== Accessors ==========

    pub fn galaxy(&self) -> &Galaxy {
        &self.galaxy
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn energy(&self) -> &EnergyEconomy {
        &self.energy
    }

    pub fn combat(&self) -> &CombatResolver {
        &self.combat
    }

    pub fn strongholds(&self) -> &StrongholdManager {
        &self.strongholds
    }

    pub fn ai(&self) -> &AiDirector {
        &self.ai
    }

    pub fn squadrons(&self) -> &SquadronCoordinator {
        &self.squadrons
    }

    pub fn get_sector(&self, coord: SectorCoord) -> Option<&Sector> {
        self.galaxy.get_sector(coord)
    }

    pub fn galaxy_data(&self) -> GalaxyData {
        self.galaxy.galaxy_data()
    }

    /// Take every event raised since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    // ========== Simulation ==========

    /// Advance the mission by `dt` seconds. No-op while paused or ended.
    ///
    /// Order: energy, squadrons, per-unit AI (including hostile fire),
    /// torpedoes, starbases, then the victory check.
    pub fn tick(&mut self, dt: f64) {
        if !self.state.is_running() || dt <= 0.0 {
            return;
        }
        self.state.elapsed += dt;

        self.energy.tick(dt, &mut self.state, &mut self.events);
        if !self.state.is_active() {
            return;
        }

        let player_sector = self.state.player.sector;
        self.squadrons
            .update(&mut self.galaxy, player_sector, &mut self.ai, &mut self.events);

        let actions = self.ai.update(
            dt,
            &mut self.galaxy,
            self.state.player.position,
            player_sector,
            &mut self.rng,
        );
        for action in actions {
            self.resolve_ai_action(action);
        }

        for event in self.combat.update(dt, &mut self.galaxy, &mut self.state) {
            match event {
                CombatEvent::Hit { unit, .. } => self.ai.notify_damaged(unit),
                CombatEvent::Destroyed { unit, kind, sector, .. } => {
                    self.ai.unregister_enemy(unit);
                    self.events.push(GameEvent::EnemyDestroyed { unit, kind, sector });
                }
                CombatEvent::Expired { projectile } => debug!(projectile, "torpedo expired"),
            }
        }

        self.strongholds
            .update(dt, &mut self.galaxy, &mut self.state, &mut self.events);

        if self.state.is_active() && self.galaxy.enemy_count() == 0 {
            let score = self.state.score;
            self.finish(MissionOutcome::Victory { score });
        }
    }

    fn resolve_ai_action(&mut self, action: AiAction) {
        let AiAction::FiredAtPlayer { unit, hit } = action;
        self.events.push(GameEvent::PlayerFiredUpon { unit, hit });
        if !hit {
            return;
        }
        match self.combat.handle_player_damage(&mut self.state, &mut self.rng) {
            DamageOutcome::Absorbed => self.events.push(GameEvent::ShieldsAbsorbedHit),
            DamageOutcome::Degraded { subsystem, status } => {
                self.events.push(GameEvent::SubsystemDamaged { subsystem, status })
            }
            DamageOutcome::NoEffect => {}
        }
    }

    // ========== Player commands ==========

    /// Current lock on the nearest hostile in the player's sector. Needs the
    /// targeting computer switched on; a damaged computer drops locks at
    /// random.
    pub fn current_lock(&mut self) -> LockStatus {
        let player = &self.state.player;
        if !player.computer_active {
            return LockStatus::NONE;
        }
        let accuracy = player.subsystems.targeting_accuracy();
        let units = self.galaxy.enemies_in_sector(player.sector);
        let Some((_, mut lock)) = nearest_target(player.position, units) else {
            return LockStatus::NONE;
        };
        if accuracy < 1.0 {
            lock.horizontal &= self.rng.gen_bool(accuracy);
            lock.vertical &= self.rng.gen_bool(accuracy);
            lock.range &= self.rng.gen_bool(accuracy);
        }
        lock
    }

    /// Fire a torpedo from the player's position. `None` when refused.
    pub fn fire_torpedo(&mut self, direction: Direction) -> Option<Projectile> {
        if !self.state.is_running() {
            return None;
        }
        let lock = self.current_lock();
        let position = self.state.player.position;
        self.combat
            .fire_torpedo(&mut self.state, position, direction, lock, &mut self.rng)
    }

    pub fn attempt_docking(&mut self) -> DockingResult {
        if !self.state.is_running() {
            return DockingResult::refused("No mission in progress");
        }
        let player = &self.state.player;
        let (position, velocity, sector) = (player.position, player.velocity, player.sector);
        self.strongholds.attempt_docking(
            &mut self.galaxy,
            &mut self.state,
            &mut self.energy,
            position,
            velocity,
            sector,
            &mut self.events,
        )
    }

    /// Jump to `dest`. Costs 100 energy plus 10 per sector of grid distance.
    /// `Ok(false)` when the jump is refused (same sector, not enough energy).
    pub fn hyperspace_jump(&mut self, dest: SectorCoord) -> GameResult<bool> {
        if !dest.in_bounds() {
            return Err(GameError::InvalidCoordinate { x: dest.x, y: dest.y });
        }
        if !self.state.is_active() {
            return Err(GameError::MissionInactive);
        }
        let from = self.state.player.sector;
        if dest == from || self.state.is_paused() {
            return Ok(false);
        }
        let distance = Galaxy::manhattan_distance(from, dest) as u32;
        if !energy::consume_hyperspace_energy(&mut self.state.player, distance) {
            debug!(?dest, "hyperspace refused: insufficient energy");
            return Ok(false);
        }

        self.galaxy.move_player_to_sector(dest)?;
        self.state.player.sector = dest;
        self.state.player.position = dest.center();
        self.combat.clear();
        info!(?from, to = ?dest, distance, "hyperspace jump");
        self.events.push(GameEvent::HyperspaceJump { from, to: dest });
        Ok(true)
    }

    /// Place the player at `position` (host-driven flight). Crossing a
    /// sector boundary moves the occupancy flag with it.
    pub fn move_player(&mut self, position: Vec3) -> GameResult<()> {
        if !self.state.is_active() {
            return Err(GameError::MissionInactive);
        }
        let sector = SectorCoord::from_world(position);
        if !sector.in_bounds() {
            return Err(GameError::InvalidCoordinate { x: sector.x, y: sector.y });
        }
        if sector != self.state.player.sector {
            self.galaxy.move_player_to_sector(sector)?;
            self.state.player.sector = sector;
        }
        self.state.player.position = position;
        Ok(())
    }

    pub fn set_velocity(&mut self, level: u8) -> u8 {
        self.state.player.set_velocity(level)
    }

    pub fn toggle_shields(&mut self) -> bool {
        self.energy.toggle_shields(&mut self.state)
    }

    pub fn toggle_computer(&mut self) -> bool {
        self.energy.toggle_computer(&mut self.state)
    }

    pub fn long_range_scan(&mut self) -> Option<[[Option<ScanCell>; 3]; 3]> {
        let player = &self.state.player;
        self.galaxy
            .long_range_scan(player.sector, &player.subsystems, &mut self.rng)
    }

    // ========== Persistence ==========

    /// Encode the whole mission as one opaque blob. Pending events are not saved.
    pub fn save(&self) -> GameResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Replace the mission with a saved one. On error nothing changes.
    pub fn load(&mut self, blob: &[u8]) -> GameResult<()> {
        let mut loaded: GameEngine = bincode::deserialize(blob)?;
        loaded.events = std::mem::take(&mut self.events);
        *self = loaded;
        info!(
            seed = self.galaxy.seed(),
            elapsed = self.state.elapsed,
            "mission loaded"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::constants::{Subsystem, MAX_ENERGY, TORPEDO_ENERGY_COST};
    use crate::models::enemy::{EnemyType, HostileUnit, UnitId};

    /// Engine whose galaxy holds only what the test puts in it.
    fn quiet_engine() -> GameEngine {
        let mut engine = GameEngine::new(Difficulty::Pilot, 42);
        engine.galaxy.clear();
        engine.ai = AiDirector::new(*engine.galaxy.config());
        engine.squadrons.clear();
        engine.drain_events();
        engine
    }

    fn spawn(engine: &mut GameEngine, kind: EnemyType, at: Vec3) -> UnitId {
        let id = engine
            .galaxy
            .spawn_enemy(HostileUnit::new(UnitId(0), kind, at));
        let unit = engine.galaxy.unit(id).cloned().unwrap();
        engine.ai.register_enemy(&unit, &engine.galaxy, None);
        id
    }

    #[test]
    fn new_mission_is_populated_and_announced() {
        let mut engine = GameEngine::new(Difficulty::Warrior, 7);
        let config = Difficulty::Warrior.config();
        assert_eq!(engine.galaxy().enemy_count(), config.enemy_count);
        assert_eq!(engine.ai().len(), config.enemy_count);
        assert!(engine.state().is_running());
        assert_eq!(engine.drain_events()[0], GameEvent::MissionStarted { seed: 7 });
    }

    #[test]
    fn same_seed_same_mission() {
        let mut a = GameEngine::new(Difficulty::Commander, 99);
        let mut b = GameEngine::new(Difficulty::Commander, 99);
        for _ in 0..50 {
            a.tick(0.1);
            b.tick(0.1);
        }
        assert_eq!(a.save().unwrap(), b.save().unwrap());
    }

    #[test]
    fn new_game_replaces_mission() {
        let mut engine = GameEngine::new(Difficulty::Pilot, 1);
        engine.tick(1.0);
        engine.end_game(false);
        engine.start_new_game(Difficulty::Novice);
        assert!(engine.state().is_active());
        assert_eq!(engine.state().elapsed, 0.0);
        assert_eq!(engine.state().difficulty, Difficulty::Novice);
        assert_eq!(engine.state().player.energy, MAX_ENERGY);
    }

    #[test]
    fn pause_freezes_time() {
        let mut engine = quiet_engine();
        spawn(&mut engine, EnemyType::Cruiser, Vec3::new(150.0, 0.0, 150.0));
        engine.pause_game();
        engine.tick(5.0);
        assert_eq!(engine.state().elapsed, 0.0);
        assert!(engine.fire_torpedo(Direction::Fore).is_none());
        engine.resume_game();
        engine.tick(5.0);
        assert_eq!(engine.state().elapsed, 5.0);
    }

    #[test]
    fn end_game_is_one_shot() {
        let mut engine = quiet_engine();
        assert!(engine.end_game(true));
        assert!(!engine.end_game(false));
        assert_eq!(
            engine.state().outcome(),
            Some(MissionOutcome::Victory { score: 0 })
        );
        let before = engine.state().elapsed;
        engine.tick(1.0);
        assert_eq!(engine.state().elapsed, before);
    }

    #[test]
    fn killing_the_last_hostile_wins() {
        let mut engine = quiet_engine();
        let ahead = engine.state().player.position + Vec3::new(0.0, 0.0, 30.0);
        let id = spawn(&mut engine, EnemyType::Fighter, ahead);
        engine.toggle_computer();

        assert!(engine.fire_torpedo(Direction::Fore).is_some());
        engine.tick(0.15);

        assert!(engine.galaxy().unit(id).is_none());
        assert!(engine.ai().controller(id).is_none());
        assert_eq!(engine.state().player.kills, 1);
        assert_eq!(
            engine.state().outcome(),
            Some(MissionOutcome::Victory { score: EnemyType::Fighter.kill_score() })
        );
        let events = engine.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::EnemyDestroyed { unit, .. } if *unit == id)));
        assert!(matches!(events.last(), Some(GameEvent::MissionEnded { .. })));
    }

    #[test]
    fn hostile_hits_reach_the_subsystems() {
        let mut engine = quiet_engine();
        engine.state.config.system_damage_chance = 1.0;
        engine.ai = AiDirector::new({
            let mut config = *engine.galaxy.config();
            config.accuracy_multiplier = 2.0;
            config
        });
        let near = engine.state().player.position + Vec3::new(0.0, 0.0, 20.0);
        spawn(&mut engine, EnemyType::Fighter, near);

        for _ in 0..60 {
            engine.tick(0.1);
        }
        let events = engine.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::PlayerFiredUpon { hit: true, .. })));
        assert!(events.iter().any(|e| matches!(e, GameEvent::SubsystemDamaged { .. })));
        assert!(Subsystem::ALL
            .iter()
            .any(|s| engine.state().player.subsystems.is_damaged(*s)));
    }

    #[test]
    fn hyperspace_charges_by_distance_and_clears_torpedoes() {
        let mut engine = quiet_engine();
        spawn(&mut engine, EnemyType::Cruiser, Vec3::new(150.0, 0.0, 150.0));
        engine.fire_torpedo(Direction::Fore).unwrap();
        let before = engine.state().player.energy;

        assert!(matches!(engine.hyperspace_jump(SectorCoord::new(11, 12)), Ok(true)));
        assert_eq!(engine.state().player.energy, before - 170.0);
        assert_eq!(engine.state().player.sector, SectorCoord::new(11, 12));
        assert!(engine.galaxy().get_sector(SectorCoord::new(11, 12)).unwrap().occupied);
        assert!(!engine.galaxy().get_sector(SectorCoord::new(8, 8)).unwrap().occupied);
        assert_eq!(engine.combat().active_projectiles().count(), 0);
    }

    #[test]
    fn hyperspace_refusals() {
        let mut engine = quiet_engine();
        spawn(&mut engine, EnemyType::Cruiser, Vec3::new(150.0, 0.0, 150.0));
        assert!(matches!(
            engine.hyperspace_jump(SectorCoord::new(16, 0)),
            Err(GameError::InvalidCoordinate { x: 16, y: 0 })
        ));
        assert!(matches!(engine.hyperspace_jump(SectorCoord::new(8, 8)), Ok(false)));

        engine.state.player.energy = 105.0;
        assert!(matches!(engine.hyperspace_jump(SectorCoord::new(8, 9)), Ok(false)));
        assert_eq!(engine.state().player.energy, 105.0);

        engine.end_game(false);
        assert!(matches!(
            engine.hyperspace_jump(SectorCoord::new(8, 9)),
            Err(GameError::MissionInactive)
        ));
    }

    #[test]
    fn docking_through_engine() {
        let mut engine = quiet_engine();
        spawn(&mut engine, EnemyType::Cruiser, Vec3::new(150.0, 0.0, 150.0));
        let home = engine.state().player.sector;
        engine.galaxy.place_stronghold(home).unwrap();
        engine.state.player.energy = 50.0;
        engine.state.player.subsystems.degrade(Subsystem::Propulsion);

        engine.set_velocity(5);
        assert!(!engine.attempt_docking().success);
        engine.set_velocity(0);
        let result = engine.attempt_docking();
        assert!(result.success, "{}", result.message);
        assert_eq!(engine.state().player.energy, MAX_ENERGY);
        assert!(!engine.state().player.subsystems.is_damaged(Subsystem::Propulsion));
    }

    #[test]
    fn moving_the_player_tracks_the_sector() {
        let mut engine = quiet_engine();
        spawn(&mut engine, EnemyType::Cruiser, Vec3::new(150.0, 0.0, 150.0));
        engine.move_player(Vec3::new(905.0, 0.0, 850.0)).unwrap();
        assert_eq!(engine.state().player.sector, SectorCoord::new(9, 8));
        assert!(engine.galaxy().get_sector(SectorCoord::new(9, 8)).unwrap().occupied);
        assert!(engine.move_player(Vec3::new(-5.0, 0.0, 850.0)).is_err());
    }

    #[test]
    fn save_and_load_whole_mission() {
        let mut engine = GameEngine::new(Difficulty::Warrior, 5);
        for _ in 0..20 {
            engine.tick(0.25);
        }
        engine.fire_torpedo(Direction::Aft);
        let blob = engine.save().unwrap();
        let data = engine.galaxy_data();

        let mut other = GameEngine::new(Difficulty::Novice, 1);
        other.load(&blob).unwrap();
        assert_eq!(other.galaxy_data(), data);
        assert_eq!(other.state(), engine.state());

        // Both continue identically.
        engine.tick(0.5);
        other.tick(0.5);
        assert_eq!(other.save().unwrap(), engine.save().unwrap());

        assert!(other.load(&[1, 2, 3]).is_err());
        assert_eq!(other.galaxy_data(), engine.galaxy_data());
    }

    #[test]
    fn torpedo_costs_energy_through_engine() {
        let mut engine = quiet_engine();
        spawn(&mut engine, EnemyType::Cruiser, Vec3::new(150.0, 0.0, 150.0));
        let before = engine.state().player.energy;
        engine.fire_torpedo(Direction::Fore).unwrap();
        assert_eq!(engine.state().player.energy, before - TORPEDO_ENERGY_COST);
    }
}
