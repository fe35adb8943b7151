use proptest::prelude::*;
use rand::SeedableRng;

use starraid::models::constants::{Subsystem, MAX_ENERGY};
use starraid::models::events::EventQueue;
use starraid::models::galaxy::Galaxy;
use starraid::models::position::{SectorCoord, Vec3};
use starraid::models::rng::GameRng;
use starraid::models::subsystems::{ShipSubsystems, SubsystemStatus};
use starraid::services::combat::calculate_lock_status;
use starraid::services::damage::{apply_damage, DamageOutcome};
use starraid::services::energy::{self, EnergyEconomy};
use starraid::{Difficulty, GameEngine, GameState};

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop::sample::select(Difficulty::ALL.to_vec())
}

proptest! {
    /// Property: generation places exactly the configured number of hostiles
    /// and starbases for every seed and tier.
    #[test]
    fn generated_counts_match_config(seed in any::<u64>(), tier in difficulty()) {
        let galaxy = Galaxy::initialize(tier, seed);
        let config = tier.config();
        prop_assert_eq!(galaxy.enemy_count(), config.enemy_count,
            "wrong hostile count for seed {}", seed);
        prop_assert_eq!(galaxy.stronghold_count(), config.stronghold_count,
            "wrong starbase count for seed {}", seed);
    }

    /// Property: exactly one sector is marked as holding the player.
    #[test]
    fn single_occupied_sector(seed in any::<u64>(), tier in difficulty()) {
        let galaxy = Galaxy::initialize(tier, seed);
        let occupied: Vec<SectorCoord> = galaxy
            .sectors()
            .iter()
            .filter(|s| s.occupied)
            .map(|s| s.coord)
            .collect();
        prop_assert_eq!(occupied, vec![galaxy.player_sector()]);
    }

    /// Property: every unit sits inside the sector that lists it.
    #[test]
    fn units_filed_under_their_sector(seed in any::<u64>(), tier in difficulty()) {
        let galaxy = Galaxy::initialize(tier, seed);
        for sector in galaxy.sectors() {
            for unit in &sector.enemies {
                prop_assert_eq!(SectorCoord::from_world(unit.position), sector.coord);
            }
        }
    }

    /// Property: unit ids are never reused within a galaxy.
    #[test]
    fn unit_ids_unique(seed in any::<u64>()) {
        let galaxy = Galaxy::initialize(Difficulty::Commander, seed);
        let mut ids = galaxy.unit_ids();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
    }

    /// Property: energy stays in [0, max] whatever the ship spends or gets back.
    #[test]
    fn energy_stays_bounded(
        ops in prop::collection::vec((0u8..4, 0.0f64..5000.0), 1..60),
    ) {
        let mut state = GameState::new(Difficulty::Pilot, SectorCoord::new(8, 8));
        let mut economy = EnergyEconomy::new();
        let mut events = EventQueue::new();
        for (op, amount) in ops {
            match op {
                0 => economy.tick(amount / 100.0, &mut state, &mut events),
                1 => { energy::consume_torpedo_energy(&mut state.player); }
                2 => { energy::consume_hyperspace_energy(&mut state.player, (amount as u32) % 30); }
                _ => economy.restore_energy(&mut state, Some(amount)),
            }
            prop_assert!(state.player.energy >= 0.0);
            prop_assert!(state.player.energy <= MAX_ENERGY);
        }
    }

    /// Property: a lock needs the target within 5 units on each lateral axis
    /// and between 30 and 70 units away.
    #[test]
    fn lock_axes_follow_offsets(
        dx in -20.0f64..20.0,
        dy in -20.0f64..20.0,
        dz in -100.0f64..100.0,
    ) {
        let player = Vec3::new(500.0, 0.0, 500.0);
        let target = player + Vec3::new(dx, dy, dz);
        let delta = target - player;
        let lock = calculate_lock_status(player, target);
        prop_assert_eq!(lock.horizontal, delta.x.abs() <= 5.0);
        prop_assert_eq!(lock.vertical, delta.y.abs() <= 5.0);
        prop_assert_eq!(lock.range, (30.0..=70.0).contains(&delta.length()));
        prop_assert_eq!(lock.is_full(), lock.horizontal && lock.vertical && lock.range);
    }

    /// Property: a hit moves at most one subsystem down exactly one step.
    #[test]
    fn damage_never_skips_a_step(seed in any::<u64>(), hits in 1usize..40, shields in any::<bool>()) {
        let config = Difficulty::Commander.config();
        let mut rng = GameRng::seed_from_u64(seed);
        let mut systems = ShipSubsystems::new();
        for _ in 0..hits {
            let before = systems;
            let outcome = apply_damage(&mut systems, shields, &config, &mut rng);
            let changed: Vec<Subsystem> = Subsystem::ALL
                .iter()
                .copied()
                .filter(|s| before.status(*s) != systems.status(*s))
                .collect();
            match outcome {
                DamageOutcome::Degraded { subsystem, status } => {
                    prop_assert_eq!(changed, vec![subsystem]);
                    prop_assert_eq!(before.status(subsystem).degraded(), status);
                    prop_assert!(before.status(subsystem) != SubsystemStatus::Destroyed);
                }
                _ => prop_assert!(changed.is_empty()),
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Property: after arbitrary ticking, units stay on the grid, filed under
    /// the right sector, and the AI tracks exactly the live units.
    #[test]
    fn simulation_keeps_units_consistent(seed in any::<u64>(), tier in difficulty(), ticks in 1usize..150) {
        let mut engine = GameEngine::new(tier, seed);
        for _ in 0..ticks {
            engine.tick(0.1);
        }
        let galaxy = engine.galaxy();
        for sector in galaxy.sectors() {
            for unit in &sector.enemies {
                prop_assert_eq!(SectorCoord::from_world(unit.position), sector.coord);
                prop_assert!(unit.position.x >= 0.0 && unit.position.x < 1600.0);
                prop_assert!(unit.position.z >= 0.0 && unit.position.z < 1600.0);
            }
        }
        prop_assert_eq!(engine.ai().len(), galaxy.enemy_count());
        let state = engine.state();
        prop_assert!(state.player.energy >= 0.0 && state.player.energy <= MAX_ENERGY);
    }

    /// Property: two engines built from the same seed stay identical.
    #[test]
    fn same_seed_same_run(seed in any::<u64>(), ticks in 1usize..80) {
        let mut a = GameEngine::new(Difficulty::Commander, seed);
        let mut b = GameEngine::new(Difficulty::Commander, seed);
        for _ in 0..ticks {
            a.tick(0.1);
            b.tick(0.1);
        }
        prop_assert_eq!(a.galaxy_data(), b.galaxy_data());
        prop_assert_eq!(a.state(), b.state());
    }
}
