use rand::Rng;
use tracing::warn;

use crate::models::constants::{
    CENTER_SECTOR, GALAXY_SIZE, MAX_PLACEMENT_ATTEMPTS, PREFERRED_MAX_ENEMIES_PER_SECTOR,
};
use crate::models::difficulty::DifficultyConfig;
use crate::models::enemy::{EnemyType, HostileUnit, UnitId};
use crate::models::position::{SectorCoord, Vec3};
use crate::models::rng::GameRng;
use crate::models::sector::Sector;
use crate::models::stronghold::Stronghold;

use super::sector_index;

/// Build the empty 16x16 grid in row-major order.
pub fn empty_grid() -> Vec<Sector> {
    let mut sectors = Vec::with_capacity(GALAXY_SIZE * GALAXY_SIZE);
    for y in 0..GALAXY_SIZE as i32 {
        for x in 0..GALAXY_SIZE as i32 {
            sectors.push(Sector::new(SectorCoord::new(x, y)));
        }
    }
    sectors
}

/// Place strongholds, then hostiles, according to the difficulty table.
/// Returns the next free unit id.
pub fn populate(sectors: &mut [Sector], config: &DifficultyConfig, rng: &mut GameRng) -> u32 {
    for id in 0..config.stronghold_count as u32 {
        match pick_stronghold_sector(sectors, rng) {
            Some(coord) => {
                sectors[sector_index(coord)].stronghold = Some(Stronghold::new(id, coord));
            }
            None => {
                warn!(id, "no free sector left for starbase");
                break;
            }
        }
    }

    let (fighters, cruisers, basestars) = config.enemy_mix();
    let kinds = std::iter::repeat(EnemyType::Fighter)
        .take(fighters)
        .chain(std::iter::repeat(EnemyType::Cruiser).take(cruisers))
        .chain(std::iter::repeat(EnemyType::Basestar).take(basestars));

    let mut next_id = 0;
    for kind in kinds {
        let coord = pick_enemy_sector(sectors, rng);
        let position = random_point_in(coord, rng);
        sectors[sector_index(coord)]
            .enemies
            .push(HostileUnit::new(UnitId(next_id), kind, position));
        next_id += 1;
    }
    next_id
}

/// Random sector, never the center one.
fn random_non_center(rng: &mut GameRng) -> SectorCoord {
    let center = SectorCoord::new(CENTER_SECTOR.0, CENTER_SECTOR.1);
    loop {
        let coord = SectorCoord::new(
            rng.gen_range(0..GALAXY_SIZE as i32),
            rng.gen_range(0..GALAXY_SIZE as i32),
        );
        if coord != center {
            return coord;
        }
    }
}

/// Draw until a sector without a starbase turns up. If every draw collides,
/// take the first free sector in row-major order so the count is honored.
fn pick_stronghold_sector(sectors: &[Sector], rng: &mut GameRng) -> Option<SectorCoord> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let coord = random_non_center(rng);
        if sectors[sector_index(coord)].stronghold.is_none() {
            return Some(coord);
        }
    }
    let center = SectorCoord::new(CENTER_SECTOR.0, CENTER_SECTOR.1);
    sectors
        .iter()
        .find(|s| s.coord != center && s.stronghold.is_none())
        .map(|s| s.coord)
}

/// Prefer uncrowded sectors without a starbase; after the last attempt the
/// collision is accepted.
fn pick_enemy_sector(sectors: &[Sector], rng: &mut GameRng) -> SectorCoord {
    let mut coord = random_non_center(rng);
    for _ in 1..MAX_PLACEMENT_ATTEMPTS {
        let sector = &sectors[sector_index(coord)];
        if sector.enemies.len() < PREFERRED_MAX_ENEMIES_PER_SECTOR && sector.stronghold.is_none() {
            break;
        }
        coord = random_non_center(rng);
    }
    coord
}

/// A spawn point inside a sector, away from its edges.
fn random_point_in(coord: SectorCoord, rng: &mut GameRng) -> Vec3 {
    coord.origin()
        + Vec3::new(
            rng.gen_range(10.0..90.0),
            rng.gen_range(-20.0..20.0),
            rng.gen_range(10.0..90.0),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::difficulty::Difficulty;
    use rand::SeedableRng;

    #[test]
    fn populate_places_configured_counts() {
        for difficulty in Difficulty::ALL {
            let config = difficulty.config();
            let mut sectors = empty_grid();
            let mut rng = GameRng::seed_from_u64(11);
            let next = populate(&mut sectors, &config, &mut rng);

            let units: usize = sectors.iter().map(|s| s.enemies.len()).sum();
            let bases = sectors.iter().filter(|s| s.stronghold.is_some()).count();
            assert_eq!(units, config.enemy_count);
            assert_eq!(next as usize, config.enemy_count);
            assert_eq!(bases, config.stronghold_count);
        }
    }

    #[test]
    fn center_sector_stays_clear() {
        let config = Difficulty::Commander.config();
        for seed in 0..20 {
            let mut sectors = empty_grid();
            let mut rng = GameRng::seed_from_u64(seed);
            populate(&mut sectors, &config, &mut rng);
            let center = &sectors[sector_index(SectorCoord::new(8, 8))];
            assert!(center.enemies.is_empty());
            assert!(center.stronghold.is_none());
        }
    }

    #[test]
    fn units_spawn_inside_their_sector() {
        let mut sectors = empty_grid();
        let mut rng = GameRng::seed_from_u64(5);
        populate(&mut sectors, &Difficulty::Warrior.config(), &mut rng);
        for sector in &sectors {
            for unit in &sector.enemies {
                assert_eq!(SectorCoord::from_world(unit.position), sector.coord);
            }
        }
    }

    #[test]
    fn stronghold_fallback_finds_free_sector() {
        let mut sectors = empty_grid();
        let center = SectorCoord::new(8, 8);
        // Fill every sector but one.
        let free = SectorCoord::new(15, 15);
        for s in sectors.iter_mut() {
            if s.coord != center && s.coord != free {
                s.stronghold = Some(Stronghold::new(99, s.coord));
            }
        }
        let mut rng = GameRng::seed_from_u64(1);
        assert_eq!(pick_stronghold_sector(&sectors, &mut rng), Some(free));
    }
}
