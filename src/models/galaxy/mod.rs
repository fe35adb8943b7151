//! Galaxy model
//!
//! The 16x16 sector grid holding every hostile unit and starbase, together
//! with the distance, lookup and bookkeeping operations over it. The grid is
//! the single authoritative store of units: destroying a unit anywhere goes
//! through [`Galaxy::destroy_enemy`].

mod generation;
mod persistence;
mod sector_ops;

use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use super::constants::{CENTER_SECTOR, GALAXY_SIZE};
use super::difficulty::{Difficulty, DifficultyConfig};
use super::enemy::{HostileUnit, UnitId};
use super::errors::{GameError, GameResult};
use super::position::SectorCoord;
use super::rng::GameRng;
use super::sector::Sector;
use super::stronghold::Stronghold;
use super::subsystems::ShipSubsystems;

pub use sector_ops::ScanCell;

/// Row-major index of an in-bounds coordinate.
fn sector_index(coord: SectorCoord) -> usize {
    debug_assert!(coord.in_bounds(), "sector {:?} out of bounds", coord);
    coord.y as usize * GALAXY_SIZE + coord.x as usize
}

/// Summary of the galaxy for HUDs and mission briefings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalaxyData {
    pub difficulty: Difficulty,
    pub seed: u64,
    pub player_sector: SectorCoord,
    pub enemies_remaining: usize,
    pub strongholds_remaining: usize,
    pub enemies_destroyed: u32,
    pub strongholds_destroyed: u32,
    pub visited_sectors: usize,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Galaxy {
    /// 16x16 grid, row-major: sectors[y * 16 + x].
    sectors: Vec<Sector>,
    config: DifficultyConfig,
    seed: u64,
    player_sector: SectorCoord,
    enemies_destroyed: u32,
    strongholds_destroyed: u32,
    next_unit_id: u32,
}

impl Galaxy {
    /// Generate a fresh galaxy from its own generator seeded with `seed`.
    pub fn initialize(difficulty: Difficulty, seed: u64) -> Self {
        let mut rng = GameRng::seed_from_u64(seed);
        Self::generate(difficulty, seed, &mut rng)
    }

    /// Generate a galaxy drawing from a caller-owned generator, so the rest of
    /// the mission can keep using the same random stream.
    pub fn generate(difficulty: Difficulty, seed: u64, rng: &mut GameRng) -> Self {
        let config = difficulty.config();
        let mut sectors = generation::empty_grid();
        let next_unit_id = generation::populate(&mut sectors, &config, rng);

        let mut galaxy = Galaxy {
            sectors,
            config,
            seed,
            player_sector: SectorCoord::new(CENTER_SECTOR.0, CENTER_SECTOR.1),
            enemies_destroyed: 0,
            strongholds_destroyed: 0,
            next_unit_id,
        };
        let start = galaxy.player_sector;
        let sector = galaxy.sector_at_mut(start);
        sector.occupied = true;
        sector.visited = true;

        info!(
            %difficulty,
            seed,
            enemies = galaxy.enemy_count(),
            strongholds = galaxy.stronghold_count(),
            "galaxy generated"
        );
        galaxy
    }

    // ========== Accessor Methods ==========

    pub fn config(&self) -> &DifficultyConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn player_sector(&self) -> SectorCoord {
        self.player_sector
    }

    pub fn enemies_destroyed(&self) -> u32 {
        self.enemies_destroyed
    }

    pub fn strongholds_destroyed(&self) -> u32 {
        self.strongholds_destroyed
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    /// Sector at `coord`, or `None` off the grid.
    pub fn get_sector(&self, coord: SectorCoord) -> Option<&Sector> {
        coord.in_bounds().then(|| &self.sectors[sector_index(coord)])
    }

    pub fn get_sector_mut(&mut self, coord: SectorCoord) -> Option<&mut Sector> {
        if coord.in_bounds() {
            Some(&mut self.sectors[sector_index(coord)])
        } else {
            None
        }
    }

    fn sector_at_mut(&mut self, coord: SectorCoord) -> &mut Sector {
        &mut self.sectors[sector_index(coord)]
    }

    pub fn manhattan_distance(a: SectorCoord, b: SectorCoord) -> i32 {
        a.manhattan(b)
    }

    pub fn galaxy_data(&self) -> GalaxyData {
        GalaxyData {
            difficulty: self.config.difficulty,
            seed: self.seed,
            player_sector: self.player_sector,
            enemies_remaining: self.enemy_count(),
            strongholds_remaining: self.live_stronghold_count(),
            enemies_destroyed: self.enemies_destroyed,
            strongholds_destroyed: self.strongholds_destroyed,
            visited_sectors: self.sectors.iter().filter(|s| s.visited).count(),
        }
    }

    // ========== Unit queries ==========

    pub fn units(&self) -> impl Iterator<Item = &HostileUnit> {
        self.sectors.iter().flat_map(|s| s.enemies.iter())
    }

    pub fn units_mut(&mut self) -> impl Iterator<Item = &mut HostileUnit> {
        self.sectors.iter_mut().flat_map(|s| s.enemies.iter_mut())
    }

    pub fn unit_ids(&self) -> Vec<UnitId> {
        self.units().map(|u| u.id).collect()
    }

    pub fn unit(&self, id: UnitId) -> Option<&HostileUnit> {
        self.units().find(|u| u.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut HostileUnit> {
        self.units_mut().find(|u| u.id == id)
    }

    pub fn enemies_in_sector(&self, coord: SectorCoord) -> &[HostileUnit] {
        self.get_sector(coord).map(|s| s.enemies.as_slice()).unwrap_or(&[])
    }

    pub fn enemies_in_sector_mut(&mut self, coord: SectorCoord) -> Option<&mut Vec<HostileUnit>> {
        self.get_sector_mut(coord).map(|s| &mut s.enemies)
    }

    pub fn enemy_count(&self) -> usize {
        self.sectors.iter().map(|s| s.enemies.len()).sum()
    }

    /// Hostiles in sectors within Chebyshev distance `radius` of `center`
    /// (radius 2 is the 5x5 block).
    pub fn enemies_in_block(&self, center: SectorCoord, radius: i32) -> usize {
        sector_ops::count_enemies_where(&self.sectors, |c| c.chebyshev(center) <= radius)
    }

    /// Hostiles in sectors within Manhattan distance `radius` of `center`.
    pub fn enemies_within_manhattan(&self, center: SectorCoord, radius: i32) -> usize {
        sector_ops::count_enemies_where(&self.sectors, |c| c.manhattan(center) <= radius)
    }

    // ========== Stronghold queries ==========

    pub fn strongholds(&self) -> impl Iterator<Item = &Stronghold> {
        self.sectors.iter().filter_map(|s| s.stronghold.as_ref())
    }

    pub fn strongholds_mut(&mut self) -> impl Iterator<Item = &mut Stronghold> {
        self.sectors.iter_mut().filter_map(|s| s.stronghold.as_mut())
    }

    pub fn stronghold_at(&self, coord: SectorCoord) -> Option<&Stronghold> {
        self.get_sector(coord).and_then(|s| s.stronghold.as_ref())
    }

    pub fn stronghold_at_mut(&mut self, coord: SectorCoord) -> Option<&mut Stronghold> {
        self.get_sector_mut(coord).and_then(|s| s.stronghold.as_mut())
    }

    pub fn stronghold_count(&self) -> usize {
        self.strongholds().count()
    }

    pub fn live_stronghold_count(&self) -> usize {
        self.strongholds().filter(|s| !s.destroyed).count()
    }

    // ========== Atomic Update Methods ==========

    /// Move the player. Clears the occupancy flag everywhere before setting
    /// it on the destination so exactly one sector is ever occupied.
    pub fn move_player_to_sector(&mut self, coord: SectorCoord) -> GameResult<()> {
        if !coord.in_bounds() {
            return Err(GameError::InvalidCoordinate { x: coord.x, y: coord.y });
        }
        for sector in self.sectors.iter_mut() {
            sector.occupied = false;
        }
        let dest = self.sector_at_mut(coord);
        dest.occupied = true;
        dest.visited = true;
        self.player_sector = coord;
        Ok(())
    }

    /// Start or cancel sieges: a starbase is threatened when any hostile is
    /// within grid Manhattan distance 2. Returns the threatened sectors.
    ///
    /// This is a host-side query with its own rule. It writes the siege
    /// flags directly, so calling it cancels (and resets the countdown of)
    /// any siege the stronghold manager started that this rule does not
    /// see. The per-tick siege logic lives in the stronghold manager and
    /// never calls this.
    pub fn check_stronghold_threats(&mut self) -> Vec<SectorCoord> {
        let coords: Vec<SectorCoord> = self
            .strongholds()
            .filter(|s| !s.destroyed)
            .map(|s| s.sector)
            .collect();

        let mut threatened = Vec::new();
        for coord in coords {
            let hostile_nearby = self.enemies_within_manhattan(coord, 2) > 0;
            if let Some(base) = self.stronghold_at_mut(coord) {
                if hostile_nearby {
                    if base.start_attack() {
                        debug!(?coord, "starbase threatened");
                    }
                    threatened.push(coord);
                } else if base.cancel_attack() {
                    debug!(?coord, "starbase threat cleared");
                }
            }
        }
        threatened
    }

    /// Remove a hostile unit from the grid and count the kill. This is the
    /// only way a unit leaves the galaxy.
    pub fn destroy_enemy(&mut self, id: UnitId) -> GameResult<HostileUnit> {
        for sector in self.sectors.iter_mut() {
            if let Some(idx) = sector.enemies.iter().position(|u| u.id == id) {
                let unit = sector.enemies.remove(idx);
                self.enemies_destroyed += 1;
                debug!(unit = %id, kind = unit.kind.name(), "hostile destroyed");
                return Ok(unit);
            }
        }
        Err(GameError::UnknownUnit(id))
    }

    /// Destroy the starbase at `coord`. Returns true only on the call that
    /// actually destroyed it.
    pub fn destroy_stronghold(&mut self, coord: SectorCoord) -> GameResult<bool> {
        if !coord.in_bounds() {
            return Err(GameError::InvalidCoordinate { x: coord.x, y: coord.y });
        }
        let destroyed = self
            .stronghold_at_mut(coord)
            .map(|s| s.destroy())
            .unwrap_or(false);
        if destroyed {
            self.strongholds_destroyed += 1;
            info!(?coord, "starbase destroyed");
        }
        Ok(destroyed)
    }

    /// Re-home units whose movement carried them into another sector.
    pub fn relocate_units(&mut self) -> usize {
        sector_ops::relocate_units(&mut self.sectors)
    }

    pub fn long_range_scan(
        &self,
        center: SectorCoord,
        subsystems: &ShipSubsystems,
        rng: &mut GameRng,
    ) -> Option<[[Option<ScanCell>; 3]; 3]> {
        sector_ops::long_range_scan(&self.sectors, center, subsystems, rng)
    }

    /// Insert a unit built by the caller (tests and scripted scenarios).
    /// The unit's id is replaced with a fresh one, which is returned.
    pub fn spawn_enemy(&mut self, mut unit: HostileUnit) -> UnitId {
        unit.position = sector_ops::clamp_to_galaxy(unit.position);
        unit.id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        let id = unit.id;
        let coord = SectorCoord::from_world(unit.position);
        self.sector_at_mut(coord).enemies.push(unit);
        id
    }

    /// Remove every unit and starbase (tests and scripted scenarios).
    pub fn clear(&mut self) {
        for sector in self.sectors.iter_mut() {
            sector.enemies.clear();
            sector.stronghold = None;
        }
    }

    /// Put a starbase in `coord`, replacing any existing one.
    pub fn place_stronghold(&mut self, coord: SectorCoord) -> GameResult<()> {
        if !coord.in_bounds() {
            return Err(GameError::InvalidCoordinate { x: coord.x, y: coord.y });
        }
        let id = self.stronghold_count() as u32;
        self.sector_at_mut(coord).stronghold = Some(Stronghold::new(id, coord));
        Ok(())
    }
}

impl fmt::Debug for Galaxy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Galaxy")
            .field("seed", &self.seed)
            .field("difficulty", &self.config.difficulty)
            .field("enemies", &self.enemy_count())
            .field("strongholds", &self.live_stronghold_count())
            .finish_non_exhaustive()
    }
}
