use rand::Rng;

use crate::models::constants::{GALAXY_SIZE, SECTOR_SCALE};
use crate::models::position::{SectorCoord, Vec3};
use crate::models::rng::GameRng;
use crate::models::sector::Sector;
use crate::models::subsystems::ShipSubsystems;

use super::sector_index;

/// What the long-range scanner reports for one sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanCell {
    pub coord: SectorCoord,
    pub enemies: usize,
    pub stronghold: bool,
}

/// Count hostiles in sectors accepted by `near`.
pub fn count_enemies_where<F>(sectors: &[Sector], near: F) -> usize
where
    F: Fn(SectorCoord) -> bool,
{
    sectors
        .iter()
        .filter(|s| near(s.coord))
        .map(|s| s.enemies.len())
        .sum()
}

/// Keep a world position inside the galaxy's x/z extent.
pub fn clamp_to_galaxy(pos: Vec3) -> Vec3 {
    let max = GALAXY_SIZE as f64 * SECTOR_SCALE - 1e-6;
    Vec3::new(pos.x.clamp(0.0, max), pos.y, pos.z.clamp(0.0, max))
}

/// Move every unit into the sector its position now lies in.
/// Returns how many units changed sector.
pub fn relocate_units(sectors: &mut [Sector]) -> usize {
    let mut moving = Vec::new();
    for sector in sectors.iter_mut() {
        let coord = sector.coord;
        let mut i = 0;
        while i < sector.enemies.len() {
            let unit = &mut sector.enemies[i];
            unit.position = clamp_to_galaxy(unit.position);
            if SectorCoord::from_world(unit.position) != coord {
                moving.push(sector.enemies.swap_remove(i));
            } else {
                i += 1;
            }
        }
    }
    let moved = moving.len();
    for unit in moving {
        let dest = SectorCoord::from_world(unit.position);
        sectors[sector_index(dest)].enemies.push(unit);
    }
    moved
}

/// 3x3 long-range scan around `center`. `None` when the sensor is destroyed;
/// off-grid cells are `None` inside the grid. A damaged sensor adds false
/// echoes: each enemy count is jittered by up to one.
pub fn long_range_scan(
    sectors: &[Sector],
    center: SectorCoord,
    subsystems: &ShipSubsystems,
    rng: &mut GameRng,
) -> Option<[[Option<ScanCell>; 3]; 3]> {
    if !subsystems.sensor_usable() {
        return None;
    }
    let mut grid = [[None; 3]; 3];
    for (row, dy) in (-1..=1).enumerate() {
        for (col, dx) in (-1..=1).enumerate() {
            let coord = SectorCoord::new(center.x + dx, center.y + dy);
            if !coord.in_bounds() {
                continue;
            }
            let sector = &sectors[sector_index(coord)];
            let mut enemies = sector.enemies.len();
            if subsystems.sensor_false_echoes() {
                match rng.gen_range(-1..=1) {
                    -1 => enemies = enemies.saturating_sub(1),
                    1 => enemies += 1,
                    _ => {}
                }
            }
            grid[row][col] = Some(ScanCell {
                coord,
                enemies,
                stronghold: sector.has_live_stronghold(),
            });
        }
    }
    Some(grid)
}
