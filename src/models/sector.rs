use serde::{Deserialize, Serialize};

use super::enemy::HostileUnit;
use super::position::SectorCoord;
use super::stronghold::Stronghold;

/// One cell of the galaxy grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub coord: SectorCoord,
    /// Set on exactly one sector: the one the player is in.
    pub occupied: bool,
    pub enemies: Vec<HostileUnit>,
    pub stronghold: Option<Stronghold>,
    pub visited: bool,
}

impl Sector {
    pub fn new(coord: SectorCoord) -> Self {
        Sector {
            coord,
            occupied: false,
            enemies: Vec::new(),
            stronghold: None,
            visited: false,
        }
    }

    pub fn has_live_stronghold(&self) -> bool {
        self.stronghold.as_ref().is_some_and(|s| !s.destroyed)
    }
}
