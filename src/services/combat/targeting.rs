use crate::models::constants::{LOCK_THRESHOLD, OPTIMAL_RANGE_MAX, OPTIMAL_RANGE_MIN};
use crate::models::enemy::{HostileUnit, UnitId};
use crate::models::position::Vec3;

/// Alignment between the player and a target. Each lock tightens the spread
/// of the next torpedo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockStatus {
    /// |dx| within tolerance
    pub horizontal: bool,
    /// |dy| within tolerance
    pub vertical: bool,
    /// Distance within the optimal band
    pub range: bool,
}

impl LockStatus {
    pub const NONE: LockStatus = LockStatus {
        horizontal: false,
        vertical: false,
        range: false,
    };

    pub const FULL: LockStatus = LockStatus {
        horizontal: true,
        vertical: true,
        range: true,
    };

    pub fn count(&self) -> u8 {
        self.horizontal as u8 + self.vertical as u8 + self.range as u8
    }

    pub fn is_full(&self) -> bool {
        self.count() == 3
    }
}

/// Compute which locks hold between `player` and `target`.
pub fn calculate_lock_status(player: Vec3, target: Vec3) -> LockStatus {
    let delta = target - player;
    let distance = delta.length();
    LockStatus {
        horizontal: delta.x.abs() <= LOCK_THRESHOLD,
        vertical: delta.y.abs() <= LOCK_THRESHOLD,
        range: (OPTIMAL_RANGE_MIN..=OPTIMAL_RANGE_MAX).contains(&distance),
    }
}

/// Closest hostile to `player` among `units`, with its lock status.
pub fn nearest_target(player: Vec3, units: &[HostileUnit]) -> Option<(UnitId, LockStatus)> {
    units
        .iter()
        .min_by(|a, b| {
            a.position
                .distance(player)
                .total_cmp(&b.position.distance(player))
        })
        .map(|u| (u.id, calculate_lock_status(player, u.position)))
}
