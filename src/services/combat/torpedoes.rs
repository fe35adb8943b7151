use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::constants::{
    LOCK_DEVIATION, MISFIRE_DEVIATION, TORPEDO_MAX_RANGE, TORPEDO_SPEED,
};
use crate::models::position::Vec3;
use crate::models::rng::GameRng;

use super::targeting::LockStatus;

/// Which tube fired: fore shoots along +z, aft along -z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Fore,
    Aft,
}

impl Direction {
    pub fn axis(&self) -> f64 {
        match self {
            Direction::Fore => 1.0,
            Direction::Aft => -1.0,
        }
    }
}

/// A photon torpedo in flight. Once inactive it never comes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub position: Vec3,
    pub velocity: Vec3,
    pub direction: Direction,
    pub distance_traveled: f64,
    pub active: bool,
}

impl Projectile {
    pub const SPEED: f64 = TORPEDO_SPEED;
    pub const MAX_RANGE: f64 = TORPEDO_MAX_RANGE;

    /// Move by `dt` seconds. Returns false once the torpedo has run past its
    /// maximum range (it is deactivated).
    pub fn advance(&mut self, dt: f64) -> bool {
        if !self.active {
            return false;
        }
        let step = self.velocity * dt;
        self.position = self.position + step;
        self.distance_traveled += step.length();
        if self.distance_traveled > Self::MAX_RANGE {
            self.active = false;
        }
        self.active
    }
}

/// Lateral spread as a fraction of torpedo speed: none with all three locks,
/// widest with none, plus a fixed misfire term from damaged tubes.
pub fn spread(lock: LockStatus, weapons_damaged: bool) -> f64 {
    let missing = 3 - lock.count() as i32;
    let mut deviation = LOCK_DEVIATION * missing as f64 / 3.0;
    if weapons_damaged {
        deviation += MISFIRE_DEVIATION;
    }
    deviation
}

/// Launch velocity for a torpedo: full speed along the tube axis, with a
/// random lateral perturbation scaled by `spread`.
pub fn launch_velocity(direction: Direction, spread: f64, rng: &mut GameRng) -> Vec3 {
    let forward = Vec3::new(0.0, 0.0, direction.axis() * TORPEDO_SPEED);
    if spread <= 0.0 {
        return forward;
    }
    let lateral = spread * TORPEDO_SPEED;
    Vec3::new(
        rng.gen_range(-1.0..=1.0) * lateral,
        rng.gen_range(-1.0..=1.0) * lateral,
        forward.z,
    )
}
