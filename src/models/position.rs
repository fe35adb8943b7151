use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

use super::constants::{GALAXY_SIZE, SECTOR_SCALE};

/// A position within the 16x16 galaxy grid.
/// Values range 0-15. X increases left-to-right, Y increases top-to-bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectorCoord {
    pub x: i32,
    pub y: i32,
}

impl SectorCoord {
    pub fn new(x: i32, y: i32) -> Self {
        SectorCoord { x, y }
    }

    pub fn in_bounds(&self) -> bool {
        (0..GALAXY_SIZE as i32).contains(&self.x) && (0..GALAXY_SIZE as i32).contains(&self.y)
    }

    pub fn manhattan(&self, other: SectorCoord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn chebyshev(&self, other: SectorCoord) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Sector containing a world-space position.
    pub fn from_world(pos: Vec3) -> Self {
        SectorCoord {
            x: (pos.x / SECTOR_SCALE).floor() as i32,
            y: (pos.z / SECTOR_SCALE).floor() as i32,
        }
    }

    /// World-space center of this sector, at zero height.
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.x as f64 + 0.5) * SECTOR_SCALE,
            0.0,
            (self.y as f64 + 0.5) * SECTOR_SCALE,
        )
    }

    /// World-space corner (minimum x and z) of this sector.
    pub fn origin(&self) -> Vec3 {
        Vec3::new(self.x as f64 * SECTOR_SCALE, 0.0, self.y as f64 * SECTOR_SCALE)
    }
}

/// World-space vector. Y is the vertical axis; sectors tile the x/z plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3 { x, y, z }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(&self, other: Vec3) -> f64 {
        (*self - other).length()
    }

    pub fn dot(&self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Shortest distance from this point to the segment `from..=to`.
    pub fn distance_to_segment(&self, from: Vec3, to: Vec3) -> f64 {
        let seg = to - from;
        let len_sq = seg.dot(seg);
        if len_sq <= f64::EPSILON {
            return self.distance(from);
        }
        let t = ((*self - from).dot(seg) / len_sq).clamp(0.0, 1.0);
        self.distance(from + seg * t)
    }

    /// Unit vector in the same direction, or zero for a zero-length vector.
    pub fn normalized(&self) -> Vec3 {
        let len = self.length();
        if len <= f64::EPSILON {
            Vec3::ZERO
        } else {
            *self * (1.0 / len)
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}
