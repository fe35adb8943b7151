use tracing::info;

use crate::models::errors::GameResult;

use super::Galaxy;

impl Galaxy {
    /// Encode the whole galaxy (grid, difficulty table, seed, counters) as one opaque blob.
    pub fn save(&self) -> GameResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Replace the in-memory galaxy with a saved one. On error the current
    /// galaxy is left untouched.
    pub fn load(&mut self, blob: &[u8]) -> GameResult<()> {
        let loaded: Galaxy = bincode::deserialize(blob)?;
        *self = loaded;
        info!(seed = self.seed, enemies = self.enemy_count(), "galaxy loaded");
        Ok(())
    }
}
