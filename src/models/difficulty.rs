use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four mission difficulty tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Novice,
    #[default]
    Pilot,
    Warrior,
    Commander,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Novice,
        Difficulty::Pilot,
        Difficulty::Warrior,
        Difficulty::Commander,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Novice => "NOVICE",
            Difficulty::Pilot => "PILOT",
            Difficulty::Warrior => "WARRIOR",
            Difficulty::Commander => "COMMANDER",
        }
    }

    /// Look up the immutable tuning table for this tier.
    pub fn config(&self) -> DifficultyConfig {
        match self {
            Difficulty::Novice => DifficultyConfig {
                difficulty: *self,
                enemy_count: 12,
                stronghold_count: 4,
                fighter_ratio: 0.60,
                cruiser_ratio: 0.30,
                shield_effectiveness: 1.00,
                system_damage_chance: 0.15,
                aggression_multiplier: 0.50,
                speed_multiplier: 0.70,
                attack_rate_multiplier: 0.50,
                accuracy_multiplier: 0.50,
            },
            Difficulty::Pilot => DifficultyConfig {
                difficulty: *self,
                enemy_count: 20,
                stronghold_count: 4,
                fighter_ratio: 0.50,
                cruiser_ratio: 0.35,
                shield_effectiveness: 0.50,
                system_damage_chance: 0.25,
                aggression_multiplier: 0.75,
                speed_multiplier: 0.85,
                attack_rate_multiplier: 0.75,
                accuracy_multiplier: 0.70,
            },
            Difficulty::Warrior => DifficultyConfig {
                difficulty: *self,
                enemy_count: 28,
                stronghold_count: 3,
                fighter_ratio: 0.45,
                cruiser_ratio: 0.35,
                shield_effectiveness: 0.25,
                system_damage_chance: 0.35,
                aggression_multiplier: 1.00,
                speed_multiplier: 1.00,
                attack_rate_multiplier: 1.00,
                accuracy_multiplier: 0.85,
            },
            Difficulty::Commander => DifficultyConfig {
                difficulty: *self,
                enemy_count: 36,
                stronghold_count: 3,
                fighter_ratio: 0.40,
                cruiser_ratio: 0.35,
                shield_effectiveness: 0.10,
                system_damage_chance: 0.50,
                aggression_multiplier: 1.25,
                speed_multiplier: 1.20,
                attack_rate_multiplier: 1.30,
                accuracy_multiplier: 1.00,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "novice" => Ok(Difficulty::Novice),
            "pilot" => Ok(Difficulty::Pilot),
            "warrior" => Ok(Difficulty::Warrior),
            "commander" => Ok(Difficulty::Commander),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

/// Tuning values for one difficulty tier. Loaded once at mission start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub difficulty: Difficulty,
    pub enemy_count: usize,
    pub stronghold_count: usize,
    pub fighter_ratio: f64,
    pub cruiser_ratio: f64,
    /// Chance that active shields absorb a hit outright.
    pub shield_effectiveness: f64,
    /// Chance that an unabsorbed hit damages a subsystem.
    pub system_damage_chance: f64,
    pub aggression_multiplier: f64,
    pub speed_multiplier: f64,
    pub attack_rate_multiplier: f64,
    pub accuracy_multiplier: f64,
}

impl DifficultyConfig {
    /// Split the enemy count into (fighters, cruisers, basestars).
    /// Basestars take the remainder so the three always sum to `enemy_count`.
    pub fn enemy_mix(&self) -> (usize, usize, usize) {
        let total = self.enemy_count as f64;
        let fighters = (total * self.fighter_ratio).floor() as usize;
        let cruisers = (total * self.cruiser_ratio).floor() as usize;
        let basestars = self.enemy_count - fighters - cruisers;
        (fighters, cruisers, basestars)
    }
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Difficulty::Pilot.config()
    }
}
