use serde::{Deserialize, Serialize};

use super::difficulty::{Difficulty, DifficultyConfig};
use super::position::SectorCoord;
use super::ship::PlayerShip;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefeatReason {
    EnergyDepleted,
    StrongholdsLost,
    /// The host ended the mission without a victory.
    Abandoned,
}

impl DefeatReason {
    pub fn describe(&self) -> &'static str {
        match self {
            DefeatReason::EnergyDepleted => "SHIP ENERGY EXHAUSTED",
            DefeatReason::StrongholdsLost => "ALL STARBASES DESTROYED",
            DefeatReason::Abandoned => "MISSION ABORTED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionOutcome {
    Victory { score: u32 },
    Defeat { reason: DefeatReason },
}

/// The one mutable record of a mission: the player's ship, the clock and the score.
///
/// Created at mission start and replaced wholesale by the next mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub player: PlayerShip,
    pub difficulty: Difficulty,
    pub config: DifficultyConfig,
    /// Seconds of unpaused simulation.
    pub elapsed: f64,
    pub score: u32,
    active: bool,
    paused: bool,
    outcome: Option<MissionOutcome>,
}

impl GameState {
    pub fn new(difficulty: Difficulty, start: SectorCoord) -> Self {
        GameState {
            player: PlayerShip::new(start),
            difficulty,
            config: difficulty.config(),
            elapsed: 0.0,
            score: 0,
            active: true,
            paused: false,
            outcome: None,
        }
    }

    /// True until the mission ends. Pausing does not make a mission inactive.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Active and not paused: simulation ticks should run.
    pub fn is_running(&self) -> bool {
        self.active && !self.paused
    }

    pub fn outcome(&self) -> Option<MissionOutcome> {
        self.outcome
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.active {
            self.paused = paused;
        }
    }

    /// End the mission. Only the first call has any effect; returns whether it did.
    pub fn end(&mut self, outcome: MissionOutcome) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.paused = false;
        self.outcome = Some(outcome);
        true
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }
}
