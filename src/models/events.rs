//! Outbound notifications
//!
//! Components push events into an [`EventQueue`] while they tick; the host
//! drains the queue once per frame. Nothing calls back into the host.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::constants::Subsystem;
use super::enemy::{EnemyType, UnitId};
use super::game_state::MissionOutcome;
use super::position::SectorCoord;
use super::subsystems::SubsystemStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    MissionStarted { seed: u64 },
    MissionEnded { outcome: MissionOutcome },

    EnergyLow { energy: f64 },
    EnergyCritical { energy: f64 },
    EnergyWarningPulse { energy: f64, critical: bool },
    EnergyDepleted,
    ShieldsOffline,
    ComputerOffline,

    SubsystemDamaged { subsystem: Subsystem, status: SubsystemStatus },
    ShieldsAbsorbedHit,

    EnemyDestroyed { unit: UnitId, kind: EnemyType, sector: SectorCoord },
    PlayerFiredUpon { unit: UnitId, hit: bool },

    StrongholdUnderAttack { sector: SectorCoord },
    StrongholdAttackCancelled { sector: SectorCoord },
    StrongholdDestroyed { sector: SectorCoord, remaining: usize },
    DockingComplete { sector: SectorCoord },

    SquadronFormed { squadron: u32, leader: UnitId },
    SquadronLeaderChanged { squadron: u32, leader: UnitId },
    SquadronDisbanded { squadron: u32 },

    HyperspaceJump { from: SectorCoord, to: SectorCoord },
}

/// FIFO of events waiting for the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventQueue {
    events: VecDeque<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }

    pub fn extend<I: IntoIterator<Item = GameEvent>>(&mut self, events: I) {
        self.events.extend(events);
    }

    /// Take every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_order_and_empties() {
        let mut q = EventQueue::new();
        q.push(GameEvent::EnergyDepleted);
        q.push(GameEvent::ShieldsOffline);
        assert_eq!(q.len(), 2);
        assert_eq!(q.drain(), vec![GameEvent::EnergyDepleted, GameEvent::ShieldsOffline]);
        assert!(q.is_empty());
    }
}
